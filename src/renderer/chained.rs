//! Chained renderers: derive a pre-computed image list from a source
//! renderer once at construction, then behave like a static renderer (spec
//! §4.4).

use crate::cell::{Colour, StyleTriple};
use crate::renderer::{Image, Renderer};

/// Cycles the foreground colour of every non-space character through the
/// 7 standard ANSI colours, one image per colour.
pub struct Rainbow {
    images: Vec<Image>,
    index: usize,
}

impl Rainbow {
    pub fn new(source: &mut dyn Renderer) -> Self {
        let base = source.rendered_text();
        let images = (0..7u8)
            .map(|hue| {
                let style_map = base
                    .style_map
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|s| StyleTriple::new(Colour::Indexed(hue), s.attr, s.bg))
                            .collect()
                    })
                    .collect();
                Image::new(base.lines.clone(), style_map)
            })
            .collect();
        Rainbow { images, index: 0 }
    }
}

impl Renderer for Rainbow {
    fn max_width(&self) -> u16 {
        self.images.first().map(|i| i.width() as u16).unwrap_or(0)
    }

    fn max_height(&self) -> u16 {
        self.images.first().map(|i| i.height() as u16).unwrap_or(0)
    }

    fn rendered_text(&mut self) -> Image {
        if self.images.is_empty() {
            return Image::default();
        }
        let image = self.images[self.index % self.images.len()].clone();
        self.index += 1;
        image
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(self.images.clone().into_iter())
    }
}

/// Duplicates the source image rotated 180 degrees below itself, e.g. for a
/// reflected banner.
pub struct RotatedDuplicate {
    image: Image,
}

impl RotatedDuplicate {
    pub fn new(source: &mut dyn Renderer) -> Self {
        let base = source.rendered_text();
        let mut lines = base.lines.clone();
        let mut style_map = base.style_map.clone();
        for (line, styles) in base.lines.iter().rev().zip(base.style_map.iter().rev()) {
            lines.push(line.chars().rev().collect());
            style_map.push(styles.iter().rev().copied().collect());
        }
        RotatedDuplicate { image: Image::new(lines, style_map) }
    }
}

impl Renderer for RotatedDuplicate {
    fn max_width(&self) -> u16 {
        self.image.width() as u16
    }

    fn max_height(&self) -> u16 {
        self.image.height() as u16
    }

    fn rendered_text(&mut self) -> Image {
        self.image.clone()
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(std::iter::once(self.image.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::r#static::StaticRenderer;

    #[test]
    fn rainbow_produces_seven_colour_variants() {
        let mut source = StaticRenderer::new(vec!["hi".into()], StyleTriple::default());
        let mut rainbow = Rainbow::new(&mut source);
        let images = rainbow.images();
        assert_eq!(images.count(), 7);
    }

    #[test]
    fn rotated_duplicate_doubles_the_height() {
        let mut source = StaticRenderer::new(vec!["ab\ncd".into()], StyleTriple::default());
        let mut doubled = RotatedDuplicate::new(&mut source);
        let image = doubled.rendered_text();
        assert_eq!(image.lines.len(), 4);
        assert_eq!(image.lines[2], "dc");
        assert_eq!(image.lines[3], "ba");
    }
}
