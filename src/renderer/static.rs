//! Static renderer: a fixed list of raw images, markup-parsed once and then
//! cycled (or selected by index) on each call (spec §4.4).

use crate::cell::StyleTriple;
use crate::renderer::{Image, Renderer};
use crate::styled_text::{Dialect, StyledText};

fn parse_markup_image(raw: &str, base_style: StyleTriple) -> Image {
    let mut lines = Vec::new();
    let mut style_map = Vec::new();
    for line in raw.split('\n') {
        let styled = StyledText::parse(line, Dialect::Markup, base_style);
        lines.push(styled.plain().to_string());
        style_map.push(styled.style_map().to_vec());
    }
    Image::new(lines, style_map)
}

/// Selects which pre-parsed frame `rendered_text` returns next.
pub enum FrameSelector {
    /// Cycle through frames in order, wrapping around.
    Cycle,
    /// Caller-supplied index function, e.g. driven by an external clock.
    Custom(Box<dyn FnMut(usize) -> usize>),
}

pub struct StaticRenderer {
    images: Vec<Image>,
    index: usize,
    selector: FrameSelector,
    max_width: u16,
    max_height: u16,
}

impl StaticRenderer {
    pub fn new(raw_images: Vec<String>, base_style: StyleTriple) -> Self {
        Self::with_selector(raw_images, base_style, FrameSelector::Cycle)
    }

    pub fn with_selector(raw_images: Vec<String>, base_style: StyleTriple, selector: FrameSelector) -> Self {
        let images: Vec<Image> = raw_images.iter().map(|raw| parse_markup_image(raw, base_style)).collect();
        let max_width = images.iter().map(|i| i.width()).max().unwrap_or(0) as u16;
        let max_height = images.iter().map(|i| i.height()).max().unwrap_or(0) as u16;
        StaticRenderer { images, index: 0, selector, max_width, max_height }
    }

    pub fn frame_count(&self) -> usize {
        self.images.len()
    }
}

impl Renderer for StaticRenderer {
    fn max_width(&self) -> u16 {
        self.max_width
    }

    fn max_height(&self) -> u16 {
        self.max_height
    }

    fn rendered_text(&mut self) -> Image {
        if self.images.is_empty() {
            return Image::default();
        }
        let frame = match &mut self.selector {
            FrameSelector::Cycle => {
                let i = self.index % self.images.len();
                self.index += 1;
                i
            }
            FrameSelector::Custom(f) => f(self.index) % self.images.len(),
        };
        self.images[frame].clone()
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(self.images.clone().into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_through_frames_in_order() {
        let mut r = StaticRenderer::new(vec!["a".into(), "b".into()], StyleTriple::default());
        assert_eq!(r.rendered_text().lines, vec!["a".to_string()]);
        assert_eq!(r.rendered_text().lines, vec!["b".to_string()]);
        assert_eq!(r.rendered_text().lines, vec!["a".to_string()]);
    }

    #[test]
    fn parses_markup_once_per_frame() {
        let mut r = StaticRenderer::new(vec!["${1}hi".into()], StyleTriple::default());
        let image = r.rendered_text();
        assert_eq!(image.lines[0], "hi");
        assert_eq!(image.style_map[0][0].fg, crate::cell::Colour::Indexed(1));
    }
}
