//! Typewriter: wraps another renderer and reveals one additional visible
//! character of its current image on every call (spec §4.4).

use crate::renderer::{Image, Renderer};

pub struct Typewriter {
    inner: Box<dyn Renderer>,
    revealed: usize,
}

impl Typewriter {
    pub fn new(inner: Box<dyn Renderer>) -> Self {
        Typewriter { inner, revealed: 0 }
    }

    fn frame(&mut self) -> Image {
        let source = self.inner.rendered_text();
        self.revealed += 1;
        let mut seen = 0usize;
        let mut lines = Vec::with_capacity(source.lines.len());
        let mut style_map = Vec::with_capacity(source.style_map.len());
        for (line, styles) in source.lines.iter().zip(source.style_map.iter()) {
            let mut out_line = String::new();
            let mut out_styles = Vec::new();
            for (ch, style) in line.chars().zip(styles.iter()) {
                if ch != ' ' {
                    seen += 1;
                }
                if seen <= self.revealed || ch == ' ' {
                    out_line.push(ch);
                    out_styles.push(*style);
                } else {
                    out_line.push(' ');
                    out_styles.push(*style);
                }
            }
            lines.push(out_line);
            style_map.push(out_styles);
        }
        Image::new(lines, style_map)
    }
}

impl Renderer for Typewriter {
    fn max_width(&self) -> u16 {
        self.inner.max_width()
    }

    fn max_height(&self) -> u16 {
        self.inner.max_height()
    }

    fn rendered_text(&mut self) -> Image {
        self.frame()
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(std::iter::once(self.frame()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StyleTriple;
    use crate::renderer::r#static::StaticRenderer;

    #[test]
    fn reveals_one_more_character_each_call() {
        let mut tw = Typewriter::new(Box::new(StaticRenderer::new(vec!["hello".into()], StyleTriple::default())));
        let first = tw.rendered_text();
        assert_eq!(first.lines[0].trim_end(), "h");
        let second = tw.rendered_text();
        assert!(second.lines[0].starts_with("he"));
    }
}
