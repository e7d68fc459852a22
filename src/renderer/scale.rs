//! Scale: a single-line ruler renderer showing a moving window over a
//! numeric range, used as a lightweight axis/progress indicator (spec §4.4
//! supplemented features).

use crate::cell::StyleTriple;
use crate::renderer::{Image, Renderer};

pub struct Scale {
    width: u16,
    scale: f64,
    position: f64,
}

impl Scale {
    pub fn new(width: u16, scale: f64) -> Self {
        Scale { width, scale, position: 0.0 }
    }

    pub fn set_position(&mut self, position: f64) {
        self.position = position;
    }

    fn frame(&self) -> Image {
        let w = self.width as usize;
        let marker = ((self.position / self.scale).clamp(0.0, 1.0) * (w - 1) as f64).round() as usize;
        let mut line: Vec<char> = "-".repeat(w).chars().collect();
        if let Some(slot) = line.get_mut(marker) {
            *slot = '^';
        }
        Image::plain(vec![line.into_iter().collect()], StyleTriple::default())
    }
}

impl Renderer for Scale {
    fn max_width(&self) -> u16 {
        self.width
    }

    fn max_height(&self) -> u16 {
        1
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

    #[test]
    fn marker_moves_with_position() {
        let mut scale = Scale::new(10, 100.0);
        scale.set_position(0.0);
        let start = scale.rendered_text();
        scale.set_position(100.0);
        let end = scale.rendered_text();
        assert_ne!(start.lines[0].find('^'), end.lines[0].find('^'));
    }
}
