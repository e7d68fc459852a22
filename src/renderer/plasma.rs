//! Plasma: a sum-of-sinusoids colour field, the traditional demo-scene
//! effect (spec §4.4).

use crate::cell::{Attr, Colour, StyleTriple};
use crate::renderer::{Image, Renderer};

const GREYSCALE: &str = " .:-=+*#%@";

pub struct Plasma {
    width: u16,
    height: u16,
    time: f64,
    colours_256: bool,
}

impl Plasma {
    pub fn new(width: u16, height: u16, colours_256: bool) -> Self {
        Plasma { width, height, time: 0.0, colours_256 }
    }

    fn value_at(&self, x: f64, y: f64) -> f64 {
        let t = self.time;
        let a = (x / 16.0 + t).sin();
        let b = (y / 8.0 + t * 1.3).sin();
        let c = ((x + y) / 16.0 + t * 0.7).sin();
        let d = (((x * x + y * y) / 64.0).sqrt() - t).sin();
        (a + b + c + d + 4.0) / 8.0
    }

    fn colour_for(&self, v: f64) -> Colour {
        if self.colours_256 {
            Colour::Indexed((16.0 + v * 215.0).clamp(16.0, 231.0) as u8)
        } else {
            Colour::Indexed(((v * 7.0).round() as u8).min(7))
        }
    }

    fn frame(&mut self) -> Image {
        self.time += 0.1;
        let w = self.width as usize;
        let h = self.height as usize;
        let mut lines = Vec::with_capacity(h);
        let mut style_map = Vec::with_capacity(h);
        for y in 0..h {
            let mut line = String::with_capacity(w);
            let mut row_styles = Vec::with_capacity(w);
            for x in 0..w {
                let v = self.value_at(x as f64, y as f64).clamp(0.0, 1.0);
                let idx = (v * (GREYSCALE.len() - 1) as f64).round() as usize;
                line.push(GREYSCALE.as_bytes()[idx] as char);
                row_styles.push(StyleTriple::new(self.colour_for(v), Attr::NORMAL, Colour::BLACK));
            }
            lines.push(line);
            style_map.push(row_styles);
        }
        Image::new(lines, style_map)
    }
}

impl Renderer for Plasma {
    fn max_width(&self) -> u16 {
        self.width
    }

    fn max_height(&self) -> u16 {
        self.height
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
    fn advances_time_every_call_so_frames_differ() {
        let mut plasma = Plasma::new(20, 6, false);
        let a = plasma.rendered_text();
        let b = plasma.rendered_text();
        assert_ne!(a.lines, b.lines);
    }
}
