//! Shared scaffolding for dynamic renderers: a fixed-size scratch
//! [`Canvas`] that each call clears (optionally) and draws into, then
//! projects to an [`Image`] (spec §4.4).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::renderer::Image;

/// A scratch canvas dynamic renderers draw into every call. Not attached to
/// any driver; it exists purely to reuse the Canvas drawing primitives.
pub struct Scratch {
    canvas: Canvas,
}

impl Scratch {
    pub fn new(width: u16, height: u16) -> Self {
        Scratch { canvas: Canvas::new(width, height, height, true) }
    }

    pub fn canvas(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn clear(&mut self) {
        let (w, h) = (self.canvas.width() as i32, self.canvas.height() as i32);
        self.canvas.clear_buffer(Colour::Default, Attr::NORMAL, Colour::Default, 0, 0, w, h);
    }

    /// Project the current grid contents into an [`Image`] by reading every
    /// cell back out; used instead of `refresh()` since dynamic renderers
    /// have no "last flushed" concept of their own.
    pub fn snapshot(&self) -> Image {
        let (w, h) = (self.canvas.width(), self.canvas.height());
        let mut lines = Vec::with_capacity(h as usize);
        let mut style_map = Vec::with_capacity(h as usize);
        for y in 0..h {
            let mut line = String::new();
            let mut row_styles = Vec::with_capacity(w as usize);
            for x in 0..w {
                let cell = self.canvas.get_from(x as i32, y as i32);
                if cell.is_wide_continuation() {
                    continue;
                }
                line.push(cell.ch);
                row_styles.push(cell.style);
            }
            lines.push(line);
            style_map.push(row_styles);
        }
        Image::new(lines, style_map)
    }
}
