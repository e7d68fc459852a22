//! ScrollBar: a 1-column track with a single cursor glyph, translating
//! mouse clicks into position-setter calls (spec §4.9).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::driver::Event;

pub struct ScrollBar {
    x: i32,
    y: i32,
    height: i32,
}

impl ScrollBar {
    pub fn new(x: i32, y: i32, height: i32) -> Self {
        ScrollBar { x, y, height }
    }

    /// Draw the track and cursor; `position` is the current viewport
    /// fraction in `0.0..=1.0`.
    pub fn draw(&self, canvas: &mut Canvas, position: f64) {
        for row in 0..self.height {
            canvas.print_at("\u{2502}", self.x, self.y + row, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        }
        let cursor_row = (position.clamp(0.0, 1.0) * (self.height - 1).max(0) as f64).round() as i32;
        canvas.print_at("\u{2588}", self.x, self.y + cursor_row, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
    }

    /// Translate a mouse click on the track into a new `0.0..=1.0` position,
    /// or `None` if the click missed the bar.
    pub fn hit_test(&self, event: Event) -> Option<f64> {
        let Event::Mouse { x, y, .. } = event else { return None };
        if x != self.x || y < self.y || y >= self.y + self.height || self.height <= 1 {
            return None;
        }
        Some((y - self.y) as f64 / (self.height - 1) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::MouseButtons;

    #[test]
    fn hit_test_maps_click_row_to_fraction() {
        let bar = ScrollBar::new(5, 0, 11);
        let event = Event::Mouse { x: 5, y: 10, buttons: MouseButtons::LEFT };
        assert_eq!(bar.hit_test(event), Some(1.0));
    }

    #[test]
    fn hit_test_rejects_clicks_outside_the_track_column() {
        let bar = ScrollBar::new(5, 0, 11);
        let event = Event::Mouse { x: 6, y: 5, buttons: MouseButtons::LEFT };
        assert_eq!(bar.hit_test(event), None);
    }
}
