//! A [`Canvas`] bound to a terminal [`Driver`]: flush, input polling, frame
//! clock metadata, palette discovery and resize propagation.

use std::collections::VecDeque;
use std::io;
use std::thread;
use std::time::{Duration, Instant};

use crate::canvas::Canvas;
use crate::driver::{Driver, Event};

/// The root [`Canvas`] attached to the terminal driver, plus palette
/// metadata and the input queue.
pub struct Screen<D: Driver> {
    canvas: Canvas,
    driver: D,
    pending: VecDeque<Event>,
    colours: u16,
    unicode_aware: bool,
}

impl<D: Driver> Screen<D> {
    pub fn new(driver: D) -> Self {
        let (w, h) = driver.size();
        let colours = driver.colour_count();
        let unicode_aware = driver.unicode_aware();
        let buffer_height = h.saturating_mul(2).max(h);
        Screen {
            canvas: Canvas::new(w, h, buffer_height, unicode_aware),
            driver,
            pending: VecDeque::new(),
            colours,
            unicode_aware,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn width(&self) -> u16 {
        self.canvas.width()
    }

    pub fn height(&self) -> u16 {
        self.canvas.height()
    }

    pub fn colours(&self) -> u16 {
        self.colours
    }

    pub fn unicode_aware(&self) -> bool {
        self.unicode_aware
    }

    /// Read-only palette metadata: number of colours and unicode-awareness.
    pub fn palette(&self) -> (u16, bool) {
        (self.colours, self.unicode_aware)
    }

    /// Poll the driver for new input and enqueue it; call before
    /// `get_key`/`get_event` to see the latest state.
    fn poll(&mut self) {
        for ev in self.driver.read_input() {
            self.pending.push_back(ev);
        }
    }

    /// Pop the next keyboard key, if any, discarding any mouse events ahead
    /// of it in the queue search (but not consuming them).
    pub fn get_key(&mut self) -> Option<i32> {
        self.poll();
        let idx = self
            .pending
            .iter()
            .position(|e| matches!(e, Event::Keyboard(_)))?;
        if let Some(Event::Keyboard(k)) = self.pending.remove(idx) {
            Some(k.code())
        } else {
            None
        }
    }

    /// Pop the next pending input event of any kind.
    pub fn get_event(&mut self) -> Option<Event> {
        self.poll();
        self.pending.pop_front()
    }

    /// Poll the driver and report whether input is already queued, without
    /// consuming it. Used by the player loop to decide whether a
    /// `reduce_cpu` tick should skip its sleep because a backlog is
    /// building up.
    pub fn has_pending_input(&mut self) -> bool {
        self.poll();
        !self.pending.is_empty()
    }

    pub fn has_resized(&mut self) -> bool {
        self.driver.resized_since_last_call()
    }

    /// Apply a resize to the underlying canvas, growing the scroll-back
    /// buffer to match.
    pub fn handle_resize(&mut self) {
        let (w, h) = self.driver.size();
        let buffer_height = h.saturating_mul(2).max(h);
        self.canvas.resize(w, h, buffer_height);
    }

    /// Sleep until input is pending or `timeout` elapses, whichever is
    /// first. The only other point in the API permitted to block (spec §5).
    pub fn wait_for_input(&mut self, timeout: Duration) {
        let deadline = Instant::now() + timeout;
        loop {
            self.poll();
            if !self.pending.is_empty() || Instant::now() >= deadline {
                return;
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    /// Zero the diff optimisation for the next flush, used when the driver
    /// was disturbed externally (e.g. another process wrote to the
    /// terminal).
    pub fn force_update(&mut self) {
        self.canvas.force_update();
    }

    /// Compute the diff since the last flush and write it to the driver.
    pub fn refresh(&mut self) -> io::Result<()> {
        let runs = self.canvas.refresh();
        if !runs.is_empty() {
            self.driver.write_cells(&runs)?;
        }
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.driver.set_cursor_visible(visible)
    }

    pub fn bell(&mut self) -> io::Result<()> {
        self.driver.bell()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CellRun;

    struct FakeDriver {
        events: VecDeque<Event>,
        size: (u16, u16),
        resized: bool,
        written: Vec<CellRun>,
    }

    impl Driver for FakeDriver {
        fn read_input(&mut self) -> Vec<Event> {
            self.events.drain(..).collect()
        }
        fn write_cells(&mut self, runs: &[CellRun]) -> io::Result<()> {
            self.written.extend_from_slice(runs);
            Ok(())
        }
        fn size(&self) -> (u16, u16) {
            self.size
        }
        fn resized_since_last_call(&mut self) -> bool {
            std::mem::take(&mut self.resized)
        }
        fn colour_count(&self) -> u16 {
            8
        }
        fn unicode_aware(&self) -> bool {
            true
        }
        fn set_cursor_visible(&mut self, _visible: bool) -> io::Result<()> {
            Ok(())
        }
        fn bell(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn get_key_pulls_keyboard_events_only() {
        use crate::driver::{Key, MouseButtons};
        let driver = FakeDriver {
            events: VecDeque::from(vec![
                Event::Mouse { x: 0, y: 0, buttons: MouseButtons::LEFT },
                Event::Keyboard(Key::Char('a')),
            ]),
            size: (80, 24),
            resized: false,
            written: Vec::new(),
        };
        let mut screen = Screen::new(driver);
        assert_eq!(screen.get_key(), Some(Key::Char('a').code()));
        // The mouse event is still pending.
        assert!(screen.get_event().is_some());
    }

    #[test]
    fn has_pending_input_reports_without_consuming() {
        use crate::driver::Key;
        let driver = FakeDriver {
            events: VecDeque::from(vec![Event::Keyboard(Key::Char('a'))]),
            size: (10, 4),
            resized: false,
            written: Vec::new(),
        };
        let mut screen = Screen::new(driver);
        assert!(screen.has_pending_input());
        // Still there afterwards; `has_pending_input` must not pop it.
        assert!(screen.get_event().is_some());
    }

    #[test]
    fn has_pending_input_is_false_with_nothing_queued() {
        let driver = FakeDriver {
            events: VecDeque::new(),
            size: (10, 4),
            resized: false,
            written: Vec::new(),
        };
        let mut screen = Screen::new(driver);
        assert!(!screen.has_pending_input());
    }

    #[test]
    fn refresh_forwards_diff_to_driver() {
        let driver = FakeDriver {
            events: VecDeque::new(),
            size: (10, 4),
            resized: false,
            written: Vec::new(),
        };
        let mut screen = Screen::new(driver);
        screen.canvas_mut().print_at(
            "hi",
            0,
            0,
            crate::cell::Colour::WHITE,
            crate::cell::Attr::NORMAL,
            crate::cell::Colour::BLACK,
            false,
        );
        screen.refresh().unwrap();
        assert!(!screen.driver.written.is_empty());
    }
}
