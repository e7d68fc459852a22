//! Scroll: nudges the Canvas viewport every `rate` ticks (spec §4.5,
//! testable scenario 5).

use crate::canvas::Canvas;
use crate::effect::Effect;
use crate::error::UpdateOutcome;

pub struct Scroll {
    rate: u64,
}

impl Scroll {
    pub fn new(rate: u64) -> Self {
        Scroll { rate: rate.max(1) }
    }
}

impl Effect for Scroll {
    fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        if frame_no % self.rate == 0 {
            canvas.scroll(1);
        }
        UpdateOutcome::Continue
    }

    fn frame_update_count(&self) -> u64 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable scenario 5, literal.
    #[test]
    fn scrolls_only_on_multiples_of_rate() {
        let mut canvas = Canvas::new(10, 5, 20, true);
        let mut scroll = Scroll::new(2);

        scroll.update(1, &mut canvas);
        assert_eq!(canvas.start_line(), 0);

        scroll.update(2, &mut canvas);
        assert_eq!(canvas.start_line(), 1);
    }
}
