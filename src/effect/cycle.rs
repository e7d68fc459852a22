//! Cycle: centres a renderer's text on a row and rotates its colour index
//! every other frame (spec §4.5).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::effect::Effect;
use crate::error::UpdateOutcome;
use crate::renderer::Renderer;

pub struct Cycle {
    renderer: Box<dyn Renderer>,
    y: i32,
    colour_index: u8,
    tick: u64,
}

impl Cycle {
    pub fn new(renderer: Box<dyn Renderer>, y: i32) -> Self {
        Cycle { renderer, y, colour_index: 0, tick: 0 }
    }
}

impl Effect for Cycle {
    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        self.tick += 1;
        if self.tick % 2 == 0 {
            self.colour_index = (self.colour_index + 1) % 8;
        }
        let image = self.renderer.rendered_text();
        let width = canvas.width() as i32;
        for line in &image.lines {
            let text_len = line.chars().count() as i32;
            let x = ((width - text_len) / 2).max(0);
            canvas.print_at(line, x, self.y, Colour::Indexed(self.colour_index), Attr::NORMAL, Colour::Default, false);
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
    use crate::cell::StyleTriple;
    use crate::renderer::r#static::StaticRenderer;

    #[test]
    fn colour_index_advances_every_other_tick() {
        let renderer = StaticRenderer::new(vec!["hi".into()], StyleTriple::default());
        let mut cycle = Cycle::new(Box::new(renderer), 0);
        let mut canvas = Canvas::new(10, 3, 3, true);
        cycle.update(0, &mut canvas);
        assert_eq!(cycle.colour_index, 0);
        cycle.update(1, &mut canvas);
        assert_eq!(cycle.colour_index, 1);
    }
}
