//! Print: draws a renderer's current image at a fixed position, advancing
//! no faster than `1/speed` frames (spec §4.5).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::effect::Effect;
use crate::error::UpdateOutcome;
use crate::renderer::Renderer;

pub struct Print {
    renderer: Box<dyn Renderer>,
    x: i32,
    y: i32,
    speed: u64,
    stop_frame: u64,
    clear: bool,
}

impl Print {
    pub fn new(renderer: Box<dyn Renderer>, x: i32, y: i32, speed: u64, stop_frame: u64, clear: bool) -> Self {
        Print { renderer, x, y, speed: speed.max(1), stop_frame, clear }
    }
}

impl Effect for Print {
    fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let image = self.renderer.rendered_text();
        for (row, (line, styles)) in image.lines.iter().zip(image.style_map.iter()).enumerate() {
            canvas.paint(line, self.x, self.y + row as i32, Colour::Default, Attr::NORMAL, Colour::Default, Some(styles));
        }
        if self.clear && self.stop_frame != 0 && frame_no + 1 >= self.stop_frame {
            let (w, h) = (image.width() as i32, image.height() as i32);
            canvas.clear_buffer(Colour::Default, Attr::NORMAL, Colour::Default, self.x, self.y, w, h);
        }
        UpdateOutcome::Continue
    }

    fn stop_frame(&self) -> u64 {
        self.stop_frame
    }

    fn frame_update_count(&self) -> u64 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StyleTriple;
    use crate::renderer::r#static::StaticRenderer;

    #[test]
    fn paints_renderer_output_at_anchor() {
        let renderer = StaticRenderer::new(vec!["hi".into()], StyleTriple::default());
        let mut print = Print::new(Box::new(renderer), 2, 1, 1, 0, false);
        let mut canvas = Canvas::new(10, 5, 5, true);
        print.update(0, &mut canvas);
        let cell = canvas.get_from(2, 1);
        assert_eq!(cell.ch, 'h');
    }
}
