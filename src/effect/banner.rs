//! BannerText: animates a renderer horizontally across the Canvas once,
//! stopping when it has fully scrolled off (spec §4.5).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::effect::Effect;
use crate::error::UpdateOutcome;
use crate::renderer::Renderer;

pub struct BannerText {
    renderer: Box<dyn Renderer>,
    y: i32,
    canvas_width: i32,
    stop_frame: u64,
}

impl BannerText {
    pub fn new(renderer: Box<dyn Renderer>, y: i32, canvas_width: u16) -> Self {
        let text_width = renderer.max_width() as u64;
        let stop_frame = text_width + canvas_width as u64 + 1;
        BannerText { renderer, y, canvas_width: canvas_width as i32, stop_frame }
    }
}

impl Effect for BannerText {
    fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let image = self.renderer.rendered_text();
        let x = self.canvas_width - frame_no as i32;
        for (row, line) in image.lines.iter().enumerate() {
            canvas.print_at(line, x, self.y + row as i32, Colour::Default, Attr::NORMAL, Colour::Default, false);
        }
        UpdateOutcome::Continue
    }

    fn stop_frame(&self) -> u64 {
        self.stop_frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StyleTriple;
    use crate::renderer::r#static::StaticRenderer;

    #[test]
    fn stop_frame_accounts_for_text_and_canvas_width() {
        let renderer = StaticRenderer::new(vec!["hello".into()], StyleTriple::default());
        let banner = BannerText::new(Box::new(renderer), 0, 20);
        assert_eq!(banner.stop_frame(), 5 + 20 + 1);
    }
}
