//! Mirage: randomly reveals roughly 15% of the non-space characters of a
//! renderer's image on every tick, building up a "materialising" effect
//! (spec §4.5).

use crate::canvas::Canvas;
use crate::effect::Effect;
use crate::error::UpdateOutcome;
use crate::renderer::Renderer;
use crate::rng;

pub struct Mirage {
    renderer: Box<dyn Renderer>,
    x: i32,
    y: i32,
    revealed: Vec<Vec<bool>>,
}

impl Mirage {
    pub fn new(renderer: Box<dyn Renderer>, x: i32, y: i32) -> Self {
        Mirage { renderer, x, y, revealed: Vec::new() }
    }
}

impl Effect for Mirage {
    fn reset(&mut self) {
        self.revealed.clear();
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let image = self.renderer.rendered_text();
        if self.revealed.len() != image.lines.len() {
            self.revealed = image.lines.iter().map(|l| vec![false; l.chars().count()]).collect();
        }
        for (row, (line, styles)) in image.lines.iter().zip(image.style_map.iter()).enumerate() {
            for (col, (ch, style)) in line.chars().zip(styles.iter()).enumerate() {
                if ch == ' ' {
                    continue;
                }
                if !self.revealed[row][col] && rng::gen_bool(0.15) {
                    self.revealed[row][col] = true;
                }
                if self.revealed[row][col] {
                    canvas.print_at(&ch.to_string(), self.x + col as i32, self.y + row as i32, style.fg, style.attr, style.bg, false);
                }
            }
        }
        UpdateOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StyleTriple;
    use crate::renderer::r#static::StaticRenderer;

    #[test]
    fn reveals_characters_over_repeated_ticks() {
        rng::seed(1);
        let renderer = StaticRenderer::new(vec!["hello world".into()], StyleTriple::default());
        let mut mirage = Mirage::new(Box::new(renderer), 0, 0);
        let mut canvas = Canvas::new(20, 3, 3, true);
        for frame in 0..50 {
            mirage.update(frame, &mut canvas);
        }
        let revealed_count = mirage.revealed[0].iter().filter(|&&r| r).count();
        assert!(revealed_count > 0);
    }
}
