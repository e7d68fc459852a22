//! Sprite: follows a [`Path`], picking a directional pose renderer from the
//! last few sampled positions and erasing its previous frame before
//! redrawing (spec §4.5).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::effect::Effect;
use crate::error::UpdateOutcome;
use crate::path::Path;
use crate::renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pose {
    Default,
    Left,
    Right,
    Up,
    Down,
}

pub struct Sprite {
    path: Path,
    renderers: Vec<(Pose, Box<dyn Renderer>)>,
    history: Vec<(i32, i32)>,
    last_drawn: Vec<(i32, i32)>,
}

impl Sprite {
    pub fn new(path: Path, renderers: Vec<(Pose, Box<dyn Renderer>)>) -> Self {
        Sprite { path, renderers, history: Vec::new(), last_drawn: Vec::new() }
    }

    fn pose_for(&self) -> Pose {
        if self.history.len() < 2 {
            return Pose::Default;
        }
        let (x0, y0) = self.history[self.history.len() - 2];
        let (x1, y1) = self.history[self.history.len() - 1];
        let (dx, dy) = (x1 - x0, y1 - y0);
        if dx.abs() > dy.abs() {
            if dx > 0 { Pose::Right } else if dx < 0 { Pose::Left } else { Pose::Default }
        } else if dy != 0 {
            if dy > 0 { Pose::Down } else { Pose::Up }
        } else {
            Pose::Default
        }
    }

    fn renderer_for(&mut self, pose: Pose) -> Option<&mut Box<dyn Renderer>> {
        self.renderers
            .iter_mut()
            .find(|(p, _)| *p == pose)
            .or_else(|| self.renderers.iter_mut().find(|(p, _)| *p == Pose::Default))
            .map(|(_, r)| r)
    }
}

impl Effect for Sprite {
    fn reset(&mut self) {
        self.path.reset();
        self.history.clear();
        self.last_drawn.clear();
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        for &(x, y) in &self.last_drawn {
            canvas.clear_buffer(Colour::Default, Attr::NORMAL, Colour::Default, x, y, 1, 1);
        }
        self.last_drawn.clear();

        let Some((x, y)) = self.path.next_pos() else {
            return UpdateOutcome::Continue;
        };
        self.history.push((x, y));
        if self.history.len() > 3 {
            self.history.remove(0);
        }

        let pose = self.pose_for();
        if let Some(renderer) = self.renderer_for(pose) {
            let image = renderer.rendered_text();
            for (row, line) in image.lines.iter().enumerate() {
                canvas.print_at(line, x, y + row as i32, Colour::Default, Attr::NORMAL, Colour::Default, true);
                self.last_drawn.push((x, y + row as i32));
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
    fn picks_right_pose_when_moving_rightward() {
        let mut path = Path::new();
        path.jump_to(0, 0).move_straight_to(5, 0, 5);
        let renderers: Vec<(Pose, Box<dyn Renderer>)> = vec![
            (Pose::Default, Box::new(StaticRenderer::new(vec!["o".into()], StyleTriple::default()))),
            (Pose::Right, Box::new(StaticRenderer::new(vec![">".into()], StyleTriple::default()))),
        ];
        let mut sprite = Sprite::new(path, renderers);
        let mut canvas = Canvas::new(10, 5, 5, true);
        sprite.update(0, &mut canvas);
        sprite.update(1, &mut canvas);
        assert_eq!(sprite.pose_for(), Pose::Right);
    }
}
