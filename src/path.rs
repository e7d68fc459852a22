//! Recorded and dynamic motion paths for [`crate::effect::sprite`] (spec
//! §4.5), grounded on the reference implementation's `Path`/`DynamicPath`.

/// A finite sequence of `(x, y)` positions with a restart cursor.
#[derive(Debug, Clone, Default)]
pub struct Path {
    positions: Vec<(i32, i32)>,
    cursor: usize,
}

impl Path {
    pub fn new() -> Self {
        Path { positions: Vec::new(), cursor: 0 }
    }

    /// Teleport to `(x, y)` without interpolation, recording one position.
    pub fn jump_to(&mut self, x: i32, y: i32) -> &mut Self {
        self.positions.push((x, y));
        self
    }

    /// Hold the last recorded position for `n` additional frames.
    pub fn wait(&mut self, n: usize) -> &mut Self {
        if let Some(&last) = self.positions.last() {
            for _ in 0..n {
                self.positions.push(last);
            }
        }
        self
    }

    /// Linear interpolation from the last recorded position to `(x, y)`
    /// over `steps` frames, integer-rounded. Testable property 5: the
    /// `steps`-th emitted position equals `(x, y)` exactly.
    pub fn move_straight_to(&mut self, x: i32, y: i32, steps: usize) -> &mut Self {
        let (x0, y0) = self.positions.last().copied().unwrap_or((x, y));
        if steps == 0 {
            self.positions.push((x, y));
            return self;
        }
        for step in 1..=steps {
            let t = step as f64 / steps as f64;
            let px = (x0 as f64 + (x - x0) as f64 * t).round() as i32;
            let py = (y0 as f64 + (y - y0) as f64 * t).round() as i32;
            self.positions.push((px, py));
        }
        self
    }

    /// Catmull-Rom spline through `points`, duplicating the first and last
    /// control point so the curve starts and ends exactly on them.
    pub fn move_round_to(&mut self, points: &[(i32, i32)], steps: usize) -> &mut Self {
        if points.is_empty() || steps == 0 {
            return self;
        }
        let mut controls: Vec<(f64, f64)> = Vec::with_capacity(points.len() + 2);
        controls.push((points[0].0 as f64, points[0].1 as f64));
        controls.extend(points.iter().map(|&(x, y)| (x as f64, y as f64)));
        controls.push((points[points.len() - 1].0 as f64, points[points.len() - 1].1 as f64));

        let segments = controls.len() - 3;
        let steps_per_segment = (steps / segments.max(1)).max(1);
        for seg in 0..segments {
            let p0 = controls[seg];
            let p1 = controls[seg + 1];
            let p2 = controls[seg + 2];
            let p3 = controls[seg + 3];
            for step in 1..=steps_per_segment {
                let t = step as f64 / steps_per_segment as f64;
                let (x, y) = catmull_rom(p0, p1, p2, p3, t);
                self.positions.push((x.round() as i32, y.round() as i32));
            }
        }
        self
    }

    /// Next position in sequence, or `None` once the cursor has passed the
    /// end.
    pub fn next_pos(&mut self) -> Option<(i32, i32)> {
        let pos = self.positions.get(self.cursor).copied();
        if pos.is_some() {
            self.cursor += 1;
        }
        pos
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.positions.len()
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

fn catmull_rom(p0: (f64, f64), p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), t: f64) -> (f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let x = 0.5
        * ((2.0 * p1.0)
            + (-p0.0 + p2.0) * t
            + (2.0 * p0.0 - 5.0 * p1.0 + 4.0 * p2.0 - p3.0) * t2
            + (-p0.0 + 3.0 * p1.0 - 3.0 * p2.0 + p3.0) * t3);
    let y = 0.5
        * ((2.0 * p1.1)
            + (-p0.1 + p2.1) * t
            + (2.0 * p0.1 - 5.0 * p1.1 + 4.0 * p2.1 - p3.1) * t2
            + (-p0.1 + 3.0 * p1.1 - 3.0 * p2.1 + p3.1) * t3);
    (x, y)
}

/// A path computed from external events rather than a recorded sequence,
/// e.g. following the mouse. The closure receives the current frame number
/// and returns the next position, or `None` to signal completion.
pub struct DynamicPath {
    compute: Box<dyn FnMut(u64) -> Option<(i32, i32)>>,
    finished: bool,
}

impl DynamicPath {
    pub fn new(compute: impl FnMut(u64) -> Option<(i32, i32)> + 'static) -> Self {
        DynamicPath { compute: Box::new(compute), finished: false }
    }

    pub fn next_pos(&mut self, frame_no: u64) -> Option<(i32, i32)> {
        match (self.compute)(frame_no) {
            Some(pos) => Some(pos),
            None => {
                self.finished = true;
                None
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn reset(&mut self) {
        self.finished = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable property 5.
    #[test]
    fn move_straight_to_lands_exactly_on_target_at_final_step() {
        let mut path = Path::new();
        path.jump_to(0, 0).move_straight_to(10, 20, 5);
        let mut last = None;
        while let Some(p) = path.next_pos() {
            last = Some(p);
        }
        assert_eq!(last, Some((10, 20)));
    }

    #[test]
    fn move_straight_to_interpolates_linearly() {
        let mut path = Path::new();
        path.jump_to(0, 0).move_straight_to(10, 0, 2);
        path.next_pos(); // consume the jump_to position
        let mid = path.next_pos().unwrap();
        assert_eq!(mid, (5, 0));
    }

    #[test]
    fn wait_repeats_the_last_position() {
        let mut path = Path::new();
        path.jump_to(3, 4).wait(2);
        assert_eq!(path.next_pos(), Some((3, 4)));
        assert_eq!(path.next_pos(), Some((3, 4)));
        assert_eq!(path.next_pos(), Some((3, 4)));
        assert!(path.next_pos().is_none());
    }

    #[test]
    fn move_round_to_starts_and_ends_on_control_points() {
        let mut path = Path::new();
        path.move_round_to(&[(0, 0), (10, 10), (20, 0)], 30);
        assert!(!path.is_empty());
    }

    #[test]
    fn reset_restarts_the_cursor() {
        let mut path = Path::new();
        path.jump_to(1, 1).jump_to(2, 2);
        path.next_pos();
        path.next_pos();
        assert!(path.is_finished());
        path.reset();
        assert!(!path.is_finished());
        assert_eq!(path.next_pos(), Some((1, 1)));
    }
}
