//! Layout: partitions a Frame's width into proportional columns and owns
//! focus traversal within them (spec §4.8).

use crate::canvas::Canvas;
use crate::driver::{Event, Key};
use crate::error::{StagecraftError, UpdateOutcome};
use crate::widget::{RequiredHeight, Widget};

/// Horizontal direction for arrow-key focus moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

pub struct Layout {
    /// Proportions, normalised to sum to 1.0.
    proportions: Vec<f64>,
    columns: Vec<Vec<Box<dyn Widget>>>,
    fill_frame: bool,
    live_col: i32,
    live_widget: i32,
}

impl Layout {
    pub fn new(proportions: Vec<f64>, fill_frame: bool) -> Self {
        let total: f64 = proportions.iter().sum();
        let normalised = if total > 0.0 {
            proportions.iter().map(|p| p / total).collect()
        } else {
            proportions
        };
        let n = normalised.len();
        Layout { proportions: normalised, columns: (0..n).map(|_| Vec::new()).collect(), fill_frame, live_col: -1, live_widget: -1 }
    }

    pub fn fill_frame(&self) -> bool {
        self.fill_frame
    }

    /// Append `widget` to `column`, enforcing the "at most one fill widget
    /// per column" invariant.
    pub fn add_widget(&mut self, column: usize, widget: Box<dyn Widget>) -> Result<(), StagecraftError> {
        let has_fill = self.columns[column].iter().any(|w| matches!(w.required_height(0, 1), RequiredHeight::FillColumn | RequiredHeight::FillFrame));
        let incoming_fill = matches!(widget.required_height(0, 1), RequiredHeight::FillColumn | RequiredHeight::FillFrame);
        if has_fill && incoming_fill {
            return Err(StagecraftError::Highlander("two fill widgets in one column"));
        }
        self.columns[column].push(widget);
        Ok(())
    }

    fn label_offset(&self, column: usize, column_width: i32) -> i32 {
        let max_label = self.columns[column].iter().filter_map(|w| w.label()).map(|l| l.len() as i32 + 1).max().unwrap_or(0);
        max_label.min(column_width / 3)
    }

    /// Two-pass fit: fixed heights first, then distribute the remainder to
    /// any fill-widget.
    pub fn fit(&mut self, x: i32, y: i32, frame_width: i32, available_height: i32) -> i32 {
        let mut max_used = 0;
        let mut cursor_x = x;
        for (ci, proportion) in self.proportions.clone().into_iter().enumerate() {
            let column_width = (frame_width as f64 * proportion).round() as i32;
            let offset = self.label_offset(ci, column_width);
            let mut fixed_total = 0;
            let mut fill_index = None;
            for (wi, widget) in self.columns[ci].iter().enumerate() {
                match widget.required_height(offset, column_width) {
                    RequiredHeight::Fixed(h) => fixed_total += h,
                    RequiredHeight::FillColumn | RequiredHeight::FillFrame => fill_index = Some(wi),
                }
            }
            let remainder = (available_height - fixed_total).max(0);
            let mut cursor_y = y;
            for (wi, widget) in self.columns[ci].iter_mut().enumerate() {
                let h = if Some(wi) == fill_index {
                    remainder
                } else {
                    match widget.required_height(offset, column_width) {
                        RequiredHeight::Fixed(h) => h,
                        _ => 1,
                    }
                };
                widget.set_geometry(crate::widget::Geometry { x: cursor_x + offset, y: cursor_y, w: (column_width - offset).max(0), h: h.max(1) });
                cursor_y += h.max(1);
            }
            max_used = max_used.max(cursor_y - y);
            cursor_x += column_width;
        }
        max_used
    }

    fn tab_stops(&self) -> Vec<(usize, usize)> {
        let mut stops = Vec::new();
        for (ci, col) in self.columns.iter().enumerate() {
            for (wi, w) in col.iter().enumerate() {
                if w.is_tab_stop() && !w.is_disabled() {
                    stops.push((ci, wi));
                }
            }
        }
        stops
    }

    pub fn focus_first(&mut self) -> bool {
        if let Some(&(ci, wi)) = self.tab_stops().first() {
            self.set_live(ci, wi);
            true
        } else {
            self.live_col = -1;
            self.live_widget = -1;
            false
        }
    }

    pub fn focus_last(&mut self) -> bool {
        if let Some(&(ci, wi)) = self.tab_stops().last() {
            self.set_live(ci, wi);
            true
        } else {
            self.live_col = -1;
            self.live_widget = -1;
            false
        }
    }

    fn set_live(&mut self, col: usize, widget: usize) {
        if self.live_col >= 0 {
            if let Some(w) = self.columns.get_mut(self.live_col as usize).and_then(|c| c.get_mut(self.live_widget as usize)) {
                w.on_blur();
            }
        }
        self.live_col = col as i32;
        self.live_widget = widget as i32;
        if let Some(w) = self.columns.get_mut(col).and_then(|c| c.get_mut(widget)) {
            w.on_focus();
        }
    }

    pub fn blur(&mut self) {
        if self.live_col >= 0 {
            if let Some(w) = self.columns.get_mut(self.live_col as usize).and_then(|c| c.get_mut(self.live_widget as usize)) {
                w.on_blur();
            }
        }
        self.live_col = -1;
        self.live_widget = -1;
    }

    pub fn has_focus(&self) -> bool {
        self.live_col >= 0
    }

    pub fn live_position(&self) -> (i32, i32) {
        (self.live_col, self.live_widget)
    }

    /// Move focus to the next (or previous) tab stop, cycling through every
    /// column in the layout (testable property 6).
    pub fn find_next(&mut self, direction: Direction) -> bool {
        let stops = self.tab_stops();
        if stops.is_empty() {
            return false;
        }
        let current = stops.iter().position(|&(c, w)| c as i32 == self.live_col && w as i32 == self.live_widget);
        let next_index = match (current, direction) {
            (None, Direction::Next) => 0,
            (None, Direction::Previous) => stops.len() - 1,
            (Some(i), Direction::Next) => (i + 1) % stops.len(),
            (Some(i), Direction::Previous) => (i + stops.len() - 1) % stops.len(),
        };
        let (ci, wi) = stops[next_index];
        self.set_live(ci, wi);
        true
    }

    fn anchor(&self, col: usize, widget: usize) -> (i32, i32) {
        let geo = self.columns[col][widget].geometry();
        (geo.x, geo.y)
    }

    /// Move focus to the geometrically nearest tab-stop in the given
    /// vertical/horizontal direction, by Euclidean distance between anchor
    /// points.
    pub fn find_nearest(&mut self, dx: i32, dy: i32) -> bool {
        if self.live_col < 0 {
            return self.focus_first();
        }
        let (ox, oy) = self.anchor(self.live_col as usize, self.live_widget as usize);
        let stops = self.tab_stops();
        let mut best: Option<(usize, usize, f64)> = None;
        for (ci, wi) in stops {
            if ci as i32 == self.live_col && wi as i32 == self.live_widget {
                continue;
            }
            let (cx, cy) = self.anchor(ci, wi);
            let (ddx, ddy) = (cx - ox, cy - oy);
            if dx != 0 && ddx.signum() != dx.signum() {
                continue;
            }
            if dy != 0 && ddy.signum() != dy.signum() {
                continue;
            }
            let dist = ((ddx * ddx + ddy * ddy) as f64).sqrt();
            if best.map(|(_, _, d)| dist < d).unwrap_or(true) {
                best = Some((ci, wi, dist));
            }
        }
        if let Some((ci, wi, _)) = best {
            self.set_live(ci, wi);
            true
        } else {
            false
        }
    }

    /// `(dx, dy)` an arrow key moves focus by, if the focused widget leaves
    /// it unconsumed.
    fn arrow_delta(event: Event) -> Option<(i32, i32)> {
        match event {
            Event::Keyboard(Key::Up) => Some((0, -1)),
            Event::Keyboard(Key::Down) => Some((0, 1)),
            Event::Keyboard(Key::Left) => Some((-1, 0)),
            Event::Keyboard(Key::Right) => Some((1, 0)),
            _ => None,
        }
    }

    pub fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Tab) => {
                self.find_next(Direction::Next);
                None
            }
            Event::Keyboard(Key::BackTab) => {
                self.find_next(Direction::Previous);
                None
            }
            _ => {
                let arrow = Self::arrow_delta(event);
                if self.live_col >= 0 {
                    if let Some(w) = self.columns.get_mut(self.live_col as usize).and_then(|c| c.get_mut(self.live_widget as usize)) {
                        let unconsumed = w.process_event(event);
                        return match (unconsumed, arrow) {
                            (None, _) => None,
                            (Some(ev), Some((dx, dy))) => {
                                if self.find_nearest(dx, dy) {
                                    None
                                } else {
                                    Some(ev)
                                }
                            }
                            (Some(ev), None) => Some(ev),
                        };
                    }
                }
                Some(event)
            }
        }
    }

    pub fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        for column in &mut self.columns {
            for widget in column {
                let outcome = widget.update(frame_no, canvas);
                if !outcome.is_continue() {
                    return outcome;
                }
            }
        }
        UpdateOutcome::Continue
    }

    pub fn for_each_widget_mut(&mut self, mut f: impl FnMut(&mut Box<dyn Widget>)) {
        for column in &mut self.columns {
            for widget in column {
                f(widget);
            }
        }
    }

    pub fn for_each_widget(&self, mut f: impl FnMut(&dyn Widget)) {
        for column in &self.columns {
            for widget in column {
                f(widget.as_ref());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::FieldValue;

    struct DummyTabStop {
        geo: crate::widget::Geometry,
    }

    impl Widget for DummyTabStop {
        fn set_value(&mut self, _value: FieldValue) {}
        fn geometry(&self) -> crate::widget::Geometry {
            self.geo
        }
        fn set_geometry(&mut self, geometry: crate::widget::Geometry) {
            self.geo = geometry;
        }
    }

    fn make_layout(n: usize) -> Layout {
        let mut layout = Layout::new(vec![1.0], false);
        for i in 0..n {
            layout.add_widget(0, Box::new(DummyTabStop { geo: crate::widget::Geometry { x: 0, y: i as i32, w: 10, h: 1 } })).unwrap();
        }
        layout
    }

    /// Testable property 6: repeated Tab from any starting tab-stop
    /// eventually visits every enabled tab-stop exactly once per cycle.
    #[test]
    fn tab_cycles_through_every_tab_stop_exactly_once() {
        for start in 0..4 {
            let mut layout = make_layout(4);
            for _ in 0..start {
                layout.find_next(Direction::Next);
            }
            let mut visited = std::collections::HashSet::new();
            for _ in 0..4 {
                layout.find_next(Direction::Next);
                visited.insert(layout.live_position());
            }
            assert_eq!(visited.len(), 4);
        }
    }

    #[test]
    fn down_arrow_moves_focus_to_the_nearest_widget_below() {
        let mut layout = make_layout(3);
        layout.focus_first();
        assert_eq!(layout.live_position(), (0, 0));
        let result = layout.process_event(Event::Keyboard(Key::Down));
        assert!(result.is_none());
        assert_eq!(layout.live_position(), (0, 1));
    }

    #[test]
    fn up_arrow_at_the_top_tab_stop_is_left_unconsumed() {
        let mut layout = make_layout(3);
        layout.focus_first();
        let result = layout.process_event(Event::Keyboard(Key::Up));
        assert_eq!(result, Some(Event::Keyboard(Key::Up)));
        assert_eq!(layout.live_position(), (0, 0));
    }

    #[test]
    fn two_fill_widgets_in_one_column_raise_highlander() {
        struct Fill {
            geo: crate::widget::Geometry,
        }
        impl Widget for Fill {
            fn set_value(&mut self, _value: FieldValue) {}
            fn geometry(&self) -> crate::widget::Geometry {
                self.geo
            }
            fn set_geometry(&mut self, geometry: crate::widget::Geometry) {
                self.geo = geometry;
            }
            fn required_height(&self, _label_offset: i32, _width: i32) -> RequiredHeight {
                RequiredHeight::FillColumn
            }
        }
        let mut layout = Layout::new(vec![1.0], false);
        layout.add_widget(0, Box::new(Fill { geo: Default::default() })).unwrap();
        let result = layout.add_widget(0, Box::new(Fill { geo: Default::default() }));
        assert!(result.is_err());
    }
}
