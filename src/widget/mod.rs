//! The widget toolkit: Frame, Layout, ScrollBar and the concrete widgets
//! built on top of them (spec §4.7-§4.9).

pub mod basic;
pub mod choice;
pub mod filebrowser;
pub mod frame;
pub mod layout;
pub mod picker;
pub mod popup;
pub mod scrollbar;
pub mod text;

use crate::canvas::Canvas;
use crate::driver::Event;
use crate::error::UpdateOutcome;

/// The dynamically-typed value a widget reads and writes in a Frame's data
/// map. The reference implementation relies on Python's dynamic typing for
/// this; this enum is the typed equivalent.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    None,
    Bool(bool),
    Int(i64),
    Text(String),
    Lines(Vec<String>),
}

impl FieldValue {
    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }

    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::None => String::new(),
            _ => String::new(),
        }
    }

    pub fn as_lines(&self) -> Vec<String> {
        match self {
            FieldValue::Lines(lines) => lines.clone(),
            FieldValue::Text(s) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// Position and size of a widget within its owning Layout/Frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct Geometry {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// Height a widget requests from layout; `Fixed` is measured in rows,
/// `FillFrame`/`FillColumn` ask for whatever is left over (spec §4.8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredHeight {
    Fixed(i32),
    FillColumn,
    FillFrame,
}

/// Shared contract every concrete widget implements (spec §4.8 "Widget
/// base").
pub trait Widget {
    fn name(&self) -> Option<&str> {
        None
    }

    fn label(&self) -> Option<&str> {
        None
    }

    fn value(&self) -> FieldValue {
        FieldValue::None
    }

    fn set_value(&mut self, value: FieldValue);

    fn is_valid(&self) -> bool {
        true
    }

    fn is_tab_stop(&self) -> bool {
        true
    }

    fn is_disabled(&self) -> bool {
        false
    }

    fn geometry(&self) -> Geometry;

    fn set_geometry(&mut self, geometry: Geometry);

    fn reset(&mut self) {}

    fn update(&mut self, _frame_no: u64, _canvas: &mut Canvas) -> UpdateOutcome {
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        Some(event)
    }

    fn required_height(&self, _label_offset: i32, _width: i32) -> RequiredHeight {
        RequiredHeight::Fixed(1)
    }

    fn on_focus(&mut self) {}

    fn on_blur(&mut self) {}

    /// Standard hit-test: does `event` land inside this widget's box
    /// (optionally including the label column)?
    fn is_mouse_over(&self, event: Event, include_label: bool, label_offset: i32) -> bool {
        let Event::Mouse { x, y, .. } = event else { return false };
        let geo = self.geometry();
        let left = if include_label { geo.x - label_offset } else { geo.x };
        x >= left && x < geo.x + geo.w && y >= geo.y && y < geo.y + geo.h
    }
}
