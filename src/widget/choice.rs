//! Selection widgets: CheckBox, RadioButtons, ListBox,
//! MultiColumnListBox, DropdownList (spec §4.8).

use std::time::{Duration, Instant};

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::driver::{Event, Key};
use crate::error::UpdateOutcome;
use crate::widget::scrollbar::ScrollBar;
use crate::widget::{FieldValue, Geometry, RequiredHeight, Widget};

pub struct CheckBox {
    name: String,
    label: Option<String>,
    checked: bool,
    geometry: Geometry,
}

impl CheckBox {
    pub fn new(name: impl Into<String>, label: Option<String>) -> Self {
        CheckBox { name: name.into(), label, checked: false, geometry: Geometry::default() }
    }
}

impl Widget for CheckBox {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn value(&self) -> FieldValue {
        FieldValue::Bool(self.checked)
    }

    fn set_value(&mut self, value: FieldValue) {
        self.checked = value.as_bool();
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let glyph = if self.checked { "[X]" } else { "[ ]" };
        canvas.print_at(glyph, self.geometry.x, self.geometry.y, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Char(' ')) | Event::Keyboard(Key::Enter) => {
                self.checked = !self.checked;
                None
            }
            Event::Mouse { .. } if self.is_mouse_over(event, false, 0) => {
                self.checked = !self.checked;
                None
            }
            _ => Some(event),
        }
    }
}

pub struct RadioButtons {
    name: String,
    options: Vec<String>,
    selected: usize,
    geometry: Geometry,
}

impl RadioButtons {
    pub fn new(name: impl Into<String>, options: Vec<String>) -> Self {
        RadioButtons { name: name.into(), options, selected: 0, geometry: Geometry::default() }
    }
}

impl Widget for RadioButtons {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn value(&self) -> FieldValue {
        self.options.get(self.selected).map(|s| FieldValue::Text(s.clone())).unwrap_or(FieldValue::None)
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            if let Some(idx) = self.options.iter().position(|o| o == &text) {
                self.selected = idx;
            }
        }
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        for (row, option) in self.options.iter().enumerate() {
            let glyph = if row == self.selected { "(*)" } else { "( )" };
            canvas.print_at(&format!("{glyph} {option}"), self.geometry.x, self.geometry.y + row as i32, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        }
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Up) => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Event::Keyboard(Key::Down) => {
                self.selected = (self.selected + 1).min(self.options.len().saturating_sub(1));
                None
            }
            _ => Some(event),
        }
    }
}

/// A single-selection list with vertical scroll and incremental type-ahead
/// search that resets after a second of inactivity.
pub struct ListBox {
    name: String,
    items: Vec<(String, String)>,
    selected: usize,
    top: usize,
    centre: bool,
    search: String,
    last_key_at: Option<Instant>,
    validator: Option<Box<dyn Fn(&str) -> bool>>,
    geometry: Geometry,
}

impl ListBox {
    pub fn new(name: impl Into<String>, items: Vec<(String, String)>, centre: bool) -> Self {
        ListBox { name: name.into(), items, selected: 0, top: 0, centre, search: String::new(), last_key_at: None, validator: None, geometry: Geometry::default() }
    }

    pub fn with_validator(mut self, validator: Box<dyn Fn(&str) -> bool>) -> Self {
        self.validator = Some(validator);
        self
    }

    fn clamp_view(&mut self) {
        let height = self.geometry.h.max(1) as usize;
        if self.centre {
            self.top = self.selected.saturating_sub(height / 2);
        } else if self.selected < self.top {
            self.top = self.selected;
        } else if self.selected >= self.top + height {
            self.top = self.selected + 1 - height;
        }
    }

    fn type_ahead(&mut self, c: char) {
        let now = Instant::now();
        let expired = self.last_key_at.map(|t| now.duration_since(t) > Duration::from_secs(1)).unwrap_or(true);
        if expired {
            self.search.clear();
        }
        self.search.push(c.to_ascii_lowercase());
        self.last_key_at = Some(now);
        if let Some(idx) = self.items.iter().position(|(label, _)| label.to_lowercase().starts_with(&self.search)) {
            self.selected = idx;
            self.clamp_view();
        }
    }
}

impl Widget for ListBox {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn value(&self) -> FieldValue {
        self.items.get(self.selected).map(|(_, v)| FieldValue::Text(v.clone())).unwrap_or(FieldValue::None)
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            if let Some(idx) = self.items.iter().position(|(_, v)| v == &text) {
                self.selected = idx;
            }
        }
    }

    fn is_valid(&self) -> bool {
        self.validator.as_ref().map(|v| self.items.get(self.selected).map(|(_, val)| v(val)).unwrap_or(false)).unwrap_or(true)
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn required_height(&self, _label_offset: i32, _width: i32) -> RequiredHeight {
        RequiredHeight::FillColumn
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let height = self.geometry.h.max(1) as usize;
        for (row, (label, _)) in self.items.iter().skip(self.top).take(height).enumerate() {
            let absolute = self.top + row;
            let (fg, bg) = if absolute == self.selected { (Colour::BLACK, Colour::WHITE) } else { (Colour::WHITE, Colour::Default) };
            canvas.print_at(label, self.geometry.x, self.geometry.y + row as i32, fg, Attr::NORMAL, bg, false);
        }
        if self.items.len() > height {
            let bar = ScrollBar::new(self.geometry.x + self.geometry.w - 1, self.geometry.y, self.geometry.h);
            bar.draw(canvas, self.selected as f64 / (self.items.len() - 1).max(1) as f64);
        }
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Up) => {
                self.selected = self.selected.saturating_sub(1);
                self.clamp_view();
                None
            }
            Event::Keyboard(Key::Down) => {
                self.selected = (self.selected + 1).min(self.items.len().saturating_sub(1));
                self.clamp_view();
                None
            }
            Event::Keyboard(Key::Char(c)) => {
                self.type_ahead(c);
                None
            }
            _ => Some(event),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSpec {
    Absolute(i32),
    Percent(i32),
    Remaining,
}

/// Tabular list with absolute/percentage/remaining-width columns and a
/// titles row.
pub struct MultiColumnListBox {
    name: String,
    columns: Vec<ColumnSpec>,
    titles: Vec<String>,
    rows: Vec<(Vec<String>, String)>,
    selected: usize,
    top: usize,
    geometry: Geometry,
}

impl MultiColumnListBox {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSpec>, titles: Vec<String>, rows: Vec<(Vec<String>, String)>) -> Self {
        MultiColumnListBox { name: name.into(), columns, titles, rows, selected: 0, top: 0, geometry: Geometry::default() }
    }

    pub fn set_rows(&mut self, rows: Vec<(Vec<String>, String)>) {
        self.rows = rows;
        self.selected = 0;
        self.top = 0;
    }

    fn widths(&self, total: i32) -> Vec<i32> {
        let reserved: i32 = self.columns.iter().map(|c| match c {
            ColumnSpec::Absolute(n) => *n,
            ColumnSpec::Percent(p) => total * p / 100,
            ColumnSpec::Remaining => 0,
        }).sum();
        let remaining_count = self.columns.iter().filter(|c| matches!(c, ColumnSpec::Remaining)).count().max(1) as i32;
        let remaining_width = ((total - reserved).max(0)) / remaining_count;
        self.columns
            .iter()
            .map(|c| match c {
                ColumnSpec::Absolute(n) => *n,
                ColumnSpec::Percent(p) => total * p / 100,
                ColumnSpec::Remaining => remaining_width,
            })
            .collect()
    }

    fn truncate(text: &str, width: usize) -> String {
        if text.chars().count() <= width {
            text.to_string()
        } else if width <= 1 {
            text.chars().take(width).collect()
        } else {
            let mut s: String = text.chars().take(width - 1).collect();
            s.push('\u{2026}');
            s
        }
    }
}

impl Widget for MultiColumnListBox {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn value(&self) -> FieldValue {
        self.rows.get(self.selected).map(|(_, v)| FieldValue::Text(v.clone())).unwrap_or(FieldValue::None)
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            if let Some(idx) = self.rows.iter().position(|(_, v)| v == &text) {
                self.selected = idx;
            }
        }
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn required_height(&self, _label_offset: i32, _width: i32) -> RequiredHeight {
        RequiredHeight::FillColumn
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let widths = self.widths(self.geometry.w);
        let mut x = self.geometry.x;
        for (title, width) in self.titles.iter().zip(&widths) {
            canvas.print_at(&Self::truncate(title, *width as usize), x, self.geometry.y, Colour::YELLOW, Attr::BOLD, Colour::Default, false);
            x += width;
        }
        let height = (self.geometry.h - 1).max(0) as usize;
        for (row, (cells, _)) in self.rows.iter().skip(self.top).take(height).enumerate() {
            let absolute = self.top + row;
            let (fg, bg) = if absolute == self.selected { (Colour::BLACK, Colour::WHITE) } else { (Colour::WHITE, Colour::Default) };
            let mut x = self.geometry.x;
            for (cell, width) in cells.iter().zip(&widths) {
                canvas.print_at(&Self::truncate(cell, *width as usize), x, self.geometry.y + 1 + row as i32, fg, Attr::NORMAL, bg, false);
                x += width;
            }
        }
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Up) => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Event::Keyboard(Key::Down) => {
                self.selected = (self.selected + 1).min(self.rows.len().saturating_sub(1));
                None
            }
            _ => Some(event),
        }
    }
}

/// A Text-like field that spawns a temporary modal pop-up (a ListBox) and
/// writes the selection back on close.
pub struct DropdownList {
    name: String,
    options: Vec<(String, String)>,
    selected: usize,
    open: bool,
    geometry: Geometry,
}

impl DropdownList {
    pub fn new(name: impl Into<String>, options: Vec<(String, String)>) -> Self {
        DropdownList { name: name.into(), options, selected: 0, open: false, geometry: Geometry::default() }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Widget for DropdownList {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn value(&self) -> FieldValue {
        self.options.get(self.selected).map(|(_, v)| FieldValue::Text(v.clone())).unwrap_or(FieldValue::None)
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            if let Some(idx) = self.options.iter().position(|(_, v)| v == &text) {
                self.selected = idx;
            }
        }
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let label = self.options.get(self.selected).map(|(l, _)| l.as_str()).unwrap_or("");
        canvas.print_at(&format!("{label} \u{25BC}"), self.geometry.x, self.geometry.y, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Enter) => {
                self.open = !self.open;
                None
            }
            Event::Keyboard(Key::Down) if self.open => {
                self.selected = (self.selected + 1).min(self.options.len().saturating_sub(1));
                None
            }
            Event::Keyboard(Key::Up) if self.open => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            Event::Keyboard(Key::Escape) if self.open => {
                self.open = false;
                None
            }
            _ => Some(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_toggles_on_space() {
        let mut cb = CheckBox::new("c", None);
        cb.process_event(Event::Keyboard(Key::Char(' ')));
        assert_eq!(cb.value(), FieldValue::Bool(true));
    }

    #[test]
    fn radio_buttons_move_selection_with_arrows() {
        let mut rb = RadioButtons::new("r", vec!["a".into(), "b".into(), "c".into()]);
        rb.process_event(Event::Keyboard(Key::Down));
        assert_eq!(rb.value(), FieldValue::Text("b".to_string()));
    }

    #[test]
    fn multi_column_widths_split_remaining_space() {
        let mcl = MultiColumnListBox::new("m", vec![ColumnSpec::Absolute(5), ColumnSpec::Remaining], vec!["A".into(), "B".into()], vec![]);
        assert_eq!(mcl.widths(25), vec![5, 20]);
    }

    #[test]
    fn truncate_adds_ellipsis_when_text_exceeds_width() {
        assert_eq!(MultiColumnListBox::truncate("hello world", 6), "hello\u{2026}");
    }
}
