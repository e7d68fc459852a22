//! Single- and multi-line text editors, plus the read-only viewer
//! (spec §4.8: Text, TextBox, ReadBox).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::driver::{Event, Key};
use crate::error::UpdateOutcome;
use crate::widget::{FieldValue, Geometry, RequiredHeight, Widget};

pub type Validator = Box<dyn Fn(&str) -> bool>;

pub struct Text {
    name: String,
    label: Option<String>,
    value: String,
    cursor_column: usize,
    start_column: usize,
    hide_char: Option<char>,
    max_length: Option<usize>,
    validator: Option<Validator>,
    readonly: bool,
    geometry: Geometry,
}

impl Text {
    pub fn new(name: impl Into<String>, label: Option<String>) -> Self {
        Text {
            name: name.into(),
            label,
            value: String::new(),
            cursor_column: 0,
            start_column: 0,
            hide_char: None,
            max_length: None,
            validator: None,
            readonly: false,
            geometry: Geometry::default(),
        }
    }

    pub fn with_hide_char(mut self, ch: char) -> Self {
        self.hide_char = Some(ch);
        self
    }

    pub fn with_max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    pub fn with_validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn set_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    fn display_value(&self) -> String {
        match self.hide_char {
            Some(ch) => ch.to_string().repeat(self.value.chars().count()),
            None => self.value.clone(),
        }
    }

    fn clamp_view(&mut self) {
        let width = self.geometry.w.max(1) as usize;
        if self.cursor_column < self.start_column {
            self.start_column = self.cursor_column;
        } else if self.cursor_column >= self.start_column + width {
            self.start_column = self.cursor_column + 1 - width;
        }
    }
}

impl Widget for Text {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(self.value.clone())
    }

    fn set_value(&mut self, value: FieldValue) {
        self.value = value.as_text();
        self.cursor_column = self.value.chars().count();
        self.start_column = 0;
    }

    fn is_valid(&self) -> bool {
        self.validator.as_ref().map(|v| v(&self.value)).unwrap_or(true)
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let width = self.geometry.w.max(1) as usize;
        let display: Vec<char> = self.display_value().chars().collect();
        let visible: String = display.iter().skip(self.start_column).take(width).collect();
        let fg = if self.is_valid() { Colour::WHITE } else { Colour::RED };
        canvas.print_at(&visible, self.geometry.x, self.geometry.y, fg, Attr::NORMAL, Colour::Default, false);
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        if self.readonly {
            return Some(event);
        }
        let Event::Keyboard(key) = event else { return Some(event) };
        let mut chars: Vec<char> = self.value.chars().collect();
        match key {
            Key::Left => {
                self.cursor_column = self.cursor_column.saturating_sub(1);
            }
            Key::Right => {
                self.cursor_column = (self.cursor_column + 1).min(chars.len());
            }
            Key::Home => {
                self.cursor_column = 0;
            }
            Key::End => {
                self.cursor_column = chars.len();
            }
            Key::Back => {
                if self.cursor_column > 0 {
                    chars.remove(self.cursor_column - 1);
                    self.cursor_column -= 1;
                    self.value = chars.into_iter().collect();
                }
            }
            Key::Delete => {
                if self.cursor_column < chars.len() {
                    chars.remove(self.cursor_column);
                    self.value = chars.into_iter().collect();
                }
            }
            Key::Char(c) => {
                if self.max_length.map(|m| chars.len() < m).unwrap_or(true) {
                    chars.insert(self.cursor_column, c);
                    self.cursor_column += 1;
                    self.value = chars.into_iter().collect();
                }
            }
            _ => return Some(event),
        }
        self.clamp_view();
        None
    }
}

/// Multi-line editor over a list of lines (spec §4.8 TextBox).
pub struct TextBox {
    name: String,
    lines: Vec<String>,
    line: usize,
    column: usize,
    start_line: usize,
    readonly: bool,
    geometry: Geometry,
}

impl TextBox {
    pub fn new(name: impl Into<String>) -> Self {
        TextBox { name: name.into(), lines: vec![String::new()], line: 0, column: 0, start_line: 0, readonly: false, geometry: Geometry::default() }
    }

    pub fn set_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    fn clamp_view(&mut self) {
        let height = self.geometry.h.max(1) as usize;
        if self.line < self.start_line {
            self.start_line = self.line;
        } else if self.line >= self.start_line + height {
            self.start_line = self.line + 1 - height;
        }
    }
}

impl Widget for TextBox {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn value(&self) -> FieldValue {
        FieldValue::Lines(self.lines.clone())
    }

    fn set_value(&mut self, value: FieldValue) {
        let lines = value.as_lines();
        self.lines = if lines.is_empty() { vec![String::new()] } else { lines };
        self.line = 0;
        self.column = 0;
        self.start_line = 0;
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
        for (row, text) in self.lines.iter().skip(self.start_line).take(height).enumerate() {
            canvas.print_at(text, self.geometry.x, self.geometry.y + row as i32, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        }
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        if self.readonly {
            return Some(event);
        }
        let Event::Keyboard(key) = event else { return Some(event) };
        match key {
            Key::Up => {
                self.line = self.line.saturating_sub(1);
            }
            Key::Down => {
                self.line = (self.line + 1).min(self.lines.len() - 1);
            }
            Key::PageUp => {
                self.line = self.line.saturating_sub(self.geometry.h.max(1) as usize);
            }
            Key::PageDown => {
                self.line = (self.line + self.geometry.h.max(1) as usize).min(self.lines.len() - 1);
            }
            Key::Enter => {
                let rest = self.lines[self.line].split_off(self.column);
                self.lines.insert(self.line + 1, rest);
                self.line += 1;
                self.column = 0;
            }
            Key::Back => {
                if self.column > 0 {
                    let mut chars: Vec<char> = self.lines[self.line].chars().collect();
                    chars.remove(self.column - 1);
                    self.lines[self.line] = chars.into_iter().collect();
                    self.column -= 1;
                } else if self.line > 0 {
                    let current = self.lines.remove(self.line);
                    self.line -= 1;
                    self.column = self.lines[self.line].chars().count();
                    self.lines[self.line].push_str(&current);
                }
            }
            Key::Char(c) => {
                let mut chars: Vec<char> = self.lines[self.line].chars().collect();
                chars.insert(self.column, c);
                self.lines[self.line] = chars.into_iter().collect();
                self.column += 1;
            }
            _ => return Some(event),
        }
        self.clamp_view();
        None
    }
}

/// Read-only viewer with line-wrap, internal scrolling and auto-scroll to
/// bottom (spec §4.8 ReadBox).
pub struct ReadBox {
    lines: Vec<String>,
    top: usize,
    follow_tail: bool,
    geometry: Geometry,
}

impl ReadBox {
    pub fn new(follow_tail: bool) -> Self {
        ReadBox { lines: Vec::new(), top: 0, follow_tail, geometry: Geometry::default() }
    }

    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        if self.follow_tail {
            self.scroll_to_bottom();
        }
    }

    fn scroll_to_bottom(&mut self) {
        let height = self.geometry.h.max(1) as usize;
        self.top = self.lines.len().saturating_sub(height);
    }
}

impl Widget for ReadBox {
    fn set_value(&mut self, value: FieldValue) {
        self.lines = value.as_lines();
    }

    fn value(&self) -> FieldValue {
        FieldValue::Lines(self.lines.clone())
    }

    fn is_tab_stop(&self) -> bool {
        false
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        if self.follow_tail {
            self.scroll_to_bottom();
        }
    }

    fn required_height(&self, _label_offset: i32, _width: i32) -> RequiredHeight {
        RequiredHeight::FillColumn
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let height = self.geometry.h.max(1) as usize;
        for (row, text) in self.lines.iter().skip(self.top).take(height).enumerate() {
            canvas.print_at(text, self.geometry.x, self.geometry.y + row as i32, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        }
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Up) => {
                self.top = self.top.saturating_sub(1);
                None
            }
            Event::Keyboard(Key::Down) => {
                self.top = (self.top + 1).min(self.lines.len().saturating_sub(1));
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
    fn text_insert_and_backspace_round_trip() {
        let mut text = Text::new("field", None);
        text.set_geometry(Geometry { x: 0, y: 0, w: 20, h: 1 });
        for c in "hi".chars() {
            text.process_event(Event::Keyboard(Key::Char(c)));
        }
        assert_eq!(text.value(), FieldValue::Text("hi".to_string()));
        text.process_event(Event::Keyboard(Key::Back));
        assert_eq!(text.value(), FieldValue::Text("h".to_string()));
    }

    #[test]
    fn text_box_enter_splits_current_line() {
        let mut tb = TextBox::new("body");
        tb.set_geometry(Geometry { x: 0, y: 0, w: 20, h: 5 });
        for c in "ab".chars() {
            tb.process_event(Event::Keyboard(Key::Char(c)));
        }
        tb.process_event(Event::Keyboard(Key::Enter));
        for c in "cd".chars() {
            tb.process_event(Event::Keyboard(Key::Char(c)));
        }
        assert_eq!(tb.value(), FieldValue::Lines(vec!["ab".to_string(), "cd".to_string()]));
    }

    #[test]
    fn read_box_follow_tail_scrolls_to_bottom_on_append() {
        let mut rb = ReadBox::new(true);
        rb.set_geometry(Geometry { x: 0, y: 0, w: 10, h: 2 });
        for i in 0..5 {
            rb.append(format!("line {i}"));
        }
        assert_eq!(rb.top, 3);
    }
}
