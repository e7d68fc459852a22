//! Non-interactive and single-action widgets: Label, Divider,
//! VerticalDivider, Button (spec §4.8).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::driver::{Event, Key};
use crate::error::UpdateOutcome;
use crate::widget::{FieldValue, Geometry, RequiredHeight, Widget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Centre,
    Right,
}

pub struct Label {
    text: String,
    align: Align,
    geometry: Geometry,
}

impl Label {
    pub fn new(text: impl Into<String>, align: Align) -> Self {
        Label { text: text.into(), align, geometry: Geometry::default() }
    }
}

impl Widget for Label {
    fn set_value(&mut self, _value: FieldValue) {}

    fn is_tab_stop(&self) -> bool {
        false
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let width = self.geometry.w.max(1) as usize;
        let text = if self.text.len() > width { self.text[..width].to_string() } else { self.text.clone() };
        let x = match self.align {
            Align::Left => self.geometry.x,
            Align::Centre => self.geometry.x + (self.geometry.w - text.len() as i32).max(0) / 2,
            Align::Right => self.geometry.x + (self.geometry.w - text.len() as i32).max(0),
        };
        canvas.print_at(&text, x, self.geometry.y, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        UpdateOutcome::Continue
    }
}

pub struct Divider {
    height: i32,
    geometry: Geometry,
}

impl Divider {
    pub fn new(height: i32) -> Self {
        Divider { height, geometry: Geometry::default() }
    }
}

impl Widget for Divider {
    fn set_value(&mut self, _value: FieldValue) {}

    fn is_tab_stop(&self) -> bool {
        false
    }

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn required_height(&self, _label_offset: i32, _width: i32) -> RequiredHeight {
        RequiredHeight::Fixed(self.height)
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let line = "\u{2500}".repeat(self.geometry.w.max(0) as usize);
        for row in 0..self.height {
            canvas.print_at(&line, self.geometry.x, self.geometry.y + row, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        }
        UpdateOutcome::Continue
    }
}

pub struct VerticalDivider {
    geometry: Geometry,
}

impl VerticalDivider {
    pub fn new() -> Self {
        VerticalDivider { geometry: Geometry::default() }
    }
}

impl Default for VerticalDivider {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for VerticalDivider {
    fn set_value(&mut self, _value: FieldValue) {}

    fn is_tab_stop(&self) -> bool {
        false
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
        for row in 0..self.geometry.h {
            canvas.print_at("\u{2502}", self.geometry.x, self.geometry.y + row, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        }
        UpdateOutcome::Continue
    }
}

pub struct Button {
    label: String,
    geometry: Geometry,
    on_click: Box<dyn FnMut()>,
}

impl Button {
    pub fn new(label: impl Into<String>, on_click: Box<dyn FnMut()>) -> Self {
        Button { label: label.into(), geometry: Geometry::default(), on_click }
    }

    fn text(&self) -> String {
        format!("< {} >", self.label)
    }
}

impl Widget for Button {
    fn label(&self) -> Option<&str> {
        Some(&self.label)
    }

    fn set_value(&mut self, _value: FieldValue) {}

    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    fn update(&mut self, _frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        canvas.print_at(&self.text(), self.geometry.x, self.geometry.y, Colour::WHITE, Attr::BOLD, Colour::Default, false);
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Enter) | Event::Keyboard(Key::Char(' ')) => {
                (self.on_click)();
                None
            }
            Event::Mouse { .. } if self.is_mouse_over(event, false, 0) => {
                (self.on_click)();
                None
            }
            _ => Some(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn button_invokes_callback_on_enter() {
        let clicked = Rc::new(RefCell::new(false));
        let clicked2 = clicked.clone();
        let mut button = Button::new("OK", Box::new(move || *clicked2.borrow_mut() = true));
        button.set_geometry(Geometry { x: 0, y: 0, w: 10, h: 1 });
        let result = button.process_event(Event::Keyboard(Key::Enter));
        assert!(result.is_none());
        assert!(*clicked.borrow());
    }

    #[test]
    fn label_is_not_a_tab_stop() {
        let label = Label::new("hi", Align::Left);
        assert!(!label.is_tab_stop());
    }
}
