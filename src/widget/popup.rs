//! Modal pop-ups: PopUpDialog (message + buttons) and PopupMenu
//! (borderless menu) (spec §4.8).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::driver::{Event, Key};
use crate::error::UpdateOutcome;
use crate::widget::basic::Button;
use crate::widget::text::TextBox;
use crate::widget::Widget;

/// Non-resizable modal dialog with a message and one button per choice.
/// Safe to clone across a resize only when `on_close` is a top-level
/// function pointer rather than a capturing closure.
pub struct PopUpDialog {
    message: TextBox,
    buttons: Vec<Button>,
    focused: usize,
    x: i32,
    y: i32,
    width: i32,
}

impl PopUpDialog {
    pub fn new(message: &str, choices: Vec<String>, x: i32, y: i32, width: i32, on_close: impl Fn(usize) + 'static + Clone) -> Self {
        let mut body = TextBox::new("__popup_message").set_readonly(true);
        body.set_value(crate::widget::FieldValue::Lines(message.lines().map(str::to_string).collect()));
        let buttons = choices
            .into_iter()
            .enumerate()
            .map(|(idx, label)| {
                let callback = on_close.clone();
                Button::new(label, Box::new(move || callback(idx)))
            })
            .collect();
        PopUpDialog { message: body, buttons, focused: 0, x, y, width }
    }

    pub fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        let height = 3;
        canvas.print_at(
            &"\u{2500}".repeat(self.width as usize),
            self.x,
            self.y,
            Colour::WHITE,
            Attr::BOLD,
            Colour::Default,
            false,
        );
        self.message.set_geometry(crate::widget::Geometry { x: self.x, y: self.y + 1, w: self.width, h: height });
        let outcome = self.message.update(frame_no, canvas);
        if !outcome.is_continue() {
            return outcome;
        }
        let mut bx = self.x;
        for button in &mut self.buttons {
            button.set_geometry(crate::widget::Geometry { x: bx, y: self.y + 1 + height, w: 10, h: 1 });
            let outcome = button.update(frame_no, canvas);
            if !outcome.is_continue() {
                return outcome;
            }
            bx += 12;
        }
        UpdateOutcome::Continue
    }

    pub fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Tab) => {
                self.focused = (self.focused + 1) % self.buttons.len().max(1);
                None
            }
            other => self.buttons.get_mut(self.focused).and_then(|b| b.process_event(other)),
        }
    }
}

/// A borderless modal menu: one button per item, closing when clicked
/// outside or on Escape.
pub struct PopupMenu {
    items: Vec<Button>,
    x: i32,
    y: i32,
    open: bool,
}

impl PopupMenu {
    pub fn new(labels: Vec<String>, x: i32, y: i32, on_select: impl Fn(usize) + 'static + Clone) -> Self {
        let items = labels
            .into_iter()
            .enumerate()
            .map(|(idx, label)| {
                let callback = on_select.clone();
                Button::new(label, Box::new(move || callback(idx)))
            })
            .collect();
        PopupMenu { items, x, y, open: true }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        for (row, item) in self.items.iter_mut().enumerate() {
            item.set_geometry(crate::widget::Geometry { x: self.x, y: self.y + row as i32, w: 16, h: 1 });
            let outcome = item.update(frame_no, canvas);
            if !outcome.is_continue() {
                return outcome;
            }
        }
        UpdateOutcome::Continue
    }

    pub fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Escape) => {
                self.open = false;
                None
            }
            Event::Mouse { x, y, .. } if !self.hit_test(x, y) => {
                self.open = false;
                None
            }
            other => {
                for item in &mut self.items {
                    if item.process_event(other).is_none() {
                        self.open = false;
                        return None;
                    }
                }
                Some(other)
            }
        }
    }

    fn hit_test(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + 16 && y >= self.y && y < self.y + self.items.len() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn popup_menu_closes_on_escape() {
        let mut menu = PopupMenu::new(vec!["a".into(), "b".into()], 0, 0, |_| {});
        menu.process_event(Event::Keyboard(Key::Escape));
        assert!(!menu.is_open());
    }

    #[test]
    fn popup_dialog_invokes_on_close_with_chosen_index() {
        let chosen = Rc::new(RefCell::new(None));
        let chosen2 = chosen.clone();
        let mut dialog = PopUpDialog::new("are you sure?", vec!["Yes".into(), "No".into()], 0, 0, 20, move |idx| *chosen2.borrow_mut() = Some(idx));
        dialog.process_event(Event::Keyboard(Key::Enter));
        assert_eq!(*chosen.borrow(), Some(0));
    }
}
