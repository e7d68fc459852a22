//! Frame: a full-window Effect composed of Layouts, with a border, a data
//! map, and focus/event routing (spec §4.7, §4.8).

use std::collections::HashMap;

use log::debug;

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::driver::{Event, Key};
use crate::effect::Effect;
use crate::error::{StagecraftError, UpdateOutcome};
use crate::widget::layout::{Direction, Layout};
use crate::widget::scrollbar::ScrollBar;
use crate::widget::{FieldValue, Widget};

/// Semantic palette keys a Frame's theme maps to a `StyleTriple`-ish pair,
/// indexed by name rather than hard-coded per widget.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: HashMap<&'static str, (Colour, Attr, Colour)>,
}

impl Palette {
    pub fn default_dark() -> Self {
        let mut entries = HashMap::new();
        entries.insert("background", (Colour::WHITE, Attr::NORMAL, Colour::BLUE));
        entries.insert("label", (Colour::WHITE, Attr::NORMAL, Colour::BLUE));
        entries.insert("focus_edit_text", (Colour::WHITE, Attr::BOLD, Colour::BLACK));
        entries.insert("invalid", (Colour::WHITE, Attr::NORMAL, Colour::RED));
        entries.insert("disabled", (Colour::BLACK, Attr::NORMAL, Colour::BLUE));
        entries.insert("scroll", (Colour::WHITE, Attr::NORMAL, Colour::BLUE));
        entries.insert("title", (Colour::WHITE, Attr::BOLD, Colour::BLUE));
        entries.insert("shadow", (Colour::BLACK, Attr::NORMAL, Colour::BLACK));
        Palette { entries }
    }

    pub fn get(&self, key: &str) -> (Colour, Attr, Colour) {
        self.entries.get(key).copied().unwrap_or((Colour::WHITE, Attr::NORMAL, Colour::Default))
    }
}

pub struct Frame {
    name: Option<String>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    title: Option<String>,
    has_border: bool,
    has_shadow: bool,
    modal: bool,
    layouts: Vec<Layout>,
    live_layout: i32,
    data: HashMap<String, FieldValue>,
    palette: Palette,
    scroll_offset: i32,
    content_height: i32,
}

impl Frame {
    pub fn new(x: i32, y: i32, width: i32, height: i32, has_border: bool, title: Option<String>, name: Option<String>) -> Self {
        Frame {
            name,
            x,
            y,
            width,
            height,
            title,
            has_border,
            has_shadow: false,
            modal: false,
            layouts: Vec::new(),
            live_layout: -1,
            data: HashMap::new(),
            palette: Palette::default_dark(),
            scroll_offset: 0,
            content_height: 0,
        }
    }

    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.has_shadow = shadow;
        self
    }

    pub fn with_modal(mut self, modal: bool) -> Self {
        self.modal = modal;
        self
    }

    pub fn add_layout(&mut self, layout: Layout) {
        self.layouts.push(layout);
    }

    /// Fixes the geometry of every owned Layout, then propagates the data
    /// map into every named widget (spec §4.7 `update_widgets`).
    pub fn fix(&mut self) {
        let border = if self.has_border { 1 } else { 0 };
        let inner_width = self.width - 2 * border;
        let available = self.height - 2 * border;
        let fixed_layouts: Vec<usize> = (0..self.layouts.len()).filter(|&i| !self.layouts[i].fill_frame()).collect();
        let mut used = 0;
        for &i in &fixed_layouts {
            let h = self.layouts[i].fit(self.x + border, self.y + border + used, inner_width, available - used);
            used += h;
        }
        for (i, layout) in self.layouts.iter_mut().enumerate() {
            if !fixed_layouts.contains(&i) {
                let remaining = (available - used).max(0);
                used += layout.fit(self.x + border, self.y + border + used, inner_width, remaining);
            }
        }
        self.content_height = used;
        self.update_widgets();
        if self.live_layout < 0 {
            self.focus_first();
        }
    }

    fn focus_first(&mut self) {
        for (i, layout) in self.layouts.iter_mut().enumerate() {
            if layout.focus_first() {
                self.live_layout = i as i32;
                return;
            }
        }
    }

    /// Blur the current Layout and hand focus to the next (or previous)
    /// Layout that has a tab stop, wrapping around. Returns false, leaving
    /// `live_layout` unchanged, if every Layout is empty of tab stops.
    fn move_to_adjacent_layout(&mut self, direction: Direction) -> bool {
        if self.live_layout < 0 || self.layouts.is_empty() {
            return false;
        }
        self.layouts[self.live_layout as usize].blur();
        let mut next = self.live_layout;
        loop {
            next = match direction {
                Direction::Next => (next + 1) % self.layouts.len() as i32,
                Direction::Previous => (next - 1 + self.layouts.len() as i32) % self.layouts.len() as i32,
            };
            let started = if direction == Direction::Next { self.layouts[next as usize].focus_first() } else { self.layouts[next as usize].focus_last() };
            if started {
                self.live_layout = next;
                return true;
            }
            if next == self.live_layout {
                return false;
            }
        }
    }

    /// For each named widget, set `widget.value = data[name]` (or a blank),
    /// per spec §4.7.
    pub fn update_widgets(&mut self) {
        let data = &self.data;
        for layout in &mut self.layouts {
            layout.for_each_widget_mut(|widget| {
                if let Some(name) = widget.name().map(str::to_string) {
                    let value = data.get(&name).cloned().unwrap_or(FieldValue::None);
                    widget.set_value(value);
                }
            });
        }
    }

    pub fn set_data(&mut self, data: HashMap<String, FieldValue>) {
        self.data = data;
        self.update_widgets();
    }

    pub fn data(&self) -> &HashMap<String, FieldValue> {
        &self.data
    }

    /// Write every named widget's `value` back under its name. With
    /// `validate`, widgets failing their validator collectively raise
    /// `InvalidFields` and the save is rolled back.
    pub fn save(&mut self, validate: bool) -> Result<(), StagecraftError> {
        if validate {
            let mut invalid = Vec::new();
            for layout in &self.layouts {
                layout.for_each_widget(|widget| {
                    if !widget.is_valid() {
                        if let Some(name) = widget.name() {
                            invalid.push(name.to_string());
                        }
                    }
                });
            }
            if !invalid.is_empty() {
                return Err(StagecraftError::InvalidFields(invalid));
            }
        }
        let mut data = HashMap::new();
        for layout in &self.layouts {
            layout.for_each_widget(|widget| {
                if let Some(name) = widget.name() {
                    data.insert(name.to_string(), widget.value());
                }
            });
        }
        self.data = data;
        Ok(())
    }

    fn draw_border(&self, canvas: &mut Canvas) {
        let (fg, attr, bg) = self.palette.get("background");
        canvas.clear_buffer(fg, attr, bg, self.x, self.y, self.width, self.height);
        if !self.has_border {
            return;
        }
        let (tfg, tattr, tbg) = self.palette.get("title");
        canvas.print_at(&"\u{250C}".to_string(), self.x, self.y, fg, attr, bg, false);
        canvas.print_at(&"\u{2510}".to_string(), self.x + self.width - 1, self.y, fg, attr, bg, false);
        canvas.print_at(&"\u{2514}".to_string(), self.x, self.y + self.height - 1, fg, attr, bg, false);
        canvas.print_at(&"\u{2518}".to_string(), self.x + self.width - 1, self.y + self.height - 1, fg, attr, bg, false);
        let horiz = "\u{2500}".repeat((self.width - 2).max(0) as usize);
        canvas.print_at(&horiz, self.x + 1, self.y, fg, attr, bg, false);
        canvas.print_at(&horiz, self.x + 1, self.y + self.height - 1, fg, attr, bg, false);
        for row in 1..self.height - 1 {
            canvas.print_at("\u{2502}", self.x, self.y + row, fg, attr, bg, false);
            canvas.print_at("\u{2502}", self.x + self.width - 1, self.y + row, fg, attr, bg, false);
        }
        if let Some(title) = &self.title {
            canvas.print_at(title, self.x + 2, self.y, tfg, tattr, tbg, false);
        }
        if self.content_height > self.height - 2 {
            let bar = ScrollBar::new(self.x + self.width - 2, self.y + 1, self.height - 2);
            bar.draw(canvas, self.scroll_offset as f64 / (self.content_height - (self.height - 2)).max(1) as f64);
        }
    }
}

impl Effect for Frame {
    fn reset(&mut self) {
        self.live_layout = -1;
        for layout in &mut self.layouts {
            layout.blur();
        }
        self.fix();
    }

    fn update(&mut self, frame_no: u64, canvas: &mut Canvas) -> UpdateOutcome {
        self.draw_border(canvas);
        for layout in &mut self.layouts {
            let outcome = layout.update(frame_no, canvas);
            if !outcome.is_continue() {
                return outcome;
            }
        }
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Tab) | Event::Keyboard(Key::BackTab) => {
                let direction = if matches!(event, Event::Keyboard(Key::Tab)) { Direction::Next } else { Direction::Previous };
                if self.live_layout < 0 {
                    self.focus_first();
                    return None;
                }
                let advanced = self.layouts[self.live_layout as usize].find_next(direction);
                if !advanced {
                    self.move_to_adjacent_layout(direction);
                }
                None
            }
            Event::Keyboard(Key::Up) | Event::Keyboard(Key::Down) | Event::Keyboard(Key::Left) | Event::Keyboard(Key::Right) => {
                if self.live_layout < 0 {
                    self.focus_first();
                    return None;
                }
                let unconsumed = self.layouts[self.live_layout as usize].process_event(event);
                if unconsumed.is_none() {
                    return None;
                }
                // The current Layout has no tab stop further in that
                // direction; cross into the neighbouring Layout.
                let forward = matches!(event, Event::Keyboard(Key::Down) | Event::Keyboard(Key::Right));
                let direction = if forward { Direction::Next } else { Direction::Previous };
                if self.move_to_adjacent_layout(direction) {
                    None
                } else {
                    unconsumed
                }
            }
            Event::Mouse { x, y, .. } if x < self.x || x >= self.x + self.width || y < self.y || y >= self.y + self.height => {
                if self.modal {
                    debug!("mouse click outside modal frame swallowed");
                    None
                } else {
                    Some(event)
                }
            }
            _ => {
                if self.live_layout >= 0 {
                    self.layouts[self.live_layout as usize].process_event(event)
                } else {
                    Some(event)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::basic::Button;
    use crate::widget::text::{Text, TextBox};
    use crate::widget::choice::{CheckBox, RadioButtons};

    #[test]
    fn down_arrow_crosses_into_the_next_layout_when_current_has_no_further_tab_stop() {
        let mut frame = Frame::new(0, 0, 40, 10, true, None, None);
        let mut top = Layout::new(vec![1.0], false);
        top.add_widget(0, Box::new(Button::new("A", Box::new(|| {})))).unwrap();
        let mut bottom = Layout::new(vec![1.0], true);
        bottom.add_widget(0, Box::new(Button::new("B", Box::new(|| {})))).unwrap();
        frame.add_layout(top);
        frame.add_layout(bottom);
        frame.fix();
        assert_eq!(frame.live_layout, 0);
        let result = frame.process_event(Event::Keyboard(Key::Down));
        assert!(result.is_none());
        assert_eq!(frame.live_layout, 1);
    }

    /// S6: a freshly-constructed Frame's data map is empty; after `save`
    /// every named widget contributes a key with a zero value for its type.
    #[test]
    fn save_populates_data_map_with_every_named_widget() {
        let mut frame = Frame::new(0, 0, 40, 10, true, None, None);
        let mut layout = Layout::new(vec![1.0], true);
        layout.add_widget(0, Box::new(TextBox::new("TA"))).unwrap();
        layout.add_widget(0, Box::new(Text::new("TB", None))).unwrap();
        layout.add_widget(0, Box::new(CheckBox::new("CA", None))).unwrap();
        layout.add_widget(0, Box::new(RadioButtons::new("Things", vec!["x".into()]))).unwrap();
        frame.add_layout(layout);
        frame.fix();
        assert!(frame.data().is_empty());
        frame.save(false).unwrap();
        assert_eq!(frame.data().get("TA"), Some(&FieldValue::Lines(vec![String::new()])));
        assert_eq!(frame.data().get("CA"), Some(&FieldValue::Bool(false)));
    }
}
