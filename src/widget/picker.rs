//! Date and time pickers: a temporary pop-up with side-by-side ListBoxes
//! (spec §4.8).

use crate::canvas::Canvas;
use crate::cell::{Attr, Colour};
use crate::driver::{Event, Key};
use crate::error::UpdateOutcome;
use crate::widget::{FieldValue, Geometry, Widget};

fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
        _ => 30,
    }
}

pub struct DatePicker {
    name: String,
    day: u32,
    month: u32,
    year: i32,
    open: bool,
    geometry: Geometry,
}

impl DatePicker {
    pub fn new(name: impl Into<String>, day: u32, month: u32, year: i32) -> Self {
        DatePicker { name: name.into(), day: day.clamp(1, days_in_month(month, year)), month, year, open: false, geometry: Geometry::default() }
    }

    /// Re-check the day list's validity against the current month/year,
    /// clamping if the selected day no longer exists (e.g. after switching
    /// away from a leap February).
    fn revalidate_day(&mut self) {
        let max_day = days_in_month(self.month, self.year);
        if self.day > max_day {
            self.day = max_day;
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Widget for DatePicker {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(format!("{:04}-{:02}-{:02}", self.year, self.month, self.day))
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            let parts: Vec<&str> = text.split('-').collect();
            if let [y, m, d] = parts[..] {
                if let (Ok(y), Ok(m), Ok(d)) = (y.parse(), m.parse(), d.parse()) {
                    self.year = y;
                    self.month = m;
                    self.day = d;
                    self.revalidate_day();
                }
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
        let text = format!("{:02}/{:02}/{:04}", self.day, self.month, self.year);
        canvas.print_at(&text, self.geometry.x, self.geometry.y, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Enter) => {
                self.open = !self.open;
                None
            }
            Event::Keyboard(Key::Up) if self.open => {
                self.day = if self.day > 1 { self.day - 1 } else { days_in_month(self.month, self.year) };
                None
            }
            Event::Keyboard(Key::Down) if self.open => {
                self.day += 1;
                self.revalidate_day();
                None
            }
            Event::Keyboard(Key::Left) if self.open => {
                self.month = if self.month > 1 { self.month - 1 } else { 12 };
                self.revalidate_day();
                None
            }
            Event::Keyboard(Key::Right) if self.open => {
                self.month = if self.month < 12 { self.month + 1 } else { 1 };
                self.revalidate_day();
                None
            }
            _ => Some(event),
        }
    }
}

pub struct TimePicker {
    name: String,
    hour: u32,
    minute: u32,
    second: u32,
    open: bool,
    geometry: Geometry,
}

impl TimePicker {
    pub fn new(name: impl Into<String>, hour: u32, minute: u32, second: u32) -> Self {
        TimePicker { name: name.into(), hour: hour % 24, minute: minute % 60, second: second % 60, open: false, geometry: Geometry::default() }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }
}

impl Widget for TimePicker {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn value(&self) -> FieldValue {
        FieldValue::Text(format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second))
    }

    fn set_value(&mut self, value: FieldValue) {
        if let FieldValue::Text(text) = value {
            let parts: Vec<&str> = text.split(':').collect();
            if let [h, m, s] = parts[..] {
                if let (Ok(h), Ok(m), Ok(s)) = (h.parse(), m.parse(), s.parse()) {
                    self.hour = h;
                    self.minute = m;
                    self.second = s;
                }
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
        canvas.print_at(&self.value().as_text(), self.geometry.x, self.geometry.y, Colour::WHITE, Attr::NORMAL, Colour::Default, false);
        UpdateOutcome::Continue
    }

    fn process_event(&mut self, event: Event) -> Option<Event> {
        match event {
            Event::Keyboard(Key::Enter) => {
                self.open = !self.open;
                None
            }
            Event::Keyboard(Key::Up) if self.open => {
                self.hour = (self.hour + 23) % 24;
                None
            }
            Event::Keyboard(Key::Down) if self.open => {
                self.hour = (self.hour + 1) % 24;
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
    fn date_picker_clamps_day_when_switching_to_shorter_month() {
        let mut picker = DatePicker::new("d", 31, 1, 2026);
        picker.month = 2;
        picker.revalidate_day();
        assert_eq!(picker.day, 28);
    }

    #[test]
    fn leap_year_february_allows_day_29() {
        assert_eq!(days_in_month(2, 2024), 29);
        assert_eq!(days_in_month(2, 2023), 28);
    }
}
