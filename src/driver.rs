//! The terminal driver interface (spec §6) and a `crossterm`-backed
//! implementation.
//!
//! Stagecraft's core never talks to the terminal directly except through
//! this trait, so tests can swap in a fake driver. The real implementation
//! follows the same "track state to minimise commands" approach as the
//! reference framework's `TerminalRenderer`.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CtEvent, KeyCode, KeyEventKind, MouseButton as CtMouseButton, MouseEventKind},
    execute, queue,
    style::{Attribute as CtAttribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};
use std::env;

use crate::canvas::CellRun;
use crate::cell::{Attr, Colour, StyleTriple};

bitflags::bitflags! {
    /// Which mouse buttons were down for a [`Event::Mouse`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT   = 0b001;
        const RIGHT  = 0b010;
        const DOUBLE = 0b100;
    }
}

/// A key code. Printable codepoints (32..=1_114_111) are their own value;
/// named keys use negative, out-of-band codes so they never collide with a
/// codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Tab,
    BackTab,
    Back,
    Delete,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
    Enter,
    F(u8),
}

impl Key {
    /// Integer encoding matching spec §6: printable codepoints are
    /// themselves, named keys are negative.
    pub fn code(self) -> i32 {
        match self {
            Key::Char(c) => c as i32,
            Key::Enter => 10,
            Key::Tab => -1,
            Key::BackTab => -2,
            Key::Back => -3,
            Key::Delete => -4,
            Key::Up => -5,
            Key::Down => -6,
            Key::Left => -7,
            Key::Right => -8,
            Key::Home => -9,
            Key::End => -10,
            Key::PageUp => -11,
            Key::PageDown => -12,
            Key::Escape => -13,
            Key::F(n) => -100 - n as i32,
        }
    }
}

/// An input event read from the driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    Keyboard(Key),
    Mouse { x: i32, y: i32, buttons: MouseButtons },
}

/// What the core requires from whatever terminal back-end sits underneath
/// it (spec §6).
pub trait Driver {
    /// Drain all currently pending input, non-blocking.
    fn read_input(&mut self) -> Vec<Event>;
    /// Apply a batch of diff runs to the physical terminal.
    fn write_cells(&mut self, runs: &[CellRun]) -> io::Result<()>;
    fn size(&self) -> (u16, u16);
    /// Whether the terminal has resized since the last call to this method.
    fn resized_since_last_call(&mut self) -> bool;
    fn colour_count(&self) -> u16;
    fn unicode_aware(&self) -> bool;
    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
    fn bell(&mut self) -> io::Result<()>;
}

/// Whether the `FORCE_TTY` sentinel is set, bypassing interactive-terminal
/// detection for tests (spec §6 "Environment").
pub fn force_tty() -> bool {
    env::var("FORCE_TTY").is_ok()
}

/// A `crossterm`-backed [`Driver`]. Tracks cursor position, colours and
/// attributes so repeated runs with identical styling don't re-emit escape
/// codes, the same optimisation as the reference framework's
/// `TerminalRenderer`.
pub struct CrosstermDriver<W: Write> {
    out: W,
    current_pos: Option<(u16, u16)>,
    current_style: Option<StyleTriple>,
    last_size: (u16, u16),
    raw_mode_enabled: bool,
}

impl CrosstermDriver<io::Stdout> {
    /// Acquire the terminal: enable raw mode, alternate screen, mouse
    /// capture. Restoration happens in `Drop`, covering every exit path
    /// including panics (spec §9 "Scoped acquisition").
    pub fn acquire() -> io::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, event::EnableMouseCapture, cursor::Hide)?;
        let size = terminal::size().unwrap_or((80, 24));
        Ok(CrosstermDriver {
            out,
            current_pos: None,
            current_style: None,
            last_size: size,
            raw_mode_enabled: true,
        })
    }
}

impl<W: Write> CrosstermDriver<W> {
    fn apply_style(&mut self, style: StyleTriple) -> io::Result<()> {
        if self.current_style == Some(style) {
            return Ok(());
        }
        queue!(self.out, ResetColor, SetAttribute(CtAttribute::Reset))?;
        if style.attr.contains(Attr::BOLD) {
            queue!(self.out, SetAttribute(CtAttribute::Bold))?;
        }
        if style.attr.contains(Attr::UNDERLINE) {
            queue!(self.out, SetAttribute(CtAttribute::Underlined))?;
        }
        if style.attr.contains(Attr::REVERSE) {
            queue!(self.out, SetAttribute(CtAttribute::Reverse))?;
        }
        if let Some(fg) = to_crossterm_colour(style.fg) {
            queue!(self.out, SetForegroundColor(fg))?;
        }
        if let Some(bg) = to_crossterm_colour(style.bg) {
            queue!(self.out, SetBackgroundColor(bg))?;
        }
        self.current_style = Some(style);
        Ok(())
    }
}

fn to_crossterm_colour(c: Colour) -> Option<crossterm::style::Color> {
    use crossterm::style::Color;
    match c {
        Colour::Default => None,
        Colour::Indexed(i) => Some(Color::AnsiValue(i)),
    }
}

impl<W: Write> Driver for CrosstermDriver<W> {
    fn read_input(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while event::poll(Duration::from_secs(0)).unwrap_or(false) {
            match event::read() {
                Ok(CtEvent::Key(key_event)) => {
                    if key_event.kind == KeyEventKind::Release {
                        continue;
                    }
                    if let Some(key) = translate_key(key_event.code, key_event.modifiers) {
                        events.push(Event::Keyboard(key));
                    }
                }
                Ok(CtEvent::Mouse(m)) => {
                    let mut buttons = MouseButtons::empty();
                    match m.kind {
                        MouseEventKind::Down(CtMouseButton::Left) => buttons |= MouseButtons::LEFT,
                        MouseEventKind::Down(CtMouseButton::Right) => buttons |= MouseButtons::RIGHT,
                        _ => {}
                    }
                    events.push(Event::Mouse {
                        x: m.column as i32,
                        y: m.row as i32,
                        buttons,
                    });
                }
                Ok(CtEvent::Resize(_, _)) => {
                    // Surfaced separately via `resized_since_last_call`.
                }
                _ => break,
            }
        }
        events
    }

    fn write_cells(&mut self, runs: &[CellRun]) -> io::Result<()> {
        for run in runs {
            if self.current_pos != Some((run.x, run.y)) {
                queue!(self.out, cursor::MoveTo(run.x, run.y))?;
            }
            self.apply_style(run.style)?;
            queue!(self.out, Print(&run.text))?;
            let advance = run.text.chars().count() as u16;
            self.current_pos = Some((run.x + advance, run.y));
        }
        self.out.flush()
    }

    fn size(&self) -> (u16, u16) {
        terminal::size().unwrap_or(self.last_size)
    }

    fn resized_since_last_call(&mut self) -> bool {
        let current = terminal::size().unwrap_or(self.last_size);
        if current != self.last_size {
            self.last_size = current;
            true
        } else {
            false
        }
    }

    fn colour_count(&self) -> u16 {
        256
    }

    fn unicode_aware(&self) -> bool {
        true
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            execute!(self.out, cursor::Show)
        } else {
            execute!(self.out, cursor::Hide)
        }
    }

    fn bell(&mut self) -> io::Result<()> {
        write!(self.out, "\u{7}")?;
        self.out.flush()
    }
}

impl<W: Write> Drop for CrosstermDriver<W> {
    fn drop(&mut self) {
        if self.raw_mode_enabled {
            let _ = execute!(self.out, event::DisableMouseCapture, cursor::Show, terminal::LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
            self.raw_mode_enabled = false;
        }
    }
}

fn translate_key(code: KeyCode, modifiers: crossterm::event::KeyModifiers) -> Option<Key> {
    use crossterm::event::KeyModifiers;
    Some(match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => {
            if modifiers.contains(KeyModifiers::SHIFT) {
                Key::BackTab
            } else {
                Key::Tab
            }
        }
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Backspace => Key::Back,
        KeyCode::Delete => Key::Delete,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Esc => Key::Escape,
        KeyCode::F(n) if (1..=12).contains(&n) => Key::F(n),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_keys_use_out_of_band_codes() {
        assert!(Key::Char('a').code() >= 32);
        assert!(Key::Tab.code() < 0);
        assert!(Key::F(1).code() < -12);
    }
}
