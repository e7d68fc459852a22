//! The unit of display: a single character cell with its styling.
//!
//! Mirrors the `(codepoint, fg, attr, bg)` quadruple described in the data
//! model: colours are small indices into a palette, `Colour::Default` means
//! "let the terminal pick", and attributes are a bitset rather than an enum
//! since several can apply to the same cell.

use bitflags::bitflags;

/// A colour index into the terminal's palette.
///
/// Values 0-7 are the standard ANSI colours, 8-255 are extended palette
/// entries (only meaningful on 256-colour terminals), and `Default` asks the
/// driver to use whatever the terminal's native foreground/background is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    /// Use the terminal's native default colour.
    Default,
    /// An indexed palette entry, 0-255.
    Indexed(u8),
}

impl Colour {
    pub const BLACK: Colour = Colour::Indexed(0);
    pub const RED: Colour = Colour::Indexed(1);
    pub const GREEN: Colour = Colour::Indexed(2);
    pub const YELLOW: Colour = Colour::Indexed(3);
    pub const BLUE: Colour = Colour::Indexed(4);
    pub const MAGENTA: Colour = Colour::Indexed(5);
    pub const CYAN: Colour = Colour::Indexed(6);
    pub const WHITE: Colour = Colour::Indexed(7);

    /// Construct from a raw index, treating negative-style sentinels the
    /// caller may have inherited from escape parsing as `Default`.
    pub fn from_index(value: i16) -> Self {
        if value < 0 {
            Colour::Default
        } else {
            Colour::Indexed(value.min(255) as u8)
        }
    }

    /// Raw index, or `-1` for `Default`, matching the reference constant
    /// `COLOUR_DEFAULT = -1`.
    pub fn as_index(self) -> i16 {
        match self {
            Colour::Default => -1,
            Colour::Indexed(i) => i as i16,
        }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour::Default
    }
}

bitflags! {
    /// Text attributes. `NORMAL` is the reset state: clearing all bits is
    /// equivalent to requesting `NORMAL`, but it is kept as a named bit so
    /// callers can request "definitely reset" without needing to know that.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const NORMAL    = 0b0000;
        const BOLD      = 0b0001;
        const REVERSE   = 0b0010;
        const UNDERLINE = 0b0100;
    }
}

/// A foreground/attribute/background triple — the "style triple" of the
/// glossary. Used as the unit of colour-map entries and parser output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleTriple {
    pub fg: Colour,
    pub attr: Attr,
    pub bg: Colour,
}

impl StyleTriple {
    pub const fn new(fg: Colour, attr: Attr, bg: Colour) -> Self {
        StyleTriple { fg, attr, bg }
    }

    /// Overlay `patch` onto `self`, where any `None` field in a partial patch
    /// (as produced by markup/ANSI `CHANGE_COLOURS` tokens) leaves the
    /// existing value untouched.
    pub fn overlay(self, fg: Option<Colour>, attr: Option<Attr>, bg: Option<Colour>) -> Self {
        StyleTriple {
            fg: fg.unwrap_or(self.fg),
            attr: attr.unwrap_or(self.attr),
            bg: bg.unwrap_or(self.bg),
        }
    }
}

/// Sentinel marking the right-hand half of a double-width glyph. It renders
/// as nothing and blocks further writes, but still occupies a grid slot.
pub const WIDE_CONTINUATION: char = '\u{0}';

/// One character position on the grid with its styling.
///
/// The default cell is a space with default colours and `NORMAL` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: StyleTriple,
}

impl Cell {
    pub const fn new(ch: char, style: StyleTriple) -> Self {
        Cell { ch, style }
    }

    /// A blank cell using the given style, useful for `clear_buffer`.
    pub const fn blank(style: StyleTriple) -> Self {
        Cell { ch: ' ', style }
    }

    /// Whether this cell is the hidden second half of a double-width glyph.
    pub fn is_wide_continuation(&self) -> bool {
        self.ch == WIDE_CONTINUATION
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::blank(StyleTriple::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colour_round_trips_through_index() {
        assert_eq!(Colour::from_index(-1), Colour::Default);
        assert_eq!(Colour::from_index(5).as_index(), 5);
        assert_eq!(Colour::from_index(999).as_index(), 255);
    }

    #[test]
    fn overlay_keeps_unspecified_fields() {
        let base = StyleTriple::new(Colour::RED, Attr::BOLD, Colour::BLACK);
        let next = base.overlay(None, Some(Attr::UNDERLINE), Some(Colour::BLUE));
        assert_eq!(next.fg, Colour::RED);
        assert_eq!(next.attr, Attr::UNDERLINE);
        assert_eq!(next.bg, Colour::BLUE);
    }

    #[test]
    fn default_cell_is_blank_space() {
        let cell = Cell::default();
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.style, StyleTriple::default());
    }
}
