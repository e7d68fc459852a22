//! Styled text: a raw string plus a parser dialect, materialised into plain
//! text with a per-character style map and an offset table back into the
//! raw string (spec §3, testable property 4).

use crate::cell::{Attr, Colour, StyleTriple};
use crate::parser::{markup::MarkupParser, ansi::AnsiParser, Command, Parser};

/// Which embedded dialect produced a [`StyledText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Markup,
    Ansi,
    PlainText,
}

/// A string that has been run through a parser, keeping the plain text, the
/// resolved style of every character, and a table mapping each plain-text
/// index back to its position in the raw input.
///
/// Invariant: `plain.chars().count() == style_map.len() == offsets.len()`,
/// and `offsets` is monotone non-decreasing.
#[derive(Debug, Clone)]
pub struct StyledText {
    raw: String,
    dialect: Dialect,
    plain: String,
    style_map: Vec<StyleTriple>,
    offsets: Vec<usize>,
}

impl StyledText {
    /// Parse `raw` with `dialect` starting from `base_style` (the style in
    /// effect before this text begins).
    pub fn parse(raw: &str, dialect: Dialect, base_style: StyleTriple) -> Self {
        let mut plain = String::new();
        let mut style_map = Vec::new();
        let mut offsets = Vec::new();
        let mut style = base_style;

        let mut apply = |command: Command, offset: usize, style: &mut StyleTriple, plain: &mut String, style_map: &mut Vec<StyleTriple>, offsets: &mut Vec<usize>| {
            match command {
                Command::DisplayText(s) => {
                    for ch in s.chars() {
                        plain.push(ch);
                        style_map.push(*style);
                        offsets.push(offset);
                    }
                }
                Command::ChangeColours(fg, attr, bg) => {
                    *style = style.overlay(fg, attr, bg);
                }
                _ => {}
            }
        };

        match dialect {
            Dialect::Markup => {
                let mut parser = MarkupParser::new();
                parser.reset(raw, None);
                for token in parser {
                    apply(token.command, token.offset, &mut style, &mut plain, &mut style_map, &mut offsets);
                }
            }
            Dialect::Ansi => {
                let mut parser = AnsiParser::new();
                parser.reset(raw, None);
                for token in parser {
                    apply(token.command, token.offset, &mut style, &mut plain, &mut style_map, &mut offsets);
                }
            }
            Dialect::PlainText => {
                for (offset, ch) in raw.chars().enumerate() {
                    plain.push(ch);
                    style_map.push(style);
                    offsets.push(offset);
                }
            }
        }

        StyledText {
            raw: raw.to_string(),
            dialect,
            plain,
            style_map,
            offsets,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn plain(&self) -> &str {
        &self.plain
    }

    pub fn style_map(&self) -> &[StyleTriple] {
        &self.style_map
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn len(&self) -> usize {
        self.style_map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.style_map.is_empty()
    }

    /// Style of the first character, or the given default for an empty
    /// string.
    pub fn first_style(&self, default: StyleTriple) -> StyleTriple {
        self.style_map.first().copied().unwrap_or(default)
    }

    /// Style of the last character, or the given default for an empty
    /// string.
    pub fn last_style(&self, default: StyleTriple) -> StyleTriple {
        self.style_map.last().copied().unwrap_or(default)
    }

    /// Slice by plain-text character index `[start, end)`, preserving the
    /// `plain`/`style_map`/`offsets` length invariant. Does not re-parse the
    /// raw text: the result's `raw` keeps the original, since it has no
    /// single well-defined raw-text sub-span when markup maps many raw
    /// characters onto zero or one plain characters.
    pub fn slice(&self, start: usize, end: usize) -> StyledText {
        let plain: String = self.plain.chars().skip(start).take(end - start).collect();
        let style_map = self.style_map[start..end].to_vec();
        let offsets = self.offsets[start..end].to_vec();
        StyledText {
            raw: self.raw.clone(),
            dialect: self.dialect,
            plain,
            style_map,
            offsets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable property 4.
    #[test]
    fn slicing_matches_plain_text_substring_and_length() {
        let st = StyledText::parse(
            "a${1}b${2,1}c${3,2,4}de${7}",
            Dialect::Markup,
            StyleTriple::default(),
        );
        assert_eq!(st.plain(), "abcde");
        let sliced = st.slice(1, 3);
        assert_eq!(sliced.plain(), &st.plain()[1..3]);
        assert_eq!(sliced.len(), 2);
    }

    #[test]
    fn lengths_stay_in_lockstep() {
        let st = StyledText::parse("a${1}b${2,1}c", Dialect::Markup, StyleTriple::default());
        assert_eq!(st.plain().chars().count(), st.style_map().len());
        assert_eq!(st.style_map().len(), st.offsets().len());
    }

    #[test]
    fn offsets_are_monotone_non_decreasing() {
        let st = StyledText::parse("a${1}b${2,1}c${3,2,4}de${7}", Dialect::Markup, StyleTriple::default());
        for w in st.offsets().windows(2) {
            assert!(w[0] <= w[1]);
        }
    }

    #[test]
    fn style_map_tracks_colour_changes() {
        let st = StyledText::parse("a${1}b", Dialect::Markup, StyleTriple::default());
        assert_eq!(st.style_map()[0].fg, Colour::Default);
        assert_eq!(st.style_map()[1].fg, Colour::Indexed(1));
    }
}
