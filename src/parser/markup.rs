//! The `${fg}` / `${fg,attr}` / `${fg,attr,bg}` markup dialect (spec §4.3,
//! testable scenario 1), grounded on the reference implementation's
//! `AsciimaticsParser`.
//!
//! Numeric attribute codes map 1/2/3/4 to BOLD/NORMAL/REVERSE/UNDERLINE; the
//! single-value `${fg}` form always resets the attribute component to the
//! `NORMAL` bit pattern (0), matching the reference parser's quirk of never
//! leaving attributes as "unspecified" once any colour code is seen.

use crate::cell::{Attr, Colour};
use crate::parser::{Command, Parser, StartStyle, Token};

fn map_attr(code: u8) -> Attr {
    match code {
        1 => Attr::BOLD,
        3 => Attr::REVERSE,
        4 => Attr::UNDERLINE,
        _ => Attr::NORMAL,
    }
}

/// Parses one `${...}` escape starting at byte 0 of `text`, returning
/// `(fg, attr, bg, chars_consumed)` where `chars_consumed` includes the
/// surrounding `${` and `}`.
fn match_escape(chars: &[char]) -> Option<(i16, u8, Option<i16>, usize)> {
    if chars.first() != Some(&'$') || chars.get(1) != Some(&'{') {
        return None;
    }
    let close = chars.iter().position(|&c| c == '}')?;
    if close < 2 {
        return None;
    }
    let inner: String = chars[2..close].iter().collect();
    let parts: Vec<&str> = inner.split(',').collect();
    let nums: Option<Vec<i16>> = parts.iter().map(|p| p.trim().parse::<i16>().ok()).collect();
    let nums = nums?;
    let consumed = close + 1;
    match nums.as_slice() {
        [fg] => Some((*fg, 0, None, consumed)),
        [fg, attr] => Some((*fg, (*attr).clamp(0, 255) as u8, None, consumed)),
        [fg, attr, bg] => Some((*fg, (*attr).clamp(0, 255) as u8, Some(*bg), consumed)),
        _ => None,
    }
}

/// Streaming parser for the `${...}` markup dialect.
pub struct MarkupParser {
    chars: Vec<char>,
    pos: usize,
    /// Raw-offset cursor, advanced past every escape and character, but only
    /// surfaced in a token when a character is yielded.
    offset: usize,
    /// The offset last attached to an emitted token; shared by a
    /// `ChangeColours` token and the very next `DisplayText` token, exactly
    /// as the reference generator's `last_offset` variable behaves.
    last_offset: usize,
    last_style: StartStyle,
}

impl MarkupParser {
    pub fn new() -> Self {
        MarkupParser {
            chars: Vec::new(),
            pos: 0,
            offset: 0,
            last_offset: 0,
            last_style: (None, None, None),
        }
    }

    /// The style in effect after the most recent token, for resuming a
    /// split input with [`Parser::reset`].
    pub fn last_style(&self) -> StartStyle {
        self.last_style
    }
}

impl Default for MarkupParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MarkupParser {
    fn reset(&mut self, text: &str, style: Option<StartStyle>) {
        self.chars = text.chars().collect();
        self.pos = 0;
        self.offset = 0;
        self.last_offset = 0;
        if let Some(s) = style {
            self.last_style = s;
        }
    }
}

impl Iterator for MarkupParser {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.pos >= self.chars.len() {
            return None;
        }
        let remaining = &self.chars[self.pos..];
        if let Some((fg, attr_code, bg, consumed)) = match_escape(remaining) {
            self.pos += consumed;
            self.offset += consumed;
            let fg = Some(Colour::from_index(fg));
            let attr = Some(map_attr(attr_code));
            let bg = bg.map(Colour::from_index);
            self.last_style = (fg, attr, bg.or(self.last_style.2));
            let token = Token::new(self.last_offset, Command::ChangeColours(fg, attr, bg));
            Some(token)
        } else {
            let ch = remaining[0];
            self.pos += 1;
            self.offset += 1;
            let reported = self.last_offset;
            self.last_offset = self.offset;
            Some(Token::new(reported, Command::DisplayText(ch.to_string())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable scenario 1, literal token-for-token.
    #[test]
    fn markup_dialect_matches_reference_token_stream() {
        let mut parser = MarkupParser::new();
        parser.reset("a${1}b${2,1}c${3,2,4}de${7}", None);
        let tokens: Vec<Token> = parser.collect();
        let expected = vec![
            Token::new(0, Command::DisplayText("a".into())),
            Token::new(
                1,
                Command::ChangeColours(Some(Colour::from_index(1)), Some(Attr::NORMAL), None),
            ),
            Token::new(1, Command::DisplayText("b".into())),
            Token::new(
                6,
                Command::ChangeColours(Some(Colour::from_index(2)), Some(Attr::BOLD), None),
            ),
            Token::new(6, Command::DisplayText("c".into())),
            Token::new(
                13,
                Command::ChangeColours(
                    Some(Colour::from_index(3)),
                    Some(Attr::NORMAL),
                    Some(Colour::from_index(4)),
                ),
            ),
            Token::new(13, Command::DisplayText("d".into())),
            Token::new(22, Command::DisplayText("e".into())),
            Token::new(
                23,
                Command::ChangeColours(Some(Colour::from_index(7)), Some(Attr::NORMAL), None),
            ),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn plain_text_with_no_escapes_yields_one_token_per_character() {
        let mut parser = MarkupParser::new();
        parser.reset("hi", None);
        let tokens: Vec<Token> = parser.collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].offset, 0);
        assert_eq!(tokens[1].offset, 1);
    }

    #[test]
    fn malformed_escape_is_treated_as_literal_text() {
        let mut parser = MarkupParser::new();
        parser.reset("${nope}", None);
        let tokens: Vec<Token> = parser.collect();
        assert!(tokens
            .iter()
            .all(|t| matches!(t.command, Command::DisplayText(_))));
    }
}
