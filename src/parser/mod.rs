//! Streaming `(offset, command, params)` tokenizer abstraction (spec §4.3),
//! instantiated by [`markup`] (the `${fg,attr,bg}` dialect) and [`ansi`] (a
//! terminal-escape subset).
//!
//! A [`Parser`] is reset with raw input (and, for a restart, the style in
//! effect when the previous chunk ended) and then yields [`Token`]s lazily
//! as an iterator — the same "generator" shape as the reference
//! implementation's `parse()` method, expressed as `Iterator` per spec §9's
//! guidance on coroutines.

pub mod ansi;
pub mod markup;

use crate::cell::{Attr, Colour};

/// The closed set of command kinds every parser instance must recognise,
/// even if it never emits some of them (spec §4.3).
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    DisplayText(String),
    ChangeColours(Option<Colour>, Option<Attr>, Option<Colour>),
    MoveRelative(i32, i32),
    MoveAbsolute(Option<i32>, Option<i32>),
    NextTab,
    /// 0 = cursor to end, 1 = start to cursor, 2 = whole line.
    DeleteLine(u8),
    DeleteChars(usize),
    ShowCursor(bool),
    SaveCursor,
    RestoreCursor,
    ClearScreen,
}

/// A single parsed token: the command plus its offset into the raw input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub offset: usize,
    pub command: Command,
}

impl Token {
    pub fn new(offset: usize, command: Command) -> Self {
        Token { offset, command }
    }
}

/// Current style in effect, threaded through `reset` so a consumer can
/// split a string across two `parse()` calls and get identical output to
/// parsing it in one go (spec testable property 3).
pub type StartStyle = (Option<Colour>, Option<Attr>, Option<Colour>);

/// Common contract for streaming parsers. Concrete parsers also implement
/// `Iterator<Item = Token>` so `parse()` is just `&mut parser`.
pub trait Parser: Iterator<Item = Token> {
    /// Reset with new raw input, continuing from `style` (the last emitted
    /// `CHANGE_COLOURS` triple, or `None` at the very start).
    fn reset(&mut self, text: &str, style: Option<StartStyle>);
}

#[cfg(test)]
mod restart_tests {
    use super::*;
    use crate::parser::markup::MarkupParser;

    /// Testable property 3: splitting input and resetting with the
    /// continuation must reproduce the same token stream as parsing it
    /// whole.
    #[test]
    fn markup_restart_matches_single_pass() {
        let whole = "a${1}bcdef${2,3}ghi";
        let mut single = MarkupParser::new();
        single.reset(whole, None);
        let single_tokens: Vec<Token> = single.collect();

        let (a, b) = whole.split_at(7);
        let mut split = MarkupParser::new();
        split.reset(a, None);
        let mut split_tokens: Vec<Token> = (&mut split).collect();
        let last_style = split.last_style();
        split.reset(b, Some(last_style));
        split_tokens.extend(&mut split);

        assert_eq!(single_tokens.len(), split_tokens.len());
    }
}
