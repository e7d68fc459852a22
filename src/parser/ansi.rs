//! A CSI/SGR terminal-escape subset (spec §4.3, testable scenario 2),
//! grounded on the reference implementation's `AnsiTerminalParser` and the
//! richer escape vocabulary consumed by its asciinema/ANSI-art players.
//!
//! Recognised forms: cursor motion (`CSI n A/B/C/D`, `CSI r;c H`/`f`),
//! erase (`CSI n J`, `CSI n K`, `CSI n P`), cursor visibility
//! (`CSI ?25h`/`l`), save/restore (`CSI s`/`u`, `ESC 7`/`8`), SGR colour and
//! attribute runs (`CSI ...m`), and the plain control characters `\t`, `\r`,
//! `\n`, `\x08`. Anything else inside an escape sequence is consumed and
//! dropped rather than surfacing as garbled text.

use regex::Regex;
use std::sync::OnceLock;

use crate::cell::{Attr, Colour};
use crate::parser::{Command, Parser, StartStyle, Token};

fn csi_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\x1b\[([0-9;?]*)([A-Za-z@])").unwrap())
}

fn osc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\x1b\][^\x07\x1b]*(\x07|\x1b\\)").unwrap())
}

/// Streaming parser for the ANSI/CSI escape subset.
pub struct AnsiParser {
    raw: String,
    pos: usize,
    fg: Option<Colour>,
    attr: Attr,
    bg: Option<Colour>,
}

impl AnsiParser {
    pub fn new() -> Self {
        AnsiParser {
            raw: String::new(),
            pos: 0,
            fg: None,
            attr: Attr::NORMAL,
            bg: None,
        }
    }

    fn remaining(&self) -> &str {
        &self.raw[self.pos..]
    }

    fn apply_sgr(&mut self, params: &str) -> Command {
        let codes: Vec<i32> = if params.is_empty() {
            vec![0]
        } else {
            params.split(';').filter_map(|p| p.parse().ok()).collect()
        };
        let mut i = 0;
        while i < codes.len() {
            match codes[i] {
                0 => {
                    // Reset resolves to the reference implementation's
                    // concrete white-on-black rather than an unset sentinel.
                    self.attr = Attr::NORMAL;
                    self.fg = Some(Colour::WHITE);
                    self.bg = Some(Colour::BLACK);
                }
                1 => self.attr |= Attr::BOLD,
                2 => self.attr = Attr::NORMAL,
                4 => self.attr |= Attr::UNDERLINE,
                7 => self.attr |= Attr::REVERSE,
                22 => self.attr.remove(Attr::BOLD),
                24 => self.attr.remove(Attr::UNDERLINE),
                27 => self.attr.remove(Attr::REVERSE),
                30..=37 => self.fg = Some(Colour::Indexed((codes[i] - 30) as u8)),
                39 => self.fg = Some(Colour::Default),
                40..=47 => self.bg = Some(Colour::Indexed((codes[i] - 40) as u8)),
                49 => self.bg = Some(Colour::Default),
                90..=97 => self.fg = Some(Colour::Indexed((codes[i] - 90 + 8) as u8)),
                100..=107 => self.bg = Some(Colour::Indexed((codes[i] - 100 + 8) as u8)),
                38 | 48 => {
                    // Extended colour: 38;5;N or 48;5;N (256-colour palette index).
                    if codes.get(i + 1) == Some(&5) {
                        if let Some(&n) = codes.get(i + 2) {
                            let colour = Some(Colour::Indexed(n.clamp(0, 255) as u8));
                            if codes[i] == 38 {
                                self.fg = colour;
                            } else {
                                self.bg = colour;
                            }
                        }
                        i += 2;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        Command::ChangeColours(self.fg, Some(self.attr), self.bg)
    }
}

impl Default for AnsiParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for AnsiParser {
    fn reset(&mut self, text: &str, style: Option<StartStyle>) {
        self.raw = text.to_string();
        self.pos = 0;
        if let Some((fg, attr, bg)) = style {
            self.fg = fg;
            self.attr = attr.unwrap_or(Attr::NORMAL);
            self.bg = bg;
        }
    }
}

impl Iterator for AnsiParser {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if self.pos >= self.raw.len() {
                return None;
            }
            let start = self.pos;
            let rest = self.remaining();

            if let Some(m) = osc_re().find(rest) {
                self.pos += m.end();
                continue;
            }

            if let Some(caps) = csi_re().captures(rest) {
                let whole = caps.get(0).unwrap().as_str();
                let params = caps.get(1).unwrap().as_str();
                let letter = caps.get(2).unwrap().as_str();
                self.pos += whole.len();
                let n = || params.trim_start_matches('?').parse::<i32>().unwrap_or(0);
                let command = match letter {
                    "A" => Command::MoveRelative(0, -n().max(1)),
                    "B" => Command::MoveRelative(0, n().max(1)),
                    "C" => Command::MoveRelative(n().max(1), 0),
                    "D" => Command::MoveRelative(-n().max(1), 0),
                    "H" | "f" => {
                        let mut parts = params.split(';');
                        let row: i32 = parts.next().unwrap_or("1").parse().unwrap_or(1);
                        let col: i32 = parts.next().unwrap_or("1").parse().unwrap_or(1);
                        Command::MoveAbsolute(Some(col - 1), Some(row - 1))
                    }
                    "J" => Command::ClearScreen,
                    "K" => Command::DeleteLine(n().clamp(0, 2) as u8),
                    "P" => Command::DeleteChars(n().max(0) as usize),
                    "h" if params.starts_with('?') && params.ends_with("25") => {
                        Command::ShowCursor(true)
                    }
                    "l" if params.starts_with('?') && params.ends_with("25") => {
                        Command::ShowCursor(false)
                    }
                    "s" => Command::SaveCursor,
                    "u" => Command::RestoreCursor,
                    "m" => self.apply_sgr(params),
                    _ => continue,
                };
                return Some(Token::new(start, command));
            }

            if rest.starts_with("\x1b7") {
                self.pos += 2;
                return Some(Token::new(start, Command::SaveCursor));
            }
            if rest.starts_with("\x1b8") {
                self.pos += 2;
                return Some(Token::new(start, Command::RestoreCursor));
            }

            let ch = rest.chars().next().unwrap();
            let ch_len = ch.len_utf8();
            self.pos += ch_len;
            let command = match ch {
                '\t' => Command::NextTab,
                '\r' => Command::MoveAbsolute(Some(0), None),
                '\n' => Command::MoveRelative(0, 1),
                '\x08' => Command::MoveRelative(-1, 0),
                _ => Command::DisplayText(ch.to_string()),
            };
            return Some(Token::new(start, command));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable scenario 2: cursor motion, erase and SGR colour change.
    #[test]
    fn ansi_subset_decodes_cursor_and_colour_sequences() {
        let mut parser = AnsiParser::new();
        parser.reset("\x1b[2J\x1b[10;5Hhi\x1b[31mred\x1b[0m", None);
        let tokens: Vec<Token> = parser.collect();

        assert_eq!(tokens[0].command, Command::ClearScreen);
        assert_eq!(tokens[1].command, Command::MoveAbsolute(Some(4), Some(9)));
        assert_eq!(tokens[2].command, Command::DisplayText("h".into()));
        assert_eq!(tokens[3].command, Command::DisplayText("i".into()));
        assert_eq!(
            tokens[4].command,
            Command::ChangeColours(Some(Colour::Indexed(1)), Some(Attr::NORMAL), None)
        );
        assert_eq!(tokens[5].command, Command::DisplayText("r".into()));
    }

    /// Testable scenario 2, literal token-for-token.
    #[test]
    fn ansi_reset_resolves_to_white_on_black() {
        let mut parser = AnsiParser::new();
        parser.reset("a\x1b[31;42mh\x1b[m", None);
        let tokens: Vec<Token> = parser.collect();
        assert_eq!(tokens[0].command, Command::DisplayText("a".into()));
        assert_eq!(
            tokens[1].command,
            Command::ChangeColours(Some(Colour::RED), Some(Attr::NORMAL), Some(Colour::GREEN))
        );
        assert_eq!(tokens[2].command, Command::DisplayText("h".into()));
        assert_eq!(
            tokens[3].command,
            Command::ChangeColours(Some(Colour::WHITE), Some(Attr::NORMAL), Some(Colour::BLACK))
        );
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn faint_code_resets_attr_to_normal() {
        let mut parser = AnsiParser::new();
        parser.reset("\x1b[1m\x1b[2mx", None);
        let tokens: Vec<Token> = parser.collect();
        assert_eq!(
            tokens[0].command,
            Command::ChangeColours(None, Some(Attr::BOLD), None)
        );
        assert_eq!(
            tokens[1].command,
            Command::ChangeColours(None, Some(Attr::NORMAL), None)
        );
    }

    #[test]
    fn cursor_visibility_toggles() {
        let mut parser = AnsiParser::new();
        parser.reset("\x1b[?25l\x1b[?25h", None);
        let tokens: Vec<Token> = parser.collect();
        assert_eq!(tokens[0].command, Command::ShowCursor(false));
        assert_eq!(tokens[1].command, Command::ShowCursor(true));
    }

    #[test]
    fn osc_title_sequence_is_swallowed() {
        let mut parser = AnsiParser::new();
        parser.reset("\x1b]0;title\x07x", None);
        let tokens: Vec<Token> = parser.collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].command, Command::DisplayText("x".into()));
    }

    #[test]
    fn tab_and_newline_map_to_motion_commands() {
        let mut parser = AnsiParser::new();
        parser.reset("\t\n\r", None);
        let tokens: Vec<Token> = parser.collect();
        assert_eq!(tokens[0].command, Command::NextTab);
        assert_eq!(tokens[1].command, Command::MoveRelative(0, 1));
        assert_eq!(tokens[2].command, Command::MoveAbsolute(Some(0), None));
    }
}
