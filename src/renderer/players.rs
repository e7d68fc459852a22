//! AnsiArtPlayer / AsciinemaPlayer: replay recorded terminal output through
//! the ANSI parser into a scratch canvas, one chunk per call (spec §4.4,
//! §6 "Asciinema file format").

use serde::Deserialize;

use crate::error::StagecraftError;
use crate::parser::{ansi::AnsiParser, Command, Parser};
use crate::renderer::dynamic::Scratch;
use crate::renderer::{Image, Renderer};

/// Plays back a block of raw ANSI-art text a fixed number of lines at a
/// time.
pub struct AnsiArtPlayer {
    lines: Vec<String>,
    cursor: usize,
    rate: usize,
    scratch: Scratch,
    parser: AnsiParser,
    pen: (i32, i32),
}

impl AnsiArtPlayer {
    pub fn new(width: u16, height: u16, content: &str, rate: usize) -> Self {
        AnsiArtPlayer {
            lines: content.lines().map(|l| l.to_string()).collect(),
            cursor: 0,
            rate: rate.max(1),
            scratch: Scratch::new(width, height),
            parser: AnsiParser::new(),
            pen: (0, 0),
        }
    }

    fn advance(&mut self) {
        for _ in 0..self.rate {
            if self.cursor >= self.lines.len() {
                break;
            }
            let line = self.lines[self.cursor].clone();
            self.cursor += 1;
            self.feed(&line);
            self.feed("\n");
        }
    }

    fn feed(&mut self, text: &str) {
        self.parser.reset(text, None);
        while let Some(token) = self.parser.next() {
            apply_token(&mut self.scratch, &mut self.pen, token.command);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.lines.len()
    }
}

impl Renderer for AnsiArtPlayer {
    fn max_width(&self) -> u16 {
        self.scratch.canvas().width()
    }

    fn max_height(&self) -> u16 {
        self.scratch.canvas().height()
    }

    fn rendered_text(&mut self) -> Image {
        self.advance();
        self.scratch.snapshot()
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(std::iter::once(self.rendered_text()))
    }
}

#[derive(Deserialize)]
struct AsciinemaHeader {
    version: u32,
    width: u16,
    height: u16,
}

#[derive(Deserialize)]
struct AsciinemaEvent(f64, String, String);

/// Plays back an asciinema v2 JSON-lines recording against a virtual clock
/// advanced by a fixed delta every call.
pub struct AsciinemaPlayer {
    events: Vec<AsciinemaEvent>,
    cursor: usize,
    clock: f64,
    delta: f64,
    max_delay: f64,
    scratch: Scratch,
    parser: AnsiParser,
    pen: (i32, i32),
}

impl AsciinemaPlayer {
    pub fn load(source: &str, max_delay: f64) -> Result<Self, StagecraftError> {
        let mut lines = source.lines();
        let header_line = lines.next().ok_or_else(|| StagecraftError::MalformedInput("empty recording".into()))?;
        let header: AsciinemaHeader = serde_json::from_str(header_line)
            .map_err(|e| StagecraftError::MalformedInput(e.to_string()))?;
        if header.version != 2 {
            return Err(StagecraftError::MalformedInput(format!(
                "unsupported asciinema version {}",
                header.version
            )));
        }
        let mut events = Vec::new();
        for line in lines {
            if line.trim().is_empty() {
                continue;
            }
            let event: AsciinemaEvent =
                serde_json::from_str(line).map_err(|e| StagecraftError::MalformedInput(e.to_string()))?;
            events.push(event);
        }
        Ok(AsciinemaPlayer {
            events,
            cursor: 0,
            clock: 0.0,
            delta: 0.05,
            max_delay,
            scratch: Scratch::new(header.width, header.height),
            parser: AnsiParser::new(),
            pen: (0, 0),
        })
    }

    fn advance(&mut self) {
        self.clock += self.delta;
        while self.cursor < self.events.len() {
            let event = &self.events[self.cursor];
            let gap = event.0.min(self.max_delay);
            if gap > self.clock {
                break;
            }
            let text = event.2.clone();
            self.cursor += 1;
            self.parser.reset(&text, None);
            while let Some(token) = self.parser.next() {
                apply_token(&mut self.scratch, &mut self.pen, token.command);
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }
}

impl Renderer for AsciinemaPlayer {
    fn max_width(&self) -> u16 {
        self.scratch.canvas().width()
    }

    fn max_height(&self) -> u16 {
        self.scratch.canvas().height()
    }

    fn rendered_text(&mut self) -> Image {
        self.advance();
        self.scratch.snapshot()
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(std::iter::once(self.rendered_text()))
    }
}

/// Apply one parsed ANSI command to a scratch canvas, tracking the pen
/// position and current style.
fn apply_token(scratch: &mut Scratch, pen: &mut (i32, i32), command: Command) {
    use crate::cell::{Attr, Colour};
    match command {
        Command::DisplayText(s) => {
            scratch.canvas().print_at(&s, pen.0, pen.1, Colour::Default, Attr::NORMAL, Colour::Default, false);
            pen.0 += s.chars().count() as i32;
        }
        Command::MoveRelative(dx, dy) => {
            pen.0 += dx;
            pen.1 += dy;
        }
        Command::MoveAbsolute(x, y) => {
            if let Some(x) = x {
                pen.0 = x;
            }
            if let Some(y) = y {
                pen.1 = y;
            }
        }
        Command::ClearScreen => {
            scratch.clear();
            *pen = (0, 0);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_art_player_advances_by_rate_lines_per_call() {
        let content = "one\ntwo\nthree\nfour";
        let mut player = AnsiArtPlayer::new(20, 5, content, 2);
        assert!(!player.is_finished());
        player.rendered_text();
        assert!(!player.is_finished());
        player.rendered_text();
        assert!(player.is_finished());
    }

    #[test]
    fn asciinema_player_rejects_unsupported_version() {
        let recording = "{\"version\":1,\"width\":10,\"height\":5}\n";
        let result = AsciinemaPlayer::load(recording, 1.0);
        assert!(result.is_err());
    }

    #[test]
    fn asciinema_player_loads_v2_header() {
        let recording = "{\"version\":2,\"width\":10,\"height\":5}\n[0.1,\"o\",\"hi\"]\n";
        let player = AsciinemaPlayer::load(recording, 1.0).unwrap();
        assert_eq!(player.events.len(), 1);
    }
}
