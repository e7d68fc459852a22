//! SpeechBubble: a single line of text surrounded by a rounded speech-bubble
//! border, with an optional pointer "tail" (spec §4.4, testable scenario 3).

use crate::cell::StyleTriple;
use crate::renderer::{Image, Renderer};

pub struct SpeechBubble {
    text: String,
    tail: Option<Tail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tail {
    Left,
    Right,
}

impl SpeechBubble {
    pub fn new(text: impl Into<String>, tail: Option<Tail>) -> Self {
        SpeechBubble { text: text.into(), tail }
    }

    fn frame(&self) -> Image {
        let inner_width = self.text.chars().count() + 2;
        let top = format!(".{}.", "-".repeat(inner_width));
        let mid = format!("| {} |", self.text);
        let bottom = format!("`{}`", "-".repeat(inner_width));
        let mut lines = vec![top, mid, bottom];
        if let Some(tail) = self.tail {
            let pointer = match tail {
                Tail::Left => " \\".to_string(),
                Tail::Right => " /".to_string(),
            };
            lines.push(pointer);
        }
        Image::plain(lines, StyleTriple::default())
    }
}

impl Renderer for SpeechBubble {
    fn max_width(&self) -> u16 {
        (self.text.chars().count() + 4) as u16
    }

    fn max_height(&self) -> u16 {
        if self.tail.is_some() { 4 } else { 3 }
    }

    fn rendered_text(&mut self) -> Image {
        self.frame()
    }

    fn images(&mut self) -> Box<dyn Iterator<Item = Image> + '_> {
        Box::new(std::iter::once(self.frame()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Testable scenario 3, literal.
    #[test]
    fn hello_with_no_tail_renders_exact_bubble() {
        let mut bubble = SpeechBubble::new("hello", None);
        let image = bubble.rendered_text();
        assert_eq!(
            image.lines,
            vec![
                ".-------.".to_string(),
                "| hello |".to_string(),
                "`-------`".to_string(),
            ]
        );
    }
}
