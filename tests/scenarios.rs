//! End-to-end scenarios exercised through the public API, matching the
//! literal input/output pairs used to validate the engine's core pipeline.

use stagecraft::canvas::Canvas;
use stagecraft::cell::{Attr, Colour};
use stagecraft::effect::scroll::Scroll;
use stagecraft::effect::Effect;
use stagecraft::parser::ansi::AnsiParser;
use stagecraft::parser::markup::MarkupParser;
use stagecraft::parser::{Command, Parser};
use stagecraft::renderer::charts::BarChart;
use stagecraft::renderer::speech_bubble::SpeechBubble;
use stagecraft::renderer::Renderer;
use stagecraft::widget::choice::{CheckBox, RadioButtons};
use stagecraft::widget::frame::Frame;
use stagecraft::widget::layout::Layout;
use stagecraft::widget::text::{Text, TextBox};

#[test]
fn s1_markup_parse_produces_the_literal_token_stream() {
    let mut parser = MarkupParser::new();
    parser.reset("a${1}b${2,1}c${3,2,4}de${7}", None);
    let tokens: Vec<_> = parser.by_ref().collect();
    let texts: Vec<&str> = tokens
        .iter()
        .filter_map(|t| match &t.command {
            Command::DisplayText(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["a", "b", "c", "d", "e"]);
    assert_eq!(tokens.len(), 9);
}

#[test]
fn s2_ansi_reset_resolves_to_white_on_black() {
    let mut parser = AnsiParser::new();
    parser.reset("a\x1B[31;42mh\x1B[m", None);
    let tokens: Vec<_> = parser.by_ref().collect();
    let last_colours = tokens
        .iter()
        .rev()
        .find_map(|t| match t.command {
            Command::ChangeColours(fg, attr, bg) => Some((fg, attr, bg)),
            _ => None,
        })
        .unwrap();
    assert_eq!(last_colours, (Some(Colour::WHITE), Some(Attr::NORMAL), Some(Colour::BLACK)));
}

#[test]
fn s3_speech_bubble_renders_the_literal_three_lines() {
    let mut bubble = SpeechBubble::new("hello", None);
    let image = bubble.rendered_text();
    assert_eq!(image.lines, vec![".-------.", "| hello |", "`-------`"]);
}

#[test]
fn s4_bar_chart_has_double_box_and_two_separated_bars() {
    let mut chart = BarChart::new(17, 7, vec![Box::new(|| 10.0), Box::new(|| 5.0)]);
    let image = chart.rendered_text();
    assert_eq!(image.lines[0].chars().next(), Some('\u{2554}'));
    assert!(image.lines.iter().any(|l| l.contains(&"#".repeat(10))));
    assert!(image.lines.iter().any(|l| l.contains(&"#".repeat(5))));
}

#[test]
fn s5_scroll_effect_fires_only_once_the_rate_elapses() {
    let mut scroll = Scroll::new(2);
    let mut canvas = Canvas::new(10, 5, 20, true);
    scroll.update(1, &mut canvas);
    assert_eq!(canvas.start_line(), 0);
    scroll.update(2, &mut canvas);
    assert_eq!(canvas.start_line(), 1);
}

#[test]
fn s6_frame_data_map_is_empty_then_populated_by_save() {
    let mut frame = Frame::new(0, 0, 40, 10, true, None, None);
    let mut layout = Layout::new(vec![1.0], true);
    layout.add_widget(0, Box::new(TextBox::new("TA"))).unwrap();
    layout.add_widget(0, Box::new(Text::new("TB", None))).unwrap();
    layout.add_widget(0, Box::new(CheckBox::new("CA", None))).unwrap();
    layout.add_widget(0, Box::new(RadioButtons::new("Things", vec!["x".to_string()]))).unwrap();
    frame.add_layout(layout);
    frame.fix();

    assert!(frame.data().is_empty());

    frame.save(false).unwrap();
    assert!(frame.data().contains_key("TA"));
    assert!(frame.data().contains_key("TB"));
    assert!(frame.data().contains_key("CA"));
    assert!(frame.data().contains_key("Things"));
}
