// Integration tests for the i3bar streaming format
// The stream is never closed, so it is checked element-wise

use barline::core::metrics::MetricSource;
use barline::core::{OutputMode, ProtocolState, StatusScheduler, WireEmitter};
use barline::ui::{Markup, Palette};
use barline::Result;
use serde::Deserialize;
use std::cell::Cell;
use std::time::Duration;

#[derive(Debug, Deserialize, PartialEq)]
struct Block {
    separator: bool,
    full_text: String,
    markup: String,
}

struct Counter(Cell<u32>);

impl MetricSource for Counter {
    fn name(&self) -> &str {
        "counter"
    }

    fn label(&self) -> Option<&str> {
        Some("N")
    }

    fn query(&self) -> Result<String> {
        self.0.set(self.0.get() + 1);
        Ok(format!("\"{}\" <{}>", self.0.get(), self.0.get()))
    }
}

/// Split the stream into header, then parse the elements after closing the array.
fn parse_stream(raw: &str) -> (serde_json::Value, Vec<Vec<Block>>) {
    let (header, rest) = raw.split_once('\n').expect("header line");
    assert!(rest.starts_with('['), "opening bracket missing");
    assert!(rest.ends_with(','), "elements must end with a comma");
    assert!(!rest.ends_with("],]"));

    let document = format!("{}]", rest.trim_end_matches(','));
    (
        serde_json::from_str(header).unwrap(),
        serde_json::from_str(&document).unwrap(),
    )
}

#[test]
fn test_stream_reassembles_to_composed_lines() {
    let mut scheduler = StatusScheduler::new(
        vec![Box::new(Counter(Cell::new(0)))],
        WireEmitter::new(Vec::new(), OutputMode::I3bar),
        Markup::None,
        " | ",
        Duration::from_millis(1),
    );

    let mut expected = Vec::new();
    for _ in 0..4 {
        // compose() advances the counter, so predict the next line instead
        let n = expected.len() + 1;
        expected.push(format!("N \"{}\" <{}>", n, n));
        scheduler.tick().unwrap();
    }

    let raw = String::from_utf8(scheduler.into_emitter().into_inner()).unwrap();
    let (header, elements) = parse_stream(&raw);

    assert_eq!(header, serde_json::json!({ "version": 1 }));
    assert_eq!(elements.len(), expected.len());
    for (element, line) in elements.iter().zip(&expected) {
        assert_eq!(element.len(), 1);
        assert_eq!(
            element[0],
            Block {
                separator: false,
                full_text: line.clone(),
                markup: "pango".to_string(),
            }
        );
    }
}

#[test]
fn test_protocol_states_in_order() {
    let mut emitter = WireEmitter::new(Vec::new(), OutputMode::I3bar);
    assert_eq!(emitter.state(), ProtocolState::Uninitialized);
    emitter.begin().unwrap();
    assert_eq!(emitter.state(), ProtocolState::HeaderSent);
    emitter.emit("").unwrap();
    assert_eq!(emitter.state(), ProtocolState::Streaming);
    emitter.emit("again").unwrap();

    let raw = String::from_utf8(emitter.into_inner()).unwrap();
    let (_, elements) = parse_stream(&raw);
    assert_eq!(elements[0][0].full_text, "");
    assert_eq!(elements[1][0].full_text, "again");
}

#[test]
fn test_pango_markup_survives_json() {
    let markup = Markup::Pango(Palette::default());
    let mut emitter = WireEmitter::new(Vec::new(), OutputMode::I3bar);
    let text = markup.critical("offline");
    emitter.emit(&text).unwrap();

    let raw = String::from_utf8(emitter.into_inner()).unwrap();
    let (_, elements) = parse_stream(&raw);
    assert_eq!(elements[0][0].full_text, text);
    assert!(text.starts_with("<span foreground=\"#"));
}
