use std::mem;
use log::warn;
use schemars::JsonSchema;
use serde::Serialize;

use crate::event::{DecodedEvent, Family};
use crate::parse::{decode, Decoded};

/// A line of the game log and its 1-based line number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct SourceLine {
    pub number: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEvent {
    pub line: SourceLine,
    pub event: DecodedEvent,
}

/// Consecutive change events and the play they lead up to. `play` is None when the changes
/// were followed by an unrecognized line or the end of the log.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EventGroup {
    pub changes: Vec<LineEvent>,
    pub play: Option<LineEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamItem {
    Group(EventGroup),
    Unrecognized(SourceLine),
}

enum StreamLine {
    Event(LineEvent),
    Unrecognized(SourceLine),
}

/// Decodes a game log line by line and groups the result. Blank lines are skipped. Keeps a
/// log of the raw lines it has consumed so callers can report what produced each group.
pub struct EventStream<IterT: Iterator> {
    lines: IterT,
    line_number: usize,
    peeked: Option<StreamLine>,
    log: Vec<String>,
}

impl<IterT> EventStream<IterT> where IterT: Iterator, IterT::Item: AsRef<str> {
    pub fn new(lines: IterT) -> Self {
        Self {
            lines,
            line_number: 0,
            peeked: None,
            log: Vec::new(),
        }
    }

    fn decode_next(&mut self) -> Option<StreamLine> {
        for text in self.lines.by_ref() {
            self.line_number += 1;
            let text = text.as_ref();
            if text.trim().is_empty() {
                continue;
            }
            let line = SourceLine { number: self.line_number, text: text.to_string() };
            return Some(match decode(text) {
                Decoded::Event(event) => StreamLine::Event(LineEvent { line, event }),
                Decoded::Unrecognized(_) => {
                    warn!("Unrecognized event on line {}: {}", line.number, line.text);
                    StreamLine::Unrecognized(line)
                }
            });
        }
        None
    }

    fn peek(&mut self) -> Option<&StreamLine> {
        if self.peeked.is_none() {
            self.peeked = self.decode_next();
        }
        self.peeked.as_ref()
    }

    fn next_line(&mut self) -> Option<StreamLine> {
        let line = match self.peeked.take() {
            Some(line) => Some(line),
            None => self.decode_next(),
        };
        if let Some(line) = &line {
            let text = match line {
                StreamLine::Event(event) => &event.line.text,
                StreamLine::Unrecognized(line) => &line.text,
            };
            self.log.push(text.clone());
        }
        line
    }

    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub fn take_log(&mut self) -> Vec<String> {
        mem::take(&mut self.log)
    }
}

impl<IterT> Iterator for EventStream<IterT> where IterT: Iterator, IterT::Item: AsRef<str> {
    type Item = StreamItem;

    fn next(&mut self) -> Option<Self::Item> {
        let mut group = EventGroup::default();
        loop {
            // None for an unrecognized line
            let family = match self.peek() {
                Some(StreamLine::Event(event)) => Some(event.event.family()),
                Some(StreamLine::Unrecognized(_)) => None,
                None => break,
            };
            if family.is_none() && !group.changes.is_empty() {
                // Leave it for the next call, after the changes before it
                break;
            }
            match self.next_line() {
                Some(StreamLine::Unrecognized(line)) => return Some(StreamItem::Unrecognized(line)),
                Some(StreamLine::Event(event)) if family == Some(Family::Change) => {
                    group.changes.push(event)
                }
                Some(StreamLine::Event(event)) => {
                    group.play = Some(event);
                    break;
                }
                None => break,
            }
        }
        if group.changes.is_empty() && group.play.is_none() {
            None
        } else {
            Some(StreamItem::Group(group))
        }
    }
}

pub trait MakeEventStream: Iterator + Sized {
    fn event_stream(self) -> EventStream<Self>;
}

impl<T> MakeEventStream for T where T: Iterator, T::Item: AsRef<str> {
    fn event_stream(self) -> EventStream<Self> {
        EventStream::new(self)
    }
}
