pub mod error;
mod parsers;

use nom::combinator::all_consuming;
use nom::error::convert_error;
use nom::{Finish, Parser};
use strum::IntoEnumIterator;

use crate::event::{DecodedEvent, EventKind, Field};
use crate::parse::error::DecodeError;
use crate::parse::parsers::parse_template;

pub(crate) use parsers::template_fields;

/// Result of decoding one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Event(DecodedEvent),
    /// No grammar matched. Holds the (trimmed) line.
    Unrecognized(String),
}

/// Decodes one encoded log line. Grammars are anchored at both ends of the line, so at most
/// one of them can match.
pub fn decode(line: &str) -> Decoded {
    let line = line.trim();
    EventKind::iter()
        .find_map(|kind| {
            match_grammar(kind, line).map(|args| DecodedEvent { kind, args })
        })
        .map(Decoded::Event)
        .unwrap_or_else(|| Decoded::Unrecognized(line.to_string()))
}

/// Every kind whose grammar matches the line. Used to check that the grammars really are
/// mutually exclusive; decoding only needs the first.
pub fn matching_kinds(line: &str) -> Vec<EventKind> {
    let line = line.trim();
    EventKind::iter()
        .filter(|kind| match_grammar(*kind, line).is_some())
        .collect()
}

/// Decodes the line against one specific grammar, and if it doesn't match explains where
/// the match failed
pub fn explain(kind: EventKind, line: &str) -> Result<DecodedEvent, DecodeError> {
    let line = line.trim();
    all_consuming(parse_template(kind.template()))
        .parse(line)
        .finish()
        .map(|(_, args)| DecodedEvent { kind, args })
        .map_err(|err| DecodeError::GrammarMismatch {
            kind,
            template: kind.template(),
            err: convert_error(line, err),
        })
}

// This doesn't delegate to explain because convert_error is expensive and nearly every grammar
// fails on nearly every line
fn match_grammar(kind: EventKind, line: &str) -> Option<Vec<Field>> {
    all_consuming(parse_template(kind.template()))
        .parse(line)
        .finish()
        .ok()
        .map(|(_, args)| args)
}
