use thiserror::Error;

use crate::event::EventKind;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Line doesn't match the {kind:?} grammar \"{template}\": {err}")]
    GrammarMismatch {
        kind: EventKind,
        template: &'static str,
        err: String,
    },
}
