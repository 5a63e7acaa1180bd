use thiserror::Error;

use crate::event::EventKind;
use crate::roster::RosterError;

#[derive(Error, Debug)]
pub enum InterpretError {
    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error("{kind:?} event on line {line} needs a batter, but no batter has been announced")]
    NoBatter {
        kind: EventKind,
        line: usize,
    },
}
