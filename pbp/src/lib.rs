mod error;
mod event;
mod interpret;
mod narrate;
mod parse;
mod roster;
mod state;
mod stream;
mod table;

pub use error::InterpretError;
pub use event::*;
pub use interpret::{interpret_game, GameOutput};
pub use narrate::{Dispatcher, Settled};
pub use parse::{decode, explain, matching_kinds, Decoded};
pub use parse::error::DecodeError;
pub use roster::{BatterRecord, GameLineups, Roster, RosterError, Slot, Team, TeamLineup, LINEUP_SIZE};
pub use state::{Advance, GameState};
pub use stream::{EventGroup, EventStream, LineEvent, MakeEventStream, SourceLine, StreamItem};
pub use table::{Row, RowKind, Situation, Table, TableBuilder};
