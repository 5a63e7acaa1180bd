use log::{debug, info};
use schemars::JsonSchema;
use serde::Serialize;

use crate::error::InterpretError;
use crate::narrate::Dispatcher;
use crate::roster::{GameLineups, Roster};
use crate::state::GameState;
use crate::stream::{MakeEventStream, SourceLine, StreamItem};
use crate::table::{Table, TableBuilder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameOutput {
    pub tables: Vec<Table>,
    /// Lines no grammar matched, in log order. Each also has a diagnostic row in `tables`.
    pub unrecognized: Vec<SourceLine>,
}

/// Interprets one game's log. Unrecognized lines don't stop interpretation; lineups that don't
/// make sense, or a play before anyone has come up to bat, do.
pub fn interpret_game<IterT>(lineups: GameLineups, lines: IterT) -> Result<GameOutput, InterpretError>
    where IterT: IntoIterator, IterT::Item: AsRef<str> {
    let mut roster = Roster::new(lineups)?;
    let mut state = GameState::new();
    let mut table = TableBuilder::new();
    let mut unrecognized = Vec::new();

    let mut dispatcher = Dispatcher::new(&mut roster, &mut table);
    let mut stream = lines.into_iter().event_stream();
    while let Some(item) = stream.next() {
        debug!("Interpreting {:?}", stream.take_log());
        match item {
            StreamItem::Group(group) => {
                let settled = dispatcher.apply_changes(&mut state, &group.changes, group.play.as_ref())?;
                if let Some(play) = &group.play {
                    dispatcher.apply_play(&mut state, settled, play);
                }
            }
            StreamItem::Unrecognized(line) => {
                dispatcher.diagnostic(&mut state, &line);
                unrecognized.push(line);
            }
        }
    }
    dispatcher.finish(&mut state);

    let tables = table.into_tables();
    info!("Interpreted game into {} tables with {} unrecognized lines", tables.len(), unrecognized.len());
    Ok(GameOutput { tables, unrecognized })
}
