use std::fmt::{Display, Formatter};
use std::mem;
use schemars::JsonSchema;
use serde::Serialize;

use crate::event::{ordinal, PlayerId};
use crate::roster::Roster;
use crate::state::GameState;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum RowKind {
    /// A play, a baserunning event, or anything else that happened on the field
    Narrative,
    /// One pitch and the count after it
    Pitch,
    Substitution,
    /// Runs/hits/errors/left on base at the end of a half-inning
    Summary,
    /// A line the decoder didn't recognize
    Diagnostic,
}

/// Outs, count and runners at the moment a row was written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Situation {
    /// Whether the ball has been put in play this plate appearance
    pub in_play: bool,
    pub outs: u8,
    pub balls: u8,
    pub strikes: u8,
    pub first: Option<PlayerId>,
    pub second: Option<PlayerId>,
    pub third: Option<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub kind: RowKind,
    pub text: String,
    pub situation: Option<Situation>,
}

impl Row {
    pub fn new(kind: RowKind, text: impl Into<String>, situation: Option<Situation>) -> Self {
        Self { kind, text: text.into(), situation }
    }

    pub fn diagnostic(line: &str) -> Self {
        Self::new(RowKind::Diagnostic, format!("Unrecognized event: {line}"), None)
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.kind, &self.situation) {
            (RowKind::Pitch, Some(situation)) => {
                write!(f, "  {:<28} {}-{}", self.text, situation.balls, situation.strikes)
            }
            (RowKind::Narrative, Some(situation)) => {
                let runners: String = [&situation.first, &situation.second, &situation.third]
                    .iter()
                    .map(|r| if r.is_some() { '*' } else { '-' })
                    .collect();
                write!(f, "{} [{} out, {}]", self.text, situation.outs, runners)
            }
            (RowKind::Diagnostic, _) => write!(f, "!! {}", self.text),
            _ => write!(f, "{}", self.text),
        }
    }
}

/// One renderable unit: a half-inning, or a group of defensive substitutions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub header: String,
    pub body: Vec<Row>,
    pub foot: Vec<Row>,
}

impl Table {
    fn new(header: impl Into<String>) -> Self {
        Self { header: header.into(), body: Vec::new(), foot: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.body.is_empty() && self.foot.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item=&Row> {
        self.body.iter().chain(self.foot.iter())
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.header)?;
        for row in &self.body {
            writeln!(f, "{row}")?;
        }
        for row in &self.foot {
            writeln!(f, "  {row}")?;
        }
        Ok(())
    }
}

/// Accumulates rows into tables. Rows always go to the working table; starting a new table or
/// calling [`TableBuilder::append_all`] moves the working table into the output, unless
/// nothing was ever written to it.
#[derive(Debug, Default)]
pub struct TableBuilder {
    working: Option<Table>,
    tables: Vec<Table>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn working_mut(&mut self) -> &mut Table {
        self.working.get_or_insert_with(|| Table::new(""))
    }

    pub fn append_body(&mut self, row: Row) {
        self.working_mut().body.push(row)
    }

    pub fn append_foot(&mut self, row: Row) {
        self.working_mut().foot.push(row)
    }

    pub fn append_summary(&mut self, text: impl Into<String>) {
        self.append_foot(Row::new(RowKind::Summary, text, None))
    }

    /// Finishes the working table and starts a new one with this header
    pub fn append_table(&mut self, header: impl Into<String>) {
        self.append_all();
        self.working = Some(Table::new(header));
    }

    /// Starts the table for the half-inning the game state is in
    pub fn create_table(&mut self, roster: &Roster, state: &GameState) {
        let batting = roster.team(state.batting_side());
        self.append_table(format!("{} of the {}: {} batting",
                                  state.half(), ordinal(state.inning()), batting.name()));
    }

    /// Moves the working table into the output
    pub fn append_all(&mut self) {
        if let Some(table) = self.working.take() {
            if !table.is_empty() {
                self.tables.push(table);
            }
        }
    }

    pub fn reset_all(&mut self) {
        self.working = None;
        self.tables.clear();
    }

    /// Whether the working table has any rows yet
    pub fn has_working_rows(&self) -> bool {
        self.working.as_ref().map_or(false, |t| !t.is_empty())
    }

    pub fn get_tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn into_tables(mut self) -> Vec<Table> {
        self.append_all();
        mem::take(&mut self.tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn narrative(text: &str) -> Row {
        Row::new(RowKind::Narrative, text, None)
    }

    #[test]
    fn tables_are_split_at_headers() {
        let mut builder = TableBuilder::new();
        builder.append_table("Top of the 1st");
        builder.append_body(narrative("one"));
        builder.append_summary("0 runs");
        builder.append_table("Bottom of the 1st");
        builder.append_body(narrative("two"));
        builder.append_all();

        let tables = builder.get_tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].header, "Top of the 1st");
        assert_eq!(tables[0].body, vec![narrative("one")]);
        assert_eq!(tables[0].foot[0].kind, RowKind::Summary);
        assert_eq!(tables[1].rows().map(|r| r.text.as_str()).collect::<Vec<_>>(), vec!["two"]);
    }

    #[test]
    fn empty_tables_are_dropped() {
        let mut builder = TableBuilder::new();
        builder.append_table("nothing happens");
        assert!(!builder.has_working_rows());
        builder.append_table("something happens");
        builder.append_body(narrative("x"));
        assert!(builder.has_working_rows());
        assert_eq!(builder.into_tables().len(), 1);
    }

    #[test]
    fn reset_discards_everything() {
        let mut builder = TableBuilder::new();
        builder.append_body(narrative("x"));
        builder.append_all();
        builder.append_body(narrative("y"));
        builder.reset_all();
        assert!(builder.get_tables().is_empty());
        assert!(!builder.has_working_rows());
    }

    #[test]
    fn diagnostic_rows_are_marked() {
        let row = Row::diagnostic("gibberish");
        assert_eq!(row.text, "Unrecognized event: gibberish");
        assert_eq!(row.to_string(), "!! Unrecognized event: gibberish");
    }
}
