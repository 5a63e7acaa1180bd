use std::collections::{BTreeMap, VecDeque};
use itertools::Itertools;
use log::{debug, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use thiserror::Error;

use crate::event::{ordinal, PlayerId, Position, Scoring, Side};

pub const LINEUP_SIZE: usize = 9;

const PINCH_HITTER: &str = "pinch hitter";
const PINCH_RUNNER: &str = "pinch runner";

/// Starting lineups for both teams, as supplied alongside a game log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameLineups {
    pub away: TeamLineup,
    pub home: TeamLineup,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamLineup {
    pub name: String,
    /// Batting order. Exactly nine entries.
    pub batting: Vec<BatterRecord>,
    /// Starting pitcher, when they aren't in the batting order (designated hitter games)
    #[serde(default)]
    pub pitcher: Option<PlayerId>,
    #[serde(default)]
    pub bench: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatterRecord {
    pub player: PlayerId,
    /// None for the designated hitter
    #[serde(default)]
    pub position: Option<Position>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("{team} lineup has {count} batters, expected {}", LINEUP_SIZE)]
    WrongLineupSize { team: String, count: usize },

    #[error("{team} lists {player} more than once")]
    DuplicatePlayer { team: String, player: PlayerId },

    #[error("{team} has more than one player at {}", .position.code())]
    DuplicatePosition { team: String, position: Position },

    #[error("{team} has nobody at {}", .position.code())]
    MissingPosition { team: String, position: Position },

    #[error("{team}'s pitching record says {recorded} is pitching but {actual} is on the mound")]
    PitcherMismatch { team: String, recorded: PlayerId, actual: PlayerId },
}

/// One place in the batting order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot {
    pub player: PlayerId,
    /// Position the slot's player should take when their team next takes the field. Set when a
    /// pinch hitter or runner replaces a fielder.
    pub pending: Option<Position>,
    /// Index of this slot in the starting batting order
    pub origin: usize,
    pub previous: Option<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct Team {
    name: String,
    lineup: Vec<Slot>,
    batting_index: usize,
    defense: BTreeMap<Position, PlayerId>,
    /// Most recent first
    pitchers: Vec<PlayerId>,
    bench: Vec<PlayerId>,
}

impl Team {
    fn new(lineup: TeamLineup) -> Result<Self, RosterError> {
        let TeamLineup { name, batting, pitcher, bench } = lineup;
        if batting.len() != LINEUP_SIZE {
            return Err(RosterError::WrongLineupSize { team: name, count: batting.len() });
        }

        let mut defense = BTreeMap::new();
        let fielders = batting.iter()
            .filter_map(|record| record.position.map(|pos| (pos, &record.player)))
            .chain(pitcher.iter().map(|p| (Position::Pitcher, p)));
        for (position, player) in fielders {
            if defense.insert(position, player.clone()).is_some() {
                return Err(RosterError::DuplicatePosition { team: name, position });
            }
        }

        let starters = batting.iter().map(|r| &r.player).chain(pitcher.iter());
        if let Some(player) = starters.chain(bench.iter()).duplicates().next() {
            return Err(RosterError::DuplicatePlayer { team: name, player: player.clone() });
        }

        let lineup = batting.into_iter()
            .enumerate()
            .map(|(origin, record)| Slot {
                player: record.player,
                pending: None,
                origin,
                previous: None,
            })
            .collect();
        let pitchers = defense.get(&Position::Pitcher).cloned().into_iter().collect();

        let team = Self { name, lineup, batting_index: 0, defense, pitchers, bench };
        team.check()?;
        Ok(team)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lineup(&self) -> &[Slot] {
        &self.lineup
    }

    pub fn batting_index(&self) -> usize {
        self.batting_index
    }

    pub fn bench(&self) -> &[PlayerId] {
        &self.bench
    }

    pub fn pitchers(&self) -> &[PlayerId] {
        &self.pitchers
    }

    pub fn current_pitcher(&self) -> Option<&PlayerId> {
        self.pitchers.first()
    }

    pub fn fielder_at(&self, position: Position) -> Option<&PlayerId> {
        self.defense.get(&position)
    }

    pub fn position_of(&self, player: &PlayerId) -> Option<Position> {
        self.defense.iter()
            .find_map(|(position, fielder)| (fielder == player).then_some(*position))
    }

    pub fn slot_of(&self, player: &PlayerId) -> Option<usize> {
        self.lineup.iter().position(|slot| &slot.player == player)
    }

    /// Verifies the lineup invariants: every position filled, nobody in two batting slots or at
    /// two positions, and the head of the pitching record is the player at pitcher.
    pub fn check(&self) -> Result<(), RosterError> {
        if self.lineup.len() != LINEUP_SIZE {
            return Err(RosterError::WrongLineupSize { team: self.name.clone(), count: self.lineup.len() });
        }
        for position in Position::iter() {
            if !self.defense.contains_key(&position) {
                return Err(RosterError::MissingPosition { team: self.name.clone(), position });
            }
        }
        let duplicate = self.lineup.iter().map(|s| &s.player).duplicates()
            .chain(self.defense.values().duplicates())
            .next();
        if let Some(player) = duplicate {
            return Err(RosterError::DuplicatePlayer { team: self.name.clone(), player: player.clone() });
        }
        match (self.pitchers.first(), self.defense.get(&Position::Pitcher)) {
            (Some(recorded), Some(actual)) if recorded != actual => {
                Err(RosterError::PitcherMismatch {
                    team: self.name.clone(),
                    recorded: recorded.clone(),
                    actual: actual.clone(),
                })
            }
            _ => Ok(()),
        }
    }

    /// Batting, or pitching in a designated hitter game
    fn in_game(&self, player: &PlayerId) -> bool {
        self.slot_of(player).is_some() || self.current_pitcher() == Some(player)
    }

    fn leave_bench(&mut self, player: &PlayerId) {
        self.bench.retain(|p| p != player);
    }

    fn sync_pitchers(&mut self) {
        if let Some(pitcher) = self.defense.get(&Position::Pitcher) {
            if self.pitchers.first() != Some(pitcher) {
                self.pitchers.insert(0, pitcher.clone());
            }
        }
    }

    /// Puts `player` into batting slot `index` in place of whoever is there now. The outgoing
    /// player's position (or the position they were due to take) carries over as pending.
    fn replace_in_slot(&mut self, index: usize, player: PlayerId, pending: Option<Position>) -> PlayerId {
        self.leave_bench(&player);
        let slot = &mut self.lineup[index];
        let outgoing = std::mem::replace(&mut slot.player, player);
        slot.pending = pending;
        slot.previous = Some(outgoing.clone());
        outgoing
    }

    fn pinch(&mut self, index: usize, player: PlayerId, role: &str) -> Vec<String> {
        if self.lineup[index].player == player {
            return Vec::new();
        }
        if self.slot_of(&player).is_some() {
            warn!("{player} can't {role} for {} because they're already batting", self.lineup[index].player);
            return Vec::new();
        }
        let outgoing_position = self.position_of(&self.lineup[index].player)
            .or(self.lineup[index].pending);
        let outgoing = self.replace_in_slot(index, player.clone(), outgoing_position);
        let order = ordinal(self.lineup[index].origin as u32 + 1);
        vec![format!("{player} replaces {outgoing}, batting {order}, playing {role}.")]
    }

    /// Runs the defensive cascade starting with `player` taking `position`. Each step puts one
    /// player at one position; a step may queue another when it leaves a batter without a
    /// position. There can't be more steps than there are players in the lineup.
    fn change_fielder(&mut self, position: Position, player: PlayerId) -> Vec<String> {
        let mut lines = Vec::new();
        let mut work = VecDeque::from([(position, player)]);
        let mut steps = 0;
        while let Some((position, player)) = work.pop_front() {
            if steps == LINEUP_SIZE {
                warn!("Defensive changes for {} didn't settle after {steps} moves", self.name);
                break;
            }
            steps += 1;

            if self.defense.get(&position) == Some(&player) {
                continue;
            }
            let from = self.position_of(&player);
            let displaced = self.defense.insert(position, player.clone());

            if let Some(from) = from {
                // Already on the field: trade places
                lines.push(format!("{player} is now the {}.", position.title()));
                match displaced {
                    Some(displaced) if self.in_game(&displaced) => {
                        lines.push(format!("{displaced} is now the {}.", from.title()));
                        self.defense.insert(from, displaced);
                    }
                    Some(displaced) => {
                        // Batted or ran for already. They hold `from` until whoever replaced
                        // them in the order takes it.
                        self.defense.insert(from, displaced.clone());
                        let replacement = self.lineup.iter()
                            .find(|slot| {
                                slot.pending == Some(position) && self.position_of(&slot.player).is_none()
                            })
                            .map(|slot| slot.player.clone());
                        match replacement {
                            Some(replacement) => work.push_back((from, replacement)),
                            None => debug!("{displaced} left the game, so {} has no {} yet",
                                self.name, from.code()),
                        }
                    }
                    None => {
                        self.defense.remove(&from);
                    }
                }
            } else if let Some(index) = self.slot_of(&player) {
                // A pinch hitter, pinch runner or designated hitter taking the field
                let vacated = self.lineup[index].pending.take();
                lines.push(format!("{player} is now the {}.", position.title()));
                if let (Some(displaced), Some(vacated)) = (displaced, vacated) {
                    if vacated != position && self.slot_of(&displaced).is_some() {
                        work.push_back((vacated, displaced));
                    }
                }
            } else {
                lines.push(self.enter_from_bench(position, player, displaced));
            }
            self.sync_pitchers();
        }
        lines
    }

    fn enter_from_bench(&mut self, position: Position, player: PlayerId, displaced: Option<PlayerId>) -> String {
        let slot = displaced.as_ref()
            .and_then(|displaced| {
                self.slot_of(displaced)
                    .or_else(|| self.lineup.iter().position(|slot| {
                        slot.previous.as_ref() == Some(displaced) &&
                            self.position_of(&slot.player).is_none()
                    }))
            })
            .or_else(|| self.lineup.iter().position(|slot| {
                slot.pending == Some(position) && self.position_of(&slot.player).is_none()
            }));

        match slot {
            Some(index) => {
                let outgoing = self.replace_in_slot(index, player.clone(), None);
                let order = ordinal(self.lineup[index].origin as u32 + 1);
                format!("{player} replaces {outgoing}, batting {order}, playing {}.", position.title())
            }
            None => {
                self.leave_bench(&player);
                let outgoing = displaced.unwrap_or_else(PlayerId::placeholder);
                debug!("{player} enters at {} without a batting slot", position.code());
                format!("{player} replaces {outgoing}, playing {}.", position.title())
            }
        }
    }
}

/// Both teams' lineups, defensive alignments and pitching records
#[derive(Debug, Clone)]
pub struct Roster {
    teams: [Team; 2],
}

impl Roster {
    pub fn new(lineups: GameLineups) -> Result<Self, RosterError> {
        Ok(Self {
            teams: [Team::new(lineups.away)?, Team::new(lineups.home)?],
        })
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    fn team_mut(&mut self, side: Side) -> &mut Team {
        &mut self.teams[side.index()]
    }

    pub fn check(&self) -> Result<(), RosterError> {
        self.teams.iter().try_for_each(Team::check)
    }

    /// Whoever is up in `side`'s batting order
    pub fn get_batter(&self, side: Side) -> &PlayerId {
        let team = self.team(side);
        &team.lineup[team.batting_index].player
    }

    /// The pitcher facing `batting_side`
    pub fn get_pitcher(&self, batting_side: Side) -> Option<&PlayerId> {
        self.team(batting_side.opposite()).current_pitcher()
    }

    /// e.g. `shortstop P306`
    pub fn get_title_fielder(&self, fielding_side: Side, position: Position) -> String {
        match self.team(fielding_side).fielder_at(position) {
            Some(player) => format!("{} {player}", position.title()),
            None => position.title().to_string(),
        }
    }

    /// Renders scoring notation as words: `6-4-3` becomes `shortstop P306 to second baseman
    /// P304 to first baseman P303`
    pub fn get_scoring(&self, fielding_side: Side, scoring: &Scoring) -> String {
        match scoring {
            Scoring::Error(position) => {
                format!("error by {}", self.get_title_fielder(fielding_side, *position))
            }
            Scoring::Chain { fielders, .. } if fielders.len() == 1 => {
                format!("{} unassisted", self.get_title_fielder(fielding_side, fielders[0]))
            }
            Scoring::Chain { fielders, .. } => fielders.iter()
                .map(|position| self.get_title_fielder(fielding_side, *position))
                .join(" to "),
        }
    }

    pub fn advance_batter(&mut self, side: Side) {
        let team = self.team_mut(side);
        team.batting_index = (team.batting_index + 1) % LINEUP_SIZE;
    }

    /// Points the batting order at the announced batter. A batter who isn't in the lineup is
    /// pinch hitting in the current slot.
    pub fn handle_change_batter(&mut self, side: Side, player: &PlayerId) -> Vec<String> {
        let team = self.team_mut(side);
        match team.slot_of(player) {
            Some(index) => {
                if index != team.batting_index {
                    debug!("{} batting order jumped from slot {} to {index} for {player}",
                        team.name, team.batting_index);
                    team.batting_index = index;
                }
                Vec::new()
            }
            None => self.handle_change_pinch_hitter(side, player),
        }
    }

    pub fn handle_change_pinch_hitter(&mut self, side: Side, player: &PlayerId) -> Vec<String> {
        let team = self.team_mut(side);
        let index = team.batting_index;
        team.pinch(index, player.clone(), PINCH_HITTER)
    }

    pub fn handle_change_runner(&mut self, side: Side, displaced: &PlayerId, player: &PlayerId) -> Vec<String> {
        let team = self.team_mut(side);
        match team.slot_of(displaced) {
            Some(index) => team.pinch(index, player.clone(), PINCH_RUNNER),
            None => {
                debug!("Pinch runner {player} replaced {displaced}, who isn't in the batting order");
                team.leave_bench(player);
                vec![format!("{player} replaces {displaced}, playing {PINCH_RUNNER}.")]
            }
        }
    }

    pub fn handle_change_fielder(&mut self, side: Side, position: Position, player: &PlayerId) -> Vec<String> {
        self.team_mut(side).change_fielder(position, player.clone())
    }

    pub fn handle_change_pitcher(&mut self, side: Side, player: &PlayerId) -> Vec<String> {
        if self.team(side).current_pitcher() == Some(player) {
            return Vec::new();
        }
        self.handle_change_fielder(side, Position::Pitcher, player)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    pub(crate) fn team_lineup(name: &str, prefix: &str, designated_hitter: bool) -> TeamLineup {
        // Slot n fields position n, except a designated hitter bats 9th in place of the pitcher
        let order = [
            Position::CenterField, Position::Shortstop, Position::FirstBase,
            Position::RightField, Position::ThirdBase, Position::LeftField,
            Position::SecondBase, Position::Catcher, Position::Pitcher,
        ];
        let batting = order.iter()
            .map(|position| {
                let number: u8 = (*position).into();
                if designated_hitter && *position == Position::Pitcher {
                    BatterRecord { player: PlayerId::new(format!("{prefix}10")), position: None }
                } else {
                    BatterRecord { player: PlayerId::new(format!("{prefix}{number}")), position: Some(*position) }
                }
            })
            .collect();
        TeamLineup {
            name: name.to_string(),
            batting,
            pitcher: designated_hitter.then(|| PlayerId::new(format!("{prefix}1"))),
            bench: (11..=15).map(|n| PlayerId::new(format!("{prefix}{n}"))).collect(),
        }
    }

    pub(crate) fn lineups() -> GameLineups {
        GameLineups {
            away: team_lineup("Visitors", "P", false),
            home: team_lineup("Hosts", "H", true),
        }
    }

    fn p(id: &str) -> PlayerId {
        PlayerId::new(id)
    }

    #[test]
    fn lineup_validation() {
        assert!(Roster::new(lineups()).is_ok());

        let mut short = lineups();
        short.home.batting.pop();
        assert_eq!(Roster::new(short).unwrap_err(),
                   RosterError::WrongLineupSize { team: "Hosts".to_string(), count: 8 });

        let mut no_pitcher = lineups();
        no_pitcher.home.pitcher = None;
        assert_eq!(Roster::new(no_pitcher).unwrap_err(),
                   RosterError::MissingPosition { team: "Hosts".to_string(), position: Position::Pitcher });

        let mut twice = lineups();
        twice.away.bench.push(p("P6"));
        assert_eq!(Roster::new(twice).unwrap_err(),
                   RosterError::DuplicatePlayer { team: "Visitors".to_string(), player: p("P6") });
    }

    #[test]
    fn scoring_chains_use_fielder_titles() {
        let roster = Roster::new(lineups()).unwrap();
        assert_eq!(
            roster.get_scoring(Side::Home, &Scoring::chain(vec![
                Position::Shortstop, Position::SecondBase, Position::FirstBase,
            ])),
            "shortstop H6 to second baseman H4 to first baseman H3",
        );
        assert_eq!(roster.get_scoring(Side::Home, &Scoring::chain(vec![Position::FirstBase])),
                   "first baseman H3 unassisted");
        assert_eq!(roster.get_scoring(Side::Home, &Scoring::Chain {
            unassisted_marker: true,
            fielders: vec![Position::FirstBase],
        }), "first baseman H3 unassisted");
        assert_eq!(roster.get_scoring(Side::Away, &Scoring::Error(Position::Shortstop)),
                   "error by shortstop P6");
    }

    #[test]
    fn batting_order_wraps() {
        let mut roster = Roster::new(lineups()).unwrap();
        assert_eq!(roster.get_batter(Side::Away), &p("P8"));
        for _ in 0..LINEUP_SIZE {
            roster.advance_batter(Side::Away);
        }
        assert_eq!(roster.get_batter(Side::Away), &p("P8"));
        assert!(roster.handle_change_batter(Side::Away, &p("P3")).is_empty());
        assert_eq!(roster.team(Side::Away).batting_index(), 2);
    }

    #[test]
    fn pitcher_faces_the_other_team() {
        let mut roster = Roster::new(lineups()).unwrap();
        assert_eq!(roster.get_pitcher(Side::Away), Some(&p("H1")));
        let lines = roster.handle_change_pitcher(Side::Home, &p("H11"));
        assert_eq!(lines, vec!["H11 replaces H1, playing pitcher."]);
        assert_eq!(roster.get_pitcher(Side::Away), Some(&p("H11")));
        assert_eq!(roster.team(Side::Home).pitchers(), &[p("H11"), p("H1")]);
        assert!(roster.handle_change_pitcher(Side::Home, &p("H11")).is_empty());
        roster.check().unwrap();
    }

    #[test]
    fn pinch_hitter_then_takes_the_field() {
        let mut roster = Roster::new(lineups()).unwrap();
        roster.handle_change_batter(Side::Away, &p("P6"));
        let lines = roster.handle_change_pinch_hitter(Side::Away, &p("P11"));
        assert_eq!(lines, vec!["P11 replaces P6, batting 2nd, playing pinch hitter."]);
        assert_eq!(roster.team(Side::Away).lineup()[1].pending, Some(Position::Shortstop));

        let lines = roster.handle_change_fielder(Side::Away, Position::Shortstop, &p("P11"));
        assert_eq!(lines, vec!["P11 is now the shortstop."]);
        assert_eq!(roster.team(Side::Away).fielder_at(Position::Shortstop), Some(&p("P11")));
        roster.check().unwrap();
    }

    #[test]
    fn bench_player_inherits_the_pinch_hitters_slot() {
        let mut roster = Roster::new(lineups()).unwrap();
        roster.handle_change_batter(Side::Away, &p("P6"));
        roster.handle_change_pinch_hitter(Side::Away, &p("P11"));
        let lines = roster.handle_change_fielder(Side::Away, Position::Shortstop, &p("P12"));
        assert_eq!(lines, vec!["P12 replaces P11, batting 2nd, playing shortstop."]);
        assert_eq!(roster.team(Side::Away).lineup()[1].player, p("P12"));
        roster.check().unwrap();
    }

    #[test]
    fn fielders_swap_positions() {
        let mut roster = Roster::new(lineups()).unwrap();
        let lines = roster.handle_change_fielder(Side::Away, Position::Shortstop, &p("P4"));
        assert_eq!(lines, vec!["P4 is now the shortstop.", "P6 is now the second baseman."]);
        assert_eq!(roster.team(Side::Away).fielder_at(Position::SecondBase), Some(&p("P6")));
        assert!(roster.handle_change_fielder(Side::Away, Position::Shortstop, &p("P4")).is_empty());
        roster.check().unwrap();
    }

    #[test]
    fn moving_to_a_replaced_players_position_brings_in_their_replacement() {
        let mut roster = Roster::new(lineups()).unwrap();
        roster.handle_change_batter(Side::Away, &p("P6"));
        roster.handle_change_pinch_hitter(Side::Away, &p("P11"));
        // The second baseman covers short, so the pinch hitter plays second instead
        let lines = roster.handle_change_fielder(Side::Away, Position::Shortstop, &p("P4"));
        assert_eq!(lines, vec!["P4 is now the shortstop.", "P11 is now the second baseman."]);
        assert!(roster.handle_change_fielder(Side::Away, Position::SecondBase, &p("P11")).is_empty());
        let team = roster.team(Side::Away);
        assert_eq!(team.position_of(&p("P6")), None);
        assert_eq!(team.fielder_at(Position::SecondBase), Some(&p("P11")));
        assert_eq!(team.lineup()[1].pending, None);
        roster.check().unwrap();
    }

    #[test]
    fn replaced_player_is_not_announced_back_into_the_game() {
        let mut roster = Roster::new(lineups()).unwrap();
        roster.handle_change_pinch_hitter(Side::Away, &p("P12"));
        roster.handle_change_batter(Side::Away, &p("P6"));
        roster.handle_change_pinch_hitter(Side::Away, &p("P11"));
        assert_eq!(roster.handle_change_fielder(Side::Away, Position::Shortstop, &p("P12")),
                   vec!["P12 is now the shortstop."]);
        // Nobody is due to play center, so P8 quietly keeps second until it's filled
        assert_eq!(roster.handle_change_fielder(Side::Away, Position::CenterField, &p("P4")),
                   vec!["P4 is now the center fielder."]);
        assert_eq!(roster.handle_change_fielder(Side::Away, Position::SecondBase, &p("P11")),
                   vec!["P11 is now the second baseman."]);
        let team = roster.team(Side::Away);
        assert_eq!(team.position_of(&p("P8")), None);
        assert_eq!(team.position_of(&p("P6")), None);
        roster.check().unwrap();
    }

    #[test]
    fn pinch_hitter_takes_another_position_and_pushes_the_fielder_over() {
        let mut roster = Roster::new(lineups()).unwrap();
        roster.handle_change_batter(Side::Away, &p("P6"));
        roster.handle_change_pinch_hitter(Side::Away, &p("P11"));
        // The pinch hitter takes second, so the second baseman covers short
        let lines = roster.handle_change_fielder(Side::Away, Position::SecondBase, &p("P11"));
        assert_eq!(lines, vec!["P11 is now the second baseman.", "P4 is now the shortstop."]);
        let team = roster.team(Side::Away);
        assert_eq!(team.fielder_at(Position::Shortstop), Some(&p("P4")));
        assert_eq!(team.position_of(&p("P6")), None);
        roster.check().unwrap();
    }

    #[test]
    fn relief_pitcher_in_a_designated_hitter_game_does_not_bat() {
        let mut roster = Roster::new(lineups()).unwrap();
        let lines = roster.handle_change_pitcher(Side::Home, &p("H12"));
        assert_eq!(lines, vec!["H12 replaces H1, playing pitcher."]);
        assert_eq!(roster.team(Side::Home).slot_of(&p("H12")), None);
        assert!(!roster.team(Side::Home).bench().contains(&p("H12")));
    }

    #[test]
    fn pinch_runner_replaces_the_runner_in_the_order() {
        let mut roster = Roster::new(lineups()).unwrap();
        let lines = roster.handle_change_runner(Side::Away, &p("P3"), &p("P13"));
        assert_eq!(lines, vec!["P13 replaces P3, batting 3rd, playing pinch runner."]);
        assert_eq!(roster.team(Side::Away).lineup()[2].previous, Some(p("P3")));
        assert_eq!(roster.team(Side::Away).lineup()[2].pending, Some(Position::FirstBase));
    }
}
