use log::debug;

use crate::event::{Base, Half, PlayerId, Side};
use crate::table::{Row, RowKind, Situation, TableBuilder};

pub const BALLS_FOR_WALK: u8 = 4;
pub const STRIKES_FOR_STRIKEOUT: u8 = 3;

/// A runner moving from one base to another. `to` is `Base::Home` when they scored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    pub runner: PlayerId,
    pub to: Base,
}

impl Advance {
    pub fn scored(&self) -> bool {
        self.to == Base::Home
    }
}

/// Inning, count, outs and base occupancy for one game.
///
/// Outs accumulate over the half-inning and the count resets every plate appearance. Nothing
/// here knows about lineups; the dispatcher pairs this with a [`crate::Roster`].
#[derive(Debug, Clone)]
pub struct GameState {
    half: Half,
    inning: u32,
    outs: u8,
    balls: u8,
    strikes: u8,
    bases: [Option<PlayerId>; 3],
    batter: Option<PlayerId>,
    inplay: bool,
    runs: [u32; 2],
    half_runs: u32,
    half_hits: u32,
    half_errors: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            half: Half::Top,
            inning: 1,
            outs: 0,
            balls: 0,
            strikes: 0,
            bases: Default::default(),
            batter: None,
            inplay: false,
            runs: [0, 0],
            half_runs: 0,
            half_hits: 0,
            half_errors: 0,
        }
    }

    pub fn half(&self) -> Half {
        self.half
    }

    pub fn inning(&self) -> u32 {
        self.inning
    }

    pub fn batting_side(&self) -> Side {
        self.half.batting_side()
    }

    pub fn fielding_side(&self) -> Side {
        self.batting_side().opposite()
    }

    pub fn outs(&self) -> u8 {
        self.outs
    }

    pub fn count(&self) -> (u8, u8) {
        (self.balls, self.strikes)
    }

    pub fn runs(&self, side: Side) -> u32 {
        self.runs[side.index()]
    }

    pub fn batter(&self) -> Option<&PlayerId> {
        self.batter.as_ref()
    }

    pub fn set_inplay(&mut self) {
        self.inplay = true;
    }

    pub fn handle_change_inning(&mut self, half: Half, inning: u32) {
        self.half = half;
        self.inning = inning;
        self.outs = 0;
        self.bases = Default::default();
        self.batter = None;
        self.half_runs = 0;
        self.half_hits = 0;
        self.half_errors = 0;
        self.end_plate_appearance();
    }

    pub fn handle_change_batter(&mut self, batter: PlayerId) {
        self.batter = Some(batter);
        self.end_plate_appearance();
    }

    /// The pinch hitter takes over the plate appearance, count included
    pub fn handle_change_pinch_hitter(&mut self, batter: PlayerId) {
        self.batter = Some(batter);
    }

    /// Puts a pinch runner on the base. Returns the runner they replaced, or None (and changes
    /// nothing) if the base was empty.
    pub fn handle_change_runner(&mut self, base: Base, runner: PlayerId) -> Option<PlayerId> {
        let slot = self.bases.get_mut(base.index()?)?;
        if slot.is_some() {
            slot.replace(runner)
        } else {
            debug!("Pinch runner {runner} sent to empty {base} base");
            None
        }
    }

    pub fn end_plate_appearance(&mut self) {
        self.balls = 0;
        self.strikes = 0;
        self.inplay = false;
    }

    pub fn handle_pitch_ball(&mut self) {
        self.balls += 1;
    }

    pub fn handle_pitch_strike(&mut self) {
        self.strikes += 1;
    }

    /// Fouls only count as strikes until the second strike
    pub fn handle_pitch_foul(&mut self) {
        if self.strikes + 1 < STRIKES_FOR_STRIKEOUT {
            self.strikes += 1;
        }
    }

    pub fn is_walk(&self) -> bool {
        self.balls >= BALLS_FOR_WALK
    }

    pub fn is_strikeout(&self) -> bool {
        self.strikes >= STRIKES_FOR_STRIKEOUT
    }

    pub fn get_runner(&self, base: Base) -> Option<&PlayerId> {
        self.bases.get(base.index()?)?.as_ref()
    }

    pub fn runners(&self) -> impl Iterator<Item=(Base, &PlayerId)> {
        Base::OCCUPIABLE.into_iter()
            .zip(self.bases.iter())
            .filter_map(|(base, runner)| runner.as_ref().map(|r| (base, r)))
    }

    /// Puts the batter on a base, or scores them if the base is home
    pub fn handle_batter_to_base(&mut self, batter: PlayerId, base: Base) {
        match base.index() {
            Some(i) => {
                if let Some(displaced) = self.bases[i].replace(batter) {
                    debug!("Batter took {base} base from {displaced}, who is no longer tracked");
                }
            }
            None => self.score(),
        }
    }

    pub fn handle_out_batter(&mut self) {
        self.outs += 1;
    }

    /// Retires the runner on `base`. Returns None and records no out if the base was empty.
    pub fn handle_out_runner(&mut self, base: Base) -> Option<PlayerId> {
        let runner = self.bases.get_mut(base.index()?)?.take()?;
        self.outs += 1;
        Some(runner)
    }

    /// Moves every runner `bases` bases ahead. Returns the advances lead runner first.
    pub fn advance_runners(&mut self, bases: u8) -> Vec<Advance> {
        let mut advances = Vec::new();
        for from in Base::OCCUPIABLE.into_iter().rev() {
            if let Some(advance) = self.move_runner(from, from.number() + bases) {
                advances.push(advance);
            }
        }
        advances
    }

    /// Moves only the runners who are forced when the batter is awarded first base. Returns
    /// the advances lead runner first.
    pub fn force_runners(&mut self) -> Vec<Advance> {
        let forced = self.bases.iter()
            .take_while(|runner| runner.is_some())
            .count();
        let mut advances = Vec::new();
        for from in Base::OCCUPIABLE.into_iter().take(forced).rev() {
            if let Some(advance) = self.move_runner(from, from.number() + 1) {
                advances.push(advance);
            }
        }
        advances
    }

    /// Moves the runner on `from` to the base numbered `to`, scoring them past third
    pub fn move_runner(&mut self, from: Base, to: u8) -> Option<Advance> {
        let runner = self.bases.get_mut(from.index()?)?.take()?;
        let to = Base::from_number(to).unwrap_or(Base::Home);
        self.handle_batter_to_base(runner.clone(), to);
        Some(Advance { runner, to })
    }

    fn score(&mut self) {
        self.runs[self.batting_side().index()] += 1;
        self.half_runs += 1;
    }

    pub fn record_hit(&mut self) {
        self.half_hits += 1;
    }

    pub fn record_error(&mut self) {
        self.half_errors += 1;
    }

    pub fn left_on_base(&self) -> usize {
        self.bases.iter().filter(|r| r.is_some()).count()
    }

    pub fn situation(&self) -> Situation {
        let [first, second, third] = self.bases.clone();
        Situation {
            in_play: self.inplay,
            outs: self.outs,
            balls: self.balls,
            strikes: self.strikes,
            first,
            second,
            third,
        }
    }

    pub fn create_pitch_row(&self, label: &str, table: &mut TableBuilder) {
        table.append_body(Row::new(RowKind::Pitch, label, Some(self.situation())));
    }

    pub fn create_summary_row(&self, table: &mut TableBuilder) {
        table.append_summary(format!(
            "{}, {}, {}, {} left on base",
            plural(self.half_runs as usize, "run"),
            plural(self.half_hits as usize, "hit"),
            plural(self.half_errors as usize, "error"),
            self.left_on_base(),
        ));
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}
