use itertools::Itertools;
use log::{debug, info, warn};

use crate::error::InterpretError;
use crate::event::{Base, DecodedEvent, EventKind, Family, Half, Path, PlayerId, Position, Scoring, Side};
use crate::roster::Roster;
use crate::state::{Advance, GameState, STRIKES_FOR_STRIKEOUT};
use crate::stream::{LineEvent, SourceLine};
use crate::table::{Row, RowKind, TableBuilder};

/// Proof that a group's change events have been applied, carrying whoever is batting for the
/// play that follows. Only [`Dispatcher::apply_changes`] makes these.
#[derive(Debug)]
pub struct Settled {
    batter: PlayerId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum OpenTable {
    Closed,
    /// Substitutions made between half-innings
    Defense,
    HalfInning,
}

/// Turns decoded events into state changes and narrative rows.
///
/// Inning changes are deferred: the line that announces a new half-inning closes the previous
/// one, but the new half (and its table) only starts once the next event arrives. Defensive
/// substitutions announced in between get a table of their own.
pub struct Dispatcher<'g> {
    roster: &'g mut Roster,
    table: &'g mut TableBuilder,
    pending_inning: Option<(Half, u32)>,
    open: OpenTable,
    batter_announced: bool,
}

impl<'g> Dispatcher<'g> {
    pub fn new(roster: &'g mut Roster, table: &'g mut TableBuilder) -> Self {
        Self {
            roster,
            table,
            pending_inning: Some((Half::Top, 1)),
            open: OpenTable::Closed,
            batter_announced: false,
        }
    }

    /// Applies a group's change events, then settles who is batting for `play`
    pub fn apply_changes(&mut self, state: &mut GameState, changes: &[LineEvent],
                         play: Option<&LineEvent>) -> Result<Settled, InterpretError> {
        for change in changes {
            if self.apply_change(state, &change.event).is_none() {
                warn!("Couldn't interpret line {}: {}", change.line.number, change.line.text);
            }
        }

        if play.is_some() {
            self.confirm_inning(state);
        }
        let batter = match state.batter() {
            Some(batter) => Some(batter.clone()),
            None if self.batter_announced => {
                let batter = self.roster.get_batter(state.batting_side()).clone();
                state.handle_change_batter(batter.clone());
                Some(batter)
            }
            None => None,
        };
        match (batter, play) {
            (Some(batter), _) => Ok(Settled { batter }),
            (None, Some(play)) if play.event.family().needs_batter() => {
                Err(InterpretError::NoBatter { kind: play.event.kind, line: play.line.number })
            }
            (None, _) => Ok(Settled { batter: PlayerId::placeholder() }),
        }
    }

    pub fn apply_play(&mut self, state: &mut GameState, settled: Settled, play: &LineEvent) {
        self.confirm_inning(state);
        let event = &play.event;
        let batter = &settled.batter;
        let applied = match event.family() {
            Family::Change => self.apply_change(state, event),
            Family::Reach => self.handle_reach(state, batter, event),
            Family::BattedOut => self.handle_batted_out(state, batter, event),
            Family::Pitch => self.handle_pitch(state, batter, event),
            Family::Other => self.handle_other(state, event),
        };
        if applied.is_none() {
            warn!("Couldn't interpret line {}: {}", play.line.number, play.line.text);
        }
    }

    /// Writes a row for a line that couldn't be decoded
    pub fn diagnostic(&mut self, state: &mut GameState, line: &SourceLine) {
        self.confirm_inning(state);
        self.table.append_body(Row::diagnostic(&line.text));
    }

    /// Closes out the last half-inning
    pub fn finish(&mut self, state: &mut GameState) {
        self.close_half(state);
        self.table.append_all();
    }

    fn close_half(&mut self, state: &GameState) {
        if self.open == OpenTable::HalfInning {
            state.create_summary_row(self.table);
        }
        self.open = OpenTable::Closed;
    }

    fn confirm_inning(&mut self, state: &mut GameState) {
        if let Some((half, inning)) = self.pending_inning.take() {
            info!("{half} of the {inning} begins");
            state.handle_change_inning(half, inning);
            self.table.create_table(self.roster, state);
            self.open = OpenTable::HalfInning;
        }
    }

    /// The team in the field, or the team about to take the field if a new half-inning has
    /// been announced but hasn't started yet
    fn fielding_side(&self, state: &GameState) -> Side {
        match self.pending_inning {
            Some((half, _)) => half.batting_side().opposite(),
            None => state.fielding_side(),
        }
    }

    fn open_defense_table(&mut self, side: Side) {
        if self.pending_inning.is_some() && self.open != OpenTable::Defense {
            self.table.append_table(format!("{} defensive changes", self.roster.team(side).name()));
            self.open = OpenTable::Defense;
        }
    }

    fn narrate(&mut self, state: &GameState, text: impl Into<String>) {
        self.table.append_body(Row::new(RowKind::Narrative, text, Some(state.situation())));
    }

    fn substitutions(&mut self, lines: Vec<String>) {
        for line in lines {
            self.table.append_body(Row::new(RowKind::Substitution, line, None));
        }
    }

    fn end_plate_appearance(&mut self, state: &mut GameState) {
        let side = state.batting_side();
        self.roster.advance_batter(side);
        state.end_plate_appearance();
        state.handle_change_batter(self.roster.get_batter(side).clone());
    }

    fn apply_change(&mut self, state: &mut GameState, event: &DecodedEvent) -> Option<()> {
        match event.kind {
            EventKind::ChangeInning => {
                self.close_half(state);
                self.table.append_all();
                self.pending_inning = Some((event.half()?, event.inning()?));
            }
            EventKind::ChangeBatter => {
                let batter = event.player(0)?;
                self.confirm_inning(state);
                let lines = self.roster.handle_change_batter(state.batting_side(), batter);
                self.substitutions(lines);
                state.handle_change_batter(batter.clone());
                self.batter_announced = true;
                self.narrate(state, format!("Now batting: {batter}."));
            }
            EventKind::ChangePinchHitter => {
                let batter = event.player(0)?;
                self.confirm_inning(state);
                let lines = self.roster.handle_change_pinch_hitter(state.batting_side(), batter);
                self.substitutions(lines);
                state.handle_change_pinch_hitter(batter.clone());
                self.batter_announced = true;
            }
            EventKind::ChangePinchRunner => {
                let (base, runner) = (event.base(0)?, event.player(0)?);
                self.confirm_inning(state);
                let displaced = state.handle_change_runner(base, runner.clone())
                    .unwrap_or_else(|| {
                        debug!("Pinch runner {runner} at {base}, where there's no runner");
                        PlayerId::placeholder()
                    });
                let lines = self.roster.handle_change_runner(state.batting_side(), &displaced, runner);
                self.substitutions(lines);
            }
            EventKind::ChangeFielder | EventKind::ChangePitcher => {
                let player = event.player(0)?;
                let side = self.fielding_side(state);
                self.open_defense_table(side);
                let lines = match event.position() {
                    Some(position) => self.roster.handle_change_fielder(side, position, player),
                    None => self.roster.handle_change_pitcher(side, player),
                };
                self.substitutions(lines);
            }
            kind => {
                debug!("{kind:?} isn't a change event");
                return None;
            }
        }
        Some(())
    }

    fn zone_fielder(&self, state: &GameState, event: &DecodedEvent) -> String {
        event.zone()
            .and_then(|zone| zone.leading_position())
            .map(|position| format!(" to {}", self.roster.get_title_fielder(state.fielding_side(), position)))
            .unwrap_or_default()
    }

    /// Who gets credit for the out. Air balls caught by a single fielder are "to" them, and
    /// everything else lists the whole chain.
    fn credit(&self, state: &GameState, path: Path, scoring: &Scoring) -> String {
        let side = state.fielding_side();
        match scoring.first_fielder() {
            Some(fielder) if !path.is_grounder() && scoring.is_single_fielder() => {
                format!(" to {}", self.roster.get_title_fielder(side, fielder))
            }
            _ => format!(", {}", self.roster.get_scoring(side, scoring)),
        }
    }

    fn handle_reach(&mut self, state: &mut GameState, batter: &PlayerId, event: &DecodedEvent) -> Option<()> {
        state.set_inplay();
        let side = state.fielding_side();
        let text = match event.kind {
            EventKind::ReachCatcherInterference => {
                let advances = state.force_runners();
                state.handle_batter_to_base(batter.clone(), Base::First);
                state.record_error();
                format!("{batter} reaches on interference by {}.{}",
                        self.roster.get_title_fielder(side, Position::Catcher), describe_advances(&advances))
            }
            EventKind::ReachError | EventKind::ReachErrorExtraBase => {
                let base = event.base(0).unwrap_or(Base::First);
                let (path, scoring) = (event.path()?, event.scoring()?);
                let advances = state.advance_runners(base.number());
                state.handle_batter_to_base(batter.clone(), base);
                state.record_error();
                let reached = if base == Base::First { String::new() } else { format!(" {base}") };
                format!("{batter} reaches{reached} on {}, {}.{}", path.description(),
                        self.roster.get_scoring(side, scoring), describe_advances(&advances))
            }
            EventKind::SingleAdvanceOnError => {
                let (path, scoring) = (event.path()?, event.scoring()?);
                let text = format!("{batter} singles on {}{} and takes second, {}.", path.description(),
                                   self.zone_fielder(state, event), self.roster.get_scoring(side, scoring));
                state.record_hit();
                state.record_error();
                let advances = state.advance_runners(2);
                state.handle_batter_to_base(batter.clone(), Base::Second);
                format!("{text}{}", describe_advances(&advances))
            }
            EventKind::SacrificeBuntError => {
                let scoring = event.scoring()?;
                let advances = state.advance_runners(1);
                state.handle_batter_to_base(batter.clone(), Base::First);
                state.record_error();
                format!("{batter} reaches on a sacrifice bunt, {}.{}",
                        self.roster.get_scoring(side, scoring), describe_advances(&advances))
            }
            kind => {
                let (bases, phrase) = hit_details(kind)?;
                let path = event.path()?;
                let mut text = format!("{batter} {phrase} on {}{}", path.description(), self.zone_fielder(state, event));
                if let Some(distance) = event.distance() {
                    text += &format!(", {distance} feet");
                }

                state.record_hit();
                let advances = state.advance_runners(bases);
                match kind {
                    EventKind::SingleStretchOut | EventKind::DoubleStretchOut | EventKind::TripleStretchOut => {
                        state.handle_out_batter();
                        let stretched_to = Base::from_number(bases + 1).unwrap_or(Base::Home);
                        text += &format!(", but is thrown out at {stretched_to}, {}",
                                         self.roster.get_scoring(side, event.scoring()?));
                    }
                    EventKind::SingleAppealOut => {
                        state.handle_out_batter();
                        text += &format!(", but is called out on appeal, {}",
                                         self.roster.get_scoring(side, event.scoring()?));
                    }
                    _ => {
                        let base = Base::from_number(bases).unwrap_or(Base::First);
                        state.handle_batter_to_base(batter.clone(), base);
                    }
                }
                text += ".";
                text += &describe_advances(&advances);
                if bases >= Base::Home.number() {
                    text += &format!(" {batter} scores.");
                }
                text
            }
        };
        self.narrate(state, text);
        self.end_plate_appearance(state);
        Some(())
    }

    fn handle_batted_out(&mut self, state: &mut GameState, batter: &PlayerId, event: &DecodedEvent) -> Option<()> {
        state.set_inplay();
        let (path, scoring) = (event.path()?, event.scoring()?);
        let credit = self.credit(state, path, scoring);
        if !matches!(event.kind, EventKind::FieldersChoice | EventKind::FieldersChoiceNoOut) {
            state.handle_out_batter();
        }
        let text = match event.kind {
            EventKind::GroundOut | EventKind::FlyOut | EventKind::LineOut | EventKind::PopOut |
            EventKind::BuntOut => format!("{batter} {}{credit}.", path.out_verb()),
            EventKind::FoulOut => format!("{batter} fouls out{credit}."),
            EventKind::InfieldFly => format!("{batter} is out on the infield fly rule{credit}."),
            EventKind::SacrificeFly => {
                let scored = state.move_runner(Base::Third, Base::Home.number());
                format!("{batter} hits a sacrifice fly{credit}.{}", describe_advances(scored.iter()))
            }
            EventKind::SacrificeBunt => {
                let advances = state.advance_runners(1);
                format!("{batter} sacrifices{credit}.{}", describe_advances(&advances))
            }
            EventKind::FieldersChoice => {
                let base = event.base(0)?;
                let runner = retire(state, base.previous());
                let advances = state.force_runners();
                state.handle_batter_to_base(batter.clone(), Base::First);
                format!("{batter} reaches on a fielder's choice, {runner} out at {base}{credit}.{}",
                        describe_advances(&advances))
            }
            EventKind::FieldersChoiceNoOut => {
                let advances = state.force_runners();
                state.handle_batter_to_base(batter.clone(), Base::First);
                format!("{batter} reaches on a fielder's choice{credit}. Everyone is safe.{}",
                        describe_advances(&advances))
            }
            EventKind::GroundIntoDoublePlay => {
                let runner = retire(state, Some(Base::First));
                format!("{batter} grounds into a double play{credit}. {runner} is out at second.")
            }
            EventKind::LineIntoDoublePlay => {
                let base = event.base(0)?;
                let runner = retire(state, Some(base));
                format!("{batter} lines into a double play{credit}. {runner} is doubled off {base}.")
            }
            EventKind::FlyIntoDoublePlay => {
                let base = event.base(0)?;
                let runner = retire(state, base.previous());
                format!("{batter} flies into a double play{credit}. {runner} is out at {base}.")
            }
            EventKind::GroundIntoTriplePlay => {
                let lead = retire(state, Some(Base::Second));
                let trail = retire(state, Some(Base::First));
                format!("{batter} grounds into a triple play{credit}. {lead} and {trail} are out.")
            }
            EventKind::LineIntoTriplePlay => {
                let lead = retire(state, Some(Base::Second));
                let trail = retire(state, Some(Base::First));
                format!("{batter} lines into a triple play{credit}. {lead} and {trail} are doubled off.")
            }
            _ => return None,
        };
        self.narrate(state, text);
        self.end_plate_appearance(state);
        Some(())
    }

    fn handle_pitch(&mut self, state: &mut GameState, batter: &PlayerId, event: &DecodedEvent) -> Option<()> {
        let kind = event.kind;
        let (_, strikes) = state.count();
        match kind {
            EventKind::Ball | EventKind::BallIntentional | EventKind::BallWildPitch |
            EventKind::BallPassedBall | EventKind::Pitchout | EventKind::AutomaticBall => state.handle_pitch_ball(),
            EventKind::StrikeLooking | EventKind::StrikeSwinging | EventKind::StrikeBuntMissed |
            EventKind::StrikeSwingingWildPitch | EventKind::StrikeSwingingPassedBall |
            EventKind::StrikeSwingingDropped | EventKind::StrikeSwingingThrownOut |
            EventKind::FoulTip | EventKind::AutomaticStrike => state.handle_pitch_strike(),
            // A two-strike foul bunt is a strikeout
            EventKind::FoulBunt if strikes + 1 >= STRIKES_FOR_STRIKEOUT => state.handle_pitch_strike(),
            EventKind::Foul | EventKind::FoulBunt => state.handle_pitch_foul(),
            EventKind::HitByPitch | EventKind::IntentionalWalk => {}
            _ => return None,
        }
        let label = match event.zone() {
            Some(zone) => format!("{} ({zone})", pitch_label(kind)?),
            None => pitch_label(kind)?.to_string(),
        };
        state.create_pitch_row(&label, self.table);

        let side = state.fielding_side();
        let wild = match kind {
            EventKind::BallWildPitch | EventKind::StrikeSwingingWildPitch => {
                Some(format!("Wild pitch by {}.", self.roster.get_title_fielder(side, Position::Pitcher)))
            }
            EventKind::BallPassedBall | EventKind::StrikeSwingingPassedBall => {
                Some(format!("Passed ball by {}.", self.roster.get_title_fielder(side, Position::Catcher)))
            }
            _ => None,
        };
        if let Some(wild) = &wild {
            let advances = state.advance_runners(1);
            self.narrate(state, format!("{wild}{}", describe_advances(&advances)));
        }

        let outcome = match kind {
            EventKind::HitByPitch => Some(award_first(state, batter, "is hit by a pitch")),
            EventKind::IntentionalWalk => Some(award_first(state, batter, "is intentionally walked")),
            EventKind::BallIntentional if state.is_walk() => {
                Some(award_first(state, batter, "is intentionally walked"))
            }
            _ if state.is_walk() => Some(award_first(state, batter, "walks")),
            EventKind::StrikeSwingingDropped => {
                Some(award_first(state, batter, "strikes out swinging but reaches first on a dropped third strike"))
            }
            EventKind::StrikeSwingingThrownOut => {
                state.handle_out_batter();
                Some(format!("{batter} strikes out swinging, {}.", self.roster.get_scoring(side, event.scoring()?)))
            }
            EventKind::StrikeSwingingWildPitch | EventKind::StrikeSwingingPassedBall if state.is_strikeout() => {
                state.handle_batter_to_base(batter.clone(), Base::First);
                let how = if kind == EventKind::StrikeSwingingWildPitch { "wild pitch" } else { "passed ball" };
                Some(format!("{batter} strikes out swinging but reaches first on the {how}."))
            }
            _ if state.is_strikeout() => {
                state.handle_out_batter();
                let how = match kind {
                    EventKind::StrikeLooking => "looking",
                    EventKind::StrikeBuntMissed | EventKind::FoulBunt => "bunting",
                    EventKind::FoulTip => "on a foul tip",
                    EventKind::AutomaticStrike => "on an automatic strike",
                    _ => "swinging",
                };
                Some(format!("{batter} strikes out {how}."))
            }
            _ => None,
        };
        if let Some(outcome) = outcome {
            self.narrate(state, outcome);
            self.end_plate_appearance(state);
        }
        Some(())
    }

    fn handle_other(&mut self, state: &mut GameState, event: &DecodedEvent) -> Option<()> {
        let side = state.fielding_side();
        let text = match event.kind {
            EventKind::StolenBase => {
                let base = event.base(0)?;
                let runner = advance(state, base.previous(), base);
                format!("{runner} steals {base}.")
            }
            EventKind::CaughtStealing => {
                let base = event.base(0)?;
                let runner = retire(state, base.previous());
                format!("{runner} is caught stealing {base}, {}.", self.roster.get_scoring(side, event.scoring()?))
            }
            EventKind::PickedOff => {
                let base = event.base(0)?;
                let runner = retire(state, Some(base));
                format!("{runner} is picked off {base}, {}.", self.roster.get_scoring(side, event.scoring()?))
            }
            EventKind::DefensiveIndifference => {
                let base = event.base(0)?;
                let runner = advance(state, base.previous(), base);
                format!("{runner} takes {base} on defensive indifference.")
            }
            EventKind::Balk => {
                let advances = state.advance_runners(1);
                format!("Balk by {}.{}", self.roster.get_title_fielder(side, Position::Pitcher),
                        describe_advances(&advances))
            }
            EventKind::RunnerAdvance => {
                let (from, to) = (event.base(0)?, event.base(1)?);
                let runner = advance(state, Some(from), to);
                if to == Base::Home {
                    format!("{runner} scores.")
                } else {
                    format!("{runner} advances to {to}.")
                }
            }
            EventKind::RunnerOut => {
                let (from, to) = (event.base(0)?, event.base(1)?);
                let runner = retire(state, Some(from));
                format!("{runner} is out at {to}, {}.", self.roster.get_scoring(side, event.scoring()?))
            }
            EventKind::StolenBaseError => {
                let (base, scoring) = (event.base(0)?, event.scoring()?);
                let runner = advance(state, base.previous(), base);
                state.record_error();
                let scoring = self.roster.get_scoring(side, scoring);
                // The throw gets away, so a real runner takes one more base
                match base.next() {
                    Some(next) if !runner.is_placeholder() => {
                        state.move_runner(base, next.number());
                        let extra = if next == Base::Home { "scores".to_string() } else { format!("advances to {next}") };
                        format!("{runner} steals {base} and {extra}, {scoring}.")
                    }
                    _ => format!("{runner} steals {base}, {scoring}."),
                }
            }
            EventKind::DoubleSteal => {
                let (a, b) = (event.base(0)?, event.base(1)?);
                let (lead, trail) = (a.max(b), a.min(b));
                let lead_runner = advance(state, lead.previous(), lead);
                let trail_runner = advance(state, trail.previous(), trail);
                format!("Double steal: {lead_runner} steals {lead} and {trail_runner} steals {trail}.")
            }
            EventKind::CaughtStealingError => {
                let base = event.base(0)?;
                let runner = advance(state, base.previous(), base);
                state.record_error();
                format!("{runner} is safe stealing {base}, {}.", self.roster.get_scoring(side, event.scoring()?))
            }
            EventKind::PickoffAttempt => format!("Pickoff attempt at {}.", event.base(0)?),
            EventKind::PickoffError => {
                let base = event.base(0)?;
                let next = base.next()?;
                let runner = advance(state, Some(base), next);
                state.record_error();
                let scoring = self.roster.get_scoring(side, event.scoring()?);
                if next == Base::Home {
                    format!("{runner} scores on a wild pickoff throw, {scoring}.")
                } else {
                    format!("{runner} takes {next} on a wild pickoff throw, {scoring}.")
                }
            }
            EventKind::RunnerAdvanceError => {
                let (from, to) = (event.base(0)?, event.base(1)?);
                let runner = advance(state, Some(from), to);
                state.record_error();
                let scoring = self.roster.get_scoring(side, event.scoring()?);
                if to == Base::Home {
                    format!("{runner} scores, {scoring}.")
                } else {
                    format!("{runner} advances to {to}, {scoring}.")
                }
            }
            EventKind::Obstruction => {
                let (from, to) = (event.base(0)?, event.base(1)?);
                let runner = advance(state, Some(from), to);
                format!("{runner} is awarded {to} on obstruction.")
            }
            EventKind::MoundVisit => {
                format!("Mound visit to {}.", self.roster.get_title_fielder(side, Position::Pitcher))
            }
            EventKind::Injury => format!("{} is injured.", event.player(0)?),
            EventKind::Ejection => format!("{} is ejected.", event.player(0)?),
            EventKind::Delay => "Rain delay.".to_string(),
            EventKind::ReviewUpheld => "The call stands after review.".to_string(),
            EventKind::ReviewOverturned => "The call is overturned on review.".to_string(),
            EventKind::Timeout => "Time out.".to_string(),
            _ => return None,
        };
        self.narrate(state, text);
        Some(())
    }
}

/// Bases the batter gains and how the hit is described
fn hit_details(kind: EventKind) -> Option<(u8, &'static str)> {
    Some(match kind {
        EventKind::Single | EventKind::SingleAppealOut | EventKind::SingleStretchOut => (1, "singles"),
        EventKind::SingleInfield => (1, "beats out an infield single"),
        EventKind::SingleBunt => (1, "bunts for a single"),
        EventKind::Double | EventKind::DoubleStretchOut => (2, "doubles"),
        EventKind::DoubleGroundRule => (2, "hits a ground rule double"),
        EventKind::Triple | EventKind::TripleStretchOut => (3, "triples"),
        EventKind::HomeRun => (4, "homers"),
        EventKind::HomeRunInsidePark => (4, "hits an inside-the-park home run"),
        EventKind::GrandSlam => (4, "hits a grand slam"),
        _ => return None,
    })
}

fn pitch_label(kind: EventKind) -> Option<&'static str> {
    Some(match kind {
        EventKind::Ball => "Ball",
        EventKind::BallIntentional => "Intentional ball",
        EventKind::BallWildPitch => "Ball, wild pitch",
        EventKind::BallPassedBall => "Ball, passed ball",
        EventKind::StrikeLooking => "Called strike",
        EventKind::StrikeSwinging => "Swinging strike",
        EventKind::StrikeBuntMissed => "Missed bunt",
        EventKind::StrikeSwingingWildPitch => "Swinging strike, wild pitch",
        EventKind::StrikeSwingingPassedBall => "Swinging strike, passed ball",
        EventKind::StrikeSwingingDropped | EventKind::StrikeSwingingThrownOut => "Swinging strike, dropped",
        EventKind::Foul => "Foul ball",
        EventKind::FoulBunt => "Foul bunt",
        EventKind::FoulTip => "Foul tip",
        EventKind::HitByPitch => "Hit by pitch",
        EventKind::IntentionalWalk => "Intentional walk",
        EventKind::Pitchout => "Pitchout",
        EventKind::AutomaticBall => "Automatic ball",
        EventKind::AutomaticStrike => "Automatic strike",
        _ => return None,
    })
}

fn award_first(state: &mut GameState, batter: &PlayerId, phrase: &str) -> String {
    let advances = state.force_runners();
    state.handle_batter_to_base(batter.clone(), Base::First);
    format!("{batter} {phrase}.{}", describe_advances(&advances))
}

/// Retires the runner on `base`, or names the placeholder runner if there isn't one
fn retire(state: &mut GameState, base: Option<Base>) -> PlayerId {
    base.and_then(|base| state.handle_out_runner(base))
        .unwrap_or_else(|| {
            debug!("Out recorded on {base:?}, which is empty");
            PlayerId::placeholder()
        })
}

fn advance(state: &mut GameState, from: Option<Base>, to: Base) -> PlayerId {
    match from.and_then(|from| state.move_runner(from, to.number())) {
        Some(Advance { runner, .. }) => runner,
        None => {
            debug!("Advance to {to} from {from:?}, which is empty");
            PlayerId::placeholder()
        }
    }
}

fn describe_advances<'a>(advances: impl IntoIterator<Item=&'a Advance>) -> String {
    advances.into_iter()
        .map(|advance| if advance.scored() {
            format!(" {} scores.", advance.runner)
        } else {
            format!(" {} to {}.", advance.runner, advance.to)
        })
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use crate::parse::{decode, Decoded};
    use crate::roster::tests::lineups;

    struct Harness {
        roster: Roster,
        table: TableBuilder,
        state: GameState,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                roster: Roster::new(lineups()).unwrap(),
                table: TableBuilder::new(),
                state: GameState::new(),
            }
        }

        /// Runs each line as its own group and returns every row's text
        fn run(&mut self, lines: &[&str]) -> Vec<String> {
            let mut dispatcher = Dispatcher::new(&mut self.roster, &mut self.table);
            for (i, text) in lines.iter().enumerate() {
                let Decoded::Event(event) = decode(text) else { panic!("{text} didn't decode") };
                let line = LineEvent { line: SourceLine { number: i + 1, text: text.to_string() }, event };
                if line.event.family() == Family::Change {
                    dispatcher.apply_changes(&mut self.state, &[line], None).unwrap();
                } else {
                    let settled = dispatcher.apply_changes(&mut self.state, &[], Some(&line)).unwrap();
                    dispatcher.apply_play(&mut self.state, settled, &line);
                }
            }
            dispatcher.finish(&mut self.state);
            self.table.get_tables().iter()
                .flat_map(|t| t.rows())
                .filter(|r| r.kind != RowKind::Pitch)
                .map(|r| r.text.clone())
                .collect()
        }
    }

    #[test]
    fn walk_forces_the_runner() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "SINGLE (L, 7)",
            "Ball", "Ball", "Ball", "Ball",
        ]);
        assert_eq!(rows[2], "P6 walks. P8 to second.");
        assert_eq!(harness.state.get_runner(Base::First), Some(&PlayerId::new("P6")));
        assert_eq!(harness.state.get_runner(Base::Second), Some(&PlayerId::new("P8")));
    }

    #[test]
    fn pinch_hitter_inherits_the_count() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "Ball", "Ball", "Ball",
            "Pinch Hitting: P11",
            "Ball",
        ]);
        assert_eq!(rows[1], "P11 replaces P8, batting 1st, playing pinch hitter.");
        assert_eq!(rows[2], "P11 walks.");
        assert_eq!(harness.state.get_runner(Base::First), Some(&PlayerId::new("P11")));
        assert_eq!(harness.state.count(), (0, 0));
    }

    #[test]
    fn strikeouts() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "Called Strike", "Foul Ball, location: 2F", "Foul Ball, location: 2F", "Called Strike",
            "Swinging Strike", "Swinging Strike", "Swinging Strike, dropped third strike",
        ]);
        assert_eq!(rows[1], "P8 strikes out looking.");
        assert_eq!(rows[2], "P6 strikes out swinging but reaches first on a dropped third strike.");
        assert_eq!(harness.state.outs(), 1);
    }

    #[test]
    fn home_run_clears_the_bases() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "DOUBLE (L, 78)",
            "HOME RUN (F, 7), Distance : 402 ft",
        ]);
        assert_eq!(rows[1], "P8 doubles on a line drive to left fielder H7.");
        assert_eq!(rows[2], "P6 homers on a fly ball to left fielder H7, 402 feet. P8 scores. P6 scores.");
        assert_eq!(harness.state.runs(Side::Away), 2);
        assert_eq!(harness.state.left_on_base(), 0);
    }

    #[test]
    fn air_outs_credit_one_fielder_and_grounders_the_chain() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "Fly out, 8 (F, 8)",
            "Ground out, U3 (G, 3)",
            "Pop out, 6-4 (P, 6)",
        ]);
        assert_eq!(rows[1], "P8 flies out to center fielder H8.");
        assert_eq!(rows[2], "P6 grounds out, first baseman H3 unassisted.");
        assert_eq!(rows[3], "P3 pops out, shortstop H6 to second baseman H4.");
    }

    #[test]
    fn stealing_from_an_empty_base_uses_the_placeholder() {
        let mut harness = Harness::new();
        let rows = harness.run(&["Batting: RHB P8", "Steals 2nd"]);
        assert_eq!(rows[1], "unknown runner steals second.");
        assert_eq!(harness.state.left_on_base(), 0);
        assert_eq!(harness.state.outs(), 0);
    }

    #[test]
    fn double_play_retires_two() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "SINGLE (G, 4)",
            "Grounds into double play, 6-4-3 (G, 6)",
        ]);
        assert_eq!(
            rows[2],
            "P6 grounds into a double play, shortstop H6 to second baseman H4 to first baseman H3. P8 is out at second.",
        );
        assert_eq!(harness.state.outs(), 2);
    }

    #[test]
    fn fielders_choice_keeps_the_batter() {
        let mut harness = Harness::new();
        harness.run(&[
            "Batting: RHB P8",
            "SINGLE (G, 4)",
            "Fielders Choice at 2nd, 6-4 (G, 6)",
        ]);
        assert_eq!(harness.state.outs(), 1);
        assert_eq!(harness.state.get_runner(Base::First), Some(&PlayerId::new("P6")));
    }

    #[test]
    fn inning_changes_wait_for_the_next_event() {
        let mut harness = Harness::new();
        harness.run(&[
            "Top of the 1st",
            "Batting: RHB P8",
            "Ground out, 6-3 (G, 6)",
            "Bottom of the 1st",
            "Now playing LF: P11",
            "Batting: LHB H8",
            "Ball",
        ]);
        let headers: Vec<_> = harness.table.get_tables().iter().map(|t| t.header.as_str()).collect();
        assert_eq!(headers, vec![
            "Top of the 1st: Visitors batting",
            "Visitors defensive changes",
            "Bottom of the 1st: Hosts batting",
        ]);
        assert_eq!(harness.table.get_tables()[0].foot[0].text, "0 runs, 0 hits, 0 errors, 0 left on base");
        assert_eq!(harness.state.batting_side(), Side::Home);
    }

    #[test]
    fn double_steal_and_throwing_error() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "DOUBLE (L, 78)",
            "SINGLE (G, 6)",
            "Double steal, home and 2nd",
            "Steals 3rd, advances on throwing error, E2",
        ]);
        assert_eq!(rows[2], "P6 singles on a ground ball to shortstop H6. P8 to third.");
        assert_eq!(rows[3], "Double steal: P8 steals home and P6 steals second.");
        assert_eq!(rows[4], "P6 steals third and scores, error by catcher H2.");
        assert_eq!(harness.state.runs(Side::Away), 2);
        assert_eq!(harness.state.left_on_base(), 0);
    }

    #[test]
    fn fielders_choice_with_everyone_safe_and_infield_fly() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "SINGLE (G, 4)",
            "Fielders Choice, all safe, 6 (G, 6)",
            "Infield fly, 6 (P, 6)",
        ]);
        assert_eq!(rows[2], "P6 reaches on a fielder's choice, shortstop H6 unassisted. Everyone is safe. P8 to second.");
        assert_eq!(rows[3], "P3 is out on the infield fly rule to shortstop H6.");
        assert_eq!(harness.state.outs(), 1);
        assert_eq!(harness.state.get_runner(Base::First), Some(&PlayerId::new("P6")));
        assert_eq!(harness.state.get_runner(Base::Second), Some(&PlayerId::new("P8")));
    }

    #[test]
    fn automatic_pitches_count_like_any_other() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "Automatic Strike", "Called Strike", "Automatic Strike",
            "Pitchout", "Automatic Ball", "Ball", "Ball",
        ]);
        assert_eq!(rows[1], "P8 strikes out on an automatic strike.");
        assert_eq!(rows[2], "P6 walks.");
        assert_eq!(harness.state.outs(), 1);
    }

    #[test]
    fn errors_on_the_bases_are_charged() {
        let mut harness = Harness::new();
        let rows = harness.run(&[
            "Batting: RHB P8",
            "SINGLE (G, 6), advances to 2nd on error, E9",
            "Pickoff attempt at 2nd",
            "Pickoff attempt at 2nd, throwing error, E1",
            "Runner from 3rd to home on error, E7",
        ]);
        assert_eq!(rows[1], "P8 singles on a ground ball to shortstop H6 and takes second, error by right fielder H9.");
        assert_eq!(rows[2], "Pickoff attempt at second.");
        assert_eq!(rows[3], "P8 takes third on a wild pickoff throw, error by pitcher H1.");
        assert_eq!(rows[4], "P8 scores, error by left fielder H7.");
        assert_eq!(harness.table.get_tables()[0].foot[0].text, "1 run, 1 hit, 3 errors, 0 left on base");
    }

    #[test]
    fn plays_before_any_batter_are_rejected() {
        let mut roster = Roster::new(lineups()).unwrap();
        let mut table = TableBuilder::new();
        let mut state = GameState::new();
        let mut dispatcher = Dispatcher::new(&mut roster, &mut table);
        let Decoded::Event(event) = decode("Ball") else { panic!() };
        let play = LineEvent { line: SourceLine { number: 3, text: "Ball".to_string() }, event };
        let err = dispatcher.apply_changes(&mut state, &[], Some(&play)).unwrap_err();
        assert!(matches!(err, InterpretError::NoBatter { kind: EventKind::Ball, line: 3 }));
    }
}
