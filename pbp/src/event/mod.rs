mod field;

pub use field::*;

use std::fmt::{Display, Formatter};
use serde::Serialize;
use strum::{AsRefStr, EnumIter, EnumString};

/// The five disjoint families every event kind belongs to. The dispatcher drains change events
/// before it interprets the play that follows them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    Change,
    Reach,
    BattedOut,
    Pitch,
    /// Baserunning and the rare lines that don't fit anywhere else
    Other,
}

impl Family {
    /// Whether interpreting an event of this family needs to know who is batting
    pub fn needs_batter(self) -> bool {
        matches!(self, Family::Reach | Family::BattedOut | Family::Pitch)
    }
}

/// Every kind of line the game log can contain.
///
/// Each kind's grammar is given by [`EventKind::template`]: literal text with `{field}`
/// placeholders. Grammars only ever match a whole line, so no two kinds can match the same
/// line and the order kinds are declared in carries no meaning.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, EnumIter, AsRefStr, EnumString)]
pub enum EventKind {
    // Changes
    ChangeInning,
    ChangeBatter,
    ChangePitcher,
    ChangePinchHitter,
    ChangePinchRunner,
    ChangeFielder,

    // Batter reaches
    Single,
    SingleInfield,
    SingleBunt,
    SingleAppealOut,
    SingleStretchOut,
    Double,
    DoubleGroundRule,
    DoubleStretchOut,
    Triple,
    TripleStretchOut,
    HomeRun,
    HomeRunInsidePark,
    GrandSlam,
    ReachError,
    ReachErrorExtraBase,
    ReachCatcherInterference,
    SingleAdvanceOnError,
    SacrificeBuntError,

    // Batter retired on a batted ball
    GroundOut,
    FlyOut,
    LineOut,
    PopOut,
    FoulOut,
    BuntOut,
    SacrificeFly,
    SacrificeBunt,
    FieldersChoice,
    GroundIntoDoublePlay,
    LineIntoDoublePlay,
    FlyIntoDoublePlay,
    GroundIntoTriplePlay,
    LineIntoTriplePlay,
    InfieldFly,
    FieldersChoiceNoOut,

    // Pitches
    Ball,
    BallIntentional,
    BallWildPitch,
    BallPassedBall,
    StrikeLooking,
    StrikeSwinging,
    StrikeBuntMissed,
    StrikeSwingingWildPitch,
    StrikeSwingingPassedBall,
    StrikeSwingingDropped,
    StrikeSwingingThrownOut,
    Foul,
    FoulBunt,
    FoulTip,
    HitByPitch,
    IntentionalWalk,
    Pitchout,
    AutomaticBall,
    AutomaticStrike,

    // Baserunning and everything else
    StolenBase,
    CaughtStealing,
    PickedOff,
    DefensiveIndifference,
    Balk,
    RunnerAdvance,
    RunnerOut,
    StolenBaseError,
    DoubleSteal,
    CaughtStealingError,
    PickoffAttempt,
    PickoffError,
    RunnerAdvanceError,
    Obstruction,
    MoundVisit,
    Injury,
    Ejection,
    Delay,
    ReviewUpheld,
    ReviewOverturned,
    Timeout,
}

impl EventKind {
    pub fn template(self) -> &'static str {
        match self {
            EventKind::ChangeInning => "{half} of the {inning}",
            EventKind::ChangeBatter => "Batting: {hand}HB {player}",
            EventKind::ChangePitcher => "Pitching: {hand}HP {player}",
            EventKind::ChangePinchHitter => "Pinch Hitting: {player}",
            EventKind::ChangePinchRunner => "Pinch Runner at {base}: {player}",
            EventKind::ChangeFielder => "Now playing {position}: {player}",

            EventKind::Single => "SINGLE ({path}, {zone})",
            EventKind::SingleInfield => "SINGLE ({path}, {zone}) (infield hit)",
            EventKind::SingleBunt => "SINGLE ({path}, {zone}) (bunt)",
            EventKind::SingleAppealOut => "SINGLE ({path}, {zone}) - OUT on appeal, {scoring}",
            EventKind::SingleStretchOut => "SINGLE ({path}, {zone}) - OUT at 2nd trying to stretch, {scoring}",
            EventKind::Double => "DOUBLE ({path}, {zone})",
            EventKind::DoubleGroundRule => "DOUBLE ({path}, {zone}) (ground rule)",
            EventKind::DoubleStretchOut => "DOUBLE ({path}, {zone}) - OUT at 3rd trying to stretch, {scoring}",
            EventKind::Triple => "TRIPLE ({path}, {zone})",
            EventKind::TripleStretchOut => "TRIPLE ({path}, {zone}) - OUT at home trying to stretch, {scoring}",
            EventKind::HomeRun => "HOME RUN ({path}, {zone}), Distance : {distance} ft",
            EventKind::HomeRunInsidePark => "INSIDE-THE-PARK HOME RUN ({path}, {zone})",
            EventKind::GrandSlam => "GRAND SLAM ({path}, {zone}), Distance : {distance} ft",
            EventKind::ReachError => "Reached on error, {scoring} ({path}, {zone})",
            EventKind::ReachErrorExtraBase => "Reached {base} on error, {scoring} ({path}, {zone})",
            EventKind::ReachCatcherInterference => "Reached on catcher interference",
            EventKind::SingleAdvanceOnError => "SINGLE ({path}, {zone}), advances to 2nd on error, {scoring}",
            EventKind::SacrificeBuntError => "Sac Bunt, reached on error, {scoring} ({path}, {zone})",

            EventKind::GroundOut => "Ground out, {scoring} ({path}, {zone})",
            EventKind::FlyOut => "Fly out, {scoring} ({path}, {zone})",
            EventKind::LineOut => "Line out, {scoring} ({path}, {zone})",
            EventKind::PopOut => "Pop out, {scoring} ({path}, {zone})",
            EventKind::FoulOut => "Foul out, {scoring} ({path}, {zone})",
            EventKind::BuntOut => "Bunt out, {scoring} ({path}, {zone})",
            EventKind::SacrificeFly => "Sac Fly, {scoring} ({path}, {zone})",
            EventKind::SacrificeBunt => "Sac Bunt, {scoring} ({path}, {zone})",
            EventKind::FieldersChoice => "Fielders Choice at {base}, {scoring} ({path}, {zone})",
            EventKind::GroundIntoDoublePlay => "Grounds into double play, {scoring} ({path}, {zone})",
            EventKind::LineIntoDoublePlay => "Lines into double play at {base}, {scoring} ({path}, {zone})",
            EventKind::FlyIntoDoublePlay => "Flies into double play at {base}, {scoring} ({path}, {zone})",
            EventKind::GroundIntoTriplePlay => "Grounds into triple play, {scoring} ({path}, {zone})",
            EventKind::LineIntoTriplePlay => "Lines into triple play, {scoring} ({path}, {zone})",
            EventKind::InfieldFly => "Infield fly, {scoring} ({path}, {zone})",
            EventKind::FieldersChoiceNoOut => "Fielders Choice, all safe, {scoring} ({path}, {zone})",

            EventKind::Ball => "Ball",
            EventKind::BallIntentional => "Intentional Ball",
            EventKind::BallWildPitch => "Ball, Wild Pitch",
            EventKind::BallPassedBall => "Ball, Passed Ball",
            EventKind::StrikeLooking => "Called Strike",
            EventKind::StrikeSwinging => "Swinging Strike",
            EventKind::StrikeBuntMissed => "Bunt missed",
            EventKind::StrikeSwingingWildPitch => "Swinging Strike, Wild Pitch",
            EventKind::StrikeSwingingPassedBall => "Swinging Strike, Passed Ball",
            EventKind::StrikeSwingingDropped => "Swinging Strike, dropped third strike",
            EventKind::StrikeSwingingThrownOut => "Swinging Strike, dropped third strike, out at 1st, {scoring}",
            EventKind::Foul => "Foul Ball, location: {zone}",
            EventKind::FoulBunt => "Foul Bunt",
            EventKind::FoulTip => "Foul Tip",
            EventKind::HitByPitch => "Hit by Pitch",
            EventKind::IntentionalWalk => "Intentional Walk",
            EventKind::Pitchout => "Pitchout",
            EventKind::AutomaticBall => "Automatic Ball",
            EventKind::AutomaticStrike => "Automatic Strike",

            EventKind::StolenBase => "Steals {base}",
            EventKind::CaughtStealing => "Caught stealing {base}, {scoring}",
            EventKind::PickedOff => "Picked off {base}, {scoring}",
            EventKind::DefensiveIndifference => "Defensive indifference, advances to {base}",
            EventKind::Balk => "Balk",
            EventKind::RunnerAdvance => "Runner from {base} to {base}",
            EventKind::RunnerOut => "Runner from {base} out at {base}, {scoring}",
            EventKind::StolenBaseError => "Steals {base}, advances on throwing error, {scoring}",
            EventKind::DoubleSteal => "Double steal, {base} and {base}",
            EventKind::CaughtStealingError => "Caught stealing {base}, safe on error, {scoring}",
            EventKind::PickoffAttempt => "Pickoff attempt at {base}",
            EventKind::PickoffError => "Pickoff attempt at {base}, throwing error, {scoring}",
            EventKind::RunnerAdvanceError => "Runner from {base} to {base} on error, {scoring}",
            EventKind::Obstruction => "Obstruction, runner from {base} awarded {base}",
            EventKind::MoundVisit => "Mound visit",
            EventKind::Injury => "Injury: {player}",
            EventKind::Ejection => "Ejected: {player}",
            EventKind::Delay => "Rain delay",
            EventKind::ReviewUpheld => "Umpire review, call stands",
            EventKind::ReviewOverturned => "Umpire review, call overturned",
            EventKind::Timeout => "Time out",
        }
    }

    pub fn family(self) -> Family {
        match self {
            EventKind::ChangeInning | EventKind::ChangeBatter | EventKind::ChangePitcher |
            EventKind::ChangePinchHitter | EventKind::ChangePinchRunner |
            EventKind::ChangeFielder => Family::Change,

            EventKind::Single | EventKind::SingleInfield | EventKind::SingleBunt |
            EventKind::SingleAppealOut | EventKind::SingleStretchOut | EventKind::Double |
            EventKind::DoubleGroundRule | EventKind::DoubleStretchOut | EventKind::Triple |
            EventKind::TripleStretchOut | EventKind::HomeRun | EventKind::HomeRunInsidePark |
            EventKind::GrandSlam | EventKind::ReachError | EventKind::ReachErrorExtraBase |
            EventKind::ReachCatcherInterference | EventKind::SingleAdvanceOnError |
            EventKind::SacrificeBuntError => Family::Reach,

            EventKind::GroundOut | EventKind::FlyOut | EventKind::LineOut | EventKind::PopOut |
            EventKind::FoulOut | EventKind::BuntOut | EventKind::SacrificeFly |
            EventKind::SacrificeBunt | EventKind::FieldersChoice |
            EventKind::GroundIntoDoublePlay | EventKind::LineIntoDoublePlay |
            EventKind::FlyIntoDoublePlay | EventKind::GroundIntoTriplePlay |
            EventKind::LineIntoTriplePlay | EventKind::InfieldFly |
            EventKind::FieldersChoiceNoOut => Family::BattedOut,

            EventKind::Ball | EventKind::BallIntentional | EventKind::BallWildPitch |
            EventKind::BallPassedBall | EventKind::StrikeLooking | EventKind::StrikeSwinging |
            EventKind::StrikeBuntMissed | EventKind::StrikeSwingingWildPitch |
            EventKind::StrikeSwingingPassedBall | EventKind::StrikeSwingingDropped |
            EventKind::StrikeSwingingThrownOut | EventKind::Foul | EventKind::FoulBunt |
            EventKind::FoulTip | EventKind::HitByPitch | EventKind::IntentionalWalk |
            EventKind::Pitchout | EventKind::AutomaticBall | EventKind::AutomaticStrike => Family::Pitch,

            EventKind::StolenBase | EventKind::CaughtStealing | EventKind::PickedOff |
            EventKind::DefensiveIndifference | EventKind::Balk | EventKind::RunnerAdvance |
            EventKind::RunnerOut | EventKind::StolenBaseError | EventKind::DoubleSteal |
            EventKind::CaughtStealingError | EventKind::PickoffAttempt | EventKind::PickoffError |
            EventKind::RunnerAdvanceError | EventKind::Obstruction | EventKind::MoundVisit |
            EventKind::Injury | EventKind::Ejection | EventKind::Delay | EventKind::ReviewUpheld |
            EventKind::ReviewOverturned | EventKind::Timeout => Family::Other,
        }
    }

    /// Field types of the template's placeholders, in order
    pub fn field_types(self) -> Vec<FieldType> {
        crate::parse::template_fields(self.template())
    }

    pub fn arity(self) -> usize {
        self.field_types().len()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Player,
    Base,
    Position,
    Path,
    Zone,
    Scoring,
    Distance,
    Half,
    Inning,
    Hand,
}

impl FieldType {
    /// The placeholder name used in templates
    pub fn from_name(name: &str) -> Option<FieldType> {
        match name {
            "player" => Some(FieldType::Player),
            "base" => Some(FieldType::Base),
            "position" => Some(FieldType::Position),
            "path" => Some(FieldType::Path),
            "zone" => Some(FieldType::Zone),
            "scoring" => Some(FieldType::Scoring),
            "distance" => Some(FieldType::Distance),
            "half" => Some(FieldType::Half),
            "inning" => Some(FieldType::Inning),
            "hand" => Some(FieldType::Hand),
            _ => None,
        }
    }
}

/// One decoded argument. Displays as exactly the text it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    Player(PlayerId),
    Base(Base),
    Position(Position),
    Path(Path),
    Zone(Zone),
    Scoring(Scoring),
    Distance(u32),
    Half(Half),
    Inning(u32),
    Hand(Hand),
}

impl Field {
    pub fn field_type(&self) -> FieldType {
        match self {
            Field::Player(_) => FieldType::Player,
            Field::Base(_) => FieldType::Base,
            Field::Position(_) => FieldType::Position,
            Field::Path(_) => FieldType::Path,
            Field::Zone(_) => FieldType::Zone,
            Field::Scoring(_) => FieldType::Scoring,
            Field::Distance(_) => FieldType::Distance,
            Field::Half(_) => FieldType::Half,
            Field::Inning(_) => FieldType::Inning,
            Field::Hand(_) => FieldType::Hand,
        }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::Player(player) => write!(f, "{player}"),
            Field::Base(base) => write!(f, "{}", base.label()),
            Field::Position(position) => write!(f, "{}", position.code()),
            Field::Path(path) => write!(f, "{}", path.code()),
            Field::Zone(zone) => write!(f, "{zone}"),
            Field::Scoring(scoring) => write!(f, "{scoring}"),
            Field::Distance(distance) => write!(f, "{distance}"),
            Field::Half(half) => write!(f, "{half}"),
            Field::Inning(inning) => write!(f, "{}", ordinal(*inning)),
            Field::Hand(hand) => write!(f, "{}", hand.code()),
        }
    }
}

/// A line the decoder recognized: its kind plus the fields its grammar captured, in template
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedEvent {
    pub kind: EventKind,
    pub args: Vec<Field>,
}

impl DecodedEvent {
    pub fn family(&self) -> Family {
        self.kind.family()
    }

    /// The arguments as the strings they were decoded from
    pub fn arg_strings(&self) -> Vec<String> {
        self.args.iter().map(|f| f.to_string()).collect()
    }

    /// The `n`th player field
    pub fn player(&self, n: usize) -> Option<&PlayerId> {
        self.args.iter()
            .filter_map(|f| match f { Field::Player(p) => Some(p), _ => None })
            .nth(n)
    }

    /// The `n`th base field
    pub fn base(&self, n: usize) -> Option<Base> {
        self.args.iter()
            .filter_map(|f| match f { Field::Base(b) => Some(*b), _ => None })
            .nth(n)
    }

    pub fn position(&self) -> Option<Position> {
        self.args.iter()
            .find_map(|f| match f { Field::Position(p) => Some(*p), _ => None })
    }

    pub fn path(&self) -> Option<Path> {
        self.args.iter()
            .find_map(|f| match f { Field::Path(p) => Some(*p), _ => None })
    }

    pub fn zone(&self) -> Option<&Zone> {
        self.args.iter()
            .find_map(|f| match f { Field::Zone(z) => Some(z), _ => None })
    }

    pub fn scoring(&self) -> Option<&Scoring> {
        self.args.iter()
            .find_map(|f| match f { Field::Scoring(s) => Some(s), _ => None })
    }

    pub fn distance(&self) -> Option<u32> {
        self.args.iter()
            .find_map(|f| match f { Field::Distance(d) => Some(*d), _ => None })
    }

    pub fn half(&self) -> Option<Half> {
        self.args.iter()
            .find_map(|f| match f { Field::Half(h) => Some(*h), _ => None })
    }

    pub fn inning(&self) -> Option<u32> {
        self.args.iter()
            .find_map(|f| match f { Field::Inning(i) => Some(*i), _ => None })
    }
}

impl Display for DecodedEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.kind.as_ref(), self.arg_strings().join(", "))
    }
}
