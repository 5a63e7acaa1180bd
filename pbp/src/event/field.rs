use std::fmt::{Display, Formatter};
use itertools::Itertools;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Opaque player reference as it appears in the log, e.g. `P1042`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct PlayerId(String);

const PLACEHOLDER_NAME: &str = "unknown runner";

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Identity used when an event refers to a runner who isn't there
    pub fn placeholder() -> Self {
        Self(PLACEHOLDER_NAME.to_string())
    }

    pub fn is_placeholder(&self) -> bool {
        self.0 == PLACEHOLDER_NAME
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Base {
    First,
    Second,
    Third,
    Home,
}

impl Base {
    /// The three bases a runner can occupy, in order
    pub const OCCUPIABLE: [Base; 3] = [Base::First, Base::Second, Base::Third];

    /// Encoded form used in the log
    pub fn label(self) -> &'static str {
        match self {
            Base::First => "1st",
            Base::Second => "2nd",
            Base::Third => "3rd",
            Base::Home => "home",
        }
    }

    /// Bases are numbered from 1 (first) to 4 (home)
    pub fn number(self) -> u8 {
        match self {
            Base::First => 1,
            Base::Second => 2,
            Base::Third => 3,
            Base::Home => 4,
        }
    }

    /// Any number past 3 means the runner made it home
    pub fn from_number(number: u8) -> Option<Base> {
        match number {
            0 => None,
            1 => Some(Base::First),
            2 => Some(Base::Second),
            3 => Some(Base::Third),
            _ => Some(Base::Home),
        }
    }

    /// Index into the occupancy array, or None for home
    pub fn index(self) -> Option<usize> {
        match self {
            Base::Home => None,
            _ => Some(self.number() as usize - 1),
        }
    }

    pub fn previous(self) -> Option<Base> {
        Base::from_number(self.number() - 1)
    }

    /// None past home
    pub fn next(self) -> Option<Base> {
        match self {
            Base::Home => None,
            _ => Base::from_number(self.number() + 1),
        }
    }
}

impl Display for Base {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Base::First => { write!(f, "first") }
            Base::Second => { write!(f, "second") }
            Base::Third => { write!(f, "third") }
            Base::Home => { write!(f, "home") }
        }
    }
}

/// Defensive positions, numbered the way scorers number them
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
         JsonSchema, IntoPrimitive, TryFromPrimitive, EnumIter)]
#[repr(u8)]
pub enum Position {
    #[serde(rename = "P")]
    Pitcher = 1,
    #[serde(rename = "C")]
    Catcher = 2,
    #[serde(rename = "1B")]
    FirstBase = 3,
    #[serde(rename = "2B")]
    SecondBase = 4,
    #[serde(rename = "3B")]
    ThirdBase = 5,
    #[serde(rename = "SS")]
    Shortstop = 6,
    #[serde(rename = "LF")]
    LeftField = 7,
    #[serde(rename = "CF")]
    CenterField = 8,
    #[serde(rename = "RF")]
    RightField = 9,
}

impl Position {
    pub fn code(self) -> &'static str {
        match self {
            Position::Pitcher => "P",
            Position::Catcher => "C",
            Position::FirstBase => "1B",
            Position::SecondBase => "2B",
            Position::ThirdBase => "3B",
            Position::Shortstop => "SS",
            Position::LeftField => "LF",
            Position::CenterField => "CF",
            Position::RightField => "RF",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Position::Pitcher => "pitcher",
            Position::Catcher => "catcher",
            Position::FirstBase => "first baseman",
            Position::SecondBase => "second baseman",
            Position::ThirdBase => "third baseman",
            Position::Shortstop => "shortstop",
            Position::LeftField => "left fielder",
            Position::CenterField => "center fielder",
            Position::RightField => "right fielder",
        }
    }

    /// Position for a scorer's digit character
    pub fn from_digit(c: char) -> Option<Position> {
        c.to_digit(10)
            .and_then(|d| Position::try_from(d as u8).ok())
    }

    pub fn digit(self) -> char {
        let number: u8 = self.into();
        char::from(b'0' + number)
    }
}

/// Batted-ball trajectory
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Path {
    Ground,
    Fly,
    Line,
    Pop,
    BuntGround,
    BuntPop,
}

impl Path {
    pub fn code(self) -> &'static str {
        match self {
            Path::Ground => "G",
            Path::Fly => "F",
            Path::Line => "L",
            Path::Pop => "P",
            Path::BuntGround => "BG",
            Path::BuntPop => "BP",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Path::Ground => "a ground ball",
            Path::Fly => "a fly ball",
            Path::Line => "a line drive",
            Path::Pop => "a pop up",
            Path::BuntGround => "a bunt",
            Path::BuntPop => "a bunted pop up",
        }
    }

    pub fn out_verb(self) -> &'static str {
        match self {
            Path::Ground => "grounds out",
            Path::Fly => "flies out",
            Path::Line => "lines out",
            Path::Pop => "pops out",
            Path::BuntGround => "bunts out",
            Path::BuntPop => "pops out on a bunt",
        }
    }

    pub fn is_grounder(self) -> bool {
        matches!(self, Path::Ground | Path::BuntGround)
    }
}

/// Fielding zone code, e.g. `34`, `7LD` or `2F`. The leading digit names the position whose
/// area the ball went to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Zone(String);

impl Zone {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn leading_position(&self) -> Option<Position> {
        self.0.chars().next().and_then(Position::from_digit)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Scoring notation: either an error charged to one fielder, or the chain of fielders who
/// handled the ball, optionally marked as an unassisted putout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scoring {
    Error(Position),
    Chain {
        unassisted_marker: bool,
        fielders: Vec<Position>,
    },
}

impl Scoring {
    pub fn chain(fielders: Vec<Position>) -> Self {
        Scoring::Chain { unassisted_marker: false, fielders }
    }

    /// The fielder who fielded the ball first
    pub fn first_fielder(&self) -> Option<Position> {
        match self {
            Scoring::Error(position) => Some(*position),
            Scoring::Chain { fielders, .. } => fielders.first().copied(),
        }
    }

    pub fn is_single_fielder(&self) -> bool {
        matches!(self, Scoring::Chain { fielders, .. } if fielders.len() == 1)
    }
}

impl Display for Scoring {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Scoring::Error(position) => write!(f, "E{}", position.digit()),
            Scoring::Chain { unassisted_marker, fielders } => {
                write!(f, "{}{}", if *unassisted_marker { "U" } else { "" },
                       fielders.iter().map(|p| p.digit()).join("-"))
            }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Half {
    Top,
    Bottom,
}

impl Half {
    pub fn batting_side(self) -> Side {
        match self {
            Half::Top => Side::Away,
            Half::Bottom => Side::Home,
        }
    }
}

impl Display for Half {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Half::Top => { write!(f, "Top") }
            Half::Bottom => { write!(f, "Bottom") }
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
    Switch,
}

impl Hand {
    pub fn code(self) -> &'static str {
        match self {
            Hand::Left => "L",
            Hand::Right => "R",
            Hand::Switch => "S",
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Away,
    Home,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Away => 0,
            Side::Home => 1,
        }
    }
}

/// `1st`, `2nd`, `3rd`, `4th`, ..., `11th`, `12th`, `13th`, `21st`
pub fn ordinal(n: u32) -> String {
    format!("{n}{}", ordinal_suffix(n))
}

pub fn ordinal_suffix(n: u32) -> &'static str {
    match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}
