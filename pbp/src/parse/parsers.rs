use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, digit1, satisfy};
use nom::combinator::{map_opt, map_res, opt, recognize, verify};
use nom::multi::{many_m_n, separated_list1};
use nom::sequence::{pair, preceded};
use nom::{IResult, Parser};

use crate::event::{Base, Field, FieldType, Half, Hand, Path, PlayerId, Position, Scoring, Zone, ordinal_suffix};

pub(crate) type ParserError<'a> = nom::error::VerboseError<&'a str>;
pub(crate) type ParserResult<'a, Out> = IResult<&'a str, Out, ParserError<'a>>;

/// A piece of a grammar template: literal text, or a `{field}` placeholder
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Segment<'t> {
    Literal(&'t str),
    Field(FieldType),
}

pub(crate) fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut rest = template;
    while let Some((literal, after_brace)) = rest.split_once('{') {
        let Some((field_type, after_field)) = after_brace.split_once('}')
            .and_then(|(name, after)| FieldType::from_name(name).map(|t| (t, after))) else {
            // Not a placeholder, so the brace is literal text
            break;
        };
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        segments.push(Segment::Field(field_type));
        rest = after_field;
    }
    if !rest.is_empty() {
        segments.push(Segment::Literal(rest));
    }
    segments
}

pub(crate) fn template_fields(template: &str) -> Vec<FieldType> {
    segments(template).into_iter()
        .filter_map(|segment| match segment {
            Segment::Field(field_type) => Some(field_type),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Matches the template's literal text exactly and each placeholder with its field grammar.
/// This does not require the input to be fully consumed; callers wrap it in `all_consuming`.
pub(crate) fn parse_template(template: &str) -> impl Fn(&str) -> ParserResult<Vec<Field>> + '_ {
    move |input| {
        let mut input = input;
        let mut fields = Vec::new();
        for segment in segments(template) {
            input = match segment {
                Segment::Literal(text) => tag(text).parse(input)?.0,
                Segment::Field(field_type) => {
                    let (rest, field) = parse_field(field_type, input)?;
                    fields.push(field);
                    rest
                }
            };
        }

        Ok((input, fields))
    }
}

pub(crate) fn parse_field(field_type: FieldType, input: &str) -> ParserResult<Field> {
    match field_type {
        FieldType::Player => parse_player.map(Field::Player).parse(input),
        FieldType::Base => parse_named_base.map(Field::Base).parse(input),
        FieldType::Position => parse_position.map(Field::Position).parse(input),
        FieldType::Path => parse_path.map(Field::Path).parse(input),
        FieldType::Zone => parse_zone.map(Field::Zone).parse(input),
        FieldType::Scoring => parse_scoring.map(Field::Scoring).parse(input),
        FieldType::Distance => parse_whole_number.map(Field::Distance).parse(input),
        FieldType::Half => parse_half.map(Field::Half).parse(input),
        FieldType::Inning => parse_inning.map(Field::Inning).parse(input),
        FieldType::Hand => parse_hand.map(Field::Hand).parse(input),
    }
}

pub(crate) fn parse_whole_number(input: &str) -> ParserResult<u32> {
    map_res(digit1, str::parse).parse(input)
}

pub(crate) fn parse_player(input: &str) -> ParserResult<PlayerId> {
    recognize(pair(take_while1(|c: char| c.is_ascii_uppercase()), digit1))
        .map(PlayerId::from)
        .parse(input)
}

pub(crate) fn parse_named_base(input: &str) -> ParserResult<Base> {
    alt((
        tag("1st").map(|_| Base::First),
        tag("2nd").map(|_| Base::Second),
        tag("3rd").map(|_| Base::Third),
        tag("home").map(|_| Base::Home),
    )).parse(input)
}

pub(crate) fn parse_position(input: &str) -> ParserResult<Position> {
    // None of these is a prefix of another, so order doesn't matter
    alt((
        tag("1B").map(|_| Position::FirstBase),
        tag("2B").map(|_| Position::SecondBase),
        tag("3B").map(|_| Position::ThirdBase),
        tag("SS").map(|_| Position::Shortstop),
        tag("LF").map(|_| Position::LeftField),
        tag("CF").map(|_| Position::CenterField),
        tag("RF").map(|_| Position::RightField),
        tag("C").map(|_| Position::Catcher),
        tag("P").map(|_| Position::Pitcher),
    )).parse(input)
}

pub(crate) fn parse_path(input: &str) -> ParserResult<Path> {
    alt((
        tag("BG").map(|_| Path::BuntGround),
        tag("BP").map(|_| Path::BuntPop),
        tag("G").map(|_| Path::Ground),
        tag("F").map(|_| Path::Fly),
        tag("L").map(|_| Path::Line),
        tag("P").map(|_| Path::Pop),
    )).parse(input)
}

pub(crate) fn parse_zone(input: &str) -> ParserResult<Zone> {
    recognize(pair(
        satisfy(|c| c.is_ascii_digit()),
        many_m_n(0, 4, satisfy(|c| c.is_ascii_digit() || c.is_ascii_uppercase())),
    ))
        .map(Zone::new)
        .parse(input)
}

fn parse_position_digit(input: &str) -> ParserResult<Position> {
    map_opt(satisfy(|c| c.is_ascii_digit()), Position::from_digit).parse(input)
}

pub(crate) fn parse_scoring(input: &str) -> ParserResult<Scoring> {
    alt((
        preceded(char('E'), parse_position_digit).map(Scoring::Error),
        pair(opt(char('U')), separated_list1(char('-'), parse_position_digit))
            .map(|(marker, fielders)| Scoring::Chain {
                unassisted_marker: marker.is_some(),
                fielders,
            }),
    )).parse(input)
}

pub(crate) fn parse_half(input: &str) -> ParserResult<Half> {
    alt((
        tag("Top").map(|_| Half::Top),
        tag("Bottom").map(|_| Half::Bottom),
    )).parse(input)
}

pub(crate) fn parse_inning(input: &str) -> ParserResult<u32> {
    let (input, inning) = verify(parse_whole_number, |n: &u32| *n > 0).parse(input)?;
    // Only the correct suffix, so "2th" is not an inning
    let (input, _) = tag(ordinal_suffix(inning)).parse(input)?;

    Ok((input, inning))
}

pub(crate) fn parse_hand(input: &str) -> ParserResult<Hand> {
    alt((
        char('L').map(|_| Hand::Left),
        char('R').map(|_| Hand::Right),
        char('S').map(|_| Hand::Switch),
    )).parse(input)
}
