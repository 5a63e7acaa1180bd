use pbp::{decode, matching_kinds, Decoded, EventKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use strum::IntoEnumIterator;

const VOCABULARY: &str = include_str!("fixtures/vocabulary.txt");
const SAMPLE_GAME: &str = include_str!("fixtures/sample_game.log");

fn vocabulary() -> Vec<&'static str> {
    VOCABULARY.lines().collect()
}

#[test]
fn vocabulary_fixture_has_one_line_per_kind_in_declaration_order() {
    let kinds: Vec<EventKind> = vocabulary().into_iter()
        .map(|line| match decode(line) {
            Decoded::Event(event) => event.kind,
            Decoded::Unrecognized(line) => panic!("{line:?} should decode"),
        })
        .collect();
    assert_eq!(kinds, EventKind::iter().collect::<Vec<_>>());
}

#[test]
fn each_fixture_line_matches_exactly_one_grammar() {
    for (line, kind) in vocabulary().into_iter().zip(EventKind::iter()) {
        assert_eq!(matching_kinds(line), vec![kind], "{line:?}");
    }
}

#[test]
fn decoded_arguments_are_substrings_of_the_line() {
    for line in vocabulary() {
        let Decoded::Event(event) = decode(line) else { panic!("{line:?} should decode") };
        assert_eq!(event.args.len(), event.kind.arity());
        for arg in event.arg_strings() {
            assert!(line.contains(&arg), "{arg:?} isn't in {line:?}");
        }
    }
}

#[test]
fn sample_game_decodes_completely() {
    let unrecognized: Vec<_> = SAMPLE_GAME.lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match decode(line) {
            Decoded::Event(_) => None,
            Decoded::Unrecognized(line) => Some(line),
        })
        .collect();
    assert!(unrecognized.is_empty(), "Unrecognized: {unrecognized:?}");
}

#[test]
fn near_misses_are_unrecognized() {
    for line in [
        "SINGLE (G, 34",
        "single (G, 34)",
        "Ground out, 6-3 (G, 6) ",
        "Ground out, 6-3(G, 6)",
        "Steals 4th",
        "Batting: XHB P1",
        "Now playing DH: P4",
        "Ball Ball",
    ] {
        // Trailing whitespace is trimmed, so that one decodes
        let expected_events = usize::from(line.ends_with(' '));
        assert_eq!(matching_kinds(line).len(), expected_events, "{line:?}");
    }
}

proptest! {
    #[test]
    fn mutated_lines_match_at_most_one_grammar(
        line in prop::sample::select(vocabulary()),
        at in any::<prop::sample::Index>(),
        insert in "[ -~]{0,3}",
        delete in 0..3usize,
    ) {
        let at = at.index(line.len() + 1);
        let end = (at + delete).min(line.len());
        let mutated = format!("{}{}{}", &line[..at], insert, &line[end..]);
        prop_assert!(matching_kinds(&mutated).len() <= 1, "{mutated:?} matched {:?}", matching_kinds(&mutated));
    }

    #[test]
    fn decoding_never_panics(line in "\\PC{0,40}") {
        let _ = decode(&line);
    }
}
