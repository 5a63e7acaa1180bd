use pbp::{GameLineups, PlayerId, Position, Roster, Side, LINEUP_SIZE};
use proptest::prelude::*;
use strum::IntoEnumIterator;

const SAMPLE_LINEUPS: &str = include_str!("fixtures/sample_lineups.json");

#[derive(Debug, Clone)]
enum Op {
    Batter(Side, u8),
    PinchHit(Side, u8),
    /// Pinch run for whoever bats in the given slot
    PinchRun(Side, usize, u8),
    Field(Side, Position, u8),
    Pitch(Side, u8),
}

fn player(side: Side, number: u8) -> PlayerId {
    match side {
        Side::Away => PlayerId::new(format!("P{number}")),
        Side::Home => PlayerId::new(format!("H{number}")),
    }
}

fn side() -> impl Strategy<Value=Side> {
    prop_oneof![Just(Side::Away), Just(Side::Home)]
}

fn position() -> impl Strategy<Value=Position> {
    proptest::sample::select(Position::iter().collect::<Vec<_>>())
}

fn op() -> impl Strategy<Value=Op> {
    prop_oneof![
        (side(), 1..=20u8).prop_map(|(side, n)| Op::Batter(side, n)),
        (side(), 1..=20u8).prop_map(|(side, n)| Op::PinchHit(side, n)),
        (side(), 0..LINEUP_SIZE, 1..=20u8).prop_map(|(side, slot, n)| Op::PinchRun(side, slot, n)),
        (side(), position(), 1..=20u8).prop_map(|(side, position, n)| Op::Field(side, position, n)),
        (side(), 1..=20u8).prop_map(|(side, n)| Op::Pitch(side, n)),
    ]
}

fn apply(roster: &mut Roster, op: &Op) {
    match *op {
        Op::Batter(side, n) => {
            roster.handle_change_batter(side, &player(side, n));
        }
        Op::PinchHit(side, n) => {
            roster.handle_change_pinch_hitter(side, &player(side, n));
        }
        Op::PinchRun(side, slot, n) => {
            let displaced = roster.team(side).lineup()[slot].player.clone();
            roster.handle_change_runner(side, &displaced, &player(side, n));
        }
        Op::Field(side, position, n) => {
            roster.handle_change_fielder(side, position, &player(side, n));
        }
        Op::Pitch(side, n) => {
            roster.handle_change_pitcher(side, &player(side, n));
        }
    }
}

proptest! {
    #[test]
    fn substitutions_keep_lineups_valid(ops in proptest::collection::vec(op(), 0..40)) {
        let lineups: GameLineups = serde_json::from_str(SAMPLE_LINEUPS).unwrap();
        let mut roster = Roster::new(lineups).unwrap();
        for op in &ops {
            apply(&mut roster, op);
            prop_assert!(roster.check().is_ok(), "{:?} after {:?}", roster.check(), op);
            for side in [Side::Away, Side::Home] {
                let team = roster.team(side);
                prop_assert!(team.batting_index() < LINEUP_SIZE);
                prop_assert_eq!(team.lineup().len(), LINEUP_SIZE);
                prop_assert_eq!(team.current_pitcher(), team.fielder_at(Position::Pitcher));
            }
        }
    }
}
