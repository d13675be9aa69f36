//! Property tests over random legal playouts.
//!
//! Properties tested:
//! - The side to move alternates after every applied move
//! - The FEN after every move loads back into an identical position
//! - Every move the engine lists as legal is accepted by `apply_move`

use proptest::prelude::*;
use proptest::sample::Index;

use crate::Position;

fn config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|raw| raw.parse::<u32>().ok())
        .unwrap_or(32)
        .max(1);
    ProptestConfig {
        cases,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(config())]

    #[test]
    fn prop_turn_alternates_and_fen_reloads(picks in prop::collection::vec(any::<Index>(), 1..60)) {
        let mut position = Position::standard();
        for pick in picks {
            let legal = position.legal_moves();
            if legal.is_empty() {
                break;
            }
            let before = position.turn();
            let chosen = legal[pick.index(legal.len())];

            let applied = position.apply_move(&chosen);
            prop_assert!(applied.is_ok(), "listed move {:?} rejected", chosen);
            let applied = applied.unwrap();

            prop_assert_eq!(applied.color, before);
            prop_assert_eq!(position.turn(), before.opponent());

            let reloaded = Position::from_fen(&position.fen());
            prop_assert!(reloaded.is_ok(), "fen {} did not reload", position.fen());
            prop_assert_eq!(reloaded.unwrap().fen(), position.fen());
        }
    }
}
