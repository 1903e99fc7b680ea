#![cfg(not(target_arch = "wasm32"))]

use memoria_core::*;
use proptest::prelude::*;

fn any_difficulty() -> impl Strategy<Value = Difficulty> {
    prop::sample::select(Difficulty::ALL.to_vec())
}

proptest! {
    #[test]
    fn score_is_deterministic(
        difficulty in any_difficulty(),
        moves in 0u32..10_000,
        elapsed in 0u32..100_000,
        matched in 0u32..=18,
    ) {
        prop_assert_eq!(
            compute_score(difficulty, moves, elapsed, matched),
            compute_score(difficulty, moves, elapsed, matched)
        );
    }

    #[test]
    fn score_never_drops_when_playing_faster(
        difficulty in any_difficulty(),
        moves in 0u32..200,
        elapsed in 1u32..1_000,
    ) {
        let pairs = u32::from(difficulty.pairs());
        prop_assert!(
            compute_score(difficulty, moves, elapsed - 1, pairs)
                >= compute_score(difficulty, moves, elapsed, pairs)
        );
    }

    #[test]
    fn score_never_drops_with_fewer_moves(
        difficulty in any_difficulty(),
        moves in 1u32..200,
        elapsed in 0u32..1_000,
    ) {
        let pairs = u32::from(difficulty.pairs());
        prop_assert!(
            compute_score(difficulty, moves - 1, elapsed, pairs)
                >= compute_score(difficulty, moves, elapsed, pairs)
        );
    }

    #[test]
    fn accuracy_stays_a_percentage(moves in 0u32..100_000, pairs in 0u32..100) {
        let accuracy = compute_accuracy(moves, pairs);
        prop_assert!(accuracy <= 100);
        if pairs > 0 && moves <= pairs * 2 {
            prop_assert_eq!(accuracy, 100);
        }
    }

    #[test]
    fn board_always_pairs_up(seed in any::<u64>(), difficulty in any_difficulty()) {
        let cards = RandomBoardGenerator::new(seed).generate(difficulty);
        let mut ids: Vec<_> = cards.iter().map(|card| card.id).collect();
        ids.sort_unstable();
        let expected: Vec<CardId> = (0..difficulty.pairs() * 2).collect();
        prop_assert_eq!(ids, expected);
        for card in &cards {
            prop_assert_eq!(card.pair_id, card.id / 2);
        }
    }
}
