use super::*;

/// Seeded generator that lays the pairs out with a Fisher–Yates shuffle.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Vec<Card> {
        use rand::prelude::*;

        let mut cards = ordered_pairs(difficulty);
        if cards.len() != difficulty.config().total_cards() {
            log::warn!(
                "Board for {} truncated to {} cards, requested {}",
                difficulty,
                cards.len(),
                difficulty.config().total_cards()
            );
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in (1..cards.len()).rev() {
            let j = rng.random_range(0..=i);
            cards.swap(i, j);
        }
        cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn board(difficulty: Difficulty, seed: u64) -> Vec<Card> {
        RandomBoardGenerator::new(seed).generate(difficulty)
    }

    #[test]
    fn every_difficulty_gets_complete_pairs() {
        for difficulty in Difficulty::ALL {
            let cards = board(difficulty, 7);
            let pairs = usize::from(difficulty.pairs());

            assert_eq!(cards.len(), pairs * 2);

            let ids: HashSet<_> = cards.iter().map(|card| card.id).collect();
            assert_eq!(ids.len(), cards.len(), "ids must be unique");

            let mut by_pair: HashMap<PairId, Vec<&Card>> = HashMap::new();
            for card in &cards {
                by_pair.entry(card.pair_id).or_default().push(card);
            }
            assert_eq!(by_pair.len(), pairs);
            for group in by_pair.values() {
                assert_eq!(group.len(), 2);
                assert_eq!(group[0].symbol, group[1].symbol);
            }

            let symbols: HashSet<_> = cards.iter().map(|card| card.symbol).collect();
            assert_eq!(symbols.len(), pairs, "symbols must be distinct per pair");
            assert!(cards.iter().all(Card::is_face_down));
        }
    }

    #[test]
    fn same_seed_gives_same_board() {
        assert_eq!(board(Difficulty::Hard, 42), board(Difficulty::Hard, 42));
        assert_ne!(board(Difficulty::Hard, 42), board(Difficulty::Hard, 43));
    }

    #[test]
    fn shuffle_has_no_positional_bias() {
        const TRIALS: usize = 12_000;
        let len = Difficulty::Easy.config().total_cards();
        let mut position_of_first = vec![0usize; len];
        let mut adjacent = 0usize;

        for seed in 0..TRIALS as u64 {
            let cards = board(Difficulty::Easy, seed);
            let pos_a = cards.iter().position(|card| card.id == 0).unwrap();
            let pos_b = cards.iter().position(|card| card.id == 1).unwrap();
            position_of_first[pos_a] += 1;
            if pos_a.abs_diff(pos_b) == 1 {
                adjacent += 1;
            }
        }

        // each slot expects TRIALS / 12 = 1000 hits, sigma is about 30
        let expected = TRIALS / len;
        for (slot, &hits) in position_of_first.iter().enumerate() {
            assert!(
                hits.abs_diff(expected) < 200,
                "slot {} hit {} times, expected about {}",
                slot,
                hits,
                expected
            );
        }

        // P(two given cards adjacent) = 2 / len, sigma is about 41
        let expected_adjacent = TRIALS * 2 / len;
        assert!(
            adjacent.abs_diff(expected_adjacent) < 250,
            "adjacent {} times, expected about {}",
            adjacent,
            expected_adjacent
        );
    }
}
