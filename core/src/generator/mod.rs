use crate::*;
pub use random::*;

mod random;

/// Symbol alphabet cards are drawn from, in selection order.
pub const SYMBOLS: [&str; 60] = [
    "🎮", "🎯", "🎲", "🃏", "🎪", "🎨", "🎭", "🎸", "🎹", "🎤",
    "⚽", "🏀", "🏈", "⚾", "🎾", "🏐", "🏓", "🏸", "🥅", "⛳",
    "🍎", "🍌", "🍇", "🍓", "🥝", "🍑", "🥭", "🍍", "🥥", "🍊",
    "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯",
    "🌟", "⭐", "✨", "💫", "🌙", "☀️", "⚡", "🔥", "💎", "🎈",
    "🚀", "✈️", "🚗", "🚕", "🚙", "🚌", "🚎", "🏎️", "🚓", "🚑",
];

const _: () = assert!(DifficultyConfig::EXPERT.pairs as usize <= SYMBOLS.len());

pub trait BoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Vec<Card>;
}

/// Builds the unshuffled pairs for `difficulty`: symbol `i` becomes cards
/// `2i` and `2i + 1` sharing pair id `i`.
pub fn ordered_pairs(difficulty: Difficulty) -> Vec<Card> {
    let pairs = usize::from(difficulty.pairs()).min(SYMBOLS.len());
    SYMBOLS[..pairs]
        .iter()
        .zip(0..)
        .flat_map(|(&symbol, pair_id): (&&'static str, PairId)| {
            [
                Card::new(pair_id * 2, symbol, pair_id),
                Card::new(pair_id * 2 + 1, symbol, pair_id),
            ]
        })
        .collect()
}
