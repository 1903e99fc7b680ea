//! Score and accuracy formulas shown on the win screen and used for high
//! scores. Both are pure functions of their inputs.

use crate::Difficulty;

/// Seconds of par time granted per pair before the time bonus runs out.
pub const SECONDS_PER_PAIR: i64 = 30;

/// Points per move saved below twice the ideal move count.
pub const ACCURACY_POINTS_PER_MOVE: i64 = 10;

/// Final score for a session.
///
/// `matched_pairs` earns the per-pair base score, finishing under
/// `pairs * 30` seconds earns the difficulty's time bonus per spare second,
/// and using fewer than `pairs * 4` flips earns 10 points per spare flip. The
/// sum is scaled by the difficulty multiplier and rounded.
pub fn compute_score(
    difficulty: Difficulty,
    moves: u32,
    elapsed_secs: u32,
    matched_pairs: u32,
) -> u32 {
    let config = difficulty.config();
    let pairs = i64::from(config.pairs);

    let base = i64::from(matched_pairs) * i64::from(config.base_score);

    let time_budget = pairs * SECONDS_PER_PAIR;
    let time_bonus =
        ((time_budget - i64::from(elapsed_secs)) * i64::from(config.time_bonus)).max(0);

    let ideal_moves = pairs * 2;
    let accuracy_bonus = ((ideal_moves * 2 - i64::from(moves)) * ACCURACY_POINTS_PER_MOVE).max(0);

    let total = (base + time_bonus + accuracy_bonus) as f64 * config.multiplier;
    total.round().clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Share of ideal flips over actual flips, as a whole percentage in `0..=100`.
pub fn compute_accuracy(moves: u32, total_pairs: u32) -> u8 {
    let ideal_moves = u64::from(total_pairs) * 2;
    let denominator = u64::from(moves).max(ideal_moves);
    if denominator == 0 {
        return 0;
    }
    let accuracy = (ideal_moves as f64 / denominator as f64 * 100.0).min(100.0);
    accuracy.round() as u8
}
