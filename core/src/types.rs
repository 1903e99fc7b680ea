use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{GameError, SYMBOLS};

/// Identity of a card, unique within one board.
pub type CardId = u16;

/// Groups the two cards of a pair.
pub type PairId = u16;

/// Milliseconds since the Unix epoch, as reported by a [`Clock`](crate::Clock).
pub type Millis = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    pub const fn config(self) -> &'static DifficultyConfig {
        use Difficulty::*;
        match self {
            Easy => &DifficultyConfig::EASY,
            Medium => &DifficultyConfig::MEDIUM,
            Hard => &DifficultyConfig::HARD,
            Expert => &DifficultyConfig::EXPERT,
        }
    }

    pub const fn pairs(self) -> u16 {
        self.config().pairs
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "easy",
            Medium => "medium",
            Hard => "hard",
            Expert => "expert",
        }
    }

    pub const fn display_name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Easy (4×3)",
            Medium => "Medium (4×4)",
            Hard => "Hard (6×4)",
            Expert => "Expert (6×6)",
        }
    }

    pub const fn description(self) -> &'static str {
        use Difficulty::*;
        match self {
            Easy => "Perfect for beginners - 12 cards to match",
            Medium => "A balanced challenge - 16 cards to match",
            Hard => "Getting serious - 24 cards to match",
            Expert => "Ultimate challenge - 36 cards to match",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GameError::UnknownDifficulty(s.to_string()))
    }
}

/// Static board size and scoring parameters of a difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct DifficultyConfig {
    pub pairs: u16,
    pub grid_cols: u8,
    pub grid_rows: u8,
    pub base_score: u32,
    pub time_bonus: u32,
    pub multiplier: f64,
}

impl DifficultyConfig {
    pub const EASY: Self = Self {
        pairs: 6,
        grid_cols: 4,
        grid_rows: 3,
        base_score: 100,
        time_bonus: 10,
        multiplier: 1.0,
    };

    pub const MEDIUM: Self = Self {
        pairs: 8,
        grid_cols: 4,
        grid_rows: 4,
        base_score: 150,
        time_bonus: 15,
        multiplier: 1.5,
    };

    pub const HARD: Self = Self {
        pairs: 12,
        grid_cols: 6,
        grid_rows: 4,
        base_score: 200,
        time_bonus: 20,
        multiplier: 2.0,
    };

    pub const EXPERT: Self = Self {
        pairs: 18,
        grid_cols: 6,
        grid_rows: 6,
        base_score: 300,
        time_bonus: 25,
        multiplier: 3.0,
    };

    pub const fn total_cards(&self) -> usize {
        self.pairs as usize * 2
    }

    pub const fn total_cells(&self) -> usize {
        self.grid_cols as usize * self.grid_rows as usize
    }
}

/// Checks the static difficulty table against the symbol alphabet.
///
/// Runs once when an engine is built; a failure here is a configuration bug,
/// never a per-move condition.
pub fn validate_configs() -> crate::Result<()> {
    for difficulty in Difficulty::ALL {
        let config = difficulty.config();
        let required = usize::from(config.pairs);
        if required == 0 || required > SYMBOLS.len() {
            return Err(GameError::InsufficientSymbols {
                difficulty,
                required,
                available: SYMBOLS.len(),
            });
        }
        if config.total_cells() != config.total_cards() {
            return Err(GameError::GridMismatch {
                difficulty,
                cells: config.total_cells(),
                cards: config.total_cards(),
            });
        }
    }
    Ok(())
}

/// Formats whole seconds as zero-padded `MM:SS`.
pub fn format_time(total_secs: u32) -> String {
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{:02}:{:02}", mins, secs)
}
