use thiserror::Error;

use crate::Difficulty;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("{difficulty} needs {required} symbols but only {available} exist")]
    InsufficientSymbols {
        difficulty: Difficulty,
        required: usize,
        available: usize,
    },
    #[error("{difficulty} grid has {cells} cells for {cards} cards")]
    GridMismatch {
        difficulty: Difficulty,
        cells: usize,
        cards: usize,
    },
    #[error("Unknown difficulty: {0:?}")]
    UnknownDifficulty(String),
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O failed")]
    Io(#[from] std::io::Error),
    #[error("Stored value is not valid JSON")]
    Json(#[from] serde_json::Error),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = core::result::Result<T, StorageError>;
