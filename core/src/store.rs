use std::collections::HashMap;
use std::path::PathBuf;
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::{Difficulty, StorageError, StorageResult};

/// Storage key the high-score record lives under.
pub const HIGH_SCORES_KEY: &str = "memoryGameHighScores";

/// Best score per difficulty. Fields missing from stored JSON read as 0.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighScores {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub expert: u32,
}

impl HighScores {
    pub const fn get(&self, difficulty: Difficulty) -> u32 {
        use Difficulty::*;
        match difficulty {
            Easy => self.easy,
            Medium => self.medium,
            Hard => self.hard,
            Expert => self.expert,
        }
    }

    /// Reads each difficulty from a stored JSON object on its own. Absent,
    /// negative or non-integer fields count as 0, as does a non-object value.
    pub fn from_json(value: &serde_json::Value) -> Self {
        let mut scores = Self::default();
        if let Some(fields) = value.as_object() {
            for difficulty in Difficulty::ALL {
                *scores.get_mut(difficulty) = fields
                    .get(difficulty.name())
                    .and_then(serde_json::Value::as_u64)
                    .map_or(0, |score| u32::try_from(score).unwrap_or(u32::MAX));
            }
        }
        scores
    }

    pub fn get_mut(&mut self, difficulty: Difficulty) -> &mut u32 {
        use Difficulty::*;
        match difficulty {
            Easy => &mut self.easy,
            Medium => &mut self.medium,
            Hard => &mut self.hard,
            Expert => &mut self.expert,
        }
    }
}

/// Persistent best-score record consumed by the engine.
pub trait HighScoreStore {
    /// Current record. Never fails: unreadable data yields the zero record.
    fn load(&self) -> HighScores;

    /// Persists `score` if it beats the stored best for `difficulty`, and
    /// reports whether it did.
    fn save(&mut self, difficulty: Difficulty, score: u32) -> bool;
}

/// Raw string key/value medium under a [`JsonHighScoreStore`].
pub trait StorageBackend {
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// High scores stored as one JSON object under a fixed key.
#[derive(Clone, Debug)]
pub struct JsonHighScoreStore<B> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> JsonHighScoreStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, HIGH_SCORES_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn try_load(&self) -> StorageResult<HighScores> {
        match self.backend.read(&self.key)? {
            Some(raw) => Ok(HighScores::from_json(&serde_json::from_str(&raw)?)),
            None => Ok(HighScores::default()),
        }
    }

    fn try_store(&mut self, scores: &HighScores) -> StorageResult<()> {
        let raw = serde_json::to_string(scores)?;
        self.backend.write(&self.key, &raw)
    }
}

impl<B: StorageBackend> HighScoreStore for JsonHighScoreStore<B> {
    fn load(&self) -> HighScores {
        self.try_load().unwrap_or_else(|err| {
            log::warn!("Could not read high scores from {:?}: {}", self.key, err);
            HighScores::default()
        })
    }

    fn save(&mut self, difficulty: Difficulty, score: u32) -> bool {
        let mut scores = self.load();
        let best = scores.get_mut(difficulty);
        if score <= *best {
            return false;
        }
        *best = score;

        match self.try_store(&scores) {
            Ok(()) => {
                log::info!("New {} high score: {}", difficulty, score);
                true
            }
            Err(err) => {
                log::error!("Could not save high scores to {:?}: {}", self.key, err);
                false
            }
        }
    }
}

/// In-process backend; contents vanish with the value.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.insert(key, value);
        Ok(())
    }
}

/// Native backend keeping each key in `<dir>/<key>.json`.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(StorageError::Unavailable(format!("unusable key {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StorageBackend for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        fs::write(path, value)?;
        Ok(())
    }
}
