use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const APP_DIR_NAME: &str = "retro-snake";
const SCORE_FILE_NAME: &str = "scores.json";

/// Durable single-cell high score storage.
///
/// Reads never fail: a missing or unreadable value counts as 0.
pub trait HighScoreStore {
    /// Returns the stored high score.
    fn high_score(&self) -> u32;

    /// Stores `candidate` if it beats the stored value.
    fn save_high_score(&mut self, candidate: u32);
}

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("score file io failed: {0}")]
    Io(#[from] io::Error),
    #[error("score file is malformed: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScoreFile {
    high_score: u32,
}

/// Returns the platform-correct score file path.
#[must_use]
pub fn scores_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SCORE_FILE_NAME);
    base
}

/// High score kept in a small JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default per-user data location.
    #[must_use]
    pub fn at_default_location() -> Self {
        Self::new(scores_path())
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn high_score(&self) -> u32 {
        match load_high_score_from_path(&self.path) {
            Ok(score) => score,
            Err(error) => {
                warn!(path = %self.path.display(), %error, "ignoring unreadable high score");
                0
            }
        }
    }

    fn save_high_score(&mut self, candidate: u32) {
        if candidate <= self.high_score() {
            return;
        }

        if let Err(error) = save_high_score_to_path(&self.path, candidate) {
            warn!(path = %self.path.display(), %error, "failed to save high score");
        }
    }
}

/// In-process store, for tests and sessions that should not touch disk.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct MemoryStore {
    best: u32,
}

impl MemoryStore {
    #[must_use]
    pub fn with_high_score(best: u32) -> Self {
        Self { best }
    }
}

impl HighScoreStore for MemoryStore {
    fn high_score(&self) -> u32 {
        self.best
    }

    fn save_high_score(&mut self, candidate: u32) {
        self.best = self.best.max(candidate);
    }
}

fn load_high_score_from_path(path: &Path) -> Result<u32, ScoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e.into()),
    };

    let file: ScoreFile = serde_json::from_str(&raw)?;
    Ok(file.high_score)
}

fn save_high_score_to_path(path: &Path, score: u32) -> Result<(), ScoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let payload = ScoreFile { high_score: score };
    let json = serde_json::to_string_pretty(&payload)?;
    fs::write(path, json)?;
    Ok(())
}
