//! Persisted high score
//!
//! A single integer kept in a text file (one line, newline terminated).
//! The state machine treats every failure here as best-effort: a failed load
//! reads as 0, a failed save is logged and forgotten.

use std::fs;
use std::io;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::consts::HIGH_SCORE_FILE;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("high score file: {0}")]
    Io(#[from] io::Error),
    #[error("high score file is not a number: {0}")]
    Parse(#[from] ParseIntError),
}

/// Where the high score lives
pub trait ScoreStore {
    /// Read the stored high score
    fn load(&mut self) -> Result<u64, ScoreError>;
    /// Overwrite the stored high score
    fn save(&mut self, score: u64) -> Result<(), ScoreError>;
}

/// Text file store
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileScoreStore {
    /// `hi-score.txt` in the working directory
    fn default() -> Self {
        Self::new(HIGH_SCORE_FILE)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&mut self) -> Result<u64, ScoreError> {
        let text = fs::read_to_string(&self.path)?;
        let first = text.lines().next().unwrap_or("");
        let score: u64 = first.trim().parse()?;
        log::info!("Loaded high score {} from {}", score, self.path.display());
        Ok(score)
    }

    fn save(&mut self, score: u64) -> Result<(), ScoreError> {
        fs::write(&self.path, format!("{}\n", score))?;
        log::info!("High score {} saved to {}", score, self.path.display());
        Ok(())
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    /// Stored value; `None` behaves like a missing file
    pub value: Option<u64>,
    /// Make every save fail
    pub fail_saves: bool,
    pub loads: u32,
    pub saves: u32,
}

impl MemoryScoreStore {
    pub fn new(value: u64) -> Self {
        Self {
            value: Some(value),
            ..Default::default()
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&mut self) -> Result<u64, ScoreError> {
        self.loads += 1;
        self.value.ok_or_else(|| {
            ScoreError::Io(io::Error::new(io::ErrorKind::NotFound, "no stored high score"))
        })
    }

    fn save(&mut self, score: u64) -> Result<(), ScoreError> {
        self.saves += 1;
        if self.fail_saves {
            return Err(ScoreError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "store is read-only",
            )));
        }
        self.value = Some(score);
        Ok(())
    }
}
