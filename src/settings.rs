//! Difficulty tiers and game configuration
//!
//! The tier table is fixed at compile time. `GameConfig` can be read from a
//! JSON file by the native front-end; every other field falls back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration/integration errors. These are fatal at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown difficulty index {0} (expected 0..=2)")]
    UnknownDifficulty(usize),
    #[error("unknown enemy color {0:?}")]
    UnknownEnemyColor(String),
    #[error("mask of {width}x{height} needs {expected} alpha values, got {actual}")]
    MaskSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// Difficulty tiers, selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Normal,
    Hard,
}

/// Numeric knobs of one difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DifficultyParams {
    /// Laser speed (pixels per tick), both sides
    pub laser_speed: u32,
    /// Formation horizontal speed (pixels per tick)
    pub enemy_speed: u32,
    /// Ticks between player shots
    pub player_cooldown: u32,
    /// Higher means enemies fire less often: odds are 1 in `divisor * tick_rate`
    pub enemy_fire_divisor: u32,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Menu index lookup (0 = easy)
    pub fn from_index(index: usize) -> Result<Self, ConfigError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(ConfigError::UnknownDifficulty(index))
    }

    /// Next tier in menu order, wrapping back to easy
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Normal,
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn params(&self) -> DifficultyParams {
        match self {
            Difficulty::Easy => DifficultyParams {
                laser_speed: 5,
                enemy_speed: 1,
                player_cooldown: 30,
                enemy_fire_divisor: 25,
            },
            Difficulty::Normal => DifficultyParams {
                laser_speed: 8,
                enemy_speed: 3,
                player_cooldown: 15,
                enemy_fire_divisor: 15,
            },
            Difficulty::Hard => DifficultyParams {
                laser_speed: 10,
                enemy_speed: 6,
                player_cooldown: 10,
                enemy_fire_divisor: 10,
            },
        }
    }
}

/// Everything the simulation needs to know about its world.
///
/// Threaded through `GameState::new` instead of living in globals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Screen width in pixels
    pub width: u32,
    /// Screen height in pixels
    pub height: u32,
    /// Ticks per second
    pub tick_rate: u32,
    /// Tier used for the next session
    pub difficulty: Difficulty,
    /// Player horizontal speed (pixels per tick)
    pub player_speed: f32,
    pub player_max_health: i32,
    pub enemy_max_health: i32,
    /// Ticks between enemy shots
    pub enemy_cooldown: u32,
    /// Formation drop on wall contact (pixels)
    pub drop_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            difficulty: Difficulty::default(),
            player_speed: PLAYER_SPEED,
            player_max_health: PLAYER_MAX_HEALTH,
            enemy_max_health: ENEMY_MAX_HEALTH,
            enemy_cooldown: ENEMY_COOLDOWN,
            drop_step: FORMATION_DROP,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid("screen dimensions must be non-zero"));
        }
        if self.tick_rate == 0 || self.tick_rate > MAX_TICK_RATE {
            return Err(ConfigError::Invalid("tick rate must be within 1..=1000"));
        }
        if self.width <= PLAYER_SIZE.0 {
            return Err(ConfigError::Invalid("screen too narrow for the player"));
        }
        if (self.height as f32) < PLAYER_SPAWN_Y + PLAYER_SIZE.1 as f32 {
            return Err(ConfigError::Invalid("screen too short for the player spawn row"));
        }
        if self.player_max_health <= 0 || self.enemy_max_health <= 0 {
            return Err(ConfigError::Invalid("max health must be positive"));
        }
        if !self.player_speed.is_finite() || self.player_speed <= 0.0 {
            return Err(ConfigError::Invalid("player speed must be positive"));
        }
        if !self.drop_step.is_finite() || self.drop_step < 0.0 {
            return Err(ConfigError::Invalid("drop step must be non-negative"));
        }
        Ok(())
    }

    /// Ticks a banner of `secs` seconds stays up
    pub fn ticks_for(&self, secs: u32) -> u32 {
        secs.saturating_mul(self.tick_rate)
    }

    /// Load config from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("No config at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
