//! Pixel Invaders - A fixed-timestep space invaders core
//!
//! Core modules:
//! - `sim`: Simulation (formation, lasers, collisions, game state machine)
//! - `sprites`: Collision masks handed to the simulation
//! - `view`: Per-tick renderable snapshot for the external renderer
//! - `highscores`: Persisted high score
//! - `settings`: Difficulty tiers and game configuration

pub mod highscores;
pub mod settings;
pub mod sim;
pub mod sprites;
pub mod view;

pub use highscores::{FileScoreStore, MemoryScoreStore, ScoreError, ScoreStore};
pub use settings::{ConfigError, Difficulty, DifficultyParams, GameConfig};
pub use sprites::{SpriteId, SpriteSet};
pub use view::RenderView;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: u32 = 1000;
    pub const SCREEN_HEIGHT: u32 = 1000;

    /// Fixed simulation rate
    pub const TICK_RATE: u32 = 60;
    /// Highest accepted configured tick rate
    pub const MAX_TICK_RATE: u32 = 1000;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player ship sprite (pixels)
    pub const PLAYER_SIZE: (u32, u32) = (50, 50);
    /// Laser sprite (pixels), shared by both sides
    pub const LASER_SIZE: (u32, u32) = (50, 60);
    /// Enemy ship sprite (pixels)
    pub const ENEMY_SIZE: (u32, u32) = (40, 30);

    /// Player spawn row; column is centered on the screen
    pub const PLAYER_SPAWN_Y: f32 = 825.0;
    /// Horizontal player speed (pixels per tick)
    pub const PLAYER_SPEED: f32 = 5.0;
    /// A single hit takes the whole bar
    pub const PLAYER_MAX_HEALTH: i32 = 1;

    pub const ENEMY_MAX_HEALTH: i32 = 100;
    /// Ticks between enemy shots
    pub const ENEMY_COOLDOWN: u32 = 30;
    /// Enemy lasers leave the muzzle this far left of the ship
    pub const ENEMY_MUZZLE_OFFSET_X: f32 = -10.0;

    /// Formation layout
    pub const FORMATION_COLUMNS: usize = 10;
    pub const FORMATION_COLUMN_SPACING: f32 = 60.0;
    /// Vertical drop when the formation touches a side wall
    pub const FORMATION_DROP: f32 = 50.0;

    /// Health lost per laser hit or ramming enemy
    pub const HIT_DAMAGE: i32 = 10;
    /// Score per enemy shot down
    pub const KILL_SCORE: u64 = 10;
    pub const STARTING_LIVES: u8 = 3;

    /// Banner durations (seconds)
    pub const COUNTDOWN_SECS: u32 = 2;
    pub const GAME_OVER_SECS: u32 = 3;

    /// Well-known high score file in the working directory
    pub const HIGH_SCORE_FILE: &str = "hi-score.txt";
}

/// Spawn column for a ship of the given width, centered on the screen
#[inline]
pub fn centered_x(screen_width: u32, sprite_width: u32) -> f32 {
    screen_width as f32 / 2.0 - sprite_width as f32 / 2.0
}
