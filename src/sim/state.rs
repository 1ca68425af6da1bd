//! Game state and session lifecycle
//!
//! Everything a tick reads or writes lives here, including the seeded RNG
//! used for enemy fire.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::formation::Formation;
use super::laser::{Laser, Side};
use super::ship::Ship;
use crate::consts::*;
use crate::settings::{ConfigError, Difficulty, DifficultyParams, GameConfig};
use crate::sprites::{SpriteId, SpriteSet};

/// Current phase of the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Menu,
    /// "Start" banner, no gameplay
    StartCountdown,
    /// Active gameplay
    Playing,
    /// "Game Over" banner
    Lost,
    /// Quit requested; terminal
    Exit,
}

impl GamePhase {
    /// Banner text shown over the playfield, if any
    pub fn banner(&self) -> Option<&'static str> {
        match self {
            GamePhase::StartCountdown => Some("Start"),
            GamePhase::Lost => Some("Game Over"),
            _ => None,
        }
    }
}

/// Things that happened during a tick, for the audio layer and logging.
///
/// Cleared at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted,
    CountdownFinished,
    WaveSpawned { level: u32 },
    /// Player laser left the muzzle (laser sound)
    PlayerFired,
    EnemyFired,
    /// Shot down by a player laser
    EnemyDestroyed,
    /// Player took damage from a laser or a ramming enemy
    PlayerHit,
    EnemyRammed,
    FormationBreached,
    LifeLost { lives_left: u8 },
    NewHighScore { score: u64 },
    GameOver { score: u64 },
    ReturnedToMenu,
    Quit,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub sprites: SpriteSet,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Enemy fire draws
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Tier picked in the menu, applied at the next session start
    pub difficulty: Difficulty,
    /// Tier of the running session
    pub params: DifficultyParams,
    pub lives: u8,
    pub score: u64,
    /// Waves spawned this session
    pub level: u32,
    /// Shown on the HUD; follows the score once it is beaten
    pub high_score: u64,
    /// Stored high score as loaded at session start
    pub best_on_record: u64,
    pub player: Ship,
    /// Active formation, in spawn order
    pub enemies: Vec<Ship>,
    /// Active lasers of both sides, in fire order
    pub lasers: Vec<Laser>,
    pub formation: Formation,
    /// Ticks left in a banner phase
    pub phase_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events of the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state sitting in the menu
    pub fn new(config: GameConfig, sprites: SpriteSet, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let difficulty = config.difficulty;
        let params = difficulty.params();
        let player = spawn_player(&config, &sprites, &params);

        Ok(Self {
            config,
            sprites,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            difficulty,
            params,
            lives: STARTING_LIVES,
            score: 0,
            level: 0,
            high_score: 0,
            best_on_record: 0,
            player,
            enemies: Vec::new(),
            lasers: Vec::new(),
            formation: Formation::new(),
            phase_ticks: 0,
            time_ticks: 0,
            events: Vec::new(),
        })
    }

    /// Reset everything session-scoped and apply the selected tier
    pub fn start_session(&mut self, high_score: u64) {
        self.params = self.difficulty.params();
        self.lives = STARTING_LIVES;
        self.score = 0;
        self.level = 0;
        self.high_score = high_score;
        self.best_on_record = high_score;
        self.enemies.clear();
        self.lasers.clear();
        self.formation = Formation::new();
        self.player = spawn_player(&self.config, &self.sprites, &self.params);
    }

    /// Fresh player at the spawn point. Enemy lasers in flight are purged;
    /// the player's own keep flying.
    pub fn respawn_player(&mut self) {
        self.player = spawn_player(&self.config, &self.sprites, &self.params);
        self.lasers.retain(|laser| laser.side == Side::Player);
    }

    /// Raise the HUD high score once the session beats it
    pub fn add_score(&mut self, points: u64) {
        self.score += points;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// One chance in this many that an enemy fires on a given tick
    pub fn enemy_fire_odds(&self) -> u32 {
        self.params
            .enemy_fire_divisor
            .saturating_mul(self.config.tick_rate)
    }

    #[inline]
    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Player at the bottom center, full health, cooldown ready
fn spawn_player(config: &GameConfig, sprites: &SpriteSet, params: &DifficultyParams) -> Ship {
    let width = sprites.size(SpriteId::PlayerShip).x as u32;
    let pos = Vec2::new(crate::centered_x(config.width, width), PLAYER_SPAWN_Y);
    Ship::player(pos, config.player_max_health, params.player_cooldown)
}
