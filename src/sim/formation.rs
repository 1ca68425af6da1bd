//! Enemy formation: wave layout, lock-step sweep and enemy fire
//!
//! The formation moves as one unit:
//! - Every tick all enemies shift horizontally by the tier's enemy speed
//! - When any enemy would touch the wall it is heading for, the direction
//!   flips and the whole grid also drops by the configured step
//! - Edge contact is decided on the positions before anything moves

use glam::Vec2;
use rand::Rng;

use super::laser::Laser;
use super::ship::{EnemyColor, Ship};
use crate::consts::*;
use crate::settings::GameConfig;
use crate::sprites::SpriteSet;

/// Row layout of a fresh wave: (x of the first column, y, color)
const WAVE_ROWS: [(f32, f32, EnemyColor); 5] = [
    (10.0, 70.0, EnemyColor::Blue),
    (0.0, 120.0, EnemyColor::Green),
    (0.0, 170.0, EnemyColor::Green),
    (0.0, 220.0, EnemyColor::Red),
    (0.0, 270.0, EnemyColor::Red),
];

/// Horizontal heading of the formation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Left,
    #[default]
    Right,
}

impl Direction {
    #[inline]
    pub fn sign(&self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What the formation did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStep {
    /// Horizontal shift only
    Sweep,
    /// Direction flipped; horizontal shift plus drop
    Drop,
}

/// Movement state shared by every enemy of the session
#[derive(Debug, Clone, Default)]
pub struct Formation {
    pub direction: Direction,
}

impl Formation {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if some enemy would reach the wall it is heading for after
    /// moving `speed` pixels
    pub fn edge_contact(
        &self,
        enemies: &[Ship],
        speed: f32,
        screen_width: f32,
        sprites: &SpriteSet,
    ) -> bool {
        enemies.iter().any(|enemy| match self.direction {
            Direction::Right => enemy.pos.x + speed + enemy.size(sprites).x >= screen_width,
            Direction::Left => enemy.pos.x - speed <= 0.0,
        })
    }

    /// Move the whole formation one tick.
    ///
    /// The edge scan completes before any enemy moves, so every enemy gets
    /// the same displacement.
    pub fn step(
        &mut self,
        enemies: &mut [Ship],
        speed: f32,
        drop: f32,
        screen_width: f32,
        sprites: &SpriteSet,
    ) -> FormationStep {
        let step = if self.edge_contact(enemies, speed, screen_width, sprites) {
            self.direction = self.direction.flipped();
            FormationStep::Drop
        } else {
            FormationStep::Sweep
        };

        let dy = match step {
            FormationStep::Drop => drop,
            FormationStep::Sweep => 0.0,
        };
        let delta = Vec2::new(self.direction.sign() * speed, dy);
        for enemy in enemies.iter_mut() {
            enemy.pos += delta;
        }

        step
    }
}

/// Lay out a fresh 5 x 10 wave
pub fn spawn_wave(config: &GameConfig) -> Vec<Ship> {
    let mut enemies = Vec::with_capacity(WAVE_ROWS.len() * FORMATION_COLUMNS);
    for (x0, y, color) in WAVE_ROWS {
        for col in 0..FORMATION_COLUMNS {
            let pos = Vec2::new(x0 + col as f32 * FORMATION_COLUMN_SPACING, y);
            enemies.push(Ship::enemy(
                pos,
                color,
                config.enemy_max_health,
                config.enemy_cooldown,
            ));
        }
    }
    enemies
}

/// Advance every enemy's cooldown and give each one chance in `odds` to fire.
///
/// The draw happens for every enemy, cooling or not, so the random stream
/// only depends on the number of enemies.
pub fn enemies_open_fire<R: Rng + ?Sized>(
    enemies: &mut [Ship],
    odds: u32,
    rng: &mut R,
) -> Vec<Laser> {
    let odds = odds.max(1);
    let mut shots = Vec::new();
    for enemy in enemies.iter_mut() {
        enemy.cooldown.tick();
        if rng.random_ratio(1, odds) {
            if let Some(laser) = enemy.fire() {
                shots.push(laser);
            }
        }
    }
    shots
}
