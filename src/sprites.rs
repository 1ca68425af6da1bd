//! Sprite identifiers and the collision masks behind them
//!
//! Image loading belongs to the front-end. It hands the core one mask per
//! sprite (usually via [`Mask::from_alpha`]); the renderer keys its textures
//! off the same [`SpriteId`]s. [`SpriteSet::procedural`] provides stand-in
//! shapes at the artwork sizes for headless runs and tests.

use std::sync::Arc;

use glam::Vec2;
use serde::Serialize;

use crate::consts::*;
use crate::sim::mask::Mask;
use crate::sim::ship::EnemyColor;

/// Every sprite the core can place on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SpriteId {
    PlayerShip,
    PlayerLaser,
    EnemyShip(EnemyColor),
    EnemyLaser(EnemyColor),
}

impl SpriteId {
    pub const COUNT: usize = 8;

    fn index(self) -> usize {
        match self {
            SpriteId::PlayerShip => 0,
            SpriteId::PlayerLaser => 1,
            SpriteId::EnemyShip(color) => 2 + color.index(),
            SpriteId::EnemyLaser(color) => 5 + color.index(),
        }
    }
}

/// One collision mask per [`SpriteId`]
#[derive(Debug, Clone)]
pub struct SpriteSet {
    masks: [Arc<Mask>; SpriteId::COUNT],
}

impl SpriteSet {
    /// Same mask for every sprite
    pub fn uniform(mask: Mask) -> Self {
        let mask = Arc::new(mask);
        Self {
            masks: std::array::from_fn(|_| mask.clone()),
        }
    }

    /// Built-in shapes sized like the game artwork
    pub fn procedural() -> Self {
        let mut set = Self::uniform(laser_mask());
        set.set(SpriteId::PlayerShip, player_mask());
        let enemy = Arc::new(enemy_mask());
        for color in EnemyColor::ALL {
            set.masks[SpriteId::EnemyShip(color).index()] = enemy.clone();
        }
        set
    }

    /// Replace the mask for one sprite
    pub fn set(&mut self, id: SpriteId, mask: Mask) {
        self.masks[id.index()] = Arc::new(mask);
    }

    #[inline]
    pub fn mask(&self, id: SpriteId) -> &Mask {
        &self.masks[id.index()]
    }

    /// Bounding size in pixels
    pub fn size(&self, id: SpriteId) -> Vec2 {
        let mask = self.mask(id);
        Vec2::new(mask.width() as f32, mask.height() as f32)
    }
}

impl Default for SpriteSet {
    fn default() -> Self {
        Self::procedural()
    }
}

/// Arrow-shaped hull over a wide base
fn player_mask() -> Mask {
    let (w, h) = PLAYER_SIZE;
    let cx = (w as f32 - 1.0) / 2.0;
    Mask::from_fn(w, h, |x, y| {
        let dx = (x as f32 - cx).abs();
        if y < 36 {
            dx <= 2.0 + y as f32 * 0.45
        } else {
            dx <= 22.0 && y < h - 2
        }
    })
}

/// Thin beam centered in a mostly transparent frame
fn laser_mask() -> Mask {
    let (w, h) = LASER_SIZE;
    Mask::from_fn(w, h, |x, y| (22..28).contains(&x) && (6..h - 6).contains(&y))
}

/// Elliptical body with two legs
fn enemy_mask() -> Mask {
    let (w, h) = ENEMY_SIZE;
    let cx = (w as f32 - 1.0) / 2.0;
    Mask::from_fn(w, h, |x, y| {
        if y < 22 {
            let nx = (x as f32 - cx) / (w as f32 / 2.0);
            let ny = (y as f32 - 11.0) / 11.0;
            nx * nx + ny * ny <= 1.0
        } else {
            (6..11).contains(&x) || (w - 11..w - 6).contains(&x)
        }
    })
}
