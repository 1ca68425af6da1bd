//! Laser projectiles
//!
//! Each tick a laser moves, then reports exactly one [`LaserEvent`]. The
//! off-screen check runs first; the hit test only runs for lasers still on
//! screen.

use glam::Vec2;

use super::collision::{Body, overlaps};
use super::ship::Ship;
use crate::consts::*;
use crate::sprites::{SpriteId, SpriteSet};

/// Who fired a laser. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Vertical direction of travel (screen y grows downward)
    #[inline]
    pub fn direction(&self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Enemy => 1.0,
        }
    }
}

/// Outcome of advancing one laser by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserEvent {
    /// Still flying
    None,
    /// Left the vertical screen bounds
    OffScreen,
    /// Struck an opposing ship
    Hit,
}

impl LaserEvent {
    /// Off-screen and hit both remove the laser
    #[inline]
    pub fn removes(&self) -> bool {
        !matches!(self, LaserEvent::None)
    }
}

/// A laser entity
#[derive(Debug, Clone)]
pub struct Laser {
    /// Top-left corner (screen pixels)
    pub pos: Vec2,
    pub side: Side,
    pub sprite: SpriteId,
}

impl Laser {
    pub fn new(pos: Vec2, side: Side, sprite: SpriteId) -> Self {
        Self { pos, side, sprite }
    }

    /// Move by `speed` pixels in the owning side's direction
    pub fn advance(&mut self, speed: f32) {
        self.pos.y += self.side.direction() * speed;
    }

    /// Outside `0 <= y <= screen_height`
    pub fn off_screen(&self, screen_height: f32) -> bool {
        !(0.0..=screen_height).contains(&self.pos.y)
    }

    /// Advance a player laser and test it against the formation.
    ///
    /// The first enemy hit is removed from `enemies`; later enemies are not
    /// checked.
    pub fn step_against_enemies(
        &mut self,
        speed: f32,
        screen_height: f32,
        enemies: &mut Vec<Ship>,
        sprites: &SpriteSet,
    ) -> LaserEvent {
        self.advance(speed);
        if self.off_screen(screen_height) {
            return LaserEvent::OffScreen;
        }

        let laser: &Laser = self;
        match enemies.iter().position(|e| overlaps(sprites, laser, e)) {
            Some(idx) => {
                enemies.remove(idx);
                LaserEvent::Hit
            }
            None => LaserEvent::None,
        }
    }

    /// Advance an enemy laser and test it against the player.
    ///
    /// A hit costs the player [`HIT_DAMAGE`] health; removing the player is
    /// left to the caller.
    pub fn step_against_player(
        &mut self,
        speed: f32,
        screen_height: f32,
        player: &mut Ship,
        sprites: &SpriteSet,
    ) -> LaserEvent {
        self.advance(speed);
        if self.off_screen(screen_height) {
            return LaserEvent::OffScreen;
        }

        if overlaps(sprites, &*self, &*player) {
            player.take_damage(HIT_DAMAGE);
            LaserEvent::Hit
        } else {
            LaserEvent::None
        }
    }
}

impl Body for Laser {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn sprite(&self) -> SpriteId {
        self.sprite
    }
}
