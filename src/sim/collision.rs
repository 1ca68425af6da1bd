//! Entity-vs-entity hit tests
//!
//! Everything that can collide exposes a position and a sprite; the sprite's
//! mask comes from the [`SpriteSet`] the session was built with.

use glam::Vec2;

use crate::sprites::{SpriteId, SpriteSet};

/// Anything placed on screen with a collision mask
pub trait Body {
    /// Top-left corner in screen pixels
    fn pos(&self) -> Vec2;
    fn sprite(&self) -> SpriteId;
}

/// Offset of `b` relative to `a`, truncated to whole pixels
#[inline]
pub fn pixel_offset(a: Vec2, b: Vec2) -> (i32, i32) {
    let d = b - a;
    (d.x as i32, d.y as i32)
}

/// True iff the opaque pixels of `a` and `b` overlap at their current positions
pub fn overlaps(sprites: &SpriteSet, a: &impl Body, b: &impl Body) -> bool {
    let offset = pixel_offset(a.pos(), b.pos());
    sprites
        .mask(a.sprite())
        .overlap(sprites.mask(b.sprite()), offset)
        .is_some()
}
