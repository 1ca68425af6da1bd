//! Ships: the player and every enemy share one record
//!
//! Per-kind behavior (sprites, muzzle position, laser direction) dispatches on
//! [`ShipKind`]; health and the fire-rate gate are common.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Body;
use super::laser::{Laser, Side};
use crate::consts::*;
use crate::settings::ConfigError;
use crate::sprites::{SpriteId, SpriteSet};

/// Enemy color classes. Purely visual: each color owns a ship and laser sprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyColor {
    Red,
    Green,
    Blue,
}

impl EnemyColor {
    pub const ALL: [EnemyColor; 3] = [EnemyColor::Red, EnemyColor::Green, EnemyColor::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnemyColor::Red => "red",
            EnemyColor::Green => "green",
            EnemyColor::Blue => "blue",
        }
    }

    pub fn from_key(key: &str) -> Result<Self, ConfigError> {
        match key {
            "red" => Ok(EnemyColor::Red),
            "green" => Ok(EnemyColor::Green),
            "blue" => Ok(EnemyColor::Blue),
            other => Err(ConfigError::UnknownEnemyColor(other.to_string())),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            EnemyColor::Red => 0,
            EnemyColor::Green => 1,
            EnemyColor::Blue => 2,
        }
    }
}

/// Fire-rate gate.
///
/// After a shot the counter runs 1, 2, ... up to `period`, then wraps to 0 on
/// the following tick and the ship may fire again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    counter: u32,
    period: u32,
}

impl Cooldown {
    pub fn new(period: u32) -> Self {
        Self { counter: 0, period }
    }

    #[inline]
    pub fn counter(&self) -> u32 {
        self.counter
    }

    #[inline]
    pub fn period(&self) -> u32 {
        self.period
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.counter == 0
    }

    /// Advance one tick
    pub fn tick(&mut self) {
        if self.counter >= self.period {
            self.counter = 0;
        } else if self.counter > 0 {
            self.counter += 1;
        }
    }

    /// Arm the cooldown if ready. Returns whether a shot may be fired.
    pub fn try_fire(&mut self) -> bool {
        if self.counter == 0 {
            self.counter = 1;
            true
        } else {
            false
        }
    }
}

/// What a ship is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipKind {
    Player,
    Enemy(EnemyColor),
}

/// A ship entity
#[derive(Debug, Clone)]
pub struct Ship {
    pub kind: ShipKind,
    /// Top-left corner (screen pixels)
    pub pos: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub cooldown: Cooldown,
}

impl Ship {
    pub fn player(pos: Vec2, max_health: i32, cooldown_period: u32) -> Self {
        Self {
            kind: ShipKind::Player,
            pos,
            health: max_health,
            max_health,
            cooldown: Cooldown::new(cooldown_period),
        }
    }

    pub fn enemy(pos: Vec2, color: EnemyColor, max_health: i32, cooldown_period: u32) -> Self {
        Self {
            kind: ShipKind::Enemy(color),
            pos,
            health: max_health,
            max_health,
            cooldown: Cooldown::new(cooldown_period),
        }
    }

    /// Which side this ship's lasers belong to
    pub fn side(&self) -> Side {
        match self.kind {
            ShipKind::Player => Side::Player,
            ShipKind::Enemy(_) => Side::Enemy,
        }
    }

    pub fn laser_sprite(&self) -> SpriteId {
        match self.kind {
            ShipKind::Player => SpriteId::PlayerLaser,
            ShipKind::Enemy(color) => SpriteId::EnemyLaser(color),
        }
    }

    /// Where this ship's lasers spawn (laser top-left)
    pub fn muzzle(&self) -> Vec2 {
        match self.kind {
            ShipKind::Player => self.pos,
            ShipKind::Enemy(_) => self.pos + Vec2::new(ENEMY_MUZZLE_OFFSET_X, 0.0),
        }
    }

    pub fn size(&self, sprites: &SpriteSet) -> Vec2 {
        sprites.size(self.sprite())
    }

    /// Lower edge in screen coordinates
    pub fn bottom(&self, sprites: &SpriteSet) -> f32 {
        self.pos.y + self.size(sprites).y
    }

    /// Fill level of the health bar (0.0 - 1.0)
    pub fn health_fraction(&self) -> f32 {
        (self.health as f32 / self.max_health as f32).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Fire if the cooldown allows it
    pub fn fire(&mut self) -> Option<Laser> {
        if self.cooldown.try_fire() {
            Some(Laser::new(self.muzzle(), self.side(), self.laser_sprite()))
        } else {
            None
        }
    }

    /// Step left by `speed` if that keeps the ship strictly on screen
    pub fn move_left(&mut self, speed: f32) {
        if self.pos.x - speed > 0.0 {
            self.pos.x -= speed;
        }
    }

    /// Step right by `speed` if that keeps the ship strictly on screen
    pub fn move_right(&mut self, speed: f32, screen_width: f32, sprites: &SpriteSet) {
        if self.pos.x + speed + self.size(sprites).x < screen_width {
            self.pos.x += speed;
        }
    }
}

impl Body for Ship {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn sprite(&self) -> SpriteId {
        match self.kind {
            ShipKind::Player => SpriteId::PlayerShip,
            ShipKind::Enemy(color) => SpriteId::EnemyShip(color),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_cooldown_blocks_for_period() {
        let mut cd = Cooldown::new(3);
        assert!(cd.try_fire());
        assert_eq!(cd.counter(), 1);

        // counter 1 -> 2 -> 3, still blocked
        for expected in [2, 3] {
            cd.tick();
            assert_eq!(cd.counter(), expected);
            assert!(!cd.try_fire());
        }

        // wraps on reaching the period
        cd.tick();
        assert_eq!(cd.counter(), 0);
        assert!(cd.try_fire());
    }

    #[test]
    fn test_cooldown_idle_stays_ready() {
        let mut cd = Cooldown::new(10);
        for _ in 0..25 {
            cd.tick();
            assert!(cd.is_ready());
        }
    }

    #[test]
    fn test_failed_fire_leaves_state() {
        let mut cd = Cooldown::new(5);
        cd.try_fire();
        cd.tick();
        let before = cd;
        assert!(!cd.try_fire());
        assert_eq!(cd, before);
    }

    #[test]
    fn test_enemy_color_keys() {
        assert_eq!(EnemyColor::from_key("green").unwrap(), EnemyColor::Green);
        assert!(matches!(
            EnemyColor::from_key("purple"),
            Err(ConfigError::UnknownEnemyColor(k)) if k == "purple"
        ));
        for color in EnemyColor::ALL {
            assert_eq!(EnemyColor::from_key(color.as_str()).unwrap(), color);
        }
    }

    #[test]
    fn test_enemy_fire_uses_color_laser_and_muzzle() {
        let mut enemy = Ship::enemy(Vec2::new(100.0, 70.0), EnemyColor::Blue, 100, 30);
        let laser = enemy.fire().unwrap();
        assert_eq!(laser.side, Side::Enemy);
        assert_eq!(laser.sprite, SpriteId::EnemyLaser(EnemyColor::Blue));
        assert_eq!(laser.pos, Vec2::new(90.0, 70.0));
        assert!(enemy.fire().is_none());
    }

    #[test]
    fn test_player_movement_stays_inside() {
        let sprites = SpriteSet::procedural();
        let mut player = Ship::player(Vec2::new(4.0, 825.0), 1, 30);
        player.move_left(5.0);
        assert_eq!(player.pos.x, 4.0);

        player.pos.x = 944.0;
        player.move_right(5.0, 1000.0, &sprites);
        assert_eq!(player.pos.x, 949.0);
        player.move_right(5.0, 1000.0, &sprites);
        assert_eq!(player.pos.x, 949.0);
    }

    #[test]
    fn test_damage_goes_below_zero() {
        let mut player = Ship::player(Vec2::ZERO, 1, 30);
        player.take_damage(HIT_DAMAGE);
        assert_eq!(player.health, -9);
        assert!(player.is_dead());
        assert_eq!(player.health_fraction(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_cooldown_cycle(period in 1u32..40, presses in proptest::collection::vec(any::<bool>(), 1..200)) {
            let mut cd = Cooldown::new(period);
            let mut last_shot: Option<usize> = None;
            for (t, press) in presses.into_iter().enumerate() {
                if press && cd.try_fire() {
                    if let Some(prev) = last_shot {
                        // blocked for the full period, ready again on the wrap tick
                        prop_assert!(t - prev >= period as usize);
                    }
                    last_shot = Some(t);
                }
                prop_assert!(cd.counter() <= period);
                let mid = cd.counter();
                cd.tick();
                if cd.counter() != 0 {
                    prop_assert!(cd.counter() >= mid);
                } else if mid != 0 {
                    prop_assert_eq!(mid, period);
                }
            }
        }
    }
}
