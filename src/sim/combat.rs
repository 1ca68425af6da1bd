//! Enemy-vs-player contact
//!
//! Runs after the formation has moved. Two outcomes remove an enemy:
//! - Ramming: its opaque pixels touch the player. The player takes
//!   [`HIT_DAMAGE`] and no points are scored.
//! - Breach: its lower edge passed the player's top edge without touching.
//!   The player's health drops to zero and the session is lost outright.

use super::collision::overlaps;
use super::ship::Ship;
use crate::consts::*;
use crate::sprites::SpriteSet;

/// What happened between the formation and the player this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatOutcome {
    /// Enemies removed by ramming the player
    pub rammed: u32,
    /// Enemies removed for crossing the defense line
    pub breached: u32,
}

impl CombatOutcome {
    /// A breach ends the session regardless of remaining lives
    #[inline]
    pub fn forced_loss(&self) -> bool {
        self.breached > 0
    }
}

/// Resolve contact between every enemy and the player.
///
/// Enemies are classified against the player as it stood when the pass
/// began; removals happen in one `retain` sweep afterwards.
pub fn resolve(enemies: &mut Vec<Ship>, player: &mut Ship, sprites: &SpriteSet) -> CombatOutcome {
    let defense_line = player.pos.y;
    let rams: Vec<bool> = enemies
        .iter()
        .map(|enemy| overlaps(sprites, enemy, &*player))
        .collect();

    let mut outcome = CombatOutcome::default();
    let mut verdicts = rams.into_iter();
    enemies.retain(|enemy| {
        let rammed = verdicts.next().unwrap_or(false);
        if rammed {
            outcome.rammed += 1;
            false
        } else if enemy.bottom(sprites) > defense_line {
            outcome.breached += 1;
            false
        } else {
            true
        }
    });

    for _ in 0..outcome.rammed {
        player.take_damage(HIT_DAMAGE);
    }
    if outcome.forced_loss() {
        player.health = 0;
    }

    outcome
}
