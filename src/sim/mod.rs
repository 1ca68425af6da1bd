//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn and fire order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod combat;
pub mod formation;
pub mod laser;
pub mod mask;
pub mod ship;
pub mod state;
pub mod tick;

pub use collision::{Body, overlaps};
pub use combat::CombatOutcome;
pub use formation::{Direction, Formation, FormationStep, enemies_open_fire, spawn_wave};
pub use laser::{Laser, LaserEvent, Side};
pub use mask::Mask;
pub use ship::{Cooldown, EnemyColor, Ship, ShipKind};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, autopilot, tick};
