//! Renderable snapshot of a tick
//!
//! The external renderer draws from this and nothing else: sprite ids map to
//! its textures, positions are top-left corners in screen pixels.

use glam::Vec2;
use serde::Serialize;

use crate::settings::Difficulty;
use crate::sim::collision::Body;
use crate::sim::state::{GamePhase, GameState};
use crate::sprites::SpriteId;

/// One sprite placed on screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpriteView {
    pub sprite: SpriteId,
    pub pos: Vec2,
}

impl SpriteView {
    fn of(body: &impl Body) -> Self {
        Self {
            sprite: body.sprite(),
            pos: body.pos(),
        }
    }
}

/// The player ship plus its health bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlayerView {
    #[serde(flatten)]
    pub ship: SpriteView,
    /// Health bar fill (0.0 - 1.0)
    pub health: f32,
}

/// Heads-up display values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub lives: u8,
    pub level: u32,
    pub score: u64,
    pub high_score: u64,
    pub difficulty: Difficulty,
}

/// Everything on screen after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderView {
    /// Hidden in the menu
    pub player: Option<PlayerView>,
    pub enemies: Vec<SpriteView>,
    pub lasers: Vec<SpriteView>,
    pub hud: Hud,
    /// "Start" or "Game Over"
    pub banner: Option<&'static str>,
    /// Title screen with the difficulty selector
    pub menu: bool,
}

impl RenderView {
    pub fn from_state(state: &GameState) -> Self {
        let menu = state.phase == GamePhase::Menu;
        let player = (!menu).then(|| PlayerView {
            ship: SpriteView::of(&state.player),
            health: state.player.health_fraction(),
        });

        Self {
            player,
            enemies: state.enemies.iter().map(SpriteView::of).collect(),
            lasers: state.lasers.iter().map(SpriteView::of).collect(),
            hud: Hud {
                lives: state.lives,
                level: state.level,
                score: state.score,
                high_score: state.high_score,
                difficulty: state.difficulty,
            },
            banner: state.phase.banner(),
            menu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::settings::GameConfig;
    use crate::sim::tick::{TickInput, tick};
    use crate::sprites::SpriteSet;

    #[test]
    fn test_menu_view() {
        let state = GameState::new(GameConfig::default(), SpriteSet::procedural(), 3).unwrap();
        let view = RenderView::from_state(&state);
        assert!(view.menu);
        assert!(view.player.is_none());
        assert_eq!(view.banner, None);
        assert_eq!(view.hud.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_view_follows_session() {
        let mut scores = MemoryScoreStore::new(40);
        let mut state = GameState::new(GameConfig::default(), SpriteSet::procedural(), 3).unwrap();
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, &mut scores);

        let view = RenderView::from_state(&state);
        assert_eq!(view.banner, Some("Start"));
        assert_eq!(view.hud.high_score, 40);
        assert_eq!(view.hud.lives, 3);
        let player = view.player.unwrap();
        assert_eq!(player.ship.sprite, SpriteId::PlayerShip);
        assert_eq!(player.ship.pos, Vec2::new(475.0, 825.0));
        assert_eq!(player.health, 1.0);

        while state.phase != GamePhase::Playing {
            tick(&mut state, &TickInput::default(), &mut scores);
        }
        tick(&mut state, &TickInput::default(), &mut scores);
        let view = RenderView::from_state(&state);
        assert_eq!(view.banner, None);
        assert_eq!(view.enemies.len(), 50);
        assert_eq!(view.hud.level, 1);
    }

    #[test]
    fn test_view_serializes() {
        let state = GameState::new(GameConfig::default(), SpriteSet::procedural(), 3).unwrap();
        let json = serde_json::to_string(&RenderView::from_state(&state)).unwrap();
        assert!(json.contains("\"difficulty\":\"easy\""));
        assert!(json.contains("\"menu\":true"));
        assert!(json.contains("\"player\":null"));
    }
}
