//! Fixed timestep simulation tick
//!
//! Drives the phase machine Menu -> StartCountdown -> Playing -> Lost -> Menu.
//! Quit moves any phase to Exit and ends the tick immediately.

use std::cmp::Ordering;

use super::combat;
use super::formation::{enemies_open_fire, spawn_wave};
use super::laser::{Laser, LaserEvent, Side};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::highscores::ScoreStore;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Move the player left
    pub move_left: bool,
    /// Move the player right
    pub move_right: bool,
    /// Fire (held)
    pub fire: bool,
    /// Menu: start a session
    pub start: bool,
    /// Menu: next difficulty tier
    pub cycle_difficulty: bool,
    /// Leave the game
    pub quit: bool,
    /// Idle/demo mode - AI plays the game
    pub idle_mode: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick<S: ScoreStore + ?Sized>(state: &mut GameState, input: &TickInput, scores: &mut S) {
    state.events.clear();

    if state.phase == GamePhase::Exit {
        return;
    }
    if input.quit {
        log::info!("Quit requested");
        state.phase = GamePhase::Exit;
        state.push_event(GameEvent::Quit);
        return;
    }

    state.time_ticks += 1;

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    match state.phase {
        GamePhase::Menu => tick_menu(state, &input, scores),
        GamePhase::StartCountdown => tick_countdown(state),
        GamePhase::Playing => tick_playing(state, &input, scores),
        GamePhase::Lost => tick_lost(state),
        GamePhase::Exit => {}
    }
}

fn tick_menu<S: ScoreStore + ?Sized>(state: &mut GameState, input: &TickInput, scores: &mut S) {
    if input.cycle_difficulty {
        state.difficulty = state.difficulty.next();
        log::info!("Difficulty: {}", state.difficulty.as_str());
    }
    if !input.start {
        return;
    }

    let high_score = match scores.load() {
        Ok(score) => score,
        Err(e) => {
            log::warn!("No high score available ({}), using 0", e);
            0
        }
    };
    state.start_session(high_score);
    state.phase = GamePhase::StartCountdown;
    state.phase_ticks = state.config.ticks_for(COUNTDOWN_SECS);
    state.push_event(GameEvent::SessionStarted);
    log::info!(
        "Session started on {} (high score {})",
        state.difficulty.as_str(),
        high_score
    );
}

fn tick_countdown(state: &mut GameState) {
    state.phase_ticks = state.phase_ticks.saturating_sub(1);
    if state.phase_ticks == 0 {
        state.phase = GamePhase::Playing;
        state.push_event(GameEvent::CountdownFinished);
    }
}

fn tick_lost(state: &mut GameState) {
    state.phase_ticks = state.phase_ticks.saturating_sub(1);
    if state.phase_ticks == 0 {
        state.phase = GamePhase::Menu;
        state.push_event(GameEvent::ReturnedToMenu);
        log::info!("Back to menu");
    }
}

fn tick_playing<S: ScoreStore + ?Sized>(state: &mut GameState, input: &TickInput, scores: &mut S) {
    if state.enemies.is_empty() {
        state.level += 1;
        state.enemies = spawn_wave(&state.config);
        state.push_event(GameEvent::WaveSpawned { level: state.level });
        log::info!("Wave {} spawned ({} enemies)", state.level, state.enemies.len());
    }

    // Player intent
    let speed = state.config.player_speed;
    if input.move_left {
        state.player.move_left(speed);
    }
    if input.move_right {
        state.player.move_right(speed, state.config.width as f32, &state.sprites);
    }
    if input.fire {
        if let Some(laser) = state.player.fire() {
            state.lasers.push(laser);
            state.push_event(GameEvent::PlayerFired);
        }
    }

    // Formation and enemy fire
    state.formation.step(
        &mut state.enemies,
        state.params.enemy_speed as f32,
        state.config.drop_step,
        state.config.width as f32,
        &state.sprites,
    );
    let odds = state.enemy_fire_odds();
    let shots = enemies_open_fire(&mut state.enemies, odds, &mut state.rng);
    for laser in shots {
        state.lasers.push(laser);
        state.push_event(GameEvent::EnemyFired);
    }

    // Enemy contact
    let outcome = combat::resolve(&mut state.enemies, &mut state.player, &state.sprites);
    for _ in 0..outcome.rammed {
        state.push_event(GameEvent::EnemyRammed);
        state.push_event(GameEvent::PlayerHit);
    }
    if outcome.forced_loss() {
        state.lives = 0;
        state.push_event(GameEvent::FormationBreached);
        log::info!("Formation breached the defense line");
    }

    state.player.cooldown.tick();

    // Lasers, in fire order
    let mut lasers = std::mem::take(&mut state.lasers);
    lasers.retain_mut(|laser| !advance_laser(state, laser).removes());
    state.lasers = lasers;

    resolve_life_loss(state, scores);
}

/// Move one laser and apply what it hit
fn advance_laser(state: &mut GameState, laser: &mut Laser) -> LaserEvent {
    let speed = state.params.laser_speed as f32;
    let height = state.config.height as f32;
    match laser.side {
        Side::Player => {
            let event = laser.step_against_enemies(speed, height, &mut state.enemies, &state.sprites);
            if event == LaserEvent::Hit {
                state.add_score(KILL_SCORE);
                state.push_event(GameEvent::EnemyDestroyed);
            }
            event
        }
        Side::Enemy => {
            let event = laser.step_against_player(speed, height, &mut state.player, &state.sprites);
            if event == LaserEvent::Hit {
                state.push_event(GameEvent::PlayerHit);
            }
            event
        }
    }
}

/// Take a life if the player is down; respawn or end the session
fn resolve_life_loss<S: ScoreStore + ?Sized>(state: &mut GameState, scores: &mut S) {
    if !state.player.is_dead() {
        return;
    }

    if state.lives > 0 {
        state.lives -= 1;
        state.push_event(GameEvent::LifeLost {
            lives_left: state.lives,
        });
    }

    if state.lives > 0 {
        log::info!("Life lost, {} left", state.lives);
        state.respawn_player();
        return;
    }

    let score = state.score;
    if score > state.best_on_record {
        match scores.save(score) {
            Ok(()) => state.push_event(GameEvent::NewHighScore { score }),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
    }
    state.phase = GamePhase::Lost;
    state.phase_ticks = state.config.ticks_for(GAME_OVER_SECS);
    state.push_event(GameEvent::GameOver { score });
    log::info!("Game over: score {}, level {}", score, state.level);
}

/// Synthesize input for demo play.
///
/// Presses start in the menu. While playing, steers under the lowest enemy
/// (leftmost on ties) and fires whenever an enemy is overhead.
pub fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    match state.phase {
        GamePhase::Menu => input.start = true,
        GamePhase::Playing => {
            let player = &state.player;
            let player_w = player.size(&state.sprites).x;
            let center = player.pos.x + player_w / 2.0;

            let target = state.enemies.iter().max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(Ordering::Equal)
                    .then(b.pos.x.partial_cmp(&a.pos.x).unwrap_or(Ordering::Equal))
            });
            if let Some(enemy) = target {
                let enemy_center = enemy.pos.x + enemy.size(&state.sprites).x / 2.0;
                let dead_zone = state.config.player_speed;
                input.move_left = enemy_center < center - dead_zone;
                input.move_right = enemy_center > center + dead_zone;
            }

            input.fire = state.enemies.iter().any(|enemy| {
                let w = enemy.size(&state.sprites).x;
                enemy.pos.x < player.pos.x + player_w && enemy.pos.x + w > player.pos.x
            });
        }
        _ => {}
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryScoreStore;
    use crate::settings::{Difficulty, GameConfig};
    use crate::sim::ship::{EnemyColor, Ship};
    use crate::sprites::{SpriteId, SpriteSet};
    use glam::Vec2;

    fn new_state(seed: u64) -> GameState {
        GameState::new(GameConfig::default(), SpriteSet::procedural(), seed).unwrap()
    }

    fn start() -> TickInput {
        TickInput {
            start: true,
            ..Default::default()
        }
    }

    /// Menu -> countdown -> first playing tick pending
    fn playing_state(scores: &mut MemoryScoreStore) -> GameState {
        let mut state = new_state(12345);
        tick(&mut state, &start(), scores);
        while state.phase == GamePhase::StartCountdown {
            tick(&mut state, &TickInput::default(), scores);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    fn lone_enemy(x: f32, y: f32) -> Ship {
        Ship::enemy(Vec2::new(x, y), EnemyColor::Green, 100, 30)
    }

    #[test]
    fn test_countdown_lasts_two_seconds() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = new_state(1);
        tick(&mut state, &start(), &mut scores);
        assert_eq!(state.phase, GamePhase::StartCountdown);
        assert_eq!(state.events, vec![GameEvent::SessionStarted]);

        let mut countdown_ticks = 0;
        while state.phase == GamePhase::StartCountdown {
            tick(&mut state, &TickInput::default(), &mut scores);
            countdown_ticks += 1;
        }
        assert_eq!(countdown_ticks, 2 * TICK_RATE);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.events, vec![GameEvent::CountdownFinished]);
        // No gameplay during the banner
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_session_reset_happens_once() {
        let mut scores = MemoryScoreStore::new(50);
        let mut state = new_state(1);
        tick(&mut state, &start(), &mut scores);
        state.score = 30;

        // Holding start through the countdown changes nothing
        for _ in 0..10 {
            tick(&mut state, &start(), &mut scores);
            assert!(!state.events.contains(&GameEvent::SessionStarted));
        }
        assert_eq!(state.score, 30);
        assert_eq!(scores.loads, 1);
    }

    #[test]
    fn test_menu_cycles_difficulty() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = new_state(1);
        let cycle = TickInput {
            cycle_difficulty: true,
            ..Default::default()
        };
        tick(&mut state, &cycle, &mut scores);
        assert_eq!(state.difficulty, Difficulty::Normal);
        tick(&mut state, &cycle, &mut scores);
        tick(&mut state, &cycle, &mut scores);
        assert_eq!(state.difficulty, Difficulty::Easy);
        tick(&mut state, &cycle, &mut scores);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &start(), &mut scores);
        assert_eq!(state.params, Difficulty::Normal.params());
        assert_eq!(state.player.cooldown.period(), 15);
    }

    #[test]
    fn test_quit_short_circuits_every_phase() {
        let quit = TickInput {
            quit: true,
            start: true,
            fire: true,
            ..Default::default()
        };
        for phase in [
            GamePhase::Menu,
            GamePhase::StartCountdown,
            GamePhase::Playing,
            GamePhase::Lost,
        ] {
            let mut scores = MemoryScoreStore::new(0);
            let mut state = new_state(1);
            state.phase = phase;
            state.phase_ticks = 1;
            tick(&mut state, &quit, &mut scores);
            assert_eq!(state.phase, GamePhase::Exit);
            assert_eq!(state.events, vec![GameEvent::Quit]);
            assert!(state.lasers.is_empty());
            assert!(state.enemies.is_empty());
            assert_eq!(scores.loads, 0);
        }
    }

    #[test]
    fn test_exit_is_terminal() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = new_state(1);
        state.phase = GamePhase::Exit;
        tick(&mut state, &start(), &mut scores);
        assert_eq!(state.phase, GamePhase::Exit);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_first_playing_tick_spawns_wave() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = playing_state(&mut scores);
        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.level, 1);
        assert_eq!(state.enemies.len(), 50);
        assert!(state.events.contains(&GameEvent::WaveSpawned { level: 1 }));
    }

    #[test]
    fn test_player_fire_event_and_cooldown() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = playing_state(&mut scores);
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, &mut scores);
        assert!(state.events.contains(&GameEvent::PlayerFired));
        tick(&mut state, &fire, &mut scores);
        assert!(!state.events.contains(&GameEvent::PlayerFired));

        let player_lasers = state
            .lasers
            .iter()
            .filter(|l| l.side == Side::Player)
            .count();
        assert_eq!(player_lasers, 1);
    }

    #[test]
    fn test_projectile_hit_scores_same_tick() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = playing_state(&mut scores);
        // Formation sweeps right by 1 on easy: enemy ends at x 501
        state.enemies = vec![lone_enemy(500.0, 400.0)];
        // Beam column 518..524 sits under the enemy's center once the laser
        // has moved up to y 400
        state
            .lasers
            .push(Laser::new(Vec2::new(496.0, 405.0), Side::Player, SpriteId::PlayerLaser));

        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.score, 10);
        assert!(state.enemies.is_empty());
        assert!(state.lasers.iter().all(|l| l.side != Side::Player));
        assert!(state.events.contains(&GameEvent::EnemyDestroyed));
    }

    #[test]
    fn test_ramming_scores_nothing() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = playing_state(&mut scores);
        state.player.max_health = 100;
        state.player.health = 100;
        // Lands at x 480 over the player's nose after the sweep
        state.enemies = vec![lone_enemy(479.0, 810.0), lone_enemy(100.0, 70.0)];
        // Point-blank enemy must not shoot first
        state.enemies[0].cooldown.try_fire();

        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.score, 0);
        assert_eq!(state.player.health, 90);
        assert_eq!(state.enemies.len(), 1);
        assert!(state.events.contains(&GameEvent::EnemyRammed));
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_respawn_purges_enemy_lasers_only() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = playing_state(&mut scores);
        state.lives = 2;
        state.player.pos.x = 300.0;
        state.enemies = vec![lone_enemy(100.0, 70.0)];
        state.lasers = vec![
            // Lands on the player's nose this tick
            Laser::new(
                Vec2::new(300.0, 790.0),
                Side::Enemy,
                SpriteId::EnemyLaser(EnemyColor::Red),
            ),
            Laser::new(
                Vec2::new(900.0, 300.0),
                Side::Enemy,
                SpriteId::EnemyLaser(EnemyColor::Blue),
            ),
            Laser::new(Vec2::new(700.0, 500.0), Side::Player, SpriteId::PlayerLaser),
        ];

        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.lives, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.events.contains(&GameEvent::PlayerHit));
        assert!(state.events.contains(&GameEvent::LifeLost { lives_left: 1 }));

        assert_eq!(state.player.pos, Vec2::new(475.0, PLAYER_SPAWN_Y));
        assert_eq!(state.player.health, state.player.max_health);
        assert!(state.player.cooldown.is_ready());

        assert_eq!(state.lasers.len(), 1);
        assert_eq!(state.lasers[0].side, Side::Player);
        assert_eq!(state.lasers[0].pos, Vec2::new(700.0, 495.0));
    }

    #[test]
    fn test_game_over_persists_higher_score() {
        let mut scores = MemoryScoreStore::new(100);
        let mut state = playing_state(&mut scores);
        state.score = 120;
        state.lives = 1;
        state.player.health = 0;

        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(scores.value, Some(120));
        assert!(state.events.contains(&GameEvent::NewHighScore { score: 120 }));
        assert!(state.events.contains(&GameEvent::GameOver { score: 120 }));
    }

    #[test]
    fn test_game_over_keeps_higher_stored_score() {
        let mut scores = MemoryScoreStore::new(100);
        let mut state = playing_state(&mut scores);
        state.score = 80;
        state.lives = 1;
        state.player.health = 0;

        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(scores.value, Some(100));
        assert_eq!(scores.saves, 0);
        assert!(!state.events.contains(&GameEvent::NewHighScore { score: 80 }));
    }

    #[test]
    fn test_failed_save_still_ends_session() {
        let mut scores = MemoryScoreStore::new(0);
        scores.fail_saves = true;
        let mut state = playing_state(&mut scores);
        state.score = 40;
        state.lives = 1;
        state.player.health = 0;

        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.phase, GamePhase::Lost);
        assert_eq!(scores.saves, 1);
        assert!(state.events.contains(&GameEvent::GameOver { score: 40 }));
    }

    #[test]
    fn test_missing_high_score_reads_as_zero() {
        let mut scores = MemoryScoreStore::empty();
        let state = playing_state(&mut scores);
        assert_eq!(state.high_score, 0);
        assert_eq!(state.best_on_record, 0);
    }

    #[test]
    fn test_breach_ends_session_with_lives_left() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = playing_state(&mut scores);
        assert_eq!(state.lives, 3);
        state.enemies = vec![lone_enemy(0.0, 800.0)];

        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::Lost);
        assert!(state.events.contains(&GameEvent::FormationBreached));
    }

    #[test]
    fn test_game_over_banner_then_menu() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = playing_state(&mut scores);
        state.lives = 1;
        state.player.health = 0;
        tick(&mut state, &TickInput::default(), &mut scores);
        assert_eq!(state.phase, GamePhase::Lost);

        let mut banner_ticks = 0;
        while state.phase == GamePhase::Lost {
            tick(&mut state, &TickInput::default(), &mut scores);
            banner_ticks += 1;
        }
        assert_eq!(banner_ticks, 3 * TICK_RATE);
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.events, vec![GameEvent::ReturnedToMenu]);
    }

    #[test]
    fn test_autopilot_steers_and_fires() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = playing_state(&mut scores);
        state.enemies = vec![lone_enemy(100.0, 300.0), lone_enemy(700.0, 300.0)];

        let input = autopilot(&state, &TickInput::default());
        assert!(input.move_left);
        assert!(!input.move_right);
        assert!(!input.fire);

        state.enemies = vec![lone_enemy(480.0, 300.0)];
        let input = autopilot(&state, &TickInput::default());
        assert!(!input.move_left && !input.move_right);
        assert!(input.fire);
    }

    #[test]
    fn test_autopilot_quit_still_wins() {
        let mut scores = MemoryScoreStore::new(0);
        let mut state = new_state(1);
        let input = TickInput {
            idle_mode: true,
            quit: true,
            ..Default::default()
        };
        tick(&mut state, &input, &mut scores);
        assert_eq!(state.phase, GamePhase::Exit);
    }

    #[test]
    fn test_determinism() {
        let idle = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let run = || {
            let mut scores = MemoryScoreStore::new(0);
            let mut state = new_state(99999);
            let mut fired = 0;
            for _ in 0..2000 {
                tick(&mut state, &idle, &mut scores);
                fired += state
                    .events
                    .iter()
                    .filter(|e| **e == GameEvent::PlayerFired)
                    .count();
            }
            (state.score, state.lives, state.level, state.player.pos, fired)
        };

        let first = run();
        assert!(first.4 > 0);
        assert_eq!(first, run());
    }
}
