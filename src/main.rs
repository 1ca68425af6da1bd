//! Pixel Invaders entry point
//!
//! Headless driver: plays the simulation on autopilot through the fixed-step
//! loop and keeps the high score in `hi-score.txt`. Rendering and real input
//! belong to a front-end built on top of the library.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::time::{Duration, Instant};

    use clap::Parser;

    use pixel_invaders::consts::*;
    use pixel_invaders::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
    use pixel_invaders::{ConfigError, Difficulty, FileScoreStore, GameConfig, SpriteSet};

    #[derive(Parser, Debug)]
    #[command(name = "pixel-invaders")]
    #[command(about = "Run the invaders simulation headless on autopilot")]
    struct Args {
        /// Stop after this many ticks (runs until interrupted otherwise)
        #[arg(long)]
        ticks: Option<u64>,
        /// Tick as fast as possible instead of in real time
        #[arg(long)]
        fast: bool,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// easy, normal or hard
        #[arg(long)]
        difficulty: Option<String>,
        /// RNG seed (random by default)
        #[arg(long)]
        seed: Option<u64>,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scores: FileScoreStore,
        accumulator: f32,
        input: TickInput,
        sim_dt: f32,
        sessions: u32,
        best: u64,
    }

    impl Game {
        fn new(config: GameConfig, seed: u64, scores: FileScoreStore) -> Result<Self, ConfigError> {
            let sim_dt = 1.0 / config.tick_rate as f32;
            Ok(Self {
                state: GameState::new(config, SpriteSet::procedural(), seed)?,
                scores,
                accumulator: 0.0,
                input: TickInput {
                    idle_mode: true,
                    ..Default::default()
                },
                sim_dt,
                sessions: 0,
                best: 0,
            })
        }

        /// Run simulation ticks for a frame of `dt` seconds. Returns ticks run.
        fn update(&mut self, dt: f32) -> u32 {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= self.sim_dt && substeps < MAX_SUBSTEPS {
                self.step();
                self.accumulator -= self.sim_dt;
                substeps += 1;
            }
            substeps
        }

        fn step(&mut self) {
            tick(&mut self.state, &self.input, &mut self.scores);
            for event in &self.state.events {
                match event {
                    GameEvent::GameOver { score } => {
                        self.sessions += 1;
                        self.best = self.best.max(*score);
                    }
                    other => log::debug!("tick {}: {:?}", self.state.time_ticks, other),
                }
            }
        }

        fn finished(&self) -> bool {
            self.state.phase == GamePhase::Exit
        }
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let args = Args::parse();

        let mut config = match &args.config {
            Some(path) => GameConfig::load(path),
            None => GameConfig::default(),
        };
        if let Some(name) = &args.difficulty {
            match Difficulty::from_str(name) {
                Some(difficulty) => config.difficulty = difficulty,
                None => {
                    log::error!("Unknown difficulty {:?} (expected easy, normal or hard)", name);
                    return ExitCode::FAILURE;
                }
            }
        }

        let seed = args.seed.unwrap_or_else(rand::random);
        let mut game = match Game::new(config, seed, FileScoreStore::default()) {
            Ok(game) => game,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };
        log::info!(
            "Pixel Invaders (headless) starting: seed {}, {} @ {} Hz",
            seed,
            game.state.difficulty.as_str(),
            game.state.config.tick_rate
        );

        let limit = args.ticks.unwrap_or(u64::MAX);
        let frame = Duration::from_secs_f32(game.sim_dt);
        let mut ticks = 0u64;
        let mut last = Instant::now();

        while ticks < limit && !game.finished() {
            if args.fast {
                game.step();
                ticks += 1;
                continue;
            }

            std::thread::sleep(frame);
            let now = Instant::now();
            let dt = now.duration_since(last).as_secs_f32();
            last = now;
            ticks += game.update(dt) as u64;
        }

        log::info!(
            "Stopped after {} ticks: {} sessions finished, best {}, current score {} (level {}, lives {})",
            ticks,
            game.sessions,
            game.best,
            game.state.score,
            game.state.level,
            game.state.lives
        );
        log::info!("High score file: {}", game.scores.path().display());
        ExitCode::SUCCESS
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on the web; a front-end drives `sim::tick` itself
}
