//! Cookout Dash headless runner
//!
//! Plays a few runs with a simple autopilot and logs the results.
//!
//! ```text
//! cookout-dash [--fast] [--runs N] [--seed N] [--config settings.json]
//! ```
//!
//! `--fast` drives the loop from a manual clock instead of sleeping.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use cookout_dash::clock::{ManualClock, SystemClock, TimeSource};
use cookout_dash::sim::{GameEvent, Session, Snapshot};
use cookout_dash::{ConfigError, GameLoop, HighScores, LoopStatus, SessionObserver, Settings};

/// Hard stop for a single demo run (about ten minutes of play)
const MAX_DEMO_TICKS: u64 = 36_000;

#[derive(Parser, Debug)]
#[command(name = "cookout-dash")]
#[command(about = "Play Cookout Dash runs with an autopilot")]
struct Cli {
    /// Drive the loop from a manual clock instead of sleeping
    #[arg(long)]
    fast: bool,
    /// Number of runs to play
    #[arg(long, default_value_t = 3)]
    runs: u32,
    /// Seed for the first run, later runs add their index (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn load_settings(path: &Path) -> Result<Settings, String> {
    let json = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    Settings::from_json(&json).map_err(|err| format!("{}: {err}", path.display()))
}

/// Flaps to stay near a target height, dodging the nearest obstacle ahead
#[derive(Default)]
struct Autopilot;

impl Autopilot {
    fn should_flap(&self, snapshot: &Snapshot, settings: &Settings) -> bool {
        let player = &snapshot.player;
        let mid = settings.playfield_height / 2.0;

        let ahead = snapshot
            .obstacles
            .iter()
            .filter(|o| o.pos.x + settings.obstacle_size >= player.x)
            .filter(|o| o.pos.x < player.x + settings.player_size + 160.0)
            .min_by(|a, b| {
                a.pos
                    .x
                    .partial_cmp(&b.pos.x)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let target = match ahead {
            // Go under obstacles in the upper half, over the rest
            Some(o) if o.pos.y + settings.obstacle_size / 2.0 < mid => {
                o.pos.y + settings.obstacle_size + 30.0
            }
            Some(o) => o.pos.y - settings.player_size - 30.0,
            None => mid,
        };

        player.vel >= 0.0 && player.y > target
    }
}

/// Logs events and feeds the leaderboard
struct Console<'a> {
    scores: &'a mut HighScores,
}

impl SessionObserver for Console<'_> {
    fn on_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Flap => {}
            GameEvent::GameOver { final_score, cause } => {
                log::info!("Game over ({cause:?}), final score {final_score}")
            }
            other => log::debug!("{other:?}"),
        }
    }

    fn on_game_over(&mut self, final_score: u32, frames: u64) {
        self.scores.on_game_over(final_score, frames);
    }
}

fn run_once<T: TimeSource>(
    settings: &Settings,
    seed: u64,
    time: T,
    mut wait: impl FnMut(u64),
    scores: &mut HighScores,
) -> Result<u32, ConfigError> {
    let session = Session::new(settings.clone(), seed, time)?;
    let mut game = GameLoop::new(session);
    game.start();

    let pilot = Autopilot;
    let mut console = Console { scores };
    loop {
        if pilot.should_flap(&game.session().snapshot(), game.session().settings()) {
            game.tap();
        }
        if let LoopStatus::Over { final_score } = game.pump(&mut console) {
            return Ok(final_score);
        }
        if game.session().frame() >= MAX_DEMO_TICKS {
            log::info!("Demo time limit reached");
            if let LoopStatus::Over { final_score } = game.end(&mut console) {
                return Ok(final_score);
            }
        }
        wait(game.until_next_ms().max(1));
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(clock_seed);

    let settings = match &cli.config {
        Some(path) => match load_settings(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };

    log::info!("Cookout Dash starting ({} runs, seed {seed})", cli.runs);

    let mut scores = HighScores::new();
    for run in 0..cli.runs {
        let seed = seed.wrapping_add(run as u64);
        let result = if cli.fast {
            let clock = ManualClock::new(0);
            let driver = clock.clone();
            run_once(&settings, seed, clock, |ms| driver.advance(ms), &mut scores)
        } else {
            run_once(
                &settings,
                seed,
                SystemClock::new(),
                |ms| std::thread::sleep(Duration::from_millis(ms)),
                &mut scores,
            )
        };

        match result {
            Ok(score) => println!("Run {}: score {} (best {})", run + 1, score, scores.best()),
            Err(err) => {
                log::error!("Invalid settings: {err}");
                std::process::exit(1);
            }
        }
    }

    for (rank, entry) in scores.entries.iter().enumerate() {
        println!("{:>2}. {:>5} pts  {:>6} ticks", rank + 1, entry.score, entry.frames);
    }
}
