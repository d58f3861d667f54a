//! Cookout Dash - a flap-to-avoid arcade game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, session)
//! - `clock`: Time sources and fixed-step cadence
//! - `game_loop`: Drives a session from a time source and reports frames
//! - `settings`: Session tunables
//! - `highscores`: In-memory best score for the running process

pub mod clock;
pub mod error;
pub mod game_loop;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use clock::{FixedStep, ManualClock, SystemClock, TimeSource};
pub use error::ConfigError;
pub use game_loop::{GameLoop, LoopStatus, SessionObserver};
pub use highscores::HighScores;
pub use settings::Settings;

/// Default tuning constants
pub mod consts {
    /// Fixed tick interval (~60 Hz)
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Maximum ticks run per pump to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions (pixels)
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;

    /// Player is pinned horizontally, only moves vertically
    pub const PLAYER_X: f32 = 80.0;
    pub const PLAYER_SIZE: f32 = 40.0;

    /// Entity bounding box sizes
    pub const OBSTACLE_SIZE: f32 = 40.0;
    pub const COLLECTIBLE_SIZE: f32 = 30.0;
    pub const POWER_UP_SIZE: f32 = 30.0;

    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.6;
    /// Velocity set on a tap (negative is up)
    pub const JUMP_FORCE: f32 = -12.0;

    /// Scroll speed at frame 0 (pixels/tick)
    pub const BASE_SPEED: f32 = 3.0;
    pub const SPEED_INCREASE_RATE: f32 = 0.0005;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.0;

    /// Per-tick spawn probabilities
    pub const BASE_OBSTACLE_RATE: f32 = 0.02;
    pub const SPAWN_RATE_INCREASE: f32 = 0.00003;
    pub const MAX_SPAWN_MULTIPLIER: f32 = 1.5;
    pub const COLLECTIBLE_RATE: f32 = 0.015;
    pub const POWER_UP_RATE: f32 = 0.005;

    /// Shield invincibility (real time)
    pub const SHIELD_DURATION_MS: u64 = 3000;

    /// Points for clearing an obstacle
    pub const PASS_POINTS: u32 = 1;

    /// Entities appear this far past the right edge
    pub const SPAWN_OFFSET: f32 = 50.0;
    /// Entities are removed once left of this x
    pub const DESPAWN_X: f32 = -50.0;
    /// Keep spawns this far from the top and bottom edges
    pub const SPAWN_MARGIN: f32 = 100.0;

    /// Soft caps on live entities per category
    pub const MAX_OBSTACLES: usize = 10;
    pub const MAX_COLLECTIBLES: usize = 8;
    pub const MAX_POWER_UPS: usize = 3;
}
