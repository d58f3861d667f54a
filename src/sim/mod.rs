//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Real time enters only through the session's time source (shield expiry)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod session;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Aabb, Resolution, resolve_collisions};
pub use difficulty::Difficulty;
pub use physics::{PlayerStep, integrate};
pub use session::Session;
pub use spawn::{SpawnReport, spawn_entities};
pub use state::{
    Collectible, CollectibleKind, EndCause, GameEvent, GameState, Obstacle, ObstacleKind, Player,
    PowerUp, PowerUpKind, SessionPhase, Snapshot,
};
pub use tick::{TickInput, TickOutcome, tick};
