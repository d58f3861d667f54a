//! Game state and core simulation types
//!
//! Everything a tick reads or writes lives here. Rendering, audio and screen
//! navigation only ever see a [`Snapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use crate::settings::Settings;

/// Lifecycle of a single session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Constructed, waiting for `start`
    Idle,
    /// Ticks are processed
    Running,
    /// Terminal; a new run needs a new session
    Ended,
}

/// Why a run stopped (informational only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Hit an obstacle without a shield
    Collision,
    /// Left the playable vertical band
    OutOfBounds,
    /// Stopped from outside (app backgrounded, quit)
    Forced,
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Dominoes,
    Smoke,
    Football,
    Dancer,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Dominoes,
        ObstacleKind::Smoke,
        ObstacleKind::Football,
        ObstacleKind::Dancer,
    ];

    /// Map a random draw onto a kind, falling back to the default
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_else(|| {
            log::warn!("Obstacle kind index {index} out of range, using default");
            Self::default()
        })
    }
}

/// Collectible food types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollectibleKind {
    #[default]
    Protein,
    Side,
    FullMeal,
}

impl CollectibleKind {
    pub const ALL: [CollectibleKind; 3] = [
        CollectibleKind::Protein,
        CollectibleKind::Side,
        CollectibleKind::FullMeal,
    ];

    /// Score awarded on pickup
    pub fn points(self) -> u32 {
        match self {
            CollectibleKind::Protein => 2,
            CollectibleKind::Side => 3,
            CollectibleKind::FullMeal => 5,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_else(|| {
            log::warn!("Collectible kind index {index} out of range, using default");
            Self::default()
        })
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Timed invincibility against obstacles
    #[default]
    Shield,
    /// Removes the earliest-spawned live obstacle
    Pass,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Shield, PowerUpKind::Pass];

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_else(|| {
            log::warn!("Power-up kind index {index} out of range, using default");
            Self::default()
        })
    }
}

/// The player sprite. Horizontal position is fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub vel: f32,
    pub invincible: bool,
    /// Real-time deadline (ms, session time source) for the active shield
    pub shield_deadline_ms: Option<u64>,
}

impl Player {
    /// Player at vertical center with zero velocity
    pub fn centered(settings: &Settings) -> Self {
        Self {
            x: settings.player_x,
            y: settings.playfield_height / 2.0,
            vel: 0.0,
            invincible: false,
            shield_deadline_ms: None,
        }
    }
}

/// An obstacle entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Set once the obstacle's right edge clears the player's left edge
    pub passed: bool,
}

/// A collectible entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub kind: CollectibleKind,
    pub pos: Vec2,
}

impl Collectible {
    pub fn points(&self) -> u32 {
        self.kind.points()
    }
}

/// A power-up entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    /// Invincibility length, only set for shields
    pub duration_ms: Option<u64>,
}

/// Things the presentation layer may want to react to (sounds, flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flap,
    ObstaclePassed { id: u32 },
    Collected { id: u32, kind: CollectibleKind, points: u32 },
    PowerUpCollected { id: u32, kind: PowerUpKind },
    ShieldExpired,
    GameOver { final_score: u32, cause: EndCause },
}

/// Complete mutable state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: SessionPhase,
    pub score: u32,
    /// Ticks processed since `start`
    pub frame: u64,
    pub player: Player,
    /// Live obstacles in spawn order (ascending id)
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
    pub difficulty: Difficulty,
    pub end_cause: Option<EndCause>,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Fresh idle state
    pub fn new(settings: &Settings, seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: SessionPhase::Idle,
            score: 0,
            frame: 0,
            player: Player::centered(settings),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            power_ups: Vec::new(),
            difficulty: Difficulty::at(0, settings),
            end_cause: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reset everything a run owns and enter `Running`
    pub fn reset_for_run(&mut self, settings: &Settings) {
        self.score = 0;
        self.frame = 0;
        self.player = Player::centered(settings);
        self.obstacles.clear();
        self.collectibles.clear();
        self.power_ups.clear();
        self.difficulty = Difficulty::at(0, settings);
        self.end_cause = None;
        self.events.clear();
        self.phase = SessionPhase::Running;
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    /// Move to `Ended` and queue the game-over event.
    /// Returns the final score only on the transition itself.
    pub fn finish(&mut self, cause: EndCause) -> Option<u32> {
        if self.phase != SessionPhase::Running {
            return None;
        }
        self.phase = SessionPhase::Ended;
        self.end_cause = Some(cause);
        self.player.invincible = false;
        self.player.shield_deadline_ms = None;
        self.events.push(GameEvent::GameOver {
            final_score: self.score,
            cause,
        });
        log::info!(
            "Run ended ({:?}) at frame {} with score {}",
            cause,
            self.frame,
            self.score
        );
        Some(self.score)
    }

    /// Score only moves up
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    /// Total live entities across all categories
    pub fn entity_count(&self) -> usize {
        self.obstacles.len() + self.collectibles.len() + self.power_ups.len()
    }
}

/// Immutable per-tick view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub phase: SessionPhase,
    pub score: u32,
    pub player: Player,
    pub scroll_speed: f32,
    pub speed_multiplier: f32,
    pub obstacle_rate: f32,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    pub power_ups: Vec<PowerUp>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            frame: state.frame,
            phase: state.phase,
            score: state.score,
            player: state.player.clone(),
            scroll_speed: state.difficulty.scroll_speed,
            speed_multiplier: state.difficulty.speed_multiplier,
            obstacle_rate: state.difficulty.obstacle_rate,
            obstacles: state.obstacles.clone(),
            collectibles: state.collectibles.clone(),
            power_ups: state.power_ups.clone(),
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.player.invincible
    }

    /// Serialize for external consumers
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_fallback() {
        assert_eq!(ObstacleKind::from_index(2), ObstacleKind::Football);
        assert_eq!(ObstacleKind::from_index(99), ObstacleKind::Dominoes);
        assert_eq!(CollectibleKind::from_index(7), CollectibleKind::Protein);
        assert_eq!(PowerUpKind::from_index(5), PowerUpKind::Shield);
    }

    #[test]
    fn test_collectible_points() {
        assert_eq!(CollectibleKind::Protein.points(), 2);
        assert_eq!(CollectibleKind::Side.points(), 3);
        assert_eq!(CollectibleKind::FullMeal.points(), 5);
    }

    #[test]
    fn test_finish_reports_once() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 1);
        assert_eq!(state.finish(EndCause::Forced), None);

        state.reset_for_run(&settings);
        state.add_score(4);
        assert_eq!(state.finish(EndCause::Collision), Some(4));
        assert_eq!(state.finish(EndCause::Collision), None);
        assert_eq!(state.phase, SessionPhase::Ended);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_entity_ids_increase() {
        let settings = Settings::default();
        let mut state = GameState::new(&settings, 1);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_snapshot_serializes() {
        let settings = Settings::default();
        let state = GameState::new(&settings, 1);
        let json = Snapshot::capture(&state).to_json().expect("serializable");
        assert!(json.contains("\"phase\":\"Idle\""));
    }
}
