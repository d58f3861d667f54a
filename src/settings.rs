//! Session tunables
//!
//! Supplied once at session construction. Partial JSON documents override
//! only the fields they name; everything else falls back to `consts`.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Every tunable the simulation reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Fixed horizontal position of the player's left edge
    pub player_x: f32,
    pub player_size: f32,
    pub obstacle_size: f32,
    pub collectible_size: f32,
    pub power_up_size: f32,

    // === Physics ===
    pub gravity: f32,
    pub jump_force: f32,

    // === Difficulty ===
    pub base_speed: f32,
    pub speed_increase_rate: f32,
    pub max_speed_multiplier: f32,
    pub base_obstacle_rate: f32,
    pub spawn_rate_increase: f32,
    pub max_spawn_multiplier: f32,

    // === Spawning ===
    pub collectible_rate: f32,
    pub power_up_rate: f32,
    pub spawn_offset: f32,
    pub despawn_x: f32,
    pub spawn_margin: f32,
    pub max_obstacles: usize,
    pub max_collectibles: usize,
    pub max_power_ups: usize,

    // === Scoring / power-ups ===
    pub pass_points: u32,
    pub shield_duration_ms: u64,

    // === Cadence ===
    pub tick_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            player_x: PLAYER_X,
            player_size: PLAYER_SIZE,
            obstacle_size: OBSTACLE_SIZE,
            collectible_size: COLLECTIBLE_SIZE,
            power_up_size: POWER_UP_SIZE,

            gravity: GRAVITY,
            jump_force: JUMP_FORCE,

            base_speed: BASE_SPEED,
            speed_increase_rate: SPEED_INCREASE_RATE,
            max_speed_multiplier: MAX_SPEED_MULTIPLIER,
            base_obstacle_rate: BASE_OBSTACLE_RATE,
            spawn_rate_increase: SPAWN_RATE_INCREASE,
            max_spawn_multiplier: MAX_SPAWN_MULTIPLIER,

            collectible_rate: COLLECTIBLE_RATE,
            power_up_rate: POWER_UP_RATE,
            spawn_offset: SPAWN_OFFSET,
            despawn_x: DESPAWN_X,
            spawn_margin: SPAWN_MARGIN,
            max_obstacles: MAX_OBSTACLES,
            max_collectibles: MAX_COLLECTIBLES,
            max_power_ups: MAX_POWER_UPS,

            pass_points: PASS_POINTS,
            shield_duration_ms: SHIELD_DURATION_MS,

            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Parse settings from JSON, filling unnamed fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!(
            "Loaded settings ({}x{} play field)",
            settings.playfield_width,
            settings.playfield_height
        );
        Ok(settings)
    }

    /// Check every tunable is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("player_size", self.player_size),
            ("obstacle_size", self.obstacle_size),
            ("collectible_size", self.collectible_size),
            ("power_up_size", self.power_up_size),
            ("gravity", self.gravity),
            ("base_speed", self.base_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field });
            }
        }
        if !(self.jump_force < 0.0) {
            return Err(ConfigError::NonPositive { field: "jump_force (magnitude)" });
        }
        if self.shield_duration_ms == 0 {
            return Err(ConfigError::NonPositive { field: "shield_duration_ms" });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::NonPositive { field: "tick_interval_ms" });
        }

        let probabilities = [
            ("base_obstacle_rate", self.base_obstacle_rate),
            ("collectible_rate", self.collectible_rate),
            ("power_up_rate", self.power_up_rate),
            (
                "base_obstacle_rate * max_spawn_multiplier",
                self.base_obstacle_rate * self.max_spawn_multiplier,
            ),
        ];
        for (field, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field });
            }
        }

        let multipliers = [
            ("max_speed_multiplier", self.max_speed_multiplier >= 1.0),
            ("max_spawn_multiplier", self.max_spawn_multiplier >= 1.0),
            ("speed_increase_rate", self.speed_increase_rate >= 0.0),
            ("spawn_rate_increase", self.spawn_rate_increase >= 0.0),
        ];
        for (field, ok) in multipliers {
            if !ok {
                return Err(ConfigError::InvalidMultiplier { field });
            }
        }

        let band = self.playfield_height - 2.0 * self.spawn_margin;
        if band <= 0.0
            || self.spawn_margin < 0.0
            || self.playfield_height <= self.player_size
            || self.player_x >= self.playfield_width
        {
            return Err(ConfigError::PlayfieldTooSmall {
                width: self.playfield_width,
                height: self.playfield_height,
            });
        }

        Ok(())
    }

    /// Vertical range `[top, bottom)` new entities spawn in
    pub fn spawn_band(&self) -> (f32, f32) {
        (
            self.spawn_margin,
            self.playfield_height - self.spawn_margin,
        )
    }

    /// Horizontal position new entities appear at
    pub fn spawn_x(&self) -> f32 {
        self.playfield_width + self.spawn_offset
    }

    /// Largest legal player y (exclusive)
    pub fn floor_y(&self) -> f32 {
        self.playfield_height - self.player_size
    }
}
