//! Difficulty scaling
//!
//! Pure functions of the elapsed frame count, each clamped to its cap.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Derived per-frame difficulty values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub speed_multiplier: f32,
    /// Pixels every entity scrolls left per tick
    pub scroll_speed: f32,
    pub spawn_multiplier: f32,
    /// Per-tick obstacle spawn probability
    pub obstacle_rate: f32,
}

impl Difficulty {
    pub fn at(frame: u64, settings: &Settings) -> Self {
        let speed_multiplier = speed_multiplier(frame, settings);
        let spawn_multiplier = spawn_multiplier(frame, settings);
        Self {
            speed_multiplier,
            scroll_speed: settings.base_speed * speed_multiplier,
            spawn_multiplier,
            obstacle_rate: settings.base_obstacle_rate * spawn_multiplier,
        }
    }
}

/// `min(1 + f * SPEED_INCREASE_RATE, MAX_SPEED_MULTIPLIER)`
pub fn speed_multiplier(frame: u64, settings: &Settings) -> f32 {
    (1.0 + frame as f32 * settings.speed_increase_rate).min(settings.max_speed_multiplier)
}

/// `min(1 + f * SPAWN_RATE_INCREASE, MAX_SPAWN_MULTIPLIER)`
pub fn spawn_multiplier(frame: u64, settings: &Settings) -> f32 {
    (1.0 + frame as f32 * settings.spawn_rate_increase).min(settings.max_spawn_multiplier)
}
