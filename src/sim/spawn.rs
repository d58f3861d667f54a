//! Probabilistic entity spawning
//!
//! One uniform draw per category per tick. Draws are always consumed, even
//! when a soft cap suppresses the spawn, so the RNG stream only depends on
//! the seed and the tick count.

use glam::Vec2;
use rand::Rng;

use super::state::{
    Collectible, CollectibleKind, GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind,
};
use crate::settings::Settings;

/// What a single spawn pass produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnReport {
    pub obstacle: Option<u32>,
    pub collectible: Option<u32>,
    pub power_up: Option<u32>,
}

/// Run the obstacle, collectible and power-up draws for this tick
pub fn spawn_entities(state: &mut GameState, settings: &Settings) -> SpawnReport {
    let obstacle_rate = state.difficulty.obstacle_rate;
    SpawnReport {
        obstacle: maybe_spawn_obstacle(state, settings, obstacle_rate),
        collectible: maybe_spawn_collectible(state, settings),
        power_up: maybe_spawn_power_up(state, settings),
    }
}

fn maybe_spawn_obstacle(state: &mut GameState, settings: &Settings, rate: f32) -> Option<u32> {
    if !roll(state, rate) {
        return None;
    }
    let kind = ObstacleKind::from_index(state.rng.random_range(0..ObstacleKind::ALL.len()));
    let pos = spawn_position(state, settings);
    if state.obstacles.len() >= settings.max_obstacles {
        log::debug!("Obstacle spawn suppressed at cap {}", settings.max_obstacles);
        return None;
    }
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind,
        pos,
        passed: false,
    });
    Some(id)
}

fn maybe_spawn_collectible(state: &mut GameState, settings: &Settings) -> Option<u32> {
    if !roll(state, settings.collectible_rate) {
        return None;
    }
    let kind =
        CollectibleKind::from_index(state.rng.random_range(0..CollectibleKind::ALL.len()));
    let pos = spawn_position(state, settings);
    if state.collectibles.len() >= settings.max_collectibles {
        log::debug!("Collectible spawn suppressed at cap {}", settings.max_collectibles);
        return None;
    }
    let id = state.next_entity_id();
    state.collectibles.push(Collectible { id, kind, pos });
    Some(id)
}

fn maybe_spawn_power_up(state: &mut GameState, settings: &Settings) -> Option<u32> {
    if !roll(state, settings.power_up_rate) {
        return None;
    }
    let kind = PowerUpKind::from_index(state.rng.random_range(0..PowerUpKind::ALL.len()));
    let pos = spawn_position(state, settings);
    if state.power_ups.len() >= settings.max_power_ups {
        log::debug!("Power-up spawn suppressed at cap {}", settings.max_power_ups);
        return None;
    }
    let id = state.next_entity_id();
    let duration_ms = match kind {
        PowerUpKind::Shield => Some(settings.shield_duration_ms),
        PowerUpKind::Pass => None,
    };
    state.power_ups.push(PowerUp {
        id,
        kind,
        pos,
        duration_ms,
    });
    Some(id)
}

/// Uniform draw in [0, 1) compared against `probability`
fn roll(state: &mut GameState, probability: f32) -> bool {
    state.rng.random::<f32>() < probability
}

/// Right spawn edge, vertical position uniform inside the safe band
fn spawn_position(state: &mut GameState, settings: &Settings) -> Vec2 {
    let (top, bottom) = settings.spawn_band();
    let y = top + state.rng.random::<f32>() * (bottom - top);
    Vec2::new(settings.spawn_x(), y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn always_spawn() -> Settings {
        Settings {
            base_obstacle_rate: 1.0,
            max_spawn_multiplier: 1.0,
            collectible_rate: 1.0,
            power_up_rate: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_zero_rates_never_spawn() {
        let settings = Settings {
            base_obstacle_rate: 0.0,
            collectible_rate: 0.0,
            power_up_rate: 0.0,
            ..Default::default()
        };
        let mut state = GameState::new(&settings, 3);
        state.reset_for_run(&settings);
        for _ in 0..1_000 {
            assert_eq!(spawn_entities(&mut state, &settings), SpawnReport::default());
        }
        assert_eq!(state.entity_count(), 0);
    }

    #[test]
    fn test_certain_rates_spawn_in_band() {
        let settings = always_spawn();
        let mut state = GameState::new(&settings, 11);
        state.reset_for_run(&settings);

        let report = spawn_entities(&mut state, &settings);
        assert!(report.obstacle.is_some());
        assert!(report.collectible.is_some());
        assert!(report.power_up.is_some());

        let (top, bottom) = settings.spawn_band();
        let obstacle = &state.obstacles[0];
        assert!(!obstacle.passed);
        assert_eq!(obstacle.pos.x, settings.spawn_x());
        assert!(obstacle.pos.y >= top && obstacle.pos.y < bottom);

        let collectible = &state.collectibles[0];
        assert_eq!(collectible.points(), collectible.kind.points());

        let power_up = &state.power_ups[0];
        match power_up.kind {
            PowerUpKind::Shield => {
                assert_eq!(power_up.duration_ms, Some(settings.shield_duration_ms))
            }
            PowerUpKind::Pass => assert_eq!(power_up.duration_ms, None),
        }
    }

    #[test]
    fn test_soft_caps_suppress() {
        let settings = always_spawn();
        let mut state = GameState::new(&settings, 5);
        state.reset_for_run(&settings);
        for _ in 0..50 {
            spawn_entities(&mut state, &settings);
        }
        assert_eq!(state.obstacles.len(), settings.max_obstacles);
        assert_eq!(state.collectibles.len(), settings.max_collectibles);
        assert_eq!(state.power_ups.len(), settings.max_power_ups);
    }

    #[test]
    fn test_same_seed_same_spawns() {
        let settings = Settings {
            base_obstacle_rate: 0.3,
            collectible_rate: 0.3,
            power_up_rate: 0.3,
            ..Default::default()
        };
        let mut a = GameState::new(&settings, 42);
        let mut b = GameState::new(&settings, 42);
        a.reset_for_run(&settings);
        b.reset_for_run(&settings);
        for _ in 0..20 {
            assert_eq!(
                spawn_entities(&mut a, &settings),
                spawn_entities(&mut b, &settings)
            );
        }
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.collectibles, b.collectibles);
    }

    #[test]
    fn test_all_kinds_eventually_drawn() {
        let settings = Settings {
            max_obstacles: usize::MAX,
            max_collectibles: usize::MAX,
            ..always_spawn()
        };
        let mut state = GameState::new(&settings, 9);
        state.reset_for_run(&settings);
        for _ in 0..200 {
            spawn_entities(&mut state, &settings);
        }
        for kind in ObstacleKind::ALL {
            assert!(state.obstacles.iter().any(|o| o.kind == kind));
        }
        for kind in CollectibleKind::ALL {
            assert!(state.collectibles.iter().any(|c| c.kind == kind));
        }
    }
}
