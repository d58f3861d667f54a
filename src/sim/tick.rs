//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{Resolution, resolve_collisions};
use super::difficulty::Difficulty;
use super::physics::{PlayerStep, scroll_entities, step_player};
use super::spawn::spawn_entities;
use super::state::{EndCause, GameEvent, GameState};
use crate::settings::Settings;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Coalesced tap since the previous tick
    pub jump: bool,
    /// Session time source reading, used for shield deadlines
    pub now_ms: u64,
}

/// What a tick did to the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Session was not running; nothing happened
    Inactive,
    Continue,
    /// Run ended on this tick. Only ever returned once per session.
    GameOver { final_score: u32, cause: EndCause },
}

/// Advance the game state by one tick.
///
/// Order: player physics and boundary check, entity scroll/despawn,
/// spawning, collision resolution, frame counter and difficulty.
pub fn tick(state: &mut GameState, settings: &Settings, input: &TickInput) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Inactive;
    }

    if input.jump {
        state.events.push(GameEvent::Flap);
    }
    if step_player(&mut state.player, input.jump, settings) == PlayerStep::OutOfBounds {
        return game_over(state, EndCause::OutOfBounds);
    }
    let speed = state.difficulty.scroll_speed;
    scroll_entities(state, speed, settings.despawn_x);

    spawn_entities(state, settings);

    if let Resolution::Lethal { obstacle_id } = resolve_collisions(state, settings, input.now_ms) {
        log::debug!("Hit obstacle {obstacle_id}");
        return game_over(state, EndCause::Collision);
    }

    state.frame += 1;
    state.difficulty = Difficulty::at(state.frame, settings);

    TickOutcome::Continue
}

fn game_over(state: &mut GameState, cause: EndCause) -> TickOutcome {
    match state.finish(cause) {
        Some(final_score) => TickOutcome::GameOver { final_score, cause },
        None => TickOutcome::Inactive,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Obstacle, ObstacleKind, SessionPhase};
    use glam::Vec2;

    fn quiet_settings() -> Settings {
        Settings {
            base_obstacle_rate: 0.0,
            collectible_rate: 0.0,
            power_up_rate: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_state_does_not_tick() {
        let settings = quiet_settings();
        let mut state = GameState::new(&settings, 1);
        let y = state.player.y;
        assert_eq!(
            tick(&mut state, &settings, &TickInput::default()),
            TickOutcome::Inactive
        );
        assert_eq!(state.player.y, y);
        assert_eq!(state.frame, 0);
    }

    #[test]
    fn test_tick_advances_frame_and_difficulty() {
        let settings = quiet_settings();
        let mut state = GameState::new(&settings, 1);
        state.reset_for_run(&settings);
        for _ in 0..10 {
            assert_eq!(
                tick(&mut state, &settings, &TickInput::default()),
                TickOutcome::Continue
            );
        }
        assert_eq!(state.frame, 10);
        assert_eq!(state.difficulty, Difficulty::at(10, &settings));
    }

    #[test]
    fn test_jump_emits_flap() {
        let settings = quiet_settings();
        let mut state = GameState::new(&settings, 1);
        state.reset_for_run(&settings);
        let input = TickInput {
            jump: true,
            now_ms: 0,
        };
        tick(&mut state, &settings, &input);
        assert_eq!(state.player.vel, settings.jump_force);
        assert!(state.events.contains(&GameEvent::Flap));
    }

    #[test]
    fn test_falling_out_ends_run() {
        let settings = quiet_settings();
        let mut state = GameState::new(&settings, 1);
        state.reset_for_run(&settings);
        state.add_score(3);
        state.player.y = settings.floor_y() - 1.0;
        state.player.vel = 5.0;

        let outcome = tick(&mut state, &settings, &TickInput::default());
        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                final_score: 3,
                cause: EndCause::OutOfBounds
            }
        );
        assert_eq!(state.phase, SessionPhase::Ended);
        assert_eq!(state.player.y, settings.floor_y() - 1.0);
        assert_eq!(
            tick(&mut state, &settings, &TickInput::default()),
            TickOutcome::Inactive
        );
    }

    #[test]
    fn test_collision_ends_run() {
        let settings = quiet_settings();
        let mut state = GameState::new(&settings, 1);
        state.reset_for_run(&settings);
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Football,
            // Lands on the player after one scroll step
            pos: Vec2::new(settings.player_x + settings.base_speed, state.player.y),
            passed: false,
        });
        let outcome = tick(&mut state, &settings, &TickInput::default());
        assert!(matches!(
            outcome,
            TickOutcome::GameOver {
                cause: EndCause::Collision,
                ..
            }
        ));
    }

    #[test]
    fn test_final_score_counts_pass_on_collision_tick() {
        let settings = quiet_settings();
        let mut state = GameState::new(&settings, 1);
        state.reset_for_run(&settings);
        let passing = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: passing,
            kind: ObstacleKind::Smoke,
            // Right edge scrolls from 80 to 77, clear of the player's left edge
            pos: Vec2::new(40.0, 100.0),
            passed: false,
        });
        let hit = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: hit,
            kind: ObstacleKind::Football,
            pos: Vec2::new(settings.player_x + settings.base_speed, state.player.y),
            passed: false,
        });

        let outcome = tick(&mut state, &settings, &TickInput::default());
        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                final_score: settings.pass_points,
                cause: EndCause::Collision
            }
        );
        assert!(state.obstacles[0].passed);
        assert_eq!(state.score, settings.pass_points);

        let passed_at = state
            .events
            .iter()
            .position(|e| *e == GameEvent::ObstaclePassed { id: passing });
        let over_at = state.events.iter().position(|e| {
            *e == GameEvent::GameOver {
                final_score: settings.pass_points,
                cause: EndCause::Collision,
            }
        });
        assert!(passed_at.is_some() && over_at.is_some());
        assert!(passed_at < over_at);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut a = GameState::new(&settings, 99_999);
        let mut b = GameState::new(&settings, 99_999);
        a.reset_for_run(&settings);
        b.reset_for_run(&settings);

        for frame in 0..120u64 {
            let input = TickInput {
                jump: frame % 20 == 0,
                now_ms: frame * 16,
            };
            assert_eq!(
                tick(&mut a, &settings, &input),
                tick(&mut b, &settings, &input)
            );
        }
        assert_eq!(a.frame, b.frame);
        assert_eq!(a.score, b.score);
        assert_eq!(a.player, b.player);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.collectibles, b.collectibles);
        assert_eq!(a.power_ups, b.power_ups);
    }
}
