//! Vertical player kinematics and horizontal scrolling

use super::state::{GameState, Player};
use crate::settings::Settings;

/// Outcome of advancing the player one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerStep {
    Moved,
    /// Next position was outside the playable band; the player was left
    /// at its last legal position
    OutOfBounds,
}

/// Next `(velocity, position)`.
///
/// A jump sets velocity to `jump_force` outright instead of adding gravity.
#[inline]
pub fn integrate(vel: f32, y: f32, jump: bool, gravity: f32, jump_force: f32) -> (f32, f32) {
    let vel = if jump { jump_force } else { vel + gravity };
    (vel, y + vel)
}

/// True when `y` touches or passes the ceiling or the floor
#[inline]
pub fn out_of_bounds(y: f32, settings: &Settings) -> bool {
    y <= 0.0 || y >= settings.floor_y()
}

/// Advance the player, refusing to move into an illegal position
pub fn step_player(player: &mut Player, jump: bool, settings: &Settings) -> PlayerStep {
    let (vel, y) = integrate(
        player.vel,
        player.y,
        jump,
        settings.gravity,
        settings.jump_force,
    );
    if out_of_bounds(y, settings) {
        return PlayerStep::OutOfBounds;
    }
    player.vel = vel;
    player.y = y;
    PlayerStep::Moved
}

/// Move every entity left by `speed` and drop the ones past `despawn_x`
pub fn scroll_entities(state: &mut GameState, speed: f32, despawn_x: f32) {
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed;
    }
    for collectible in &mut state.collectibles {
        collectible.pos.x -= speed;
    }
    for power_up in &mut state.power_ups {
        power_up.pos.x -= speed;
    }

    state.obstacles.retain(|o| o.pos.x >= despawn_x);
    state.collectibles.retain(|c| c.pos.x >= despawn_x);
    state.power_ups.retain(|p| p.pos.x >= despawn_x);
}
