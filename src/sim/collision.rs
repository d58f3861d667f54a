//! Collision detection and resolution
//!
//! Player-vs-entity only. Every check in a tick sees the entity sets as they
//! were when resolution began; removals never trigger re-evaluation.

use glam::Vec2;

use super::state::{GameEvent, GameState, Player, PowerUpKind};
use crate::settings::Settings;

/// Axis-aligned bounding box, `min` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Square box of side `size` with its top-left corner at `pos`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self {
            min: pos,
            max: pos + Vec2::splat(size),
        }
    }

    pub fn left(&self) -> f32 {
        self.min.x
    }

    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Strict overlap: boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Player bounds for this tick
pub fn player_bounds(player: &Player, settings: &Settings) -> Aabb {
    Aabb::square(Vec2::new(player.x, player.y), settings.player_size)
}

/// Result of resolving one tick's collisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Run continues
    Survived,
    /// Unshielded obstacle hit with this id; nothing after it was resolved
    Lethal { obstacle_id: u32 },
}

/// Resolve obstacle, collectible and power-up contacts in that order.
///
/// `now_ms` is the session's real-time clock, used to set shield deadlines.
pub fn resolve_collisions(state: &mut GameState, settings: &Settings, now_ms: u64) -> Resolution {
    let bounds = player_bounds(&state.player, settings);
    let invincible = state.player.invincible;

    // Obstacles: lethal unless shielded, award a point on first clear pass
    let mut passed_points = 0;
    let mut lethal = None;
    for obstacle in &mut state.obstacles {
        let other = Aabb::square(obstacle.pos, settings.obstacle_size);
        if bounds.overlaps(&other) {
            if !invincible && lethal.is_none() {
                lethal = Some(obstacle.id);
            }
            continue;
        }
        if !obstacle.passed && other.right() < bounds.left() {
            obstacle.passed = true;
            passed_points += settings.pass_points;
            state.events.push(GameEvent::ObstaclePassed { id: obstacle.id });
        }
    }
    // Passes cleared this tick count even when the tick ends the run
    state.add_score(passed_points);
    if let Some(obstacle_id) = lethal {
        return Resolution::Lethal { obstacle_id };
    }

    // Collectibles: score and consume
    let mut gained = 0;
    let events = &mut state.events;
    state.collectibles.retain(|collectible| {
        let other = Aabb::square(collectible.pos, settings.collectible_size);
        if bounds.overlaps(&other) {
            let points = collectible.points();
            gained += points;
            events.push(GameEvent::Collected {
                id: collectible.id,
                kind: collectible.kind,
                points,
            });
            log::debug!("Collected {:?} (+{})", collectible.kind, points);
            false
        } else {
            true
        }
    });
    state.add_score(gained);

    // Power-ups: remove first, then apply effects
    let mut picked = Vec::new();
    state.power_ups.retain(|power_up| {
        let other = Aabb::square(power_up.pos, settings.power_up_size);
        if bounds.overlaps(&other) {
            picked.push(power_up.clone());
            false
        } else {
            true
        }
    });
    for power_up in picked {
        state.events.push(GameEvent::PowerUpCollected {
            id: power_up.id,
            kind: power_up.kind,
        });
        match power_up.kind {
            PowerUpKind::Shield => {
                let duration = power_up.duration_ms.unwrap_or(settings.shield_duration_ms);
                state.player.invincible = true;
                state.player.shield_deadline_ms = Some(now_ms.saturating_add(duration));
                log::debug!("Shield active for {duration} ms");
            }
            PowerUpKind::Pass => remove_earliest_obstacle(state),
        }
    }

    Resolution::Survived
}

/// Drop the earliest-spawned live obstacle, if any
fn remove_earliest_obstacle(state: &mut GameState) {
    let earliest = state
        .obstacles
        .iter()
        .enumerate()
        .min_by_key(|(_, o)| o.id)
        .map(|(i, _)| i);
    if let Some(index) = earliest {
        let removed = state.obstacles.remove(index);
        log::debug!("Pass power-up removed obstacle {}", removed.id);
    }
}
