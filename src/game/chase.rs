//! Chase Steering
//!
//! Hostiles head straight for the player's current position every tick.
//! No pathfinding and no memory of previous targets.

use crate::core::vec2::Vec2;
use crate::game::actor::Hostile;

/// Velocity from `from` toward `target` at `speed`.
///
/// Zero when the two positions coincide.
#[inline]
pub fn compute_velocity(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    target.sub(from).normalize().scale(speed)
}

/// Point every hostile at the player, in spawn order.
pub fn steer_hostiles(hostiles: &mut [Hostile], player_position: Vec2) {
    for hostile in hostiles.iter_mut() {
        let velocity = compute_velocity(hostile.actor.position, player_position, hostile.speed);
        hostile.actor.steer(velocity);
    }
}
