//! Collision Detection
//!
//! Player-vs-hostile contact and player-vs-goal overlap. Both run after
//! integration so they see this tick's final positions.

use serde::{Deserialize, Serialize};

use crate::core::rect::Rect;
use crate::game::actor::{Hostile, Player};
use crate::game::level::LevelContext;

/// First hostile, in spawn order, touching the player.
///
/// At most one contact is reported per tick no matter how many hostiles
/// overlap, which bounds damage to one life per tick.
pub fn detect_player_hostile_contact(player: &Player, hostiles: &[Hostile]) -> Option<usize> {
    let bounds = player.actor.bounds();
    hostiles
        .iter()
        .position(|hostile| bounds.overlaps(&hostile.actor.bounds()))
}

/// Result of a goal check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalOutcome {
    /// Not in a goal zone
    None,
    /// Reached the goal of a non-final level
    Advance {
        /// Level to load next
        next_level: usize,
    },
    /// Reached the goal of the final level
    Victory,
}

/// Test the player's bounds against every goal zone of the level.
pub fn check_goal(player_bounds: &Rect, level: &LevelContext) -> GoalOutcome {
    if !level.geometry.goals.iter().any(|goal| player_bounds.overlaps(goal)) {
        return GoalOutcome::None;
    }

    if level.is_final() {
        GoalOutcome::Victory
    } else {
        GoalOutcome::Advance { next_level: level.index + 1 }
    }
}
