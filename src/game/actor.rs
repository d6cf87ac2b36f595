//! Actor Definitions
//!
//! The shared moving-entity model and its two variants. Both variants run
//! through the same wall/integration pipeline via [`Mover`]; they differ only
//! in where their velocity comes from (player input vs chase steering).

use serde::{Deserialize, Serialize};

use crate::core::hash::StateHasher;
use crate::core::rect::Rect;
use crate::core::vec2::Vec2;
use crate::game::health::HealthState;

// =============================================================================
// DIRECTION
// =============================================================================

/// Facing direction. World space is y-down, so `Down` is +Y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// -Y
    Up = 0,
    /// +Y
    #[default]
    Down = 1,
    /// -X
    Left = 2,
    /// +X
    Right = 3,
}

impl Direction {
    /// Direction of the dominant axis of `v`, or `None` for a zero vector.
    ///
    /// Ties go to the horizontal axis.
    pub fn from_velocity(v: Vec2) -> Option<Self> {
        if v.is_zero() {
            return None;
        }
        if v.x.abs() >= v.y.abs() {
            Some(if v.x > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if v.y > 0.0 { Direction::Down } else { Direction::Up })
        }
    }

    /// Direction of travel along X, if moving horizontally.
    #[inline]
    pub fn horizontal(vx: f32) -> Option<Self> {
        if vx > 0.0 {
            Some(Direction::Right)
        } else if vx < 0.0 {
            Some(Direction::Left)
        } else {
            None
        }
    }

    /// Direction of travel along Y, if moving vertically.
    #[inline]
    pub fn vertical(vy: f32) -> Option<Self> {
        if vy > 0.0 {
            Some(Direction::Down)
        } else if vy < 0.0 {
            Some(Direction::Up)
        } else {
            None
        }
    }

}

// =============================================================================
// ACTOR
// =============================================================================

/// Common state of any moving entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner of the bounding box
    pub position: Vec2,
    /// Velocity for the current tick (units/sec)
    pub velocity: Vec2,
    /// Facing direction
    pub facing: Direction,
    /// Bounding box size
    pub size: Vec2,
}

impl Actor {
    /// Create a stationary actor facing down.
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Direction::Down,
            size,
        }
    }

    /// Current bounding rectangle.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_position(self.position, self.size)
    }

    /// Set velocity and turn to face the dominant axis of motion.
    ///
    /// A zero velocity keeps the previous facing.
    pub fn steer(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        if let Some(dir) = Direction::from_velocity(velocity) {
            self.facing = dir;
        }
    }

    /// Hash this actor's state for verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_vec2(self.position);
        hasher.update_vec2(self.velocity);
        hasher.update_u8(self.facing as u8);
        hasher.update_vec2(self.size);
    }
}

/// Whether a hostile respects wall geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallMode {
    /// Runs through the wall resolver like the player
    Constrained,
    /// Passes through walls
    #[default]
    Ghost,
}

/// Shared movement pipeline seam.
///
/// Everything that moves exposes its [`Actor`] and says whether walls stop it.
pub trait Mover {
    /// The underlying actor, mutably.
    fn actor_mut(&mut self) -> &mut Actor;

    /// Whether the wall resolver applies to this mover.
    fn wall_constrained(&self) -> bool;
}

// =============================================================================
// PLAYER
// =============================================================================

/// The single player-controlled actor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Shared actor state
    pub actor: Actor,
    /// Lives and invulnerability
    pub health: HealthState,
}

impl Player {
    /// Create a player at its spawn point.
    pub fn new(spawn: Vec2, size: Vec2, health: HealthState) -> Self {
        Self {
            actor: Actor::new(spawn, size),
            health,
        }
    }

    /// Is the player still alive?
    #[inline]
    pub fn alive(&self) -> bool {
        !self.health.is_dead()
    }
}

impl Mover for Player {
    fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    fn wall_constrained(&self) -> bool {
        true
    }
}

// =============================================================================
// HOSTILE
// =============================================================================

/// A chasing hostile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hostile {
    /// Spawn-list index
    pub id: u32,
    /// Shared actor state
    pub actor: Actor,
    /// Chase speed (units/sec)
    pub speed: f32,
    /// Wall behaviour
    pub wall_mode: WallMode,
}

impl Hostile {
    /// Create a hostile at its spawn point.
    pub fn new(id: u32, spawn: Vec2, size: Vec2, speed: f32, wall_mode: WallMode) -> Self {
        Self {
            id,
            actor: Actor::new(spawn, size),
            speed,
            wall_mode,
        }
    }
}

impl Mover for Hostile {
    fn actor_mut(&mut self) -> &mut Actor {
        &mut self.actor
    }

    fn wall_constrained(&self) -> bool {
        self.wall_mode == WallMode::Constrained
    }
}
