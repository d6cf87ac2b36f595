//! Input Translation
//!
//! The input collaborator hands over one [`InputFrame`] per frame. This
//! module turns it into the player's velocity for the tick.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::actor::Direction;

/// Raw input state for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct InputFrame {
    /// Movement X: -127 (left) to +127 (right), -128 = released
    pub move_x: i8,

    /// Movement Y: -127 (up) to +127 (down), -128 = released
    pub move_y: i8,
}

impl InputFrame {
    /// Special value indicating no input (stick released)
    pub const NO_INPUT: i8 = -128;

    /// Largest stick deflection
    pub const FULL: i8 = 127;

    /// Create an idle input frame.
    pub const fn new() -> Self {
        Self {
            move_x: Self::NO_INPUT,
            move_y: Self::NO_INPUT,
        }
    }

    /// Create input with movement direction.
    pub const fn with_movement(move_x: i8, move_y: i8) -> Self {
        Self { move_x, move_y }
    }

    /// Full deflection in one direction.
    pub const fn toward(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::with_movement(0, -Self::FULL),
            Direction::Down => Self::with_movement(0, Self::FULL),
            Direction::Left => Self::with_movement(-Self::FULL, 0),
            Direction::Right => Self::with_movement(Self::FULL, 0),
        }
    }

    /// Is there no movement on either axis?
    #[inline]
    pub fn is_idle(&self) -> bool {
        axis(self.move_x) == 0.0 && axis(self.move_y) == 0.0
    }

    /// Stick deflection as a vector with components in [-1, 1].
    #[inline]
    pub fn move_direction(&self) -> Vec2 {
        Vec2::new(axis(self.move_x), axis(self.move_y))
    }

    /// Player velocity for this frame.
    ///
    /// Diagonals are normalized so they are not faster than straight moves;
    /// partial deflection scales speed down.
    pub fn player_velocity(&self, speed: f32) -> Vec2 {
        if self.is_idle() {
            return Vec2::ZERO;
        }

        let dir = self.move_direction();
        if dir.length_squared() > 1.0 {
            dir.normalize().scale(speed)
        } else {
            dir.scale(speed)
        }
    }
}

#[inline]
fn axis(value: i8) -> f32 {
    if value == InputFrame::NO_INPUT {
        0.0
    } else {
        value as f32 / InputFrame::FULL as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle() {
        assert!(InputFrame::new().is_idle());
        assert!(InputFrame::with_movement(0, 0).is_idle());
        assert_eq!(InputFrame::new().player_velocity(100.0), Vec2::ZERO);
    }

    #[test]
    fn test_full_right() {
        let v = InputFrame::toward(Direction::Right).player_velocity(100.0);
        assert_eq!(v, Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_down_is_positive_y() {
        let v = InputFrame::toward(Direction::Down).player_velocity(100.0);
        assert_eq!(v, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_diagonal_normalized() {
        let v = InputFrame::with_movement(127, 127).player_velocity(100.0);
        assert!((v.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_partial_deflection() {
        let v = InputFrame::with_movement(-64, InputFrame::NO_INPUT).player_velocity(127.0);
        assert!((v.x + 64.0).abs() < 1e-3);
        assert_eq!(v.y, 0.0);
    }
}
