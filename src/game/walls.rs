//! Wall Collision
//!
//! Walls are data, not physics bodies. Before integration each constrained
//! actor is probed in its direction of travel; a probe that hits a wall
//! cancels that velocity component only, so an actor flush against a wall
//! can still slide along it or back away from it.

use crate::core::rect::Rect;
use crate::game::actor::{Actor, Direction, Mover};
use crate::game::config::SimConfig;

/// Shape of the look-ahead probe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeShape {
    /// Extension on the Right/Down sides
    pub margin: f32,
    /// Taken off the margin on the Left/Up sides
    pub trim: f32,
}

impl ProbeShape {
    /// Probe shape from configuration.
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            margin: config.probe_margin,
            trim: config.probe_trim,
        }
    }

    /// How far the probe reaches past the actor on the given side.
    #[inline]
    pub fn reach(&self, direction: Direction) -> f32 {
        match direction {
            Direction::Right | Direction::Down => self.margin,
            Direction::Left | Direction::Up => self.margin - self.trim,
        }
    }
}

impl Default for ProbeShape {
    fn default() -> Self {
        Self::from_config(&SimConfig::default())
    }
}

/// The actor's bounds grown on the `direction` side only.
pub fn probe_rect(actor: &Actor, direction: Direction, shape: &ProbeShape) -> Rect {
    let mut rect = actor.bounds();
    let reach = shape.reach(direction);
    match direction {
        Direction::Right => rect.width += reach,
        Direction::Down => rect.height += reach,
        Direction::Left => {
            rect.x -= reach;
            rect.width += reach;
        }
        Direction::Up => {
            rect.y -= reach;
            rect.height += reach;
        }
    }
    rect
}

/// Would moving in `direction` put the actor into a wall?
pub fn will_collide(actor: &Actor, direction: Direction, walls: &[Rect], shape: &ProbeShape) -> bool {
    let probe = probe_rect(actor, direction, shape);
    walls.iter().any(|wall| probe.overlaps(wall))
}

/// Cancel the velocity components that would run into a wall.
///
/// Each axis is probed in its own direction of travel. Returns true if
/// anything was blocked.
pub fn resolve_wall_motion(actor: &mut Actor, walls: &[Rect], shape: &ProbeShape) -> bool {
    let mut blocked = false;

    if let Some(dir) = Direction::horizontal(actor.velocity.x) {
        if will_collide(actor, dir, walls, shape) {
            actor.velocity.x = 0.0;
            blocked = true;
        }
    }

    if let Some(dir) = Direction::vertical(actor.velocity.y) {
        if will_collide(actor, dir, walls, shape) {
            actor.velocity.y = 0.0;
            blocked = true;
        }
    }

    blocked
}

/// Run the resolver on a mover if walls apply to it.
pub fn constrain<M: Mover + ?Sized>(mover: &mut M, walls: &[Rect], shape: &ProbeShape) -> bool {
    if !mover.wall_constrained() {
        return false;
    }
    resolve_wall_motion(mover.actor_mut(), walls, shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::game::actor::{Hostile, WallMode};

    fn actor_at(x: f32, y: f32) -> Actor {
        Actor::new(Vec2::new(x, y), Vec2::new(20.0, 20.0))
    }

    #[test]
    fn test_probe_shapes() {
        let shape = ProbeShape::default();
        let actor = actor_at(100.0, 100.0);

        assert_eq!(probe_rect(&actor, Direction::Right, &shape), Rect::new(100.0, 100.0, 30.0, 20.0));
        assert_eq!(probe_rect(&actor, Direction::Down, &shape), Rect::new(100.0, 100.0, 20.0, 30.0));
        assert_eq!(probe_rect(&actor, Direction::Left, &shape), Rect::new(96.0, 100.0, 24.0, 20.0));
        assert_eq!(probe_rect(&actor, Direction::Up, &shape), Rect::new(100.0, 96.0, 20.0, 24.0));
    }

    #[test]
    fn test_wall_to_the_right_blocks_rightward() {
        let shape = ProbeShape::default();
        let mut actor = actor_at(100.0, 100.0);
        actor.steer(Vec2::new(120.0, 0.0));
        let walls = [Rect::new(115.0, 100.0, 50.0, 50.0)];

        assert!(will_collide(&actor, Direction::Right, &walls, &shape));
        assert!(resolve_wall_motion(&mut actor, &walls, &shape));
        assert_eq!(actor.velocity.x, 0.0);
    }

    #[test]
    fn test_flush_actor_can_back_away() {
        let shape = ProbeShape::default();
        // Wall starts exactly at the actor's right edge
        let walls = [Rect::new(120.0, 100.0, 50.0, 20.0)];
        let mut actor = actor_at(100.0, 100.0);

        assert!(will_collide(&actor, Direction::Right, &walls, &shape));
        assert!(!will_collide(&actor, Direction::Left, &walls, &shape));

        actor.steer(Vec2::new(-120.0, 0.0));
        assert!(!resolve_wall_motion(&mut actor, &walls, &shape));
        assert_eq!(actor.velocity.x, -120.0);
    }

    #[test]
    fn test_blocked_down_still_moves_sideways() {
        let shape = ProbeShape::default();
        // Floor just below the actor
        let walls = [Rect::new(0.0, 125.0, 400.0, 10.0)];
        let mut actor = actor_at(100.0, 100.0);
        actor.steer(Vec2::new(50.0, 80.0));

        assert!(resolve_wall_motion(&mut actor, &walls, &shape));
        assert_eq!(actor.velocity.y, 0.0);
        assert_eq!(actor.velocity.x, 50.0);
    }

    #[test]
    fn test_short_reach_on_left() {
        let shape = ProbeShape::default();
        // Gap of 5 on the left is beyond the 4-unit reach
        let walls = [Rect::new(75.0, 100.0, 20.0, 20.0)];
        let actor = actor_at(100.0, 100.0);
        assert!(!will_collide(&actor, Direction::Left, &walls, &shape));

        // Gap of 3 is inside it
        let walls = [Rect::new(77.0, 100.0, 20.0, 20.0)];
        assert!(will_collide(&actor, Direction::Left, &walls, &shape));
    }

    #[test]
    fn test_no_walls_never_collides() {
        let shape = ProbeShape::default();
        let actor = actor_at(0.0, 0.0);
        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            assert!(!will_collide(&actor, dir, &[], &shape));
        }
    }

    #[test]
    fn test_ghost_ignores_walls() {
        let shape = ProbeShape::default();
        let walls = [Rect::new(115.0, 100.0, 50.0, 50.0)];
        let mut ghost = Hostile::new(0, Vec2::new(100.0, 100.0), Vec2::new(20.0, 20.0), 60.0, WallMode::Ghost);
        ghost.actor.steer(Vec2::new(60.0, 0.0));

        assert!(!constrain(&mut ghost, &walls, &shape));
        assert_eq!(ghost.actor.velocity.x, 60.0);

        ghost.wall_mode = WallMode::Constrained;
        assert!(constrain(&mut ghost, &walls, &shape));
        assert_eq!(ghost.actor.velocity.x, 0.0);
    }
}
