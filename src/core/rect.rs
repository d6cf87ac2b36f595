//! Axis-Aligned Rectangles
//!
//! Rectangles are anchored at their minimum corner (`x`, `y`) and extend by
//! `width`/`height` toward +X and +Y.

use serde::{Deserialize, Serialize};
use super::vec2::Vec2;

/// Axis-aligned rectangle in world units.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum X
    pub x: f32,
    /// Minimum Y
    pub y: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its corner and size.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle from a corner position and a size vector.
    #[inline]
    pub fn from_position(position: Vec2, size: Vec2) -> Self {
        Self::new(position.x, position.y, size.x, size.y)
    }

    /// Maximum X.
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Maximum Y.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test.
    ///
    /// The projections must intersect on both axes; rectangles that only
    /// share an edge do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Rectangle is finite and has non-negative extents.
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_edge_touch_is_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_overlap_needs_both_axes() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 20.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_well_formed() {
        assert!(Rect::new(0.0, 0.0, 0.0, 5.0).is_well_formed());
        assert!(!Rect::new(0.0, 0.0, -1.0, 5.0).is_well_formed());
        assert!(!Rect::new(f32::NAN, 0.0, 1.0, 5.0).is_well_formed());
    }
}
