//! Narrow-phase collision tests
//!
//! Everything collides as a circle. There is no broad phase; the callers
//! decide which pairs to test.

use crate::foundation::math::Vec2;

/// A bounding circle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingCircle {
    /// The center position of the circle in screen space
    pub center: Vec2,
    /// The radius of the circle
    pub radius: f32,
}

impl BoundingCircle {
    /// Creates a new bounding circle with the given center and radius
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Check if this circle overlaps another
    ///
    /// Touching circles count as colliding.
    pub fn intersects(&self, other: &BoundingCircle) -> bool {
        circles_overlap(self.center, self.radius, other.center, other.radius)
    }
}

/// Circle-circle overlap: distance between centers <= sum of radii
pub fn circles_overlap(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    let distance_squared = (center_a - center_b).magnitude_squared();
    let radius_sum = radius_a + radius_b;
    distance_squared <= radius_sum * radius_sum
}
