//! Math utilities and types
//!
//! Provides the 2D math used by the simulation: vectors, the screen-space
//! heading convention, degree wrapping and axis-aligned rectangles.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Unit heading for an angle in degrees.
///
/// Angle 0 points "up" on screen (negative y) and increasing angles rotate
/// counter-clockwise: 90 degrees points left.
pub fn heading_vector(angle_degrees: f32) -> Vec2 {
    let radians = angle_degrees.to_radians();
    Vec2::new(-radians.sin(), -radians.cos())
}

/// Rotate an angle in degrees by `delta`, wrapping into `[0, 360)`.
///
/// The wrap is deliberately discrete: reaching 360 or more snaps to exactly 0
/// and dropping below 0 snaps to exactly 359.
pub fn rotate_angle(angle: f32, delta: f32) -> f32 {
    let rotated = angle + delta;
    if rotated >= 360.0 {
        0.0
    } else if rotated < 0.0 {
        359.0
    } else {
        rotated
    }
}

/// Axis-aligned rectangle in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Create a rectangle of the given size centered on `center`
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    /// Bounding rectangle of a `width` x `height` sprite rotated by
    /// `angle_degrees` about `center`.
    ///
    /// The center never moves with rotation; only the extents grow.
    pub fn rotated_bounds(center: Vec2, width: f32, height: f32, angle_degrees: f32) -> Self {
        let (sin, cos) = angle_degrees.to_radians().sin_cos();
        let rotated_width = (width * cos).abs() + (height * sin).abs();
        let rotated_height = (width * sin).abs() + (height * cos).abs();
        Self::from_center(center, rotated_width, rotated_height)
    }

    /// Right edge
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the two rectangles overlap with a non-empty area
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
