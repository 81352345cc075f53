//! Linear and angular kinematics shared by every moving body
//!
//! Velocities are in raw units per millisecond; `velocity_mult` scales them
//! into pixels when integrating position.

use crate::foundation::math::{heading_vector, rotate_angle, Rect, Vec2};

/// Kinematic state of a moving body
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Center position in screen coordinates
    pub position: Vec2,
    /// Linear velocity
    pub velocity: Vec2,
    /// Facing in degrees, `[0, 360)`
    pub angle: f32,
    /// One-tick impulse along the heading, cleared by [`Body::integrate`]
    pub thrust: f32,
    /// Per-component velocity clamp; `None` leaves velocity unbounded
    pub max_velocity: Option<f32>,
}

impl Body {
    /// Create a body at rest facing up
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
            angle: 0.0,
            thrust: 0.0,
            max_velocity: None,
        }
    }

    /// Create a body with an initial velocity
    pub fn with_velocity(position: Vec2, velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::new(position)
        }
    }

    /// Set the per-component velocity clamp
    pub fn with_max_velocity(mut self, max_velocity: f32) -> Self {
        self.max_velocity = Some(max_velocity);
        self
    }

    /// Set the facing angle
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Apply one integration step of `dt_ms` milliseconds
    ///
    /// 1. thrust is added along the heading
    /// 2. each velocity component is clamped when a maximum is set
    /// 3. position advances by `velocity * dt * velocity_mult`
    /// 4. thrust is reset
    pub fn integrate(&mut self, dt_ms: f32, velocity_mult: f32) {
        if self.thrust != 0.0 {
            self.velocity += heading_vector(self.angle) * self.thrust;
        }

        if let Some(max) = self.max_velocity {
            self.velocity.x = self.velocity.x.clamp(-max, max);
            self.velocity.y = self.velocity.y.clamp(-max, max);
        }

        self.position += self.velocity * dt_ms * velocity_mult;
        self.thrust = 0.0;
    }

    /// Rotate counter-clockwise by `step` degrees
    pub fn rotate_ccw(&mut self, step: f32) {
        self.angle = rotate_angle(self.angle, step);
    }

    /// Rotate clockwise by `step` degrees
    pub fn rotate_cw(&mut self, step: f32) {
        self.angle = rotate_angle(self.angle, -step);
    }

    /// Bounding rectangle of a `width` x `height` sprite drawn at this body's
    /// position and angle
    pub fn bounds(&self, width: f32, height: f32) -> Rect {
        Rect::rotated_bounds(self.position, width, height, self.angle)
    }

    /// Whether position and velocity are usable numbers
    pub fn is_finite(&self) -> bool {
        self.position.x.is_finite()
            && self.position.y.is_finite()
            && self.velocity.x.is_finite()
            && self.velocity.y.is_finite()
            && self.angle.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_integrate_position() {
        let mut body = Body::with_velocity(Vec2::new(10.0, 10.0), Vec2::new(1.0, -0.5));
        body.integrate(16.0, 0.5);
        assert_relative_eq!(body.position.x, 18.0);
        assert_relative_eq!(body.position.y, 6.0);
    }

    #[test]
    fn test_thrust_is_one_tick_impulse() {
        let mut body = Body::new(Vec2::zeros());
        body.thrust = 0.01;
        body.integrate(16.0, 0.5);
        assert_relative_eq!(body.velocity.y, -0.01, epsilon = 1e-7);
        assert_eq!(body.thrust, 0.0);

        body.integrate(16.0, 0.5);
        assert_relative_eq!(body.velocity.y, -0.01, epsilon = 1e-7);
    }

    #[test]
    fn test_velocity_clamp_per_component() {
        let mut body = Body::new(Vec2::zeros()).with_max_velocity(0.3).with_angle(45.0);
        for _ in 0..500 {
            body.thrust = 0.01;
            body.integrate(16.0, 0.5);
            assert!(body.velocity.x.abs() <= 0.3);
            assert!(body.velocity.y.abs() <= 0.3);
        }
        assert_relative_eq!(body.velocity.x, -0.3);
        assert_relative_eq!(body.velocity.y, -0.3);
    }

    #[test]
    fn test_unclamped_body_keeps_speed() {
        let mut body = Body::with_velocity(Vec2::zeros(), Vec2::new(5.0, 0.0));
        body.integrate(1.0, 1.0);
        assert_relative_eq!(body.velocity.x, 5.0);
    }

    #[test]
    fn test_rotation_wraps() {
        let mut body = Body::new(Vec2::zeros()).with_angle(359.0);
        body.rotate_ccw(1.5);
        assert!((0.0..360.0).contains(&body.angle));

        let mut body = Body::new(Vec2::zeros());
        body.rotate_cw(1.5);
        assert_eq!(body.angle, 359.0);
    }

    #[test]
    fn test_non_finite_detected() {
        let mut body = Body::new(Vec2::zeros());
        assert!(body.is_finite());
        body.velocity.x = f32::NAN;
        assert!(!body.is_finite());
    }
}
