//! Physics module: kinematics, circle collision and boundary wrap
//!
//! The physics model is deliberately small: linear velocity plus a facing
//! angle, discrete per-tick circle overlap, and a teleport rule for bodies
//! leaving the screen.

pub mod bounds;
pub mod collision;
pub mod motion;

pub use bounds::{WrapOutcome, WrapPolicy};
pub use collision::{circles_overlap, BoundingCircle};
pub use motion::Body;
