//! # Arcade Engine
//!
//! A small engine for tick-driven 2D arcade simulations.
//!
//! ## Features
//!
//! - **Kinematics**: thrust impulses, per-component velocity clamps and
//!   degree-based rotation
//! - **Collision**: discrete circle overlap tests
//! - **Screen wrap**: teleport to the opposite edge with a stuck guard
//! - **Events**: owned FIFO queues drained once per tick
//! - **Service seams**: input snapshots, sound bookkeeping and render frames
//!   handed to external backends
//! - **Configuration**: TOML or RON files mapped onto serde structs
//!
//! ## Quick Start
//!
//! ```rust
//! use arcade_engine::prelude::*;
//!
//! let mut clock = FrameClock::fixed(60.0);
//! let mut body = Body::new(Vec2::new(640.0, 360.0)).with_max_velocity(0.3);
//! let wrap = WrapPolicy::new(1280.0, 720.0, 2.0, 100.0);
//!
//! for _ in 0..60 {
//!     let dt = clock.tick();
//!     body.thrust = 0.01;
//!     body.integrate(dt, 0.5);
//!     if let WrapOutcome::Wrapped(target) =
//!         wrap.wrap(&body.bounds(32.0, 32.0), body.position, None, clock.total_ms())
//!     {
//!         body.position = target;
//!     }
//! }
//! assert!(body.velocity.y.abs() <= 0.3);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod events;
pub mod physics;
pub mod input;
pub mod audio;
pub mod render;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        audio::{AudioBackend, AudioError, NullAudioBackend, SoundManager, SoundRequest},
        config::{Config, ConfigError},
        events::EventQueue,
        foundation::{
            collections::{snapshot_keys, sweep, SlotMap},
            math::{heading_vector, rotate_angle, Rect, Vec2},
            time::{FrameClock, RepeatingTimer, Stopwatch},
        },
        input::{Controls, InputSource, InputState},
        physics::{circles_overlap, Body, BoundingCircle, WrapOutcome, WrapPolicy},
        render::{RenderItem, RenderQueue, RenderSink},
    };
}
