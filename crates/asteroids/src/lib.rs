//! # Asteroids
//!
//! Tick-driven simulation of the asteroids arcade game on top of
//! `arcade_engine`: a ship fights drifting asteroids and the occasional
//! alien saucer while collecting power-ups.
//!
//! Drawing, audio output and input polling are external services; the
//! simulation only talks to them through [`Services`] and
//! [`InputSource`](arcade_engine::input::InputSource).
//!
//! ```rust
//! use asteroids::{Game, GameConfig};
//! use arcade_engine::input::Controls;
//!
//! let mut game = Game::headless(GameConfig::default()).unwrap();
//! for _ in 0..60 {
//!     game.tick(1000.0 / 60.0, Controls::FIRE | Controls::ROTATE_LEFT).unwrap();
//! }
//! assert!(game.is_running());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod actors;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod game;
pub mod hud;
pub mod layer;
pub mod services;
pub mod spawner;
pub mod world;

pub use actors::{Actor, ActorCore, ActorKind, AsteroidColor, AsteroidSize, PowerUpKind};
pub use config::GameConfig;
pub use error::{ActorError, GameError};
pub use events::{GameEvent, GameEvents};
pub use game::Game;
pub use hud::{HudRecorder, HudSink, HudSnapshot};
pub use layer::Layer;
pub use services::Services;
pub use spawner::Spawner;
pub use world::{ActorId, World};
