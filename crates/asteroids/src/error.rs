//! Game error types

use arcade_engine::audio::AudioError;
use arcade_engine::config::ConfigError;
use thiserror::Error;

/// Errors that stop the game: bad startup data or a caller bug
#[derive(Error, Debug)]
pub enum GameError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A sprite or sound id is referenced but not in its catalog
    #[error("Missing asset: {0}")]
    MissingAsset(String),

    /// A spawn request named something that cannot be built
    #[error("Invalid spawn: {0}")]
    InvalidSpawn(String),

    /// Audio request for an unregistered sound
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
}

/// Failure of a single actor's update; contained to that actor
#[derive(Error, Debug)]
pub enum ActorError {
    /// Position, velocity or angle became NaN or infinite
    #[error("{kind} has non-finite motion state")]
    NonFinite {
        /// Kind of the failing actor
        kind: &'static str,
    },

    /// Player laser level has no bullet configuration
    #[error("No bullet configured for laser level {0}")]
    UnknownBulletLevel(usize),

    /// Audio request for an unregistered sound
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),
}
