//! Audio seam
//!
//! The engine decides when sounds start and stop; an external backend does
//! the actual playback.

pub mod sound_manager;

pub use sound_manager::{AudioBackend, AudioError, NullAudioBackend, SoundId, SoundManager, SoundRequest};
