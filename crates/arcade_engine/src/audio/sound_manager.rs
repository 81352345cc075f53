//! Sound playback bookkeeping
//!
//! Mixing and output belong to an external [`AudioBackend`]. The manager only
//! tracks which sounds are currently marked as playing so `unique` requests
//! can be suppressed.

use std::collections::HashMap;

use thiserror::Error;

/// Unique identifier for a sound
pub type SoundId = String;

/// External audio output
pub trait AudioBackend {
    /// Start playing a sound at `volume` in `[0, 1]`
    fn play(&mut self, sound: &str, volume: f32, looping: bool);

    /// Stop a sound, optionally fading it out
    fn stop(&mut self, sound: &str, fadeout: bool);
}

/// Backend that plays nothing and logs every request
#[derive(Debug, Default)]
pub struct NullAudioBackend;

impl AudioBackend for NullAudioBackend {
    fn play(&mut self, sound: &str, volume: f32, looping: bool) {
        log::trace!("play {} (volume={:.2}, looping={})", sound, volume, looping);
    }

    fn stop(&mut self, sound: &str, fadeout: bool) {
        log::trace!("stop {} (fadeout={})", sound, fadeout);
    }
}

/// A request to play a sound
#[derive(Debug, Clone, PartialEq)]
pub struct SoundRequest {
    /// Sound to play
    pub sound: SoundId,
    /// Volume in `[0, 1]`, scaled by the manager's global volume
    pub volume: f32,
    /// Repeat until stopped
    pub looping: bool,
    /// Skip when the sound is already marked playing
    pub unique: bool,
}

impl SoundRequest {
    /// One-shot request at full volume
    pub fn once(sound: impl Into<SoundId>) -> Self {
        Self {
            sound: sound.into(),
            volume: 1.0,
            looping: false,
            unique: false,
        }
    }

    /// Looping request that is skipped while already playing
    pub fn unique_loop(sound: impl Into<SoundId>) -> Self {
        Self {
            looping: true,
            unique: true,
            ..Self::once(sound)
        }
    }
}

/// Audio errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AudioError {
    /// The sound was never registered with the manager
    #[error("Unknown sound: {0}")]
    UnknownSound(String),
}

/// Sound manager tracking playing sounds in front of a backend
pub struct SoundManager {
    backend: Box<dyn AudioBackend>,
    lengths_ms: HashMap<SoundId, f32>,
    playing: HashMap<SoundId, f32>,
    global_volume: f32,
}

impl SoundManager {
    /// Create a manager over `backend` knowing the length of every sound
    pub fn new(
        backend: Box<dyn AudioBackend>,
        lengths_ms: HashMap<SoundId, f32>,
        global_volume: f32,
    ) -> Self {
        Self {
            backend,
            lengths_ms,
            playing: HashMap::new(),
            global_volume: global_volume.clamp(0.0, 1.0),
        }
    }

    /// Manager with a silent backend
    pub fn silent(lengths_ms: HashMap<SoundId, f32>) -> Self {
        Self::new(Box::new(NullAudioBackend), lengths_ms, 1.0)
    }

    /// Play a sound
    ///
    /// Returns `Ok(false)` when a unique request was suppressed.
    pub fn play(&mut self, request: &SoundRequest) -> Result<bool, AudioError> {
        let length = *self
            .lengths_ms
            .get(&request.sound)
            .ok_or_else(|| AudioError::UnknownSound(request.sound.clone()))?;

        if request.unique && self.playing.contains_key(&request.sound) {
            return Ok(false);
        }

        let volume = (request.volume * self.global_volume).clamp(0.0, 1.0);
        self.backend.play(&request.sound, volume, request.looping);

        let remaining = if request.looping { f32::INFINITY } else { length };
        self.playing.insert(request.sound.clone(), remaining);
        Ok(true)
    }

    /// Stop a sound and clear its playing mark
    pub fn stop(&mut self, sound: &str, fadeout: bool) -> Result<(), AudioError> {
        if !self.lengths_ms.contains_key(sound) {
            return Err(AudioError::UnknownSound(sound.to_string()));
        }
        self.backend.stop(sound, fadeout);
        self.playing.remove(sound);
        Ok(())
    }

    /// Advance playing marks by `dt_ms`; finished one-shots are forgotten
    pub fn update(&mut self, dt_ms: f32) {
        self.playing.retain(|_, remaining| {
            *remaining -= dt_ms;
            *remaining > 0.0
        });
    }

    /// Whether a sound is currently marked playing
    pub fn is_playing(&self, sound: &str) -> bool {
        self.playing.contains_key(sound)
    }
}
