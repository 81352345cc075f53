//! External services the game talks to
//!
//! Audio, drawing and the HUD are black boxes. The loop owns one
//! [`Services`] bundle handed in at construction; nothing reaches them
//! through global state.

use arcade_engine::audio::{AudioBackend, SoundManager};
use arcade_engine::render::{NullRenderSink, RenderSink};

use crate::config::GameConfig;
use crate::hud::{HudSink, NullHudSink};

/// Sound, render and HUD services
pub struct Services {
    /// Sound bookkeeping in front of the audio backend
    pub sounds: SoundManager,
    /// Frame consumer
    pub render: Box<dyn RenderSink>,
    /// Score and status consumer
    pub hud: Box<dyn HudSink>,
}

impl Services {
    /// Services that play and draw nothing
    pub fn headless(config: &GameConfig) -> Self {
        Self {
            sounds: SoundManager::silent(config.sounds.lengths()),
            render: Box::new(NullRenderSink::default()),
            hud: Box::new(NullHudSink),
        }
    }

    /// Play sounds through `backend`
    pub fn with_audio(mut self, backend: Box<dyn AudioBackend>, config: &GameConfig) -> Self {
        self.sounds = SoundManager::new(backend, config.sounds.lengths(), config.sounds.global_volume);
        self
    }

    /// Send frames to `render`
    pub fn with_render(mut self, render: Box<dyn RenderSink>) -> Self {
        self.render = render;
        self
    }

    /// Send HUD snapshots to `hud`
    pub fn with_hud(mut self, hud: Box<dyn HudSink>) -> Self {
        self.hud = hud;
        self
    }
}
