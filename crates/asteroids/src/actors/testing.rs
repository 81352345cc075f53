//! Update-context fixture for actor unit tests

use arcade_engine::audio::SoundManager;
use arcade_engine::foundation::math::Vec2;
use arcade_engine::input::{Controls, InputState};
use arcade_engine::physics::WrapPolicy;

use super::UpdateContext;
use crate::config::GameConfig;
use crate::events::{GameEvent, GameEvents};

pub struct Fixture {
    pub config: GameConfig,
    pub input: InputState,
    pub wrap: WrapPolicy,
    pub events: GameEvents,
    pub sounds: SoundManager,
    pub target: Option<Vec2>,
    pub now_ms: f64,
}

impl Fixture {
    pub fn new() -> Self {
        let config = GameConfig::default();
        let wrap = WrapPolicy::new(
            config.display.width,
            config.display.height,
            config.physics.teleport_inset,
            config.physics.teleport_guard_ms,
        );
        let sounds = SoundManager::silent(config.sounds.lengths());
        Self {
            config,
            input: InputState::new(),
            wrap,
            events: GameEvents::new(),
            sounds,
            target: None,
            now_ms: 0.0,
        }
    }

    pub fn hold(&mut self, controls: Controls) {
        self.input.update(controls);
    }

    pub fn ctx(&mut self, dt_ms: f32) -> UpdateContext<'_> {
        self.now_ms += f64::from(dt_ms);
        UpdateContext {
            dt_ms,
            now_ms: self.now_ms,
            config: &self.config,
            input: &self.input,
            target: self.target,
            wrap: &self.wrap,
            events: &mut self.events,
            sounds: &mut self.sounds,
        }
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain().collect()
    }
}
