//! Frame animations for hits and explosions

use arcade_engine::foundation::math::Vec2;
use arcade_engine::physics::Body;

use super::{Actor, ActorCore, ActorKind, UpdateContext};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::layer::Layer;

/// Animation-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationState {
    frames: Vec<String>,
    frame: usize,
    frame_elapsed_ms: f32,
}

impl AnimationState {
    /// Index of the frame being shown
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub(super) fn update(&mut self, core: &mut ActorCore, ctx: &UpdateContext<'_>) {
        let frame_ms = 1000.0 / ctx.config.animations.fps;
        self.frame_elapsed_ms += ctx.dt_ms;
        if self.frame_elapsed_ms < frame_ms {
            return;
        }

        self.frame_elapsed_ms = 0.0;
        self.frame += 1;
        match self.frames.get(self.frame) {
            Some(sprite) => core.sprite.clone_from(sprite),
            None => core.kill(),
        }
    }
}

impl Actor {
    /// An animation playing `frames` once, centered on `position`
    pub fn animation(config: &GameConfig, frames: &[String], position: Vec2, scale: f32) -> Result<Self, GameError> {
        let first = frames
            .first()
            .ok_or_else(|| GameError::InvalidSpawn("animation without frames".to_string()))?;
        let mut core = ActorCore::new(config, Layer::Animations, first, scale, 1.0, Body::new(position))?;
        core.spawned = true;
        Ok(Self {
            core,
            kind: ActorKind::Animation(AnimationState {
                frames: frames.to_vec(),
                frame: 0,
                frame_elapsed_ms: 0.0,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::testing::Fixture;

    #[test]
    fn test_plays_each_frame_then_ends() {
        let mut fixture = Fixture::new();
        let frames = fixture.config.animations.explosion.clone();
        let mut actor = Actor::animation(&fixture.config, &frames, Vec2::new(10.0, 10.0), 1.0).unwrap();
        assert_eq!(actor.core.sprite, "explosion00");

        // 20 fps: one frame every 50 ms
        actor.update(&mut fixture.ctx(50.0)).unwrap();
        assert_eq!(actor.core.sprite, "explosion01");
        actor.update(&mut fixture.ctx(25.0)).unwrap();
        assert_eq!(actor.core.sprite, "explosion01");
        actor.update(&mut fixture.ctx(25.0)).unwrap();
        actor.update(&mut fixture.ctx(50.0)).unwrap();
        assert_eq!(actor.core.sprite, "explosion03");
        assert!(!actor.core.is_removed());

        actor.update(&mut fixture.ctx(50.0)).unwrap();
        assert!(actor.core.is_removed());
    }

    #[test]
    fn test_empty_frames_rejected() {
        let config = GameConfig::default();
        let result = Actor::animation(&config, &[], Vec2::zeros(), 1.0);
        assert!(matches!(result, Err(GameError::InvalidSpawn(_))));
    }
}
