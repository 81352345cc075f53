//! Bullets fired by the player and by aliens

use arcade_engine::foundation::math::heading_vector;
use arcade_engine::physics::Body;

use super::{motion, Actor, ActorCore, ActorKind, UpdateContext};
use crate::config::GameConfig;
use crate::error::{ActorError, GameError};
use crate::events::ShotBulletInfo;

/// Bullet-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct BulletState {
    /// Remaining lifetime
    pub ttl_ms: f32,
    /// Health removed from whatever it hits
    pub damage: u32,
    /// Frames of the impact animation
    pub hit_sprites: Vec<String>,
}

impl BulletState {
    pub(super) fn update(&mut self, core: &mut ActorCore, ctx: &mut UpdateContext<'_>) -> Result<(), ActorError> {
        motion::step(core, ctx, "bullet")?;
        motion::enforce_bounds(core, ctx, self.ttl_ms <= 0.0);
        self.ttl_ms -= ctx.dt_ms;
        if self.ttl_ms <= 0.0 {
            core.kill();
        }
        Ok(())
    }
}

impl Actor {
    /// A bullet leaving `info.position` along `info.angle`
    pub fn bullet(config: &GameConfig, info: &ShotBulletInfo) -> Result<Self, GameError> {
        if !info.layer.is_bullet_layer() {
            return Err(GameError::InvalidSpawn(format!("bullet on layer {:?}", info.layer)));
        }

        let angle = info.angle.rem_euclid(360.0);
        let velocity = heading_vector(angle) * info.bullet.velocity;
        let body = Body::with_velocity(info.position, velocity).with_angle(angle);
        let core = ActorCore::new(config, info.layer, &info.bullet.sprite, info.bullet.scale, 1.0, body)?;

        Ok(Self {
            core,
            kind: ActorKind::Bullet(BulletState {
                ttl_ms: info.bullet.duration_ms,
                damage: info.bullet.damage,
                hit_sprites: info.bullet.hit_sprites.clone(),
            }),
        })
    }
}
