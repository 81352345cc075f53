//! Alien saucer: drifts in from an edge, spins, and shoots at the player

use arcade_engine::audio::SoundRequest;
use arcade_engine::foundation::math::Vec2;
use arcade_engine::physics::Body;

use super::{motion, Actor, ActorCore, ActorKind, UpdateContext};
use crate::config::GameConfig;
use crate::error::{ActorError, GameError};
use crate::events::{GameEvent, ShotBulletInfo};
use crate::layer::Layer;

/// Substitute for a zero aim component
const AIM_EPSILON: f32 = 1e-6;

/// Heading in degrees that points from `from` towards `to`
///
/// Zero components of the offset are replaced by a small epsilon, and the
/// quadrant is picked from the relative vertical position.
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let mut d = from - to;
    if d.x == 0.0 {
        d.x = AIM_EPSILON;
    }
    if d.y == 0.0 {
        d.y = AIM_EPSILON;
    }

    let angle = (d.x / d.y).atan().to_degrees();
    if from.y >= to.y {
        angle
    } else {
        180.0 + angle
    }
}

/// Alien-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct AlienState {
    cooldown_ms: f32,
    ttl_ms: f32,
    dying: bool,
}

impl AlienState {
    /// Whether the alien is fading out
    pub fn is_dying(&self) -> bool {
        self.dying
    }

    /// Time until the next shot
    pub fn cooldown_ms(&self) -> f32 {
        self.cooldown_ms
    }

    /// Begin the death fade: stop moving and leave gameplay
    pub fn start_dying(&mut self, core: &mut ActorCore) {
        self.dying = true;
        core.active = false;
        core.body.velocity = Vec2::zeros();
        core.body.thrust = 0.0;
    }

    pub(super) fn update(&mut self, core: &mut ActorCore, ctx: &mut UpdateContext<'_>) -> Result<(), ActorError> {
        let config = ctx.config;
        let alien = &config.alien;

        if self.dying {
            core.body.rotate_ccw(alien.death_spin_deg_per_s * ctx.dt_ms / 1000.0);
            core.alpha *= alien.death_fade;
            if core.alpha < alien.death_min_alpha {
                core.kill();
            }
            return Ok(());
        }

        ctx.sounds.play(&SoundRequest::unique_loop(config.sounds.alien_hum.as_str()))?;

        motion::step(core, ctx, "alien")?;
        motion::enforce_bounds(core, ctx, self.ttl_ms < 0.0);
        self.ttl_ms -= ctx.dt_ms;
        core.body.rotate_cw(alien.angular_speed);

        self.cooldown_ms = (self.cooldown_ms - ctx.dt_ms).max(0.0);

        let Some(target) = ctx.target else {
            return Ok(());
        };

        if self.cooldown_ms <= 0.0 && core.spawned {
            ctx.events.post(GameEvent::ShotBullet(ShotBulletInfo {
                position: core.body.position,
                bullet: alien.bullet.clone(),
                angle: aim_angle(core.body.position, target),
                layer: Layer::EnemyBullets,
            }));
            self.cooldown_ms = alien.bullet.cooldown_ms;
        }
        Ok(())
    }
}

impl Actor {
    /// An alien entering from outside the screen
    pub fn alien(config: &GameConfig, position: Vec2, velocity: Vec2) -> Result<Self, GameError> {
        let settings = &config.alien;
        let body = Body::with_velocity(position, velocity);
        let core = ActorCore::new(config, Layer::Enemies, &settings.sprite, settings.scale, settings.health, body)?;
        Ok(Self {
            core,
            kind: ActorKind::Alien(AlienState {
                cooldown_ms: settings.bullet.cooldown_ms,
                ttl_ms: settings.ttl_ms,
                dying: false,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::testing::Fixture;
    use arcade_engine::foundation::math::heading_vector;
    use approx::assert_relative_eq;

    #[test]
    fn test_aim_straight_down_and_up() {
        // alien above the player: shoot down
        assert_relative_eq!(aim_angle(Vec2::new(100.0, 0.0), Vec2::new(100.0, 300.0)), 180.0, epsilon = 1e-3);
        // alien below the player: shoot up
        assert_relative_eq!(aim_angle(Vec2::new(100.0, 300.0), Vec2::new(100.0, 0.0)), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_aim_points_at_target() {
        let cases = [
            (Vec2::new(0.0, 0.0), Vec2::new(300.0, 400.0)),
            (Vec2::new(500.0, 500.0), Vec2::new(100.0, 200.0)),
            (Vec2::new(50.0, 600.0), Vec2::new(700.0, 100.0)),
            (Vec2::new(900.0, 100.0), Vec2::new(200.0, 650.0)),
        ];
        for (from, to) in cases {
            let heading = heading_vector(aim_angle(from, to));
            let wanted = (to - from).normalize();
            assert_relative_eq!(heading.x, wanted.x, epsilon = 1e-4);
            assert_relative_eq!(heading.y, wanted.y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_aim_same_row_is_finite() {
        let angle = aim_angle(Vec2::new(300.0, 200.0), Vec2::new(100.0, 200.0));
        assert!(angle.is_finite());
        let coincident = aim_angle(Vec2::new(10.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(coincident.is_finite());
    }

    #[test]
    fn test_no_fire_without_target_or_before_spawned() {
        let mut fixture = Fixture::new();
        let mut actor = Actor::alien(&fixture.config, Vec2::new(640.0, -100.0), Vec2::zeros()).unwrap();
        fixture.target = Some(Vec2::new(640.0, 360.0));
        for _ in 0..100 {
            actor.update(&mut fixture.ctx(16.0)).unwrap();
        }
        assert!(!actor.core.spawned);
        assert!(fixture.drain().is_empty());

        let mut actor = Actor::alien(&fixture.config, Vec2::new(640.0, 100.0), Vec2::zeros()).unwrap();
        fixture.target = None;
        for _ in 0..100 {
            actor.update(&mut fixture.ctx(16.0)).unwrap();
        }
        assert!(actor.core.spawned);
        assert!(fixture.drain().is_empty());
    }

    #[test]
    fn test_fires_at_player_on_cooldown() {
        let mut fixture = Fixture::new();
        fixture.target = Some(Vec2::new(640.0, 600.0));
        let mut actor = Actor::alien(&fixture.config, Vec2::new(640.0, 100.0), Vec2::zeros()).unwrap();

        // 1000 ms cooldown runs out on the 63rd tick of 16 ms
        for _ in 0..62 {
            actor.update(&mut fixture.ctx(16.0)).unwrap();
        }
        assert!(fixture.drain().is_empty());
        actor.update(&mut fixture.ctx(16.0)).unwrap();

        match fixture.drain().as_slice() {
            [GameEvent::ShotBullet(info)] => {
                assert_eq!(info.layer, Layer::EnemyBullets);
                assert_relative_eq!(info.angle, 180.0, epsilon = 1e-3);
                assert_eq!(info.bullet.damage, 10);
            }
            other => panic!("unexpected events {other:?}"),
        }
        assert!(fixture.sounds.is_playing("spaceEngineLow_003"));
    }

    #[test]
    fn test_death_fade_removes_alien() {
        let mut fixture = Fixture::new();
        let mut actor = Actor::alien(&fixture.config, Vec2::new(640.0, 100.0), Vec2::new(0.2, 0.0)).unwrap();
        if let ActorKind::Alien(alien) = &mut actor.kind {
            alien.start_dying(&mut actor.core);
        }
        assert!(!actor.core.active);

        let mut ticks = 0;
        while !actor.core.is_removed() {
            actor.update(&mut fixture.ctx(16.0)).unwrap();
            assert_eq!(actor.core.body.velocity, Vec2::zeros());
            ticks += 1;
        }
        // 0.96^n < 0.2 first holds at n = 40
        assert_eq!(ticks, 40);
    }
}
