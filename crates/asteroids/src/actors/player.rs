//! Player ship: input-driven control and the death sequence
//!
//! `Alive` -> `Dying` once health drops to zero. While dying the ship
//! ignores input, spins and fades out; when the fade completes it is
//! removed and `PlayerDead` is posted. Respawning is the loop's job.

use arcade_engine::audio::SoundRequest;
use arcade_engine::foundation::math::Vec2;
use arcade_engine::input::Controls;
use arcade_engine::physics::Body;

use super::{motion, Actor, ActorCore, ActorKind, UpdateContext};
use crate::config::GameConfig;
use crate::error::{ActorError, GameError};
use crate::events::{GameEvent, ShotBulletInfo};
use crate::layer::Layer;

/// Lifecycle phase of the player ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerPhase {
    /// Flying and responding to input
    Alive,
    /// Playing the death animation
    Dying {
        /// Time spent dying so far
        elapsed_ms: f32,
    },
}

/// Player-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    /// Remaining respawns
    pub lives: i32,
    /// Weapon tier, index into the configured bullets
    pub laser_level: usize,
    cooldown_ms: f32,
    hit_flash_ms: f32,
    thrusting: bool,
    phase: PlayerPhase,
}

impl PlayerState {
    /// Fresh state with full weapon reset
    pub fn new(lives: i32) -> Self {
        Self {
            lives,
            laser_level: 0,
            cooldown_ms: 0.0,
            hit_flash_ms: 0.0,
            thrusting: false,
            phase: PlayerPhase::Alive,
        }
    }

    /// Current lifecycle phase
    pub fn phase(&self) -> PlayerPhase {
        self.phase
    }

    /// Whether the ship is in its death sequence
    pub fn is_dying(&self) -> bool {
        matches!(self.phase, PlayerPhase::Dying { .. })
    }

    /// Whether the thrust loop is playing for this ship
    pub fn is_thrusting(&self) -> bool {
        self.thrusting
    }

    /// Time until the next shot is allowed
    pub fn cooldown_ms(&self) -> f32 {
        self.cooldown_ms
    }

    /// Remaining hit flash
    pub fn hit_flash_ms(&self) -> f32 {
        self.hit_flash_ms
    }

    /// Start the hit flash
    pub fn flash(&mut self, duration_ms: f32) {
        self.hit_flash_ms = duration_ms;
    }

    /// Raise the weapon tier, capped at `max_level`
    pub fn upgrade_laser(&mut self, max_level: usize) {
        self.laser_level = (self.laser_level + 1).min(max_level);
    }

    pub(super) fn update(&mut self, core: &mut ActorCore, ctx: &mut UpdateContext<'_>) -> Result<(), ActorError> {
        if let PlayerPhase::Dying { elapsed_ms } = &mut self.phase {
            let config = &ctx.config.player;
            *elapsed_ms += ctx.dt_ms;
            core.body.rotate_ccw(config.death_spin_deg_per_s * ctx.dt_ms / 1000.0);
            core.alpha = (1.0 - *elapsed_ms / config.death_duration_ms).clamp(0.0, 1.0);

            if *elapsed_ms >= config.death_duration_ms {
                log::info!("Player removed with {} lives left", self.lives);
                core.kill();
                ctx.events.post(GameEvent::PlayerDead { lives: self.lives });
            }
            return Ok(());
        }

        if core.is_dead() {
            return self.start_dying(core, ctx);
        }

        self.handle_input(core, ctx)?;

        self.cooldown_ms = (self.cooldown_ms - ctx.dt_ms).max(0.0);
        self.hit_flash_ms = (self.hit_flash_ms - ctx.dt_ms).max(0.0);
        core.alpha = if self.hit_flash_ms > 0.0 {
            ctx.config.player.hit_flash_alpha
        } else {
            1.0
        };

        motion::step(core, ctx, "player")?;
        motion::enforce_bounds(core, ctx, false);
        Ok(())
    }

    fn handle_input(&mut self, core: &mut ActorCore, ctx: &mut UpdateContext<'_>) -> Result<(), ActorError> {
        let config = ctx.config;
        let input = ctx.input;
        let player = &config.player;

        if input.pressed(Controls::ROTATE_RIGHT) {
            core.body.rotate_cw(player.angular_speed);
        }
        if input.pressed(Controls::ROTATE_LEFT) {
            core.body.rotate_ccw(player.angular_speed);
        }
        if input.pressed(Controls::REVERSE) {
            core.body.thrust = -player.thrust;
        }

        if input.pressed(Controls::THRUST) {
            core.body.thrust = player.thrust;
            ctx.sounds.play(&SoundRequest::unique_loop(config.sounds.thrust.as_str()))?;
            self.thrusting = true;
        } else if self.thrusting {
            ctx.sounds.stop(&config.sounds.thrust, true)?;
            self.thrusting = false;
        }

        if input.pressed(Controls::RECENTER) {
            core.body.position = config.center();
            core.body.velocity = Vec2::zeros();
        }

        if input.pressed(Controls::FIRE) && self.cooldown_ms <= 0.0 {
            let bullet = player
                .bullets
                .get(self.laser_level)
                .ok_or(ActorError::UnknownBulletLevel(self.laser_level))?;
            ctx.events.post(GameEvent::ShotBullet(ShotBulletInfo {
                position: core.body.position,
                bullet: bullet.clone(),
                angle: core.body.angle,
                layer: Layer::Bullets,
            }));
            self.cooldown_ms = bullet.cooldown_ms;
        }

        Ok(())
    }

    fn start_dying(&mut self, core: &mut ActorCore, ctx: &mut UpdateContext<'_>) -> Result<(), ActorError> {
        log::info!("Player destroyed");
        self.phase = PlayerPhase::Dying { elapsed_ms: 0.0 };
        core.active = false;
        core.body.thrust = 0.0;

        if self.thrusting {
            ctx.sounds.stop(&ctx.config.sounds.thrust, true)?;
            self.thrusting = false;
        }
        ctx.sounds.play(&SoundRequest::once(ctx.config.sounds.player_die.as_str()))?;
        Ok(())
    }
}

impl Actor {
    /// A fresh player ship at full health
    pub fn player(config: &GameConfig, position: Vec2, lives: i32) -> Result<Self, GameError> {
        let settings = &config.player;
        let body = Body::new(position).with_max_velocity(settings.max_velocity);
        let mut core = ActorCore::new(config, Layer::Players, &settings.sprite, settings.scale, settings.health, body)?;
        core.spawned = true;
        Ok(Self {
            core,
            kind: ActorKind::Player(PlayerState::new(lives)),
        })
    }
}
