//! Asteroids

use std::fmt;
use std::str::FromStr;

use arcade_engine::foundation::math::Vec2;
use arcade_engine::physics::Body;
use serde::{Deserialize, Serialize};

use super::{motion, Actor, ActorCore, ActorKind, UpdateContext};
use crate::config::GameConfig;
use crate::error::{ActorError, GameError};
use crate::layer::Layer;

/// Asteroid size categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsteroidSize {
    /// Large asteroid, splits into medium and small pieces
    Big,
    /// Medium asteroid, splits into small pieces
    Medium,
    /// Small asteroid, destroyed completely
    Small,
}

impl AsteroidSize {
    /// Every size, largest first
    pub const ALL: [AsteroidSize; 3] = [AsteroidSize::Big, AsteroidSize::Medium, AsteroidSize::Small];
}

impl fmt::Display for AsteroidSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AsteroidSize::Big => "big",
            AsteroidSize::Medium => "medium",
            AsteroidSize::Small => "small",
        })
    }
}

impl FromStr for AsteroidSize {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "big" => Ok(AsteroidSize::Big),
            "medium" | "med" => Ok(AsteroidSize::Medium),
            "small" => Ok(AsteroidSize::Small),
            other => Err(GameError::InvalidSpawn(format!("unknown asteroid size '{other}'"))),
        }
    }
}

/// Asteroid colors; cosmetic, also the sprite-set key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsteroidColor {
    /// Brown rock
    Brown,
    /// Grey rock
    Grey,
}

impl fmt::Display for AsteroidColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AsteroidColor::Brown => "brown",
            AsteroidColor::Grey => "grey",
        })
    }
}

impl FromStr for AsteroidColor {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "brown" => Ok(AsteroidColor::Brown),
            "grey" | "gray" => Ok(AsteroidColor::Grey),
            other => Err(GameError::InvalidSpawn(format!("unknown asteroid color '{other}'"))),
        }
    }
}

/// Asteroid-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidState {
    /// Size category
    pub size: AsteroidSize,
    /// Color, inherited by fragments
    pub color: AsteroidColor,
    /// Clockwise spin in degrees per tick; negative spins the other way
    pub angular_velocity: f32,
    /// Countdown to reach the screen before being dropped
    pub ttl_ms: f32,
}

impl AsteroidState {
    pub(super) fn update(&mut self, core: &mut ActorCore, ctx: &mut UpdateContext<'_>) -> Result<(), ActorError> {
        motion::step(core, ctx, "asteroid")?;
        core.body.rotate_cw(self.angular_velocity);
        motion::enforce_bounds(core, ctx, self.ttl_ms < 0.0);
        self.ttl_ms -= ctx.dt_ms;
        Ok(())
    }
}

/// Everything needed to place one asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidParams {
    /// Sprite id
    pub sprite: String,
    /// Size category
    pub size: AsteroidSize,
    /// Color
    pub color: AsteroidColor,
    /// Center position
    pub position: Vec2,
    /// Linear velocity
    pub velocity: Vec2,
    /// Clockwise spin in degrees per tick
    pub angular_velocity: f32,
}

impl Actor {
    /// An asteroid with health from the size table
    pub fn asteroid(config: &GameConfig, params: AsteroidParams) -> Result<Self, GameError> {
        let settings = &config.asteroid;
        let body = Body::with_velocity(params.position, params.velocity);
        let health = *settings.health.get(params.size);
        let core = ActorCore::new(config, Layer::Asteroids, &params.sprite, settings.scale, health, body)?;
        Ok(Self {
            core,
            kind: ActorKind::Asteroid(AsteroidState {
                size: params.size,
                color: params.color,
                angular_velocity: params.angular_velocity,
                ttl_ms: settings.ttl_ms,
            }),
        })
    }
}
