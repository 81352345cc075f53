//! Power-ups: stationary pickups with a limited lifetime

use std::fmt;
use std::str::FromStr;

use arcade_engine::foundation::math::Vec2;
use arcade_engine::physics::Body;
use serde::{Deserialize, Serialize};

use super::{Actor, ActorCore, ActorKind, PlayerState, UpdateContext};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::layer::Layer;

/// Power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Restores some health
    Health,
    /// Raises the weapon tier
    Laser,
}

impl fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PowerUpKind::Health => "health",
            PowerUpKind::Laser => "laser",
        })
    }
}

impl FromStr for PowerUpKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "health" => Ok(PowerUpKind::Health),
            "laser" => Ok(PowerUpKind::Laser),
            other => Err(GameError::InvalidSpawn(format!("unknown power-up '{other}'"))),
        }
    }
}

impl PowerUpKind {
    /// Whether this kind may appear given the current player
    ///
    /// The laser upgrade refuses to spawn without a player or when the
    /// player is already at the top tier.
    pub fn can_spawn(self, player: Option<&PlayerState>, config: &GameConfig) -> bool {
        match self {
            PowerUpKind::Health => true,
            PowerUpKind::Laser => {
                player.is_some_and(|p| p.laser_level < config.player.max_laser_level())
            }
        }
    }

    /// Apply the effect to the player
    pub fn activate(self, player_core: &mut ActorCore, player: &mut PlayerState, config: &GameConfig) {
        match self {
            PowerUpKind::Health => player_core.heal(config.power_up.health_amount),
            PowerUpKind::Laser => player.upgrade_laser(config.player.max_laser_level()),
        }
    }
}

/// Power-up-specific state
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpState {
    /// Effect on pickup
    pub kind: PowerUpKind,
    /// Time left before it disappears uncollected
    pub duration_ms: f32,
}

impl PowerUpState {
    pub(super) fn update(&mut self, core: &mut ActorCore, ctx: &UpdateContext<'_>) {
        self.duration_ms -= ctx.dt_ms;
        if self.duration_ms <= 0.0 {
            log::debug!("{} power-up expired", self.kind);
            core.kill();
        }
    }
}

impl Actor {
    /// A power-up of `kind` at `position`
    pub fn power_up(config: &GameConfig, kind: PowerUpKind, position: Vec2, duration_ms: f32) -> Result<Self, GameError> {
        let settings = config
            .power_up
            .kind(kind)
            .ok_or_else(|| GameError::InvalidSpawn(format!("power-up '{kind}' is not registered")))?;
        let mut core = ActorCore::new(config, Layer::PowerUp, &settings.sprite, 1.0, 1.0, Body::new(position))?;
        core.spawned = true;
        Ok(Self {
            core,
            kind: ActorKind::PowerUp(PowerUpState { kind, duration_ms }),
        })
    }
}
