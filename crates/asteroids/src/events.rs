//! Game events
//!
//! Payloads are plain values: whoever posts an event hands over a copy and
//! keeps nothing that the handler could observe changing.

use arcade_engine::events::EventQueue;
use arcade_engine::foundation::math::Vec2;

use crate::actors::asteroid::{AsteroidColor, AsteroidSize};
use crate::actors::power_up::PowerUpKind;
use crate::config::BulletConfig;
use crate::layer::Layer;

/// Queue type shared by every producer in the game
pub type GameEvents = EventQueue<GameEvent>;

/// Everything the loop reacts to after the per-actor updates
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Create an asteroid
    SpawnAsteroid(SpawnAsteroidInfo),
    /// Maybe create an alien
    SpawnAlien(SpawnAlienInfo),
    /// Roll for each listed power-up kind
    SpawnPowerUp(SpawnPowerUpInfo),
    /// Create a bullet
    ShotBullet(ShotBulletInfo),
    /// The player finished dying; carries the lives it had left
    PlayerDead {
        /// Lives held by the player that died
        lives: i32,
    },
    /// No lives remain
    GameOver,
}

/// A shot fired by the player or an alien
#[derive(Debug, Clone, PartialEq)]
pub struct ShotBulletInfo {
    /// Muzzle position
    pub position: Vec2,
    /// Weapon used
    pub bullet: BulletConfig,
    /// Firing heading in degrees
    pub angle: f32,
    /// Bullet layer: `Bullets` for the player, `EnemyBullets` for aliens
    pub layer: Layer,
}

/// Asteroid spawn request
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnAsteroidInfo {
    /// Fixed position, or a random point just outside a screen edge
    pub position: Option<Vec2>,
    /// Size to create
    pub size: AsteroidSize,
    /// Fixed color, or a random one
    pub color: Option<AsteroidColor>,
}

impl SpawnAsteroidInfo {
    /// Big asteroid entering from a random edge
    pub fn from_edge() -> Self {
        Self {
            position: None,
            size: AsteroidSize::Big,
            color: None,
        }
    }

    /// Fragment of an exploded asteroid
    pub fn fragment(position: Vec2, size: AsteroidSize, color: AsteroidColor) -> Self {
        Self {
            position: Some(position),
            size,
            color: Some(color),
        }
    }
}

/// Alien spawn request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnAlienInfo {
    /// Chance that the request produces an alien
    pub probability: f64,
}

/// Power-up spawn request
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPowerUpInfo {
    /// Kinds to roll for, in order
    pub power_kinds: Vec<PowerUpKind>,
}
