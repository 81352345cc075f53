//! Actor layers

use serde::{Deserialize, Serialize};

/// Partition of actors deciding collision pairs and draw order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Asteroids of every size
    Asteroids,
    /// Player shots
    Bullets,
    /// The player ship
    Players,
    /// Alien shots
    EnemyBullets,
    /// Aliens
    Enemies,
    /// Collectable power-ups
    PowerUp,
    /// Hit and explosion animations; never collide
    Animations,
}

impl Layer {
    /// Every layer in draw order
    pub const ALL: [Layer; 7] = [
        Layer::Asteroids,
        Layer::Bullets,
        Layer::Players,
        Layer::EnemyBullets,
        Layer::Enemies,
        Layer::PowerUp,
        Layer::Animations,
    ];

    /// Draw depth; lower layers are drawn first
    pub fn depth(self) -> u8 {
        self as u8
    }

    /// Whether actors on this layer are shots
    pub fn is_bullet_layer(self) -> bool {
        matches!(self, Layer::Bullets | Layer::EnemyBullets)
    }
}
