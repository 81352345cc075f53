//! Actors: every simulated body in the game
//!
//! An [`Actor`] is a shared [`ActorCore`] record plus an [`ActorKind`]
//! carrying the per-kind state and behavior. Motion shared by all kinds
//! lives in [`motion`] and is called from each kind's update.

pub mod alien;
pub mod animation;
pub mod asteroid;
pub mod bullet;
pub mod motion;
pub mod player;
pub mod power_up;

#[cfg(test)]
pub(crate) mod testing;

use arcade_engine::audio::{AudioError, SoundManager};
use arcade_engine::foundation::math::{Rect, Vec2};
use arcade_engine::input::InputState;
use arcade_engine::physics::{BoundingCircle, Body, WrapPolicy};
use arcade_engine::render::RenderItem;

use crate::config::GameConfig;
use crate::error::{ActorError, GameError};
use crate::events::GameEvents;
use crate::layer::Layer;

pub use alien::AlienState;
pub use animation::AnimationState;
pub use asteroid::{AsteroidColor, AsteroidSize, AsteroidState};
pub use bullet::BulletState;
pub use player::{PlayerPhase, PlayerState};
pub use power_up::{PowerUpKind, PowerUpState};

/// Everything an actor may read or post during its update
pub struct UpdateContext<'a> {
    /// Tick length in milliseconds
    pub dt_ms: f32,
    /// Simulated time at the end of this tick
    pub now_ms: f64,
    /// Game configuration
    pub config: &'a GameConfig,
    /// Controls held this tick
    pub input: &'a InputState,
    /// Position of the active player, if any
    pub target: Option<Vec2>,
    /// Screen-wrap rules
    pub wrap: &'a WrapPolicy,
    /// Event queue for follow-up work
    pub events: &'a mut GameEvents,
    /// Sound service
    pub sounds: &'a mut SoundManager,
}

/// State shared by every actor
#[derive(Debug, Clone, PartialEq)]
pub struct ActorCore {
    /// Kinematics
    pub body: Body,
    /// False once a death sequence started; excluded from collisions
    pub active: bool,
    /// True once the actor has been inside the viewport
    pub spawned: bool,
    /// Opacity in `[0, 1]`
    pub alpha: f32,
    /// Sprite currently shown
    pub sprite: String,
    /// Simulated time of the last screen-wrap teleport
    pub last_teleport_ms: Option<f64>,
    layer: Layer,
    extent: Vec2,
    hitbox_radius: f32,
    health: f32,
    max_health: f32,
    removed: bool,
}

impl ActorCore {
    /// Build the shared record for a sprite drawn at `scale`
    ///
    /// The hitbox radius is derived here from the scaled sprite width and
    /// never changes afterwards.
    pub fn new(
        config: &GameConfig,
        layer: Layer,
        sprite: &str,
        scale: f32,
        health: f32,
        body: Body,
    ) -> Result<Self, GameError> {
        let size = config.sprite_size(sprite)?;
        let extent = Vec2::new(size.width * scale, size.height * scale);
        Ok(Self {
            body,
            active: true,
            spawned: false,
            alpha: 1.0,
            sprite: sprite.to_string(),
            last_teleport_ms: None,
            layer,
            extent,
            hitbox_radius: extent.x * config.physics.hitbox_ratio / 2.0,
            health,
            max_health: health,
            removed: false,
        })
    }

    /// Layer this actor belongs to
    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Collision radius
    pub fn hitbox_radius(&self) -> f32 {
        self.hitbox_radius
    }

    /// Current health
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Health ceiling
    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Whether health dropped to zero or below
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage; returns true when this hit is the one that killed it
    pub fn hit(&mut self, damage: f32) -> bool {
        let was_alive = !self.is_dead();
        self.health -= damage;
        was_alive && self.is_dead()
    }

    /// Restore health up to the ceiling
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Mark for removal at the next sweep
    pub fn kill(&mut self) {
        self.removed = true;
    }

    /// Whether the actor is waiting to be swept
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Whether the actor takes part in collisions
    pub fn is_interactive(&self) -> bool {
        self.active && !self.removed
    }

    /// Scaled sprite size
    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    /// Rotated sprite bounds, centered on the position
    pub fn bounds(&self) -> Rect {
        self.body.bounds(self.extent.x, self.extent.y)
    }

    /// Collision circle
    pub fn circle(&self) -> BoundingCircle {
        BoundingCircle::new(self.body.position, self.hitbox_radius)
    }
}

/// Per-kind state
#[derive(Debug, Clone, PartialEq)]
pub enum ActorKind {
    /// The player ship
    Player(PlayerState),
    /// An asteroid
    Asteroid(AsteroidState),
    /// An alien saucer
    Alien(AlienState),
    /// A shot
    Bullet(BulletState),
    /// A collectable power-up
    PowerUp(PowerUpState),
    /// A one-shot animation
    Animation(AnimationState),
}

/// A simulated body
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    /// Shared state
    pub core: ActorCore,
    /// Kind-specific state
    pub kind: ActorKind,
}

impl Actor {
    /// Run one tick of this actor's behavior
    pub fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), ActorError> {
        match &mut self.kind {
            ActorKind::Player(player) => player.update(&mut self.core, ctx),
            ActorKind::Asteroid(asteroid) => asteroid.update(&mut self.core, ctx),
            ActorKind::Alien(alien) => alien.update(&mut self.core, ctx),
            ActorKind::Bullet(bullet) => bullet.update(&mut self.core, ctx),
            ActorKind::PowerUp(power_up) => {
                power_up.update(&mut self.core, ctx);
                Ok(())
            }
            ActorKind::Animation(animation) => {
                animation.update(&mut self.core, ctx);
                Ok(())
            }
        }
    }

    /// Stop any looping sound owned by this actor; called once it is swept
    pub fn release(&self, sounds: &mut SoundManager, config: &GameConfig) -> Result<(), AudioError> {
        match &self.kind {
            ActorKind::Player(player) if player.is_thrusting() => {
                sounds.stop(&config.sounds.thrust, true)
            }
            ActorKind::Alien(alien) if !alien.is_dying() => sounds.stop(&config.sounds.alien_hum, false),
            _ => Ok(()),
        }
    }

    /// Short kind name for logs
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            ActorKind::Player(_) => "player",
            ActorKind::Asteroid(_) => "asteroid",
            ActorKind::Alien(_) => "alien",
            ActorKind::Bullet(_) => "bullet",
            ActorKind::PowerUp(_) => "power-up",
            ActorKind::Animation(_) => "animation",
        }
    }

    /// Center position
    pub fn position(&self) -> Vec2 {
        self.core.body.position
    }

    /// What the render service draws for this actor
    pub fn render_item(&self) -> RenderItem {
        RenderItem {
            sprite: self.core.sprite.clone(),
            position: self.core.body.position,
            rotation: self.core.body.angle,
            opacity: self.core.alpha,
            depth: self.core.layer.depth(),
        }
    }

    /// Player state, if this is the player
    pub fn as_player(&self) -> Option<&PlayerState> {
        match &self.kind {
            ActorKind::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Mutable player state, if this is the player
    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.kind {
            ActorKind::Player(player) => Some(player),
            _ => None,
        }
    }

    /// Asteroid state, if this is an asteroid
    pub fn as_asteroid(&self) -> Option<&AsteroidState> {
        match &self.kind {
            ActorKind::Asteroid(asteroid) => Some(asteroid),
            _ => None,
        }
    }

    /// Alien state, if this is an alien
    pub fn as_alien(&self) -> Option<&AlienState> {
        match &self.kind {
            ActorKind::Alien(alien) => Some(alien),
            _ => None,
        }
    }

    /// Bullet state, if this is a bullet
    pub fn as_bullet(&self) -> Option<&BulletState> {
        match &self.kind {
            ActorKind::Bullet(bullet) => Some(bullet),
            _ => None,
        }
    }

    /// Power-up state, if this is a power-up
    pub fn as_power_up(&self) -> Option<&PowerUpState> {
        match &self.kind {
            ActorKind::PowerUp(power_up) => Some(power_up),
            _ => None,
        }
    }
}
