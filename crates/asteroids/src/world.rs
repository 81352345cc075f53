//! Actor storage
//!
//! All actors live in one slot map keyed by [`ActorId`]; each actor's layer
//! is fixed at construction, so the per-layer views below are the layer
//! collections. Removal is mark-and-sweep: [`ActorCore::kill`] marks, and
//! [`World::sweep`] removes after the pass that marked.
//!
//! [`ActorCore::kill`]: crate::actors::ActorCore::kill

use arcade_engine::foundation::collections::{new_key_type, snapshot_keys, sweep, SlotMap};

use crate::actors::{Actor, ActorKind, AsteroidSize, PlayerState};
use crate::layer::Layer;

new_key_type! {
    /// Handle to an actor
    pub struct ActorId;
}

/// Every live actor
#[derive(Debug, Default)]
pub struct World {
    actors: SlotMap<ActorId, Actor>,
}

impl World {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an actor
    pub fn insert(&mut self, actor: Actor) -> ActorId {
        self.actors.insert(actor)
    }

    /// Look up an actor
    pub fn get(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id)
    }

    /// Look up an actor mutably
    pub fn get_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id)
    }

    /// Number of stored actors, marked ones included
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the world is empty
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Ids of every actor, collected up front so the world can change while
    /// they are walked
    pub fn ids(&self) -> Vec<ActorId> {
        snapshot_keys(&self.actors)
    }

    /// Ids of the live actors on `layer`
    pub fn ids_in(&self, layer: Layer) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|(_, actor)| actor.core.layer() == layer && !actor.core.is_removed())
            .map(|(id, _)| id)
            .collect()
    }

    /// Live actors on `layer`
    pub fn iter_layer(&self, layer: Layer) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors
            .iter()
            .filter(move |(_, actor)| actor.core.layer() == layer && !actor.core.is_removed())
    }

    /// Every stored actor
    pub fn iter(&self) -> impl Iterator<Item = (ActorId, &Actor)> {
        self.actors.iter()
    }

    /// Number of live actors on `layer`
    pub fn count_in(&self, layer: Layer) -> usize {
        self.iter_layer(layer).count()
    }

    /// Number of live big asteroids
    pub fn big_asteroid_count(&self) -> usize {
        self.iter_layer(Layer::Asteroids)
            .filter(|(_, actor)| actor.as_asteroid().is_some_and(|a| a.size == AsteroidSize::Big))
            .count()
    }

    /// The player ship, dying or not
    pub fn player(&self) -> Option<(ActorId, &Actor)> {
        self.iter_layer(Layer::Players).next()
    }

    /// Player state of the ship, dying or not
    pub fn player_state(&self) -> Option<&PlayerState> {
        self.player().and_then(|(_, actor)| actor.as_player())
    }

    /// The player ship while it is active
    pub fn active_player(&self) -> Option<(ActorId, &Actor)> {
        self.player().filter(|(_, actor)| actor.core.active)
    }

    /// The player ship, mutably
    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.actors
            .values_mut()
            .find(|actor| matches!(actor.kind, ActorKind::Player(_)) && !actor.core.is_removed())
    }

    /// Remove every actor marked for removal and hand them back
    pub fn sweep(&mut self) -> Vec<Actor> {
        sweep(&mut self.actors, |actor| actor.core.is_removed())
    }
}
