//! Procedural spawning of asteroids, aliens and power-ups
//!
//! The spawner owns the game's random source. Placement rules:
//! - edge spawns appear a fixed offset outside a random screen edge
//! - asteroids entering from an edge always drift inwards on that edge's axis
//! - aliens move straight inwards along the edge normal
//! - power-ups appear inside the screen, clear of a margin along each edge

use std::sync::Arc;

use arcade_engine::foundation::math::Vec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::actors::asteroid::AsteroidParams;
use crate::actors::{Actor, AsteroidSize};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::{SpawnAlienInfo, SpawnAsteroidInfo, SpawnPowerUpInfo};
use crate::layer::Layer;
use crate::world::{ActorId, World};

/// Screen edge used for off-screen spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Above the screen
    Top,
    /// Left of the screen
    Left,
    /// Right of the screen
    Right,
    /// Below the screen
    Bottom,
}

impl Edge {
    /// Every edge
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Left, Edge::Right, Edge::Bottom];

    /// Unit vector pointing from this edge into the screen
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(0.0, 1.0),
            Edge::Bottom => Vec2::new(0.0, -1.0),
            Edge::Left => Vec2::new(1.0, 0.0),
            Edge::Right => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Uniform value in `[min, max)`; tolerates `min >= max`
fn value_in_range(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    rng.gen::<f32>() * (max - min) + min
}

/// Creates actors from spawn requests
pub struct Spawner {
    config: Arc<GameConfig>,
    rng: StdRng,
}

impl Spawner {
    /// Create a spawner seeded from the config, or from entropy
    pub fn new(config: Arc<GameConfig>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create a spawner with an explicit random source
    pub fn with_rng(config: Arc<GameConfig>, rng: StdRng) -> Self {
        Self { config, rng }
    }

    /// Spawn an asteroid
    ///
    /// Big asteroids are dropped once `max_asteroids` big ones are live.
    /// Returns `Ok(None)` for a dropped request.
    pub fn spawn_asteroid(&mut self, world: &mut World, info: &SpawnAsteroidInfo) -> Result<Option<ActorId>, GameError> {
        let config = Arc::clone(&self.config);
        let settings = &config.asteroid;

        if info.size == AsteroidSize::Big && world.big_asteroid_count() >= settings.max_asteroids {
            log::debug!("Too many big asteroids on screen, dropping spawn");
            return Ok(None);
        }

        let max = settings.max_velocity;
        let min = settings.min_velocity;
        let mut x_range = (-max, max);
        let mut y_range = (-max, max);

        let position = match info.position {
            Some(position) => position,
            None => {
                let (position, edge) = self.random_border_location(0.0);
                match edge {
                    Edge::Top => y_range.0 = min,
                    Edge::Left => x_range.0 = min,
                    Edge::Right => x_range.1 = -min,
                    Edge::Bottom => y_range.1 = -min,
                }
                position
            }
        };

        let velocity = Vec2::new(
            value_in_range(&mut self.rng, x_range.0, x_range.1),
            value_in_range(&mut self.rng, y_range.0, y_range.1),
        );
        let angular_velocity =
            value_in_range(&mut self.rng, -settings.max_angular_velocity, settings.max_angular_velocity);

        let color = match info.color {
            Some(color) => color,
            None => *settings
                .colors()
                .choose(&mut self.rng)
                .ok_or_else(|| GameError::InvalidSpawn("no asteroid colors configured".to_string()))?,
        };
        let sprite = settings
            .sprites_for(color, info.size)
            .and_then(|sprites| sprites.choose(&mut self.rng))
            .ok_or_else(|| GameError::InvalidSpawn(format!("no sprite for {color} {} asteroid", info.size)))?
            .clone();

        let actor = Actor::asteroid(
            &config,
            AsteroidParams {
                sprite,
                size: info.size,
                color,
                position,
                velocity,
                angular_velocity,
            },
        )?;
        log::debug!(
            "Spawned {} {} asteroid at ({:.0}, {:.0})",
            info.size,
            color,
            position.x,
            position.y
        );
        Ok(Some(world.insert(actor)))
    }

    /// Maybe spawn an alien
    ///
    /// Skipped while any alien exists, or when the roll misses.
    pub fn spawn_alien(&mut self, world: &mut World, info: &SpawnAlienInfo) -> Result<Option<ActorId>, GameError> {
        if self.rng.gen::<f64>() > info.probability || world.count_in(Layer::Enemies) > 0 {
            return Ok(None);
        }

        let config = Arc::clone(&self.config);
        let (position, edge) = self.random_border_location(config.alien.edge_margin);
        let velocity = edge.inward() * config.alien.velocity;
        let actor = Actor::alien(&config, position, velocity)?;
        log::info!("Spawning alien at ({:.0}, {:.0}) from {:?}", position.x, position.y, edge);
        Ok(Some(world.insert(actor)))
    }

    /// Roll for each requested power-up kind and spawn the winners
    pub fn spawn_power_ups(&mut self, world: &mut World, info: &SpawnPowerUpInfo) -> Result<Vec<ActorId>, GameError> {
        let config = Arc::clone(&self.config);
        let settings = &config.power_up;
        let mut spawned = Vec::new();

        for &kind in &info.power_kinds {
            let kind_config = settings
                .kind(kind)
                .ok_or_else(|| GameError::InvalidSpawn(format!("power-up '{kind}' is not registered")))?;

            if self.rng.gen::<f64>() > kind_config.frequency {
                continue;
            }
            if !kind.can_spawn(world.player_state(), &config) {
                log::debug!("{kind} power-up refused to spawn");
                continue;
            }

            let (width, height) = (config.display.width, config.display.height);
            let margin_x = width * settings.spawn_margin;
            let margin_y = height * settings.spawn_margin;
            let position = Vec2::new(
                value_in_range(&mut self.rng, margin_x, width - margin_x),
                value_in_range(&mut self.rng, margin_y, height - margin_y),
            );
            let (min_s, max_s) = kind_config.duration_s;
            let duration_ms = self.rng.gen_range(min_s..=max_s) as f32 * 1000.0;

            let actor = Actor::power_up(&config, kind, position, duration_ms)?;
            log::debug!("Spawned {kind} power-up for {:.0} s", duration_ms / 1000.0);
            spawned.push(world.insert(actor));
        }
        Ok(spawned)
    }

    /// Pick one of the fragment options for an exploding asteroid
    pub fn choose_fragments(&mut self, size: AsteroidSize) -> Vec<AsteroidSize> {
        self.config
            .asteroid
            .fragments
            .get(size)
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }

    /// Random point just outside a random edge
    ///
    /// `edge_margin` is the fraction of the edge excluded at each end.
    pub fn random_border_location(&mut self, edge_margin: f32) -> (Vec2, Edge) {
        let config = &self.config;
        let (width, height) = (config.display.width, config.display.height);
        let offset = config.physics.spawn_offset;

        let edge = Edge::ALL[self.rng.gen_range(0..Edge::ALL.len())];
        let along_x = value_in_range(&mut self.rng, width * edge_margin, width * (1.0 - edge_margin));
        let along_y = value_in_range(&mut self.rng, height * edge_margin, height * (1.0 - edge_margin));

        let position = match edge {
            Edge::Top => Vec2::new(along_x, -offset),
            Edge::Left => Vec2::new(-offset, along_y),
            Edge::Right => Vec2::new(width + offset, along_y),
            Edge::Bottom => Vec2::new(along_x, height + offset),
        };
        (position, edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::{AsteroidColor, PowerUpKind};

    fn spawner(config: GameConfig) -> Spawner {
        Spawner::with_rng(Arc::new(config), StdRng::seed_from_u64(3))
    }

    #[test]
    fn test_edge_asteroids_drift_inwards() {
        let mut spawner = spawner(GameConfig::default());
        let mut world = World::new();
        for _ in 0..200 {
            let id = spawner
                .spawn_asteroid(&mut world, &SpawnAsteroidInfo::from_edge())
                .unwrap()
                .unwrap();
            let actor = world.get_mut(id).unwrap();
            let position = actor.position();
            let velocity = actor.core.body.velocity;
            if position.y < 0.0 {
                assert!(velocity.y >= 0.1);
            } else if position.x < 0.0 {
                assert!(velocity.x >= 0.1);
            } else if position.x > 1280.0 {
                assert!(velocity.x <= -0.1);
            } else {
                assert!(position.y > 720.0);
                assert!(velocity.y <= -0.1);
            }
            assert!(velocity.x.abs() <= 0.5 && velocity.y.abs() <= 0.5);
            // free the slot so the big-asteroid cap does not kick in
            actor.core.kill();
            world.sweep();
        }
    }

    #[test]
    fn test_fragment_keeps_position_and_color() {
        let mut spawner = spawner(GameConfig::default());
        let mut world = World::new();
        let info = SpawnAsteroidInfo::fragment(Vec2::new(300.0, 200.0), AsteroidSize::Small, AsteroidColor::Brown);
        let id = spawner.spawn_asteroid(&mut world, &info).unwrap().unwrap();
        let actor = world.get(id).unwrap();
        assert_eq!(actor.position(), Vec2::new(300.0, 200.0));
        let asteroid = actor.as_asteroid().unwrap();
        assert_eq!(asteroid.color, AsteroidColor::Brown);
        assert_eq!(asteroid.size, AsteroidSize::Small);
    }

    #[test]
    fn test_missing_sprite_set_is_invalid_spawn() {
        let mut config = GameConfig::default();
        config
            .asteroid
            .sprites
            .retain(|set| !(set.color == AsteroidColor::Grey && set.size == AsteroidSize::Medium));
        let mut spawner = spawner(config);
        let mut world = World::new();
        let info = SpawnAsteroidInfo::fragment(Vec2::zeros(), AsteroidSize::Medium, AsteroidColor::Grey);
        assert!(matches!(
            spawner.spawn_asteroid(&mut world, &info),
            Err(GameError::InvalidSpawn(_))
        ));
    }

    #[test]
    fn test_fragment_choice_is_a_declared_option() {
        let config = GameConfig::default();
        let options = config.asteroid.fragments.big.clone();
        let mut spawner = spawner(config);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            let fragments = spawner.choose_fragments(AsteroidSize::Big);
            let index = options.iter().position(|o| *o == fragments).unwrap();
            seen.insert(index);
        }
        assert_eq!(seen.len(), options.len());
        assert!(spawner.choose_fragments(AsteroidSize::Small).is_empty());
        assert_eq!(
            spawner.choose_fragments(AsteroidSize::Medium),
            vec![AsteroidSize::Small, AsteroidSize::Small]
        );
    }

    #[test]
    fn test_alien_enters_along_edge_normal() {
        let mut spawner = spawner(GameConfig::default());
        let mut world = World::new();
        let id = spawner
            .spawn_alien(&mut world, &SpawnAlienInfo { probability: 1.0 })
            .unwrap()
            .unwrap();
        let alien = world.get(id).unwrap();
        let velocity = alien.core.body.velocity;
        assert!((velocity.x == 0.0) != (velocity.y == 0.0));
        assert!((velocity.magnitude() - 0.2).abs() < 1e-6);

        let position = alien.position();
        let along = if velocity.x == 0.0 { position.x / 1280.0 } else { position.y / 720.0 };
        assert!((0.2..=0.8).contains(&along));
    }

    #[test]
    fn test_zero_probability_alien_never_spawns() {
        let mut spawner = spawner(GameConfig::default());
        let mut world = World::new();
        for _ in 0..50 {
            assert!(spawner
                .spawn_alien(&mut world, &SpawnAlienInfo { probability: 0.0 })
                .unwrap()
                .is_none());
        }
    }

    #[test]
    fn test_power_ups_inside_margins() {
        let mut config = GameConfig::default();
        for kind in &mut config.power_up.kinds {
            kind.frequency = 1.0;
        }
        let mut spawner = spawner(config);
        let mut world = World::new();
        world.insert(Actor::player(&spawner.config, Vec2::new(640.0, 360.0), 3).unwrap());

        let info = SpawnPowerUpInfo { power_kinds: vec![PowerUpKind::Health, PowerUpKind::Laser] };
        let ids = spawner.spawn_power_ups(&mut world, &info).unwrap();
        assert_eq!(ids.len(), 2);
        for id in ids {
            let actor = world.get(id).unwrap();
            let p = actor.position();
            assert!((128.0..1152.0).contains(&p.x));
            assert!((72.0..648.0).contains(&p.y));
            let state = actor.as_power_up().unwrap();
            let range = match state.kind {
                PowerUpKind::Health => 20_000.0..=60_000.0,
                PowerUpKind::Laser => 10_000.0..=20_000.0,
            };
            assert!(range.contains(&state.duration_ms));
        }
    }

    #[test]
    fn test_laser_refused_without_player() {
        let mut config = GameConfig::default();
        for kind in &mut config.power_up.kinds {
            kind.frequency = 1.0;
        }
        let mut spawner = spawner(config);
        let mut world = World::new();
        let info = SpawnPowerUpInfo { power_kinds: vec![PowerUpKind::Laser] };
        assert!(spawner.spawn_power_ups(&mut world, &info).unwrap().is_empty());
    }
}
