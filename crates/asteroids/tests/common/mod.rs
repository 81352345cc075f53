//! Shared helpers for the integration tests

#![allow(dead_code)]

use arcade_engine::foundation::math::Vec2;
use asteroids::actors::asteroid::AsteroidParams;
use asteroids::events::ShotBulletInfo;
use asteroids::{Actor, ActorId, AsteroidColor, AsteroidSize, Game, GameConfig, Layer};

/// One 60 Hz tick
pub const DT: f32 = 1000.0 / 60.0;

/// Default config with a fixed seed and spawn timers that never fire
pub fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.seed = Some(1234);
    config.asteroid.spawn_interval_ms = 1.0e9;
    config.alien.spawn_interval_ms = 1.0e9;
    config.alien.spawn_probability = 0.0;
    config.power_up.spawn_interval_ms = 1.0e9;
    config
}

pub fn quiet_game() -> Game {
    Game::headless(quiet_config()).unwrap()
}

/// A motionless asteroid
pub fn place_asteroid(game: &mut Game, size: AsteroidSize, position: Vec2) -> ActorId {
    let config = game.config().clone();
    let color = AsteroidColor::Grey;
    let sprite = config.asteroid.sprites_for(color, size).unwrap()[0].clone();
    let actor = Actor::asteroid(
        &config,
        AsteroidParams {
            sprite,
            size,
            color,
            position,
            velocity: Vec2::zeros(),
            angular_velocity: 0.0,
        },
    )
    .unwrap();
    game.world_mut().insert(actor)
}

/// A lowest-tier player bullet heading up from `position`
pub fn place_player_bullet(game: &mut Game, position: Vec2) -> ActorId {
    let config = game.config().clone();
    let info = ShotBulletInfo {
        position,
        bullet: config.player.bullets[0].clone(),
        angle: 0.0,
        layer: Layer::Bullets,
    };
    let actor = Actor::bullet(&config, &info).unwrap();
    game.world_mut().insert(actor)
}

pub fn asteroid_sizes(game: &Game) -> Vec<AsteroidSize> {
    let mut sizes: Vec<_> = game
        .world()
        .iter_layer(Layer::Asteroids)
        .filter_map(|(_, actor)| actor.as_asteroid().map(|a| a.size))
        .collect();
    sizes.sort_by_key(|size| *size as u8);
    sizes
}

/// Drive the player's health to zero
pub fn kill_player(game: &mut Game) {
    let player = game.world_mut().player_mut().unwrap();
    let health = player.core.health();
    player.core.hit(health);
}
