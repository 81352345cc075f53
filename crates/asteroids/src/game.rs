//! The game loop
//!
//! One [`Game::tick`] is one full pass of the simulation:
//!
//! 1. read the control snapshot (quit, pause, debug spawn)
//! 2. advance spawn timers, which post spawn events
//! 3. update every actor over a snapshot of ids
//! 4. resolve collisions and add the score they earned
//! 5. sweep actors marked for removal
//! 6. drain the event queue, follow-up events included
//! 7. hand the frame to the render sink and the status to the HUD
//!
//! While paused only step 7 runs.

use std::sync::Arc;

use arcade_engine::audio::SoundRequest;
use arcade_engine::foundation::time::{FrameClock, RepeatingTimer};
use arcade_engine::input::{Controls, InputSource, InputState};
use arcade_engine::physics::WrapPolicy;
use arcade_engine::render::RenderQueue;

use crate::actors::{Actor, UpdateContext};
use crate::collision::{self, CollisionContext};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::{GameEvent, GameEvents, SpawnAlienInfo, SpawnAsteroidInfo, SpawnPowerUpInfo};
use crate::hud::HudSnapshot;
use crate::services::Services;
use crate::spawner::Spawner;
use crate::world::World;

/// Complete game state and the loop driving it
pub struct Game {
    config: Arc<GameConfig>,
    world: World,
    events: GameEvents,
    spawner: Spawner,
    asteroid_timer: RepeatingTimer,
    alien_timer: RepeatingTimer,
    power_up_timer: RepeatingTimer,
    services: Services,
    input: InputState,
    wrap: WrapPolicy,
    render_queue: RenderQueue,
    now_ms: f64,
    score: u32,
    score_delta: u32,
    lives: i32,
    paused: bool,
    running: bool,
    game_over: bool,
}

impl Game {
    /// Start a game with the player at the screen center
    pub fn new(config: Arc<GameConfig>, services: Services) -> Result<Self, GameError> {
        config.validate()?;

        let mut world = World::new();
        world.insert(Actor::player(&config, config.center(), config.player.lives)?);

        let wrap = WrapPolicy::new(
            config.display.width,
            config.display.height,
            config.physics.teleport_inset,
            config.physics.teleport_guard_ms,
        );
        log::info!(
            "Starting {} ({}x{}) with {} lives",
            config.display.title,
            config.display.width,
            config.display.height,
            config.player.lives
        );

        Ok(Self {
            spawner: Spawner::new(Arc::clone(&config)),
            asteroid_timer: RepeatingTimer::new(config.asteroid.spawn_interval_ms),
            alien_timer: RepeatingTimer::new(config.alien.spawn_interval_ms),
            power_up_timer: RepeatingTimer::new(config.power_up.spawn_interval_ms),
            lives: config.player.lives,
            world,
            events: GameEvents::new(),
            services,
            input: InputState::new(),
            wrap,
            render_queue: RenderQueue::new(),
            now_ms: 0.0,
            score: 0,
            score_delta: 0,
            paused: false,
            running: true,
            game_over: false,
            config,
        })
    }

    /// Start a game with silent audio and no display
    pub fn headless(config: GameConfig) -> Result<Self, GameError> {
        let services = Services::headless(&config);
        Self::new(Arc::new(config), services)
    }

    /// Advance the game by `dt_ms` with `held` controls down
    pub fn tick(&mut self, dt_ms: f32, held: Controls) -> Result<(), GameError> {
        self.input.update(held);

        if self.input.pressed(Controls::QUIT) {
            log::info!("Quit requested");
            self.running = false;
            return Ok(());
        }
        if self.input.just_pressed(Controls::PAUSE) {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }

        self.score_delta = 0;
        if !self.paused {
            self.simulate(dt_ms)?;
        }
        self.present();
        Ok(())
    }

    /// Tick until `max_ticks`, a quit request, or game over
    ///
    /// Returns the number of ticks run.
    pub fn run(&mut self, input: &mut dyn InputSource, clock: &mut FrameClock, max_ticks: u64) -> Result<u64, GameError> {
        let mut ticks = 0;
        while ticks < max_ticks && self.running && !self.game_over {
            let dt_ms = clock.tick();
            self.tick(dt_ms, input.poll())?;
            ticks += 1;
        }
        Ok(ticks)
    }

    fn simulate(&mut self, dt_ms: f32) -> Result<(), GameError> {
        self.now_ms += f64::from(dt_ms);
        self.services.sounds.update(dt_ms);

        self.fire_timers(dt_ms);
        self.update_actors(dt_ms);

        let mut ctx = CollisionContext {
            config: &self.config,
            events: &mut self.events,
            sounds: &mut self.services.sounds,
            spawner: &mut self.spawner,
        };
        self.score_delta = collision::resolve(&mut self.world, &mut ctx)?;
        self.score += self.score_delta;

        for actor in self.world.sweep() {
            actor.release(&mut self.services.sounds, &self.config)?;
        }
        self.dispatch_events()
    }

    fn fire_timers(&mut self, dt_ms: f32) {
        for _ in 0..self.asteroid_timer.advance(dt_ms) {
            self.events.post(GameEvent::SpawnAsteroid(SpawnAsteroidInfo::from_edge()));
        }
        for _ in 0..self.alien_timer.advance(dt_ms) {
            self.events.post(GameEvent::SpawnAlien(SpawnAlienInfo {
                probability: self.config.alien.spawn_probability,
            }));
        }
        for _ in 0..self.power_up_timer.advance(dt_ms) {
            let power_kinds = self.config.power_up.kinds.iter().map(|k| k.kind).collect();
            self.events.post(GameEvent::SpawnPowerUp(SpawnPowerUpInfo { power_kinds }));
        }
        if self.input.just_pressed(Controls::DEBUG_SPAWN) {
            self.events.post(GameEvent::SpawnAlien(SpawnAlienInfo { probability: 1.0 }));
        }
    }

    fn update_actors(&mut self, dt_ms: f32) {
        let target = self.world.active_player().map(|(_, player)| player.position());
        let mut ctx = UpdateContext {
            dt_ms,
            now_ms: self.now_ms,
            config: &self.config,
            input: &self.input,
            target,
            wrap: &self.wrap,
            events: &mut self.events,
            sounds: &mut self.services.sounds,
        };

        for id in self.world.ids() {
            let Some(actor) = self.world.get_mut(id) else {
                continue;
            };
            if actor.core.is_removed() {
                continue;
            }
            if let Err(err) = actor.update(&mut ctx) {
                log::error!("Removing {} after failed update: {}", actor.kind_name(), err);
                actor.core.kill();
            }
        }
    }

    fn dispatch_events(&mut self) -> Result<(), GameError> {
        let Self {
            config,
            world,
            events,
            spawner,
            services,
            lives,
            game_over,
            ..
        } = self;
        let config: &GameConfig = config;

        events.drain_with(|event, queue| -> Result<(), GameError> {
            match event {
                GameEvent::SpawnAsteroid(info) => {
                    spawner.spawn_asteroid(world, &info)?;
                }
                GameEvent::SpawnAlien(info) => {
                    spawner.spawn_alien(world, &info)?;
                }
                GameEvent::SpawnPowerUp(info) => {
                    spawner.spawn_power_ups(world, &info)?;
                }
                GameEvent::ShotBullet(info) => {
                    world.insert(Actor::bullet(config, &info)?);
                    services.sounds.play(&SoundRequest::once(info.bullet.sound.as_str()))?;
                }
                GameEvent::PlayerDead { lives: left } => {
                    *lives = left - 1;
                    if *lives < 0 {
                        queue.post(GameEvent::GameOver);
                    } else {
                        log::info!("Respawning player, {} lives left", *lives);
                        world.insert(Actor::player(config, config.center(), *lives)?);
                    }
                }
                GameEvent::GameOver => {
                    log::info!("Game over");
                    *game_over = true;
                }
            }
            Ok(())
        })?;
        Ok(())
    }

    fn present(&mut self) {
        for (_, actor) in self.world.iter() {
            self.render_queue.push(actor.render_item());
        }
        self.render_queue.submit(self.services.render.as_mut());

        let snapshot = self.hud_snapshot();
        self.services.hud.report(&snapshot);
    }

    /// Current score, health and lives
    pub fn hud_snapshot(&self) -> HudSnapshot {
        let player = self.world.player().map(|(_, actor)| actor);
        HudSnapshot {
            score: self.score,
            score_delta: self.score_delta,
            health: player.map_or(0.0, |p| p.core.health().max(0.0)),
            max_health: player.map_or(self.config.player.health, |p| p.core.max_health()),
            lives: self.lives,
            laser_level: player.and_then(Actor::as_player).map_or(0, |p| p.laser_level),
            game_over: self.game_over,
            paused: self.paused,
        }
    }

    /// Post an event to be handled at the end of the next simulated tick
    pub fn post(&mut self, event: GameEvent) {
        self.events.post(event);
    }

    /// Game configuration
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Actor storage
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Actor storage, mutably
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Sound bookkeeping
    pub fn sounds(&self) -> &arcade_engine::audio::SoundManager {
        &self.services.sounds
    }

    /// Total score
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lives left; negative once the game is over
    pub fn lives(&self) -> i32 {
        self.lives
    }

    /// Simulated time in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// False once quit was requested
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether every life is spent
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use arcade_engine::foundation::math::Vec2;
    use arcade_engine::input::ScriptedInput;

    const DT: f32 = 1000.0 / 60.0;

    fn quiet() -> GameConfig {
        let mut config = GameConfig::default();
        config.seed = Some(5);
        config.asteroid.spawn_interval_ms = 1.0e9;
        config.alien.spawn_interval_ms = 1.0e9;
        config.power_up.spawn_interval_ms = 1.0e9;
        config
    }

    #[test]
    fn test_starts_with_centered_player() {
        let game = Game::headless(quiet()).unwrap();
        let (_, player) = game.world().player().unwrap();
        assert_eq!(player.position(), Vec2::new(640.0, 360.0));
        assert_eq!(game.lives(), 3);
        assert!(game.is_running());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = quiet();
        config.player.sprite = "missing".to_string();
        assert!(matches!(Game::headless(config), Err(GameError::MissingAsset(_))));
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut game = Game::headless(quiet()).unwrap();
        game.tick(DT, Controls::PAUSE).unwrap();
        assert!(game.is_paused());
        let frozen = game.now_ms();

        for _ in 0..10 {
            game.tick(DT, Controls::THRUST).unwrap();
        }
        assert_eq!(game.now_ms(), frozen);
        let (_, player) = game.world().player().unwrap();
        assert_eq!(player.core.body.velocity, Vec2::zeros());

        game.tick(DT, Controls::PAUSE).unwrap();
        assert!(!game.is_paused());
        assert!(!game.hud_snapshot().paused);
    }

    #[test]
    fn test_quit_stops_run() {
        let mut game = Game::headless(quiet()).unwrap();
        let mut input = ScriptedInput::new(vec![Controls::empty(), Controls::empty(), Controls::QUIT]);
        let mut clock = FrameClock::fixed(60.0);
        let ticks = game.run(&mut input, &mut clock, 100).unwrap();
        assert_eq!(ticks, 3);
        assert!(!game.is_running());
    }

    #[test]
    fn test_fire_spawns_bullet_after_drain() {
        let mut game = Game::headless(quiet()).unwrap();
        game.tick(DT, Controls::FIRE).unwrap();
        assert_eq!(game.world().count_in(Layer::Bullets), 1);
        assert!(game.sounds().is_playing("sfx_laser2"));
    }

    #[test]
    fn test_debug_spawn_brings_alien() {
        let mut game = Game::headless(quiet()).unwrap();
        game.tick(DT, Controls::DEBUG_SPAWN).unwrap();
        assert_eq!(game.world().count_in(Layer::Enemies), 1);
        // held, not a new press
        game.tick(DT, Controls::DEBUG_SPAWN).unwrap();
        assert_eq!(game.world().count_in(Layer::Enemies), 1);
    }

    #[test]
    fn test_asteroid_timer_spawns_big_asteroids() {
        let mut config = quiet();
        config.asteroid.spawn_interval_ms = 100.0;
        let mut game = Game::headless(config).unwrap();
        for _ in 0..30 {
            game.tick(DT, Controls::empty()).unwrap();
        }
        // 500 ms of ticks; some may already have expired off-screen
        let big = game.world().big_asteroid_count();
        assert!((1..=5).contains(&big));
    }

    #[test]
    fn test_failing_actor_is_removed_and_others_continue() {
        let mut game = Game::headless(quiet()).unwrap();
        let config = game.config().clone();
        let alien = Actor::alien(&config, Vec2::new(100.0, 100.0), Vec2::new(0.2, 0.0)).unwrap();
        let alien = game.world_mut().insert(alien);
        game.world_mut().get_mut(alien).unwrap().core.body.velocity = Vec2::new(f32::NAN, 0.0);

        game.tick(DT, Controls::empty()).unwrap();
        assert!(game.world().get(alien).is_none());
        assert!(game.world().player().is_some());
        assert!(!game.sounds().is_playing(&config.sounds.alien_hum));
    }
}
