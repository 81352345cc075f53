//! Collision resolution between layers
//!
//! Once per tick, after every actor moved, these layer pairs are tested with
//! a circle overlap on the hitbox radii:
//!
//! | Pass | Layers                     | Effect                                  |
//! |------|----------------------------|-----------------------------------------|
//! | 1    | `Bullets` x `Asteroids`    | damage, explosion, fragments, score     |
//! | 2    | `Bullets` x `Enemies`      | damage, death fade, score               |
//! | 3    | `Asteroids` x `Players`    | fixed contact damage per asteroid       |
//! | 4    | `EnemyBullets` x `Players` | bullet damage                           |
//! | 5    | `PowerUp` x `Players`      | effect applied, power-up removed        |
//!
//! Every pass runs; a hit in one never short-circuits another. Only actors
//! that are active and not marked for removal take part, so a bullet is
//! spent on the first target it touches.

use arcade_engine::audio::{SoundManager, SoundRequest};
use arcade_engine::foundation::math::Vec2;

use crate::actors::{Actor, ActorKind};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::{GameEvent, GameEvents, SpawnAsteroidInfo};
use crate::layer::Layer;
use crate::spawner::Spawner;
use crate::world::{ActorId, World};

/// Services the collision passes need besides the world
pub struct CollisionContext<'a> {
    /// Game configuration
    pub config: &'a GameConfig,
    /// Queue for fragment spawns
    pub events: &'a mut GameEvents,
    /// Sound service
    pub sounds: &'a mut SoundManager,
    /// Random source for fragment choice
    pub spawner: &'a mut Spawner,
}

/// Run every collision pass; returns the score earned this tick
pub fn resolve(world: &mut World, ctx: &mut CollisionContext<'_>) -> Result<u32, GameError> {
    let mut score = bullets_vs(world, ctx, Layer::Asteroids)?;
    score += bullets_vs(world, ctx, Layer::Enemies)?;
    asteroids_vs_player(world, ctx)?;
    enemy_bullets_vs_player(world, ctx)?;
    power_ups_vs_player(world, ctx)?;
    Ok(score)
}

/// Whether two live, interactive actors overlap
fn touching(world: &World, a: ActorId, b: ActorId) -> bool {
    match (world.get(a), world.get(b)) {
        (Some(a), Some(b)) => {
            a.core.is_interactive() && b.core.is_interactive() && a.core.circle().intersects(&b.core.circle())
        }
        _ => false,
    }
}

fn bullets_vs(world: &mut World, ctx: &mut CollisionContext<'_>, targets: Layer) -> Result<u32, GameError> {
    let mut score = 0;
    let target_ids = world.ids_in(targets);

    for bullet_id in world.ids_in(Layer::Bullets) {
        let Some(&target_id) = target_ids.iter().find(|&&target| touching(world, bullet_id, target)) else {
            continue;
        };
        let damage = spend_bullet(world, ctx, bullet_id)?;
        score += match targets {
            Layer::Enemies => alien_hit(world, ctx, target_id, damage)?,
            _ => asteroid_hit(world, ctx, target_id, damage)?,
        };
    }
    Ok(score)
}

/// Remove a bullet that hit something and play its impact animation
///
/// Returns the bullet's damage.
fn spend_bullet(world: &mut World, ctx: &mut CollisionContext<'_>, id: ActorId) -> Result<f32, GameError> {
    let Some(actor) = world.get_mut(id) else {
        return Ok(0.0);
    };
    actor.core.kill();
    let position = actor.position();
    let Some(bullet) = actor.as_bullet() else {
        return Ok(0.0);
    };
    let damage = bullet.damage as f32;
    let frames = bullet.hit_sprites.clone();

    if !frames.is_empty() {
        world.insert(Actor::animation(ctx.config, &frames, position, 1.0)?);
    }
    Ok(damage)
}

fn explosion(world: &mut World, config: &GameConfig, position: Vec2, scale: f32) -> Result<(), GameError> {
    world.insert(Actor::animation(config, &config.animations.explosion, position, scale)?);
    Ok(())
}

fn asteroid_hit(world: &mut World, ctx: &mut CollisionContext<'_>, id: ActorId, damage: f32) -> Result<u32, GameError> {
    let Some(actor) = world.get_mut(id) else {
        return Ok(0);
    };
    if !actor.core.hit(damage) {
        return Ok(0);
    }

    actor.core.active = false;
    actor.core.kill();
    let position = actor.position();
    let Some(asteroid) = actor.as_asteroid() else {
        return Ok(0);
    };
    let (size, color) = (asteroid.size, asteroid.color);

    let fragments = ctx.spawner.choose_fragments(size);
    log::debug!("{size} asteroid destroyed, {} fragments", fragments.len());
    for fragment in fragments {
        ctx.events
            .post(GameEvent::SpawnAsteroid(SpawnAsteroidInfo::fragment(position, fragment, color)));
    }

    let config = ctx.config;
    explosion(world, config, position, *config.animations.explosion_scale.get(size))?;
    ctx.sounds.play(&SoundRequest::once(config.sounds.explosion.as_str()))?;
    Ok(*config.asteroid.score.get(size))
}

fn alien_hit(world: &mut World, ctx: &mut CollisionContext<'_>, id: ActorId, damage: f32) -> Result<u32, GameError> {
    let Some(actor) = world.get_mut(id) else {
        return Ok(0);
    };
    if !actor.core.hit(damage) {
        return Ok(0);
    }

    let Actor { core, kind } = actor;
    let ActorKind::Alien(alien) = kind else {
        return Ok(0);
    };
    alien.start_dying(core);
    let position = core.body.position;
    log::info!("Alien destroyed");

    let config = ctx.config;
    ctx.sounds.stop(&config.sounds.alien_hum, false)?;
    ctx.sounds.play(&SoundRequest::once(config.sounds.alien_explosion.as_str()))?;
    explosion(world, config, position, config.animations.alien_explosion_scale)?;
    Ok(config.alien.score)
}

/// Damage the player and start its hit flash
fn hurt_player(world: &mut World, config: &GameConfig, id: ActorId, damage: f32) {
    if let Some(Actor {
        core,
        kind: ActorKind::Player(player),
    }) = world.get_mut(id)
    {
        core.hit(damage);
        player.flash(config.player.hit_flash_ms);
    }
}

fn asteroids_vs_player(world: &mut World, ctx: &mut CollisionContext<'_>) -> Result<(), GameError> {
    let Some((player_id, _)) = world.active_player() else {
        return Ok(());
    };
    let config = ctx.config;

    for asteroid_id in world.ids_in(Layer::Asteroids) {
        if touching(world, asteroid_id, player_id) {
            hurt_player(world, config, player_id, config.player.asteroid_damage);
            ctx.sounds.play(&SoundRequest {
                unique: true,
                ..SoundRequest::once(config.sounds.impact.as_str())
            })?;
        }
    }
    Ok(())
}

fn enemy_bullets_vs_player(world: &mut World, ctx: &mut CollisionContext<'_>) -> Result<(), GameError> {
    let Some((player_id, _)) = world.active_player() else {
        return Ok(());
    };

    for bullet_id in world.ids_in(Layer::EnemyBullets) {
        if touching(world, bullet_id, player_id) {
            let damage = spend_bullet(world, ctx, bullet_id)?;
            hurt_player(world, ctx.config, player_id, damage);
            ctx.sounds.play(&SoundRequest::once(ctx.config.sounds.hit.as_str()))?;
        }
    }
    Ok(())
}

fn power_ups_vs_player(world: &mut World, ctx: &mut CollisionContext<'_>) -> Result<(), GameError> {
    let Some((player_id, _)) = world.active_player() else {
        return Ok(());
    };

    for power_up_id in world.ids_in(Layer::PowerUp) {
        if !touching(world, power_up_id, player_id) {
            continue;
        }
        let Some(power_up) = world.get_mut(power_up_id) else {
            continue;
        };
        power_up.core.kill();
        let Some(kind) = power_up.as_power_up().map(|p| p.kind) else {
            continue;
        };

        if let Some(Actor {
            core,
            kind: ActorKind::Player(player),
        }) = world.get_mut(player_id)
        {
            kind.activate(core, player, ctx.config);
            log::debug!("{kind} power-up collected");
        }
        ctx.sounds.play(&SoundRequest::once(ctx.config.sounds.power_up.as_str()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::asteroid::AsteroidParams;
    use crate::actors::{AsteroidColor, AsteroidSize, PowerUpKind};
    use crate::events::ShotBulletInfo;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    struct Harness {
        config: Arc<GameConfig>,
        world: World,
        events: GameEvents,
        sounds: SoundManager,
        spawner: Spawner,
    }

    impl Harness {
        fn new() -> Self {
            let config = Arc::new(GameConfig::default());
            Self {
                world: World::new(),
                events: GameEvents::new(),
                sounds: SoundManager::silent(config.sounds.lengths()),
                spawner: Spawner::with_rng(Arc::clone(&config), StdRng::seed_from_u64(11)),
                config,
            }
        }

        fn resolve(&mut self) -> u32 {
            let mut ctx = CollisionContext {
                config: &self.config,
                events: &mut self.events,
                sounds: &mut self.sounds,
                spawner: &mut self.spawner,
            };
            resolve(&mut self.world, &mut ctx).unwrap()
        }

        fn shot(&mut self, position: Vec2, layer: Layer) -> ActorId {
            let bullet = match layer {
                Layer::EnemyBullets => self.config.alien.bullet.clone(),
                _ => self.config.player.bullets[0].clone(),
            };
            let info = ShotBulletInfo { position, bullet, angle: 0.0, layer };
            let actor = Actor::bullet(&self.config, &info).unwrap();
            self.world.insert(actor)
        }

        fn asteroid(&mut self, size: AsteroidSize, position: Vec2) -> ActorId {
            let color = AsteroidColor::Brown;
            let sprite = self.config.asteroid.sprites_for(color, size).unwrap()[0].clone();
            let params = AsteroidParams {
                sprite,
                size,
                color,
                position,
                velocity: Vec2::zeros(),
                angular_velocity: 0.0,
            };
            let actor = Actor::asteroid(&self.config, params).unwrap();
            self.world.insert(actor)
        }

        fn player(&mut self, position: Vec2) -> ActorId {
            let actor = Actor::player(&self.config, position, 3).unwrap();
            self.world.insert(actor)
        }

        fn fragment_sizes(&mut self) -> Vec<AsteroidSize> {
            self.events
                .drain()
                .filter_map(|event| match event {
                    GameEvent::SpawnAsteroid(info) => Some(info.size),
                    _ => None,
                })
                .collect()
        }
    }

    #[test]
    fn test_bullet_destroys_small_asteroid() {
        let mut h = Harness::new();
        let here = Vec2::new(400.0, 300.0);
        let bullet = h.shot(here, Layer::Bullets);
        let asteroid = h.asteroid(AsteroidSize::Small, here);

        assert_eq!(h.resolve(), 1);
        assert!(h.world.get(bullet).unwrap().core.is_removed());
        assert!(h.world.get(asteroid).unwrap().core.is_removed());
        assert!(h.fragment_sizes().is_empty());
        // impact plus explosion
        assert_eq!(h.world.count_in(Layer::Animations), 2);
        assert!(h.sounds.is_playing(&h.config.sounds.explosion));
    }

    #[test]
    fn test_big_asteroid_fragments_on_killing_blow() {
        let mut h = Harness::new();
        let here = Vec2::new(400.0, 300.0);
        let asteroid = h.asteroid(AsteroidSize::Big, here);

        for hit in 1..=3 {
            h.shot(here, Layer::Bullets);
            let score = h.resolve();
            h.world.sweep();
            if hit < 3 {
                assert_eq!(score, 0);
                assert!(h.fragment_sizes().is_empty());
            } else {
                assert_eq!(score, 3);
            }
        }

        assert!(h.world.get(asteroid).is_none());
        let mut fragments = h.fragment_sizes();
        fragments.sort_by_key(|size| *size as u8);
        let declared: Vec<Vec<AsteroidSize>> = h
            .config
            .asteroid
            .fragments
            .big
            .iter()
            .map(|option| {
                let mut option = option.clone();
                option.sort_by_key(|size| *size as u8);
                option
            })
            .collect();
        assert!(declared.contains(&fragments));
    }

    #[test]
    fn test_bullet_is_spent_on_first_target() {
        let mut h = Harness::new();
        let here = Vec2::new(400.0, 300.0);
        h.shot(here, Layer::Bullets);
        let first = h.asteroid(AsteroidSize::Medium, here);
        let second = h.asteroid(AsteroidSize::Medium, here);

        h.resolve();
        let damaged = [first, second]
            .iter()
            .filter(|&&id| h.world.get(id).unwrap().core.health() < 2.0)
            .count();
        assert_eq!(damaged, 1);
    }

    #[test]
    fn test_alien_killed_starts_fading() {
        let mut h = Harness::new();
        let here = Vec2::new(500.0, 200.0);
        let alien = Actor::alien(&h.config, here, Vec2::new(0.2, 0.0)).unwrap();
        let alien = h.world.insert(alien);

        let mut score = 0;
        for _ in 0..5 {
            h.shot(here, Layer::Bullets);
            score += h.resolve();
        }
        assert_eq!(score, 10);

        let alien = h.world.get(alien).unwrap();
        assert!(alien.as_alien().unwrap().is_dying());
        assert!(!alien.core.active);
        assert!(!alien.core.is_removed());
        assert_eq!(alien.core.body.velocity, Vec2::zeros());

        // a dying alien no longer absorbs bullets
        let bullet = h.shot(here, Layer::Bullets);
        h.resolve();
        assert!(!h.world.get(bullet).unwrap().core.is_removed());
    }

    #[test]
    fn test_each_touching_asteroid_damages_player() {
        let mut h = Harness::new();
        let here = Vec2::new(640.0, 360.0);
        let player = h.player(here);
        h.asteroid(AsteroidSize::Big, here);
        h.asteroid(AsteroidSize::Small, here + Vec2::new(10.0, 0.0));
        h.asteroid(AsteroidSize::Small, Vec2::new(50.0, 50.0));

        h.resolve();
        let actor = h.world.get(player).unwrap();
        assert_relative_eq!(actor.core.health(), 99.0);
        assert!(actor.as_player().unwrap().hit_flash_ms() > 0.0);
        assert!(h.sounds.is_playing(&h.config.sounds.impact));
    }

    #[test]
    fn test_enemy_bullet_hurts_player() {
        let mut h = Harness::new();
        let here = Vec2::new(640.0, 360.0);
        let player = h.player(here);
        let bullet = h.shot(here, Layer::EnemyBullets);
        // player bullets never hit the player
        h.shot(here, Layer::Bullets);

        h.resolve();
        assert_relative_eq!(h.world.get(player).unwrap().core.health(), 90.0);
        assert!(h.world.get(bullet).unwrap().core.is_removed());
        assert_eq!(h.world.count_in(Layer::Bullets), 1);
    }

    #[test]
    fn test_dying_player_is_untouchable() {
        let mut h = Harness::new();
        let here = Vec2::new(640.0, 360.0);
        let player = h.player(here);
        h.world.get_mut(player).unwrap().core.active = false;
        h.asteroid(AsteroidSize::Big, here);
        let bullet = h.shot(here, Layer::EnemyBullets);

        h.resolve();
        assert_relative_eq!(h.world.get(player).unwrap().core.health(), 100.0);
        assert!(!h.world.get(bullet).unwrap().core.is_removed());
    }

    #[test]
    fn test_laser_power_up_upgrades_and_disappears() {
        let mut h = Harness::new();
        let here = Vec2::new(640.0, 360.0);
        let player = h.player(here);
        let power_up = Actor::power_up(&h.config, PowerUpKind::Laser, here, 15_000.0).unwrap();
        let power_up = h.world.insert(power_up);

        h.resolve();
        assert_eq!(h.world.get(player).unwrap().as_player().unwrap().laser_level, 1);
        assert!(h.world.get(power_up).unwrap().core.is_removed());
        assert!(h.sounds.is_playing(&h.config.sounds.power_up));
    }

    #[test]
    fn test_distant_actors_do_not_collide() {
        let mut h = Harness::new();
        let player = h.player(Vec2::new(100.0, 100.0));
        h.asteroid(AsteroidSize::Big, Vec2::new(600.0, 600.0));
        let bullet = h.shot(Vec2::new(1000.0, 100.0), Layer::Bullets);

        assert_eq!(h.resolve(), 0);
        assert_relative_eq!(h.world.get(player).unwrap().core.health(), 100.0);
        assert!(!h.world.get(bullet).unwrap().core.is_removed());
    }
}
