//! Game configuration
//!
//! One immutable bundle loaded at startup. Every section carries
//! `#[serde(default)]` so a file only needs the values it overrides.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use arcade_engine::config::{Config, ConfigError};
use arcade_engine::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::actors::asteroid::{AsteroidColor, AsteroidSize};
use crate::actors::power_up::PowerUpKind;
use crate::error::GameError;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "ASTEROIDS_CONFIG";

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed RNG seed; entropy when unset
    pub seed: Option<u64>,
    /// Simulation ticks per second
    pub tick_rate_hz: f32,
    /// Viewport settings
    pub display: DisplayConfig,
    /// Motion and wrap tunables
    pub physics: PhysicsConfig,
    /// Player ship settings
    pub player: PlayerConfig,
    /// Asteroid settings
    pub asteroid: AsteroidConfig,
    /// Alien settings
    pub alien: AlienConfig,
    /// Power-up settings
    pub power_up: PowerUpConfig,
    /// Explosion animation settings
    pub animations: AnimationConfig,
    /// Sound catalog and sound ids
    pub sounds: SoundConfig,
    /// Sprite catalog: id to unscaled pixel size
    pub sprites: BTreeMap<String, SpriteSize>,
}

impl Config for GameConfig {}

/// Viewport settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
    /// Window title
    pub title: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            title: "Asteroids".to_string(),
        }
    }
}

/// Motion and wrap tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity units to pixels per millisecond
    pub velocity_mult: f32,
    /// Hitbox diameter as a fraction of the scaled sprite width
    pub hitbox_ratio: f32,
    /// Distance inside the opposite edge where wrapped actors reappear
    pub teleport_inset: f32,
    /// Two teleports closer than this mean the actor is stuck
    pub teleport_guard_ms: f64,
    /// Distance outside the screen edge where edge spawns appear
    pub spawn_offset: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            velocity_mult: 0.5,
            hitbox_ratio: 0.9,
            teleport_inset: 2.0,
            teleport_guard_ms: 100.0,
            spawn_offset: 50.0,
        }
    }
}

/// Shot parameters for one weapon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletConfig {
    /// Sprite id
    pub sprite: String,
    /// Sound played when fired
    pub sound: String,
    /// Speed along the firing heading
    pub velocity: f32,
    /// Sprite scale
    pub scale: f32,
    /// Lifetime in milliseconds
    pub duration_ms: f32,
    /// Delay between shots in milliseconds
    pub cooldown_ms: f32,
    /// Health removed from the target
    pub damage: u32,
    /// Frames of the impact animation
    pub hit_sprites: Vec<String>,
}

impl BulletConfig {
    fn player(duration_ms: f32, cooldown_ms: f32) -> Self {
        Self {
            sprite: "bullet".to_string(),
            sound: "sfx_laser2".to_string(),
            velocity: 1.0,
            scale: 0.8,
            duration_ms,
            cooldown_ms,
            damage: 1,
            hit_sprites: vec!["bullet_hit1".to_string(), "bullet_hit2".to_string()],
        }
    }
}

/// Player ship settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Sprite id
    pub sprite: String,
    /// Sprite scale
    pub scale: f32,
    /// Starting and maximum health
    pub health: f32,
    /// Lives at game start
    pub lives: i32,
    /// Degrees turned per tick
    pub angular_speed: f32,
    /// Per-component velocity clamp
    pub max_velocity: f32,
    /// Thrust impulse per tick while the control is held
    pub thrust: f32,
    /// Damage per tick of asteroid contact
    pub asteroid_damage: f32,
    /// Length of the death fade in milliseconds
    pub death_duration_ms: f32,
    /// Spin during the death fade, degrees per second
    pub death_spin_deg_per_s: f32,
    /// Length of the hit flash in milliseconds
    pub hit_flash_ms: f32,
    /// Opacity while flashing
    pub hit_flash_alpha: f32,
    /// One bullet per laser level, lowest first
    pub bullets: Vec<BulletConfig>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            sprite: "player".to_string(),
            scale: 0.5,
            health: 100.0,
            lives: 3,
            angular_speed: 1.5,
            max_velocity: 0.3,
            thrust: 0.01,
            asteroid_damage: 0.5,
            death_duration_ms: 1500.0,
            death_spin_deg_per_s: 300.0,
            hit_flash_ms: 200.0,
            hit_flash_alpha: 0.5,
            bullets: vec![
                BulletConfig::player(500.0, 330.0),
                BulletConfig::player(500.0, 200.0),
                BulletConfig::player(1000.0, 200.0),
            ],
        }
    }
}

impl PlayerConfig {
    /// Highest laser level
    pub fn max_laser_level(&self) -> usize {
        self.bullets.len().saturating_sub(1)
    }
}

/// A value for each asteroid size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeTable<T> {
    /// Value for big asteroids
    pub big: T,
    /// Value for medium asteroids
    pub medium: T,
    /// Value for small asteroids
    pub small: T,
}

impl<T> SizeTable<T> {
    /// Look up the value for `size`
    pub fn get(&self, size: AsteroidSize) -> &T {
        match size {
            AsteroidSize::Big => &self.big,
            AsteroidSize::Medium => &self.medium,
            AsteroidSize::Small => &self.small,
        }
    }
}

/// Sprites available for one asteroid color and size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidSprites {
    /// Color key
    pub color: AsteroidColor,
    /// Size key
    pub size: AsteroidSize,
    /// Interchangeable sprite ids
    pub sprites: Vec<String>,
}

/// Asteroid settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidConfig {
    /// Slowest inward speed for edge spawns
    pub min_velocity: f32,
    /// Fastest speed on either axis
    pub max_velocity: f32,
    /// Largest spin in degrees per tick, either direction
    pub max_angular_velocity: f32,
    /// Interval of the big asteroid timer
    pub spawn_interval_ms: f32,
    /// Big asteroids allowed at once
    pub max_asteroids: usize,
    /// Time allowed to reach the screen after spawning
    pub ttl_ms: f32,
    /// Sprite scale
    pub scale: f32,
    /// Health per size
    pub health: SizeTable<f32>,
    /// Score per size
    pub score: SizeTable<u32>,
    /// Fragment options per size; one option is picked at random
    pub fragments: SizeTable<Vec<Vec<AsteroidSize>>>,
    /// Sprite sets per color and size
    pub sprites: Vec<AsteroidSprites>,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        use AsteroidColor::{Brown, Grey};
        use AsteroidSize::{Big, Medium, Small};

        let set = |color, size, sprites: &[&str]| AsteroidSprites {
            color,
            size,
            sprites: sprites.iter().map(|s| (*s).to_string()).collect(),
        };

        Self {
            min_velocity: 0.1,
            max_velocity: 0.5,
            max_angular_velocity: 2.0,
            spawn_interval_ms: 1000.0,
            max_asteroids: 15,
            ttl_ms: 5000.0,
            scale: 1.0,
            health: SizeTable { big: 3.0, medium: 2.0, small: 1.0 },
            score: SizeTable { big: 3, medium: 2, small: 1 },
            fragments: SizeTable {
                big: vec![vec![Medium, Medium, Small], vec![Medium, Small, Small, Small]],
                medium: vec![vec![Small, Small]],
                small: vec![],
            },
            sprites: vec![
                set(Brown, Big, &["meteorBrown_big1", "meteorBrown_big2"]),
                set(Brown, Medium, &["meteorBrown_med1"]),
                set(Brown, Small, &["meteorBrown_small1", "meteorBrown_small2"]),
                set(Grey, Big, &["meteorGrey_big1"]),
                set(Grey, Medium, &["meteorGrey_med1"]),
                set(Grey, Small, &["meteorGrey_small1"]),
            ],
        }
    }
}

impl AsteroidConfig {
    /// Sprite ids for a color and size, if any are configured
    pub fn sprites_for(&self, color: AsteroidColor, size: AsteroidSize) -> Option<&[String]> {
        self.sprites
            .iter()
            .find(|set| set.color == color && set.size == size)
            .map(|set| set.sprites.as_slice())
            .filter(|sprites| !sprites.is_empty())
    }

    /// Colors with at least one sprite set
    pub fn colors(&self) -> Vec<AsteroidColor> {
        let mut colors: Vec<AsteroidColor> = self.sprites.iter().map(|set| set.color).collect();
        colors.sort();
        colors.dedup();
        colors
    }
}

/// Alien settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlienConfig {
    /// Sprite id
    pub sprite: String,
    /// Sprite scale
    pub scale: f32,
    /// Starting health
    pub health: f32,
    /// Interval of the alien timer
    pub spawn_interval_ms: f32,
    /// Chance that a timer tick spawns an alien
    pub spawn_probability: f64,
    /// Inward speed along the spawn edge normal
    pub velocity: f32,
    /// Fraction of each edge end excluded from spawning
    pub edge_margin: f32,
    /// Degrees turned per tick
    pub angular_speed: f32,
    /// Time allowed to reach the screen after spawning
    pub ttl_ms: f32,
    /// Score awarded for the kill
    pub score: u32,
    /// Spin while fading out, degrees per second
    pub death_spin_deg_per_s: f32,
    /// Opacity factor applied each tick while fading out
    pub death_fade: f32,
    /// Opacity below which the fading alien is removed
    pub death_min_alpha: f32,
    /// Weapon
    pub bullet: BulletConfig,
}

impl Default for AlienConfig {
    fn default() -> Self {
        Self {
            sprite: "ufoGreen".to_string(),
            scale: 0.7,
            health: 5.0,
            spawn_interval_ms: 1000.0,
            spawn_probability: 0.05,
            velocity: 0.2,
            edge_margin: 0.2,
            angular_speed: 4.4,
            ttl_ms: 10_000.0,
            score: 10,
            death_spin_deg_per_s: 300.0,
            death_fade: 0.96,
            death_min_alpha: 0.2,
            bullet: BulletConfig {
                sprite: "laserRed01".to_string(),
                sound: "laserSmall_002".to_string(),
                velocity: 0.5,
                scale: 1.0,
                duration_ms: 1000.0,
                cooldown_ms: 1000.0,
                damage: 10,
                hit_sprites: vec!["laserRed08".to_string(), "laserRed09".to_string()],
            },
        }
    }
}

/// Settings for one power-up kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpKindConfig {
    /// Kind these settings apply to
    pub kind: PowerUpKind,
    /// Sprite id
    pub sprite: String,
    /// Lifetime range in whole seconds, inclusive
    pub duration_s: (u32, u32),
    /// Chance of spawning on each power-up timer tick
    pub frequency: f64,
}

/// Power-up settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerUpConfig {
    /// Interval of the power-up timer
    pub spawn_interval_ms: f32,
    /// Fraction of width and height kept clear along each edge
    pub spawn_margin: f32,
    /// Health restored by the health power-up
    pub health_amount: f32,
    /// Registered kinds
    pub kinds: Vec<PowerUpKindConfig>,
}

impl Default for PowerUpConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 10_000.0,
            spawn_margin: 0.1,
            health_amount: 20.0,
            kinds: vec![
                PowerUpKindConfig {
                    kind: PowerUpKind::Health,
                    sprite: "pill_green".to_string(),
                    duration_s: (20, 60),
                    frequency: 0.5,
                },
                PowerUpKindConfig {
                    kind: PowerUpKind::Laser,
                    sprite: "things_blue".to_string(),
                    duration_s: (10, 20),
                    frequency: 0.1,
                },
            ],
        }
    }
}

impl PowerUpConfig {
    /// Settings for `kind`, if registered
    pub fn kind(&self, kind: PowerUpKind) -> Option<&PowerUpKindConfig> {
        self.kinds.iter().find(|k| k.kind == kind)
    }
}

/// Explosion animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Frames per second of every animation
    pub fps: f32,
    /// Explosion frames
    pub explosion: Vec<String>,
    /// Explosion sprite scale per asteroid size
    pub explosion_scale: SizeTable<f32>,
    /// Explosion sprite scale for aliens
    pub alien_explosion_scale: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: 20.0,
            explosion: (0..4).map(|i| format!("explosion{i:02}")).collect(),
            explosion_scale: SizeTable { big: 1.5, medium: 1.0, small: 0.6 },
            alien_explosion_scale: 1.2,
        }
    }
}

/// Sound catalog and the ids used by gameplay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoundConfig {
    /// Volume applied to every sound
    pub global_volume: f32,
    /// Known sounds and their length in milliseconds
    pub catalog: BTreeMap<String, f32>,
    /// Player death
    pub player_die: String,
    /// Asteroid scraping the player
    pub impact: String,
    /// Engine loop while thrusting
    pub thrust: String,
    /// Asteroid explosion
    pub explosion: String,
    /// Enemy shot hitting the player
    pub hit: String,
    /// Alien engine loop
    pub alien_hum: String,
    /// Alien explosion
    pub alien_explosion: String,
    /// Power-up pickup
    pub power_up: String,
}

impl Default for SoundConfig {
    fn default() -> Self {
        let catalog = [
            ("sfx_laser2", 300.0),
            ("laserSmall_002", 250.0),
            ("spaceEngineLow_003", 2000.0),
            ("explosionCrunch_004", 800.0),
            ("sfx_lose", 1200.0),
            ("impactMetal_000", 300.0),
            ("thrusterFire_000", 1500.0),
            ("explosionCrunch_000", 800.0),
            ("lowFrequency_explosion_000", 900.0),
            ("sfx_twoTone", 400.0),
        ]
        .into_iter()
        .map(|(id, length)| (id.to_string(), length))
        .collect();

        Self {
            global_volume: 0.5,
            catalog,
            player_die: "sfx_lose".to_string(),
            impact: "impactMetal_000".to_string(),
            thrust: "thrusterFire_000".to_string(),
            explosion: "explosionCrunch_000".to_string(),
            hit: "lowFrequency_explosion_000".to_string(),
            alien_hum: "spaceEngineLow_003".to_string(),
            alien_explosion: "explosionCrunch_004".to_string(),
            power_up: "sfx_twoTone".to_string(),
        }
    }
}

impl SoundConfig {
    /// Catalog in the shape the sound manager takes
    pub fn lengths(&self) -> HashMap<String, f32> {
        self.catalog.iter().map(|(id, length)| (id.clone(), *length)).collect()
    }
}

/// Unscaled sprite size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl SpriteSize {
    /// Create a sprite size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

fn default_sprites() -> BTreeMap<String, SpriteSize> {
    let mut sprites: BTreeMap<String, SpriteSize> = [
        ("player", SpriteSize::new(99.0, 75.0)),
        ("bullet", SpriteSize::new(13.0, 37.0)),
        ("bullet_hit1", SpriteSize::new(48.0, 46.0)),
        ("bullet_hit2", SpriteSize::new(48.0, 46.0)),
        ("laserRed01", SpriteSize::new(9.0, 54.0)),
        ("laserRed08", SpriteSize::new(48.0, 46.0)),
        ("laserRed09", SpriteSize::new(48.0, 46.0)),
        ("ufoGreen", SpriteSize::new(91.0, 91.0)),
        ("pill_green", SpriteSize::new(22.0, 21.0)),
        ("things_blue", SpriteSize::new(32.0, 32.0)),
        ("meteorBrown_big1", SpriteSize::new(101.0, 84.0)),
        ("meteorBrown_big2", SpriteSize::new(120.0, 98.0)),
        ("meteorBrown_med1", SpriteSize::new(43.0, 43.0)),
        ("meteorBrown_small1", SpriteSize::new(28.0, 28.0)),
        ("meteorBrown_small2", SpriteSize::new(29.0, 26.0)),
        ("meteorGrey_big1", SpriteSize::new(101.0, 84.0)),
        ("meteorGrey_med1", SpriteSize::new(43.0, 43.0)),
        ("meteorGrey_small1", SpriteSize::new(28.0, 28.0)),
    ]
    .into_iter()
    .map(|(id, size)| (id.to_string(), size))
    .collect();

    for i in 0..4 {
        sprites.insert(format!("explosion{i:02}"), SpriteSize::new(64.0, 64.0));
    }
    sprites
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_rate_hz: 60.0,
            display: DisplayConfig::default(),
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            asteroid: AsteroidConfig::default(),
            alien: AlienConfig::default(),
            power_up: PowerUpConfig::default(),
            animations: AnimationConfig::default(),
            sounds: SoundConfig::default(),
            sprites: default_sprites(),
        }
    }
}

impl GameConfig {
    /// Load from the file named by [`CONFIG_ENV`], or defaults when unset,
    /// then validate
    pub fn from_env() -> Result<Self, GameError> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let config = Self::load_or_default(path.as_deref())?;
        config.validate()?;
        Ok(config)
    }

    /// Screen center
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.display.width / 2.0, self.display.height / 2.0)
    }

    /// Unscaled size of a catalogued sprite
    pub fn sprite_size(&self, id: &str) -> Result<SpriteSize, GameError> {
        self.sprites
            .get(id)
            .copied()
            .ok_or_else(|| GameError::MissingAsset(format!("sprite '{id}'")))
    }

    /// Check the bundle is complete and consistent
    ///
    /// Every referenced sprite and sound must be catalogued; numeric
    /// settings that drive timers and tables must be usable.
    pub fn validate(&self) -> Result<(), GameError> {
        for sprite in self.referenced_sprites() {
            self.sprite_size(sprite)?;
        }
        for sound in self.referenced_sounds() {
            if !self.sounds.catalog.contains_key(sound) {
                return Err(GameError::MissingAsset(format!("sound '{sound}'")));
            }
        }

        let invalid = |msg: String| Err(GameError::Config(ConfigError::Invalid(msg)));

        if self.display.width <= 0.0 || self.display.height <= 0.0 {
            return invalid("display size must be positive".to_string());
        }
        if self.tick_rate_hz <= 0.0 {
            return invalid("tick_rate_hz must be positive".to_string());
        }
        if self.player.bullets.is_empty() {
            return invalid("player needs at least one laser level".to_string());
        }
        for (name, interval) in [
            ("asteroid.spawn_interval_ms", self.asteroid.spawn_interval_ms),
            ("alien.spawn_interval_ms", self.alien.spawn_interval_ms),
            ("power_up.spawn_interval_ms", self.power_up.spawn_interval_ms),
            ("animations.fps", self.animations.fps),
        ] {
            if interval <= 0.0 {
                return invalid(format!("{name} must be positive"));
            }
        }
        if self.asteroid.min_velocity > self.asteroid.max_velocity {
            return invalid("asteroid.min_velocity exceeds max_velocity".to_string());
        }
        let colors = self.asteroid.colors();
        if colors.is_empty() {
            return invalid("no asteroid sprites configured".to_string());
        }
        for color in colors {
            for size in AsteroidSize::ALL {
                if self.asteroid.sprites_for(color, size).is_none() {
                    return Err(GameError::MissingAsset(format!("sprites for {color} {size} asteroids")));
                }
            }
        }
        for size in AsteroidSize::ALL {
            for option in self.asteroid.fragments.get(size) {
                if option.is_empty() {
                    return invalid(format!("empty fragment option for {size} asteroids"));
                }
            }
        }

        let mut seen = HashSet::new();
        for kind in &self.power_up.kinds {
            if !seen.insert(kind.kind) {
                return invalid(format!("power-up kind {} registered twice", kind.kind));
            }
            if kind.duration_s.0 > kind.duration_s.1 {
                return invalid(format!("power-up {} duration range is reversed", kind.kind));
            }
        }

        Ok(())
    }

    fn referenced_sprites(&self) -> Vec<&str> {
        let mut sprites = vec![self.player.sprite.as_str(), self.alien.sprite.as_str()];
        for bullet in self.player.bullets.iter().chain(std::iter::once(&self.alien.bullet)) {
            sprites.push(bullet.sprite.as_str());
            sprites.extend(bullet.hit_sprites.iter().map(String::as_str));
        }
        for set in &self.asteroid.sprites {
            sprites.extend(set.sprites.iter().map(String::as_str));
        }
        sprites.extend(self.power_up.kinds.iter().map(|k| k.sprite.as_str()));
        sprites.extend(self.animations.explosion.iter().map(String::as_str));
        sprites
    }

    fn referenced_sounds(&self) -> Vec<&str> {
        let sounds = &self.sounds;
        let mut ids = vec![
            sounds.player_die.as_str(),
            sounds.impact.as_str(),
            sounds.thrust.as_str(),
            sounds.explosion.as_str(),
            sounds.hit.as_str(),
            sounds.alien_hum.as_str(),
            sounds.alien_explosion.as_str(),
            sounds.power_up.as_str(),
        ];
        ids.extend(self.player.bullets.iter().map(|b| b.sound.as_str()));
        ids.push(self.alien.bullet.sound.as_str());
        ids
    }
}
