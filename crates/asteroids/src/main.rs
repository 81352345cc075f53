//! Headless asteroids run
//!
//! Plays the game with an autopilot and null render/audio services, then
//! logs the final score. `ASTEROIDS_CONFIG` names a config file and
//! `ASTEROIDS_TICKS` caps the number of ticks.

use std::sync::Arc;

use arcade_engine::foundation::logging;
use arcade_engine::foundation::time::{FrameClock, Stopwatch};
use arcade_engine::input::{Controls, InputSource};
use asteroids::{Game, GameConfig, Services};

const TICKS_ENV: &str = "ASTEROIDS_TICKS";
const DEFAULT_TICKS: u64 = 3600;

/// Spins and fires constantly, thrusting in short bursts
#[derive(Debug, Default)]
struct Autopilot {
    tick: u64,
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> Controls {
        self.tick += 1;
        let mut controls = Controls::ROTATE_LEFT | Controls::FIRE;
        if self.tick % 180 < 20 {
            controls |= Controls::THRUST;
        }
        if self.tick % 600 == 0 {
            controls |= Controls::RECENTER;
        }
        controls
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    let config = GameConfig::from_env()?;
    let max_ticks = match std::env::var(TICKS_ENV) {
        Ok(value) => value.parse::<u64>()?,
        Err(_) => DEFAULT_TICKS,
    };

    let mut clock = FrameClock::fixed(config.tick_rate_hz);
    let services = Services::headless(&config);
    let mut game = Game::new(Arc::new(config), services)?;

    let stopwatch = Stopwatch::start_new();
    let ticks = game.run(&mut Autopilot::default(), &mut clock, max_ticks)?;

    let hud = game.hud_snapshot();
    log::info!(
        "Ran {} ticks ({:.1} s simulated) in {:?}",
        ticks,
        clock.total_ms() / 1000.0,
        stopwatch.elapsed()
    );
    log::info!(
        "Final score {} with {} lives left{}",
        hud.score,
        hud.lives.max(0),
        if hud.game_over { ", game over" } else { "" }
    );
    Ok(())
}
