//! Time management utilities
//!
//! All simulation time is expressed in milliseconds as `f32`, matching the
//! countdown fields (TTL, cooldowns, durations) that consume it.

use std::time::{Duration, Instant};

/// Frame clock producing one delta per tick
///
/// In fixed mode every tick advances by exactly `1000 / tick_rate` ms, which
/// keeps the simulation reproducible. In variable mode the delta is the wall
/// time elapsed since the previous tick.
pub struct FrameClock {
    mode: ClockMode,
    last_frame: Instant,
    delta_ms: f32,
    total_ms: f64,
    frame_count: u64,
}

/// How a [`FrameClock`] measures the tick delta
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockMode {
    /// Constant delta derived from a tick rate in Hz
    Fixed {
        /// Ticks per second
        tick_rate: f32,
    },
    /// Wall-clock delta between calls to [`FrameClock::tick`]
    Variable,
}

impl FrameClock {
    /// Create a fixed-step clock running at `tick_rate` Hz
    pub fn fixed(tick_rate: f32) -> Self {
        Self::with_mode(ClockMode::Fixed { tick_rate })
    }

    /// Create a clock measuring real elapsed time
    pub fn variable() -> Self {
        Self::with_mode(ClockMode::Variable)
    }

    fn with_mode(mode: ClockMode) -> Self {
        Self {
            mode,
            last_frame: Instant::now(),
            delta_ms: 0.0,
            total_ms: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock by one frame and return the delta in milliseconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta_ms = match self.mode {
            ClockMode::Fixed { tick_rate } => 1000.0 / tick_rate,
            ClockMode::Variable => now.duration_since(self.last_frame).as_secs_f32() * 1000.0,
        };
        self.last_frame = now;
        self.total_ms += f64::from(self.delta_ms);
        self.frame_count += 1;
        self.delta_ms
    }

    /// Total simulated time in milliseconds
    pub fn total_ms(&self) -> f64 {
        self.total_ms
    }

    /// Number of ticks produced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Cooperative interval timer
///
/// Checked once per tick against accumulated tick time instead of firing
/// asynchronously. A tick longer than several intervals reports every
/// elapsed interval.
#[derive(Debug, Clone, PartialEq)]
pub struct RepeatingTimer {
    interval_ms: f32,
    accumulated_ms: f32,
}

impl RepeatingTimer {
    /// Create a timer firing every `interval_ms`
    pub fn new(interval_ms: f32) -> Self {
        Self {
            interval_ms: interval_ms.max(f32::EPSILON),
            accumulated_ms: 0.0,
        }
    }

    /// Advance by `dt_ms` and return how many intervals elapsed
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        self.accumulated_ms += dt_ms;
        let mut fired = 0;
        while self.accumulated_ms >= self.interval_ms {
            self.accumulated_ms -= self.interval_ms;
            fired += 1;
        }
        fired
    }

    /// Interval in milliseconds
    pub fn interval_ms(&self) -> f32 {
        self.interval_ms
    }

    /// Time left before the next firing
    pub fn remaining_ms(&self) -> f32 {
        self.interval_ms - self.accumulated_ms
    }

    /// Restart the current interval
    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
    }
}

/// Simple stopwatch for measuring elapsed time
pub struct Stopwatch {
    start_time: Option<Instant>,
    elapsed: Duration,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Create a new stopped stopwatch
    pub fn new() -> Self {
        Self {
            start_time: None,
            elapsed: Duration::ZERO,
        }
    }

    /// Create a new stopwatch and start it immediately
    pub fn start_new() -> Self {
        let mut stopwatch = Self::new();
        stopwatch.start();
        stopwatch
    }

    /// Start the stopwatch
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Stop the stopwatch and accumulate elapsed time
    pub fn stop(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed += start.elapsed();
            self.start_time = None;
        }
    }

    /// Get the elapsed time
    pub fn elapsed(&self) -> Duration {
        let current_elapsed = self.start_time.map_or(Duration::ZERO, |start| start.elapsed());
        self.elapsed + current_elapsed
    }
}
