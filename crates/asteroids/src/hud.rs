//! Score and status reporting for an external display layer

use std::cell::RefCell;
use std::rc::Rc;

/// Plain values shown by the HUD, reported once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HudSnapshot {
    /// Total score
    pub score: u32,
    /// Score earned during the last tick
    pub score_delta: u32,
    /// Player health, zero while no player exists
    pub health: f32,
    /// Player health ceiling
    pub max_health: f32,
    /// Lives left
    pub lives: i32,
    /// Player weapon tier
    pub laser_level: usize,
    /// No lives remain
    pub game_over: bool,
    /// Simulation is paused
    pub paused: bool,
}

/// Consumer of HUD snapshots
pub trait HudSink {
    /// Receive this tick's values
    fn report(&mut self, snapshot: &HudSnapshot);
}

/// Sink that ignores every report
#[derive(Debug, Default)]
pub struct NullHudSink;

impl HudSink for NullHudSink {
    fn report(&mut self, _snapshot: &HudSnapshot) {}
}

/// Sink keeping the latest snapshot
#[derive(Debug, Default)]
pub struct HudRecorder {
    last: Option<HudSnapshot>,
    reports: u64,
}

impl HudRecorder {
    /// Most recent snapshot
    pub fn last(&self) -> Option<&HudSnapshot> {
        self.last.as_ref()
    }

    /// Number of snapshots received
    pub fn reports(&self) -> u64 {
        self.reports
    }
}

impl HudSink for HudRecorder {
    fn report(&mut self, snapshot: &HudSnapshot) {
        self.reports += 1;
        self.last = Some(*snapshot);
    }
}

impl<T: HudSink> HudSink for Rc<RefCell<T>> {
    fn report(&mut self, snapshot: &HudSnapshot) {
        self.borrow_mut().report(snapshot);
    }
}
