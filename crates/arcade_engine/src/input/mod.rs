//! Input management system
//!
//! The engine never polls devices itself. An [`InputSource`] hands over a
//! snapshot of held controls once per tick and [`InputState`] keeps the
//! previous snapshot around for edge detection.

use bitflags::bitflags;

bitflags! {
    /// Logical controls a player can hold down
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Controls: u16 {
        /// Forward thrust
        const THRUST = 1 << 0;
        /// Reverse thrust
        const REVERSE = 1 << 1;
        /// Rotate counter-clockwise
        const ROTATE_LEFT = 1 << 2;
        /// Rotate clockwise
        const ROTATE_RIGHT = 1 << 3;
        /// Fire the primary weapon
        const FIRE = 1 << 4;
        /// Debug: move the ship back to the screen center
        const RECENTER = 1 << 5;
        /// Toggle pause
        const PAUSE = 1 << 6;
        /// Debug: force an enemy spawn
        const DEBUG_SPAWN = 1 << 7;
        /// Application-level quit request
        const QUIT = 1 << 8;
    }
}

/// Provider of per-tick control snapshots
pub trait InputSource {
    /// Controls held during the tick about to run
    fn poll(&mut self) -> Controls;
}

/// Input state for one tick, with the previous tick kept for edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    current: Controls,
    previous: Controls,
}

impl InputState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Roll the snapshot forward: the current set becomes the previous one
    pub fn update(&mut self, held: Controls) {
        self.previous = self.current;
        self.current = held;
    }

    /// Whether every control in `controls` is held this tick
    pub fn pressed(&self, controls: Controls) -> bool {
        self.current.contains(controls)
    }

    /// Whether `controls` went from released to held this tick
    pub fn just_pressed(&self, controls: Controls) -> bool {
        self.current.contains(controls) && !self.previous.contains(controls)
    }
}

/// Input source replaying a fixed script, then holding nothing
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: Vec<Controls>,
    cursor: usize,
}

impl ScriptedInput {
    /// Create a source replaying `frames` one per tick
    pub fn new(frames: Vec<Controls>) -> Self {
        Self { frames, cursor: 0 }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Controls {
        let controls = self.frames.get(self.cursor).copied().unwrap_or_default();
        self.cursor += 1;
        controls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let mut state = InputState::new();
        state.update(Controls::FIRE | Controls::THRUST);
        assert!(state.pressed(Controls::FIRE));
        assert!(state.just_pressed(Controls::FIRE));

        state.update(Controls::FIRE);
        assert!(state.pressed(Controls::FIRE));
        assert!(!state.just_pressed(Controls::FIRE));
        assert!(!state.pressed(Controls::THRUST));
    }

    #[test]
    fn test_scripted_input_runs_out() {
        let mut source = ScriptedInput::new(vec![Controls::PAUSE, Controls::empty()]);
        assert_eq!(source.poll(), Controls::PAUSE);
        assert_eq!(source.poll(), Controls::empty());
        assert_eq!(source.poll(), Controls::empty());
    }
}
