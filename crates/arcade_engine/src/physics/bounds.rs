//! Boundary policy: screen-wrap teleport with a stuck guard

use crate::foundation::math::{Rect, Vec2};

/// Result of checking a body against the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WrapOutcome {
    /// Bounds still overlap the viewport; nothing to do
    Inside,
    /// Body left the viewport and reappears at the given position
    Wrapped(Vec2),
    /// Body teleported again within the guard window and should be destroyed
    Stuck,
}

/// Screen-wrap rules for a viewport
///
/// A body whose bounds leave the viewport reappears just inside the opposite
/// edge, `inset` pixels from it, with the coordinate on the other axis kept.
/// Two teleports closer than `guard_window_ms` mean the body is oscillating
/// on an edge.
#[derive(Debug, Clone, PartialEq)]
pub struct WrapPolicy {
    /// Visible play area
    pub viewport: Rect,
    /// Distance inside the opposite edge where wrapped bodies reappear
    pub inset: f32,
    /// Minimum simulated time between two teleports of the same body
    pub guard_window_ms: f64,
}

impl WrapPolicy {
    /// Create a policy for a `width` x `height` viewport anchored at the origin
    pub fn new(width: f32, height: f32, inset: f32, guard_window_ms: f64) -> Self {
        Self {
            viewport: Rect::new(0.0, 0.0, width, height),
            inset,
            guard_window_ms,
        }
    }

    /// Whether sprite bounds overlap the viewport
    pub fn is_inside(&self, bounds: &Rect) -> bool {
        self.viewport.intersects(bounds)
    }

    /// Decide what happens to a body with `bounds` centered at `position`
    ///
    /// `last_teleport_ms` is the simulated time of the body's previous
    /// teleport, if any.
    pub fn wrap(
        &self,
        bounds: &Rect,
        position: Vec2,
        last_teleport_ms: Option<f64>,
        now_ms: f64,
    ) -> WrapOutcome {
        if self.is_inside(bounds) {
            return WrapOutcome::Inside;
        }

        if last_teleport_ms.is_some_and(|last| now_ms - last < self.guard_window_ms) {
            return WrapOutcome::Stuck;
        }

        let view = &self.viewport;
        let mut target = position;

        if bounds.x >= view.right() {
            target.x = view.x + self.inset;
        } else if bounds.right() <= view.x {
            target.x = view.right() - self.inset;
        }

        if bounds.y >= view.bottom() {
            target.y = view.y + self.inset;
        } else if bounds.bottom() <= view.y {
            target.y = view.bottom() - self.inset;
        }

        // Crossing axis kept as-is may itself lie outside (corner exits of
        // bodies wider than the screen); pull it back so the body is visible.
        target.x = target.x.clamp(view.x + self.inset, view.right() - self.inset);
        target.y = target.y.clamp(view.y + self.inset, view.bottom() - self.inset);

        WrapOutcome::Wrapped(target)
    }
}
