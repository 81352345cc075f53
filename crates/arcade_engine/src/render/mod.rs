//! # Render seam
//!
//! Drawing is an external service. Once per tick the simulation collects one
//! [`RenderItem`] per visible body into a [`RenderQueue`] and submits the
//! whole frame to a [`RenderSink`].
//!
//! - **RenderItem**: visual asset id, position, rotation and opacity
//! - **RenderQueue**: per-frame collection, ordered by draw depth
//! - **RenderSink**: whatever composites the frame (window, recorder, nothing)

use std::cell::RefCell;
use std::rc::Rc;

use crate::foundation::math::Vec2;

/// One sprite to draw this frame
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    /// Visual asset identifier
    pub sprite: String,
    /// Center position in screen coordinates
    pub position: Vec2,
    /// Rotation in degrees
    pub rotation: f32,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
    /// Draw order; lower depths are drawn first
    pub depth: u8,
}

/// Consumer of finished frames
pub trait RenderSink {
    /// Draw a complete frame, items already in draw order
    fn render(&mut self, frame: &[RenderItem]);
}

/// Shared sink, so the caller can inspect frames handed to a boxed copy
impl<T: RenderSink> RenderSink for Rc<RefCell<T>> {
    fn render(&mut self, frame: &[RenderItem]) {
        self.borrow_mut().render(frame);
    }
}

/// Sink that drops frames, counting them
#[derive(Debug, Default)]
pub struct NullRenderSink {
    frames: u64,
}

impl NullRenderSink {
    /// Frames received so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for NullRenderSink {
    fn render(&mut self, frame: &[RenderItem]) {
        self.frames += 1;
        log::trace!("frame {} with {} items", self.frames, frame.len());
    }
}

/// Sink keeping a copy of the most recent frame
#[derive(Debug, Default)]
pub struct FrameRecorder {
    last_frame: Vec<RenderItem>,
    frames: u64,
}

impl FrameRecorder {
    /// Items of the most recent frame
    pub fn last_frame(&self) -> &[RenderItem] {
        &self.last_frame
    }

    /// Frames received so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl RenderSink for FrameRecorder {
    fn render(&mut self, frame: &[RenderItem]) {
        self.frames += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(frame);
    }
}

/// Per-frame collection of render items
#[derive(Debug, Default)]
pub struct RenderQueue {
    items: Vec<RenderItem>,
}

impl RenderQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item to this frame
    pub fn push(&mut self, item: RenderItem) {
        self.items.push(item);
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the frame is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sort by depth and hand the frame to `sink`, leaving the queue empty
    ///
    /// The sort is stable so items on the same depth keep insertion order.
    pub fn submit(&mut self, sink: &mut dyn RenderSink) {
        self.items.sort_by_key(|item| item.depth);
        sink.render(&self.items);
        self.items.clear();
    }
}
