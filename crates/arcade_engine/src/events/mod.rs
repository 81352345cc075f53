//! Event queue
//!
//! A plain owned FIFO handed by reference to whoever needs to post. The
//! owner drains it once per tick:
//! - events are delivered in post order, no priority or coalescing
//! - payloads are moved in and moved out, so nothing posted can be mutated
//!   by the poster afterwards
//! - a handler may post follow-up events; they are delivered in the same drain

use std::collections::VecDeque;

/// FIFO queue of typed events
#[derive(Debug, Clone)]
pub struct EventQueue<E> {
    queue: VecDeque<E>,
}

impl<E> EventQueue<E> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Append an event to the back of the queue
    pub fn post(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Take the oldest pending event
    pub fn pop(&mut self) -> Option<E> {
        self.queue.pop_front()
    }

    /// Deliver every pending event, including ones posted by `handler` while
    /// draining, in post order.
    ///
    /// Stops at the first handler error; events not yet delivered stay queued.
    pub fn drain_with<Err>(
        &mut self,
        mut handler: impl FnMut(E, &mut Self) -> Result<(), Err>,
    ) -> Result<usize, Err> {
        let mut delivered = 0;
        while let Some(event) = self.queue.pop_front() {
            handler(event, self)?;
            delivered += 1;
        }
        Ok(delivered)
    }

    /// Take every pending event at once
    pub fn drain(&mut self) -> impl Iterator<Item = E> + '_ {
        self.queue.drain(..)
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether nothing is pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}
