//! FIFO process queues.
//!
//! Queues hold handles into the dispatcher's process table and never own the
//! processes themselves. Only the two ends are touched: handles are enqueued at
//! the back and dequeued from the front, so ordering is fully deterministic.

use std::collections::VecDeque;

use crate::process::ProcessHandle;

/// FIFO queue of process handles (ready queue, blocked queue).
#[derive(Debug, Default, Clone)]
pub struct ProcessQueue {
    entries: VecDeque<ProcessHandle>,
}

impl ProcessQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handle at the back.
    pub fn enqueue(&mut self, handle: ProcessHandle) {
        self.entries.push_back(handle);
    }

    /// Removes and returns the handle at the front.
    pub fn dequeue(&mut self) -> Option<ProcessHandle> {
        self.entries.pop_front()
    }

    /// Handle at the front without removing it.
    pub fn front(&self) -> Option<ProcessHandle> {
        self.entries.front().copied()
    }

    /// Number of queued handles.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the queue holds no handles.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates front to back.
    pub fn iter(&self) -> impl Iterator<Item = ProcessHandle> + '_ {
        self.entries.iter().copied()
    }
}
