//! Process arena.
//!
//! Live processes are stored in a slot vector and referenced everywhere else by
//! [`ProcessHandle`]. Queues and the dispatcher's current slot hold handles, never
//! processes, so a process has exactly one owner (this table) and exactly one
//! holder of its handle at rest. Slots are never reused: a handle to a removed
//! process stays dead instead of aliasing a newer one.

use super::Process;

/// Stable index of a process in a [`ProcessTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessHandle(usize);

/// Arena of live processes.
#[derive(Debug, Default)]
pub struct ProcessTable {
    slots: Vec<Option<Process>>,
    live: usize,
}

impl ProcessTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a process and returns its handle.
    pub fn insert(&mut self, process: Process) -> ProcessHandle {
        let handle = ProcessHandle(self.slots.len());
        self.slots.push(Some(process));
        self.live += 1;
        handle
    }

    /// Borrows a live process.
    pub fn get(&self, handle: ProcessHandle) -> Option<&Process> {
        self.slots.get(handle.0).and_then(Option::as_ref)
    }

    /// Mutably borrows a live process.
    pub fn get_mut(&mut self, handle: ProcessHandle) -> Option<&mut Process> {
        self.slots.get_mut(handle.0).and_then(Option::as_mut)
    }

    /// Removes a process, returning it if it was live.
    pub fn remove(&mut self, handle: ProcessHandle) -> Option<Process> {
        let removed = self.slots.get_mut(handle.0).and_then(Option::take);
        if removed.is_some() {
            self.live -= 1;
        }
        removed
    }

    /// True if `handle` refers to a live process.
    pub fn contains(&self, handle: ProcessHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Number of live processes.
    pub const fn len(&self) -> usize {
        self.live
    }

    /// True if no process is live.
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Iterates over live processes with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ProcessHandle, &Process)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|p| (ProcessHandle(i), p)))
    }
}
