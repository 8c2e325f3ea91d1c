//! Round-robin dispatch simulator library.
//!
//! This crate simulates a single-core dispatcher interleaving processes that are
//! described as fixed tapes of opcodes. It provides:
//! 1. **Processes:** Opcode tapes, the process state machine, and an arena of live processes.
//! 2. **Scheduling:** Ready/blocked queues, quantum accounting, preemption, and the dispatch loop.
//! 3. **Loading:** Creation-order and per-process opcode file parsing.
//! 4. **Tracing:** Per-cycle trace records and the sinks that persist them.
//! 5. **Simulation:** Configuration, statistics, and the top-level [`Simulator`].

/// Common types and constants (process ids, file conventions, errors).
pub mod common;
/// Simulator configuration (defaults, validation, JSON loading).
pub mod config;
/// Process model (opcodes, state machine, process arena).
pub mod process;
/// Dispatch engine (queues, finish policies, dispatcher).
pub mod sched;
/// Loader, trace sinks, and the top-level simulator.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Error type shared by every fallible operation in the crate.
pub use crate::common::error::{SimError, SimResult};
/// Dispatcher owning the running process and the ready/blocked queues.
pub use crate::sched::Dispatcher;
/// Top-level simulator; construct with `Simulator::new`.
pub use crate::sim::simulator::Simulator;
