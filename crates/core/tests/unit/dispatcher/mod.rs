//! # Dispatcher Tests
//!
//! Burst execution, process switching, full runs, and randomized scheduling
//! properties.

/// `run_burst`: stopping conditions and counters.
pub mod burst;
