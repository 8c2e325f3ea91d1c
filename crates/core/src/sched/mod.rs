//! Dispatch engine.
//!
//! This module drives the simulation. It provides:
//! 1. **Queues:** FIFO ready and blocked queues of process handles.
//! 2. **Finish Policies:** The injectable random source behind `FinishAttempt`.
//! 3. **Dispatcher:** Burst execution, quantum accounting, preemption, and process switching.

/// Dispatcher and its burst/switch/run loop.
pub mod dispatcher;

/// Random source deciding FinishAttempt outcomes.
pub mod finish;

/// FIFO queue of process handles.
pub mod queue;

pub use dispatcher::{BurstExit, BurstOutcome, Dispatcher};
pub use finish::{FinishPolicy, Probabilistic};
pub use queue::ProcessQueue;
