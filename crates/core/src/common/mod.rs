//! Common utilities and types used throughout the dispatch simulator.
//!
//! This module provides the building blocks shared by the process model, the
//! dispatcher, and the loader. It includes:
//! 1. **Process Identity:** A strong type for process identifiers and their display names.
//! 2. **Constants:** File-layout conventions and the reserved dispatcher pseudo-process.
//! 3. **Error Handling:** The error taxonomy returned by every fallible operation.

/// Common constants used throughout the simulator.
pub mod constants;

/// Error types for configuration, loading, and trace output.
pub mod error;

/// Process identifier type.
pub mod pid;

pub use constants::{DISPATCHER_BASENAME, DISPATCHER_PID};
pub use error::{SimError, SimResult};
pub use pid::Pid;
