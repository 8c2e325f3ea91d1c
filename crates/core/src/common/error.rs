//! Simulation error definitions.
//!
//! Every failure the simulator can report is fatal to the run: configuration
//! problems abort before any process is loaded, load problems abort before any
//! trace line is written, and sink problems abort mid-run. Malformed
//! creation-order lines are not errors; the loader skips them.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::pid::Pid;
use crate::process::{ProcessHandle, ProcessState};

/// Errors produced by configuration, loading, dispatching, and trace output.
#[derive(Debug, Error)]
pub enum SimError {
    /// Runtime parameters are missing or out of range.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A creation-order or process definition file could not be used.
    #[error("failed to load {}: {reason}", path.display())]
    Load {
        /// File that failed to load.
        path: PathBuf,
        /// Human-readable cause.
        reason: String,
    },

    /// The trace destination could not be opened or written.
    #[error("trace sink error: {0}")]
    Sink(#[from] io::Error),

    /// A process was constructed without any opcodes.
    #[error("process {0} has an empty tape")]
    EmptyTape(Pid),

    /// A state transition was requested that the process state machine forbids.
    #[error("process {pid} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        /// Process whose transition was rejected.
        pid: Pid,
        /// State the process was in.
        from: ProcessState,
        /// State that was requested.
        to: ProcessState,
    },

    /// A burst was requested while no process was dispatched.
    #[error("no process is currently dispatched")]
    NoCurrentProcess,

    /// A queue or the dispatcher referenced a process that is no longer live.
    #[error("handle {0:?} does not refer to a live process")]
    StaleHandle(ProcessHandle),

    /// The configured dispatch limit was reached with processes still runnable.
    #[error("dispatch limit of {0} reached with runnable processes remaining")]
    DispatchLimit(u64),
}

/// Convenience alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;
