//! # Unit Components
//!
//! Tests for each layer of the simulator, from the process state machine up to
//! the file-driven simulator.


/// Dispatcher bursts, switches, full runs, and scheduling properties.
pub mod dispatcher;


/// FIFO queue discipline.
pub mod queue;

/// Loader, trace sinks, and the top-level simulator.
pub mod sim;
