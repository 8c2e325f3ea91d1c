//! Simulation plumbing around the dispatcher.
//!
//! Provides the loader that turns input files into admitted processes, the trace
//! sinks that persist per-cycle records, and the [`Simulator`](simulator::Simulator)
//! that wires them together.

/// Creation-order and opcode file loading.
pub mod loader;

/// Top-level simulator.
pub mod simulator;

/// Trace records and sinks.
pub mod trace;
