//! # Simulation Plumbing Tests


/// File-driven runs through `Simulator`.
pub mod simulator;

/// Trace record formatting and sinks.
pub mod trace;
