//! Configuration system for the dispatch simulator.
//!
//! This module defines the configuration structures used to parameterize a run. It provides:
//! 1. **Defaults:** Baseline burst length, quantum, finish-probability denominator, and file layout.
//! 2. **Structures:** Scheduler parameters and input locations.
//! 3. **Validation:** Range checks performed before any process is loaded.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or built with `Config::default()`;
//! command-line values are layered on top by the caller.

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::constants::{DEFAULT_ORDERS_FILE, DEFAULT_PROCESS_DIR};
use crate::common::error::{SimError, SimResult};

/// Default configuration constants for the simulator.
mod defaults {
    /// Opcodes executed per dispatch burst.
    pub const BURST: usize = 3;

    /// Opcodes a process may execute in one dispatch before it is preempted.
    pub const QUANTUM: usize = 5;

    /// Denominator `p` of the `1/p` FinishAttempt success probability.
    pub const FINISH_DENOMINATOR: u32 = 4;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use rrsim_core::config::Config;
///
/// let json = r#"{
///     "scheduler": { "burst": 2, "quantum": 4, "finish_denominator": 1, "seed": 7 },
///     "input": { "process_dir": "procs" }
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.scheduler.burst, 2);
/// assert_eq!(config.scheduler.seed, Some(7));
/// assert_eq!(config.input.process_dir.to_str(), Some("procs"));
/// assert_eq!(config.input.orders_file.to_str(), Some("Creacion_Procesos.txt"));
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Dispatch parameters
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Input file locations
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    /// Parses a configuration from a JSON string; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        serde_json::from_str(json).map_err(|e| SimError::Config(format!("malformed JSON: {e}")))
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: &Path) -> SimResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }

    /// Checks every parameter; called before any process is loaded.
    pub fn validate(&self) -> SimResult<()> {
        self.scheduler.validate()
    }
}

/// Dispatch parameters consumed by the dispatcher.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Opcodes executed per dispatch burst (`n`, > 0)
    #[serde(default = "SchedulerConfig::default_burst")]
    pub burst: usize,

    /// Preemption threshold in opcodes per dispatch (> 0)
    #[serde(default = "SchedulerConfig::default_quantum")]
    pub quantum: usize,

    /// FinishAttempt succeeds with probability `1 / finish_denominator` (> 0)
    #[serde(default = "SchedulerConfig::default_finish_denominator")]
    pub finish_denominator: u32,

    /// Seed for the FinishAttempt random source; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Abort after this many dispatch cycles if processes are still runnable
    #[serde(default)]
    pub max_dispatches: Option<u64>,
}

impl SchedulerConfig {
    fn default_burst() -> usize {
        defaults::BURST
    }

    fn default_quantum() -> usize {
        defaults::QUANTUM
    }

    fn default_finish_denominator() -> u32 {
        defaults::FINISH_DENOMINATOR
    }

    /// Rejects zero-valued parameters.
    pub fn validate(&self) -> SimResult<()> {
        if self.burst == 0 {
            return Err(SimError::Config("burst (n) must be a positive integer".into()));
        }
        if self.quantum == 0 {
            return Err(SimError::Config("quantum must be a positive integer".into()));
        }
        if self.finish_denominator == 0 {
            return Err(SimError::Config(
                "finish denominator (p) must be a positive integer".into(),
            ));
        }
        if self.max_dispatches == Some(0) {
            return Err(SimError::Config("max_dispatches must be positive when set".into()));
        }
        Ok(())
    }

    /// Returns the finish denominator as a non-zero value, validating it.
    pub fn finish_denominator(&self) -> SimResult<NonZeroU32> {
        NonZeroU32::new(self.finish_denominator).ok_or_else(|| {
            SimError::Config("finish denominator (p) must be a positive integer".into())
        })
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            burst: defaults::BURST,
            quantum: defaults::QUANTUM,
            finish_denominator: defaults::FINISH_DENOMINATOR,
            seed: None,
            max_dispatches: None,
        }
    }
}

/// Locations of the creation-order file and the per-process opcode files.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Creation-order file (`<arrival> <basename>` per line)
    #[serde(default = "InputConfig::default_orders_file")]
    pub orders_file: PathBuf,

    /// Directory holding `<basename>.txt` opcode files
    #[serde(default = "InputConfig::default_process_dir")]
    pub process_dir: PathBuf,
}

impl InputConfig {
    fn default_orders_file() -> PathBuf {
        PathBuf::from(DEFAULT_ORDERS_FILE)
    }

    fn default_process_dir() -> PathBuf {
        PathBuf::from(DEFAULT_PROCESS_DIR)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            orders_file: Self::default_orders_file(),
            process_dir: Self::default_process_dir(),
        }
    }
}
