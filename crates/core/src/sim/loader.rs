//! Creation-order and process definition loading.
//!
//! This module turns the input files into processes ready for admission. It performs:
//! 1. **Creation orders:** Parses `<arrival> <basename>` lines, skipping comments, short
//!    lines, and non-integer arrival times. The first valid line always names the
//!    dispatcher pseudo-process, whatever basename it carries.
//! 2. **Opcode tapes:** Reads `<dir>/<basename>.txt`, one mnemonic per line. A missing or
//!    empty file, or an unknown mnemonic, fails the whole load.
//! 3. **Pid assignment:** The dispatcher pseudo-process gets the reserved pid; regular
//!    processes are numbered from 1 in load order.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::common::constants::{
    COMMENT_PREFIX, DISPATCHER_BASENAME, DISPATCHER_PID, PROCESS_FILE_EXTENSION,
};
use crate::common::error::{SimError, SimResult};
use crate::common::pid::Pid;
use crate::config::InputConfig;
use crate::process::{Opcode, Process};

/// One valid line of the creation-order file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreationOrder {
    /// Arrival time as written in the file; may be negative. Recorded, not used for ordering.
    pub arrival: i64,
    /// Basename of the opcode file, without extension.
    pub basename: String,
}

/// A loaded process together with its arrival time.
#[derive(Clone, Debug)]
pub struct Admission {
    /// Arrival time from the creation-order file.
    pub arrival: i64,
    /// Process in the `New` state.
    pub process: Process,
}

/// Parses creation-order text.
///
/// Lines starting with `#`, lines with fewer than two fields, and lines whose first
/// field is not an integer are skipped. Negative arrival times are accepted. The basename of the first valid
/// line is replaced with [`DISPATCHER_BASENAME`].
pub fn parse_creation_orders(contents: &str) -> Vec<CreationOrder> {
    let mut orders: Vec<CreationOrder> = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        if line.starts_with(COMMENT_PREFIX) {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(time), Some(basename)) = (fields.next(), fields.next()) else {
            if !line.trim().is_empty() {
                debug!(line = index + 1, "skipping creation order with fewer than two fields");
            }
            continue;
        };
        let Ok(arrival) = time.parse::<i64>() else {
            debug!(line = index + 1, time, "skipping creation order with non-numeric time");
            continue;
        };

        let basename = if orders.is_empty() {
            DISPATCHER_BASENAME.to_owned()
        } else {
            basename.to_owned()
        };
        orders.push(CreationOrder { arrival, basename });
    }
    orders
}

/// Reads and parses a creation-order file.
pub fn read_creation_orders(path: &Path) -> SimResult<Vec<CreationOrder>> {
    let contents = fs::read_to_string(path).map_err(|e| SimError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let orders = parse_creation_orders(&contents);
    if orders.is_empty() {
        warn!(path = %path.display(), "creation-order file has no valid entries");
    }
    Ok(orders)
}

/// Parses opcode-file text; `path` is only used for error messages.
///
/// Lines are trimmed; blank lines and `#` comments are skipped.
pub fn parse_tape(path: &Path, contents: &str) -> SimResult<Vec<Opcode>> {
    let mut tape = Vec::new();
    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_PREFIX) {
            continue;
        }
        let opcode = line.parse::<Opcode>().map_err(|e| SimError::Load {
            path: path.to_path_buf(),
            reason: format!("line {}: {e}", index + 1),
        })?;
        tape.push(opcode);
    }

    if tape.is_empty() {
        return Err(SimError::Load {
            path: path.to_path_buf(),
            reason: "process file is empty".into(),
        });
    }
    Ok(tape)
}

/// Reads and parses an opcode file.
pub fn load_tape(path: &Path) -> SimResult<Vec<Opcode>> {
    let contents = fs::read_to_string(path).map_err(|e| SimError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_tape(path, &contents)
}

/// Hands out pids: the reserved dispatcher pid first, then 1, 2, 3, …
#[derive(Debug)]
pub struct PidAllocator {
    next: u32,
    dispatcher_assigned: bool,
}

impl PidAllocator {
    /// Creates an allocator whose first pid is [`DISPATCHER_PID`].
    pub const fn new() -> Self {
        Self {
            next: 1,
            dispatcher_assigned: false,
        }
    }

    /// Returns the next pid.
    pub fn allocate(&mut self) -> Pid {
        if !self.dispatcher_assigned {
            self.dispatcher_assigned = true;
            return DISPATCHER_PID;
        }
        if Pid(self.next) == DISPATCHER_PID {
            self.next += 1;
        }
        let pid = Pid(self.next);
        self.next += 1;
        pid
    }
}

impl Default for PidAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Loads opcode files for creation orders and assigns pids.
#[derive(Debug)]
pub struct Loader {
    process_dir: PathBuf,
    pids: PidAllocator,
}

impl Loader {
    /// Creates a loader reading `<process_dir>/<basename>.txt`.
    pub fn new(process_dir: impl Into<PathBuf>) -> Self {
        Self {
            process_dir: process_dir.into(),
            pids: PidAllocator::new(),
        }
    }

    /// Path of the opcode file for `basename`.
    pub fn process_path(&self, basename: &str) -> PathBuf {
        self.process_dir
            .join(format!("{basename}.{PROCESS_FILE_EXTENSION}"))
    }

    /// Loads one process.
    pub fn load_process(&mut self, order: &CreationOrder) -> SimResult<Admission> {
        let path = self.process_path(&order.basename);
        info!(path = %path.display(), "opening process file");
        let tape = load_tape(&path)?;
        let process = Process::new(self.pids.allocate(), tape)?;
        Ok(Admission {
            arrival: order.arrival,
            process,
        })
    }

    /// Loads every order in file order; the first failure aborts the whole load.
    pub fn load_all(&mut self, orders: &[CreationOrder]) -> SimResult<Vec<Admission>> {
        orders.iter().map(|order| self.load_process(order)).collect()
    }
}

/// Reads the creation-order file named by `input` and loads every process it lists.
pub fn load_admissions(input: &InputConfig) -> SimResult<Vec<Admission>> {
    let orders = read_creation_orders(&input.orders_file)?;
    Loader::new(input.process_dir.clone()).load_all(&orders)
}
