//! Process identifiers.
//!
//! Pids are strong-typed so they cannot be confused with tape indices or
//! instruction counts, both of which are plain integers in the dispatcher.

use std::fmt;

use super::constants::PROCESS_NAME_PREFIX;

/// Identifier of a simulated process.
///
/// Regular processes are numbered from 1 in load order; the dispatcher
/// pseudo-process carries the reserved [`DISPATCHER_PID`](super::DISPATCHER_PID).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub u32);

impl Pid {
    /// Returns the raw numeric identifier.
    #[inline]
    pub const fn val(self) -> u32 {
        self.0
    }

    /// Returns the display name used in trace output, e.g. `Proceso_3`.
    pub fn process_name(self) -> String {
        format!("{PROCESS_NAME_PREFIX}{}", self.0)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
