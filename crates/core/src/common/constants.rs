//! Global Simulator Constants.
//!
//! This module defines the conventions shared by the loader and the dispatcher. It includes:
//! 1. **Dispatcher Pseudo-Process:** The reserved pid and file basename of the OS process.
//! 2. **File Layout:** Default creation-order file, process directory, and file extension.
//! 3. **Parsing:** Comment marker for both input formats.

use super::pid::Pid;

/// Reserved pid of the dispatcher/OS pseudo-process.
///
/// The first valid creation-order line always produces this process,
/// regardless of the basename written on that line.
pub const DISPATCHER_PID: Pid = Pid(100);

/// Basename substituted for the first creation-order entry.
pub const DISPATCHER_BASENAME: &str = "despachador";

/// Prefix of process display names (`Proceso_<pid>`).
pub const PROCESS_NAME_PREFIX: &str = "Proceso_";

/// Extension appended to creation-order basenames to locate opcode files.
pub const PROCESS_FILE_EXTENSION: &str = "txt";

/// Default creation-order file name.
pub const DEFAULT_ORDERS_FILE: &str = "Creacion_Procesos.txt";

/// Default directory holding per-process opcode files.
pub const DEFAULT_PROCESS_DIR: &str = "Procesos";

/// Lines starting with this marker are ignored in every input file.
pub const COMMENT_PREFIX: char = '#';
