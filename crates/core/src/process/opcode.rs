//! Process opcodes.
//!
//! A process tape is a sequence of three opcodes. The textual mnemonics are the
//! ones used by process definition files and by the trace output.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A single instruction on a process tape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// CPU work; advances the program counter (`I`).
    Compute,
    /// I/O request; advances the program counter and blocks the process (`ES`).
    IoWait,
    /// Probabilistic early exit; does not advance the program counter (`F`).
    FinishAttempt,
}

impl Opcode {
    /// All opcodes, in mnemonic order.
    pub const ALL: [Self; 3] = [Self::Compute, Self::IoWait, Self::FinishAttempt];

    /// Returns the file/trace mnemonic for this opcode.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Compute => "I",
            Self::IoWait => "ES",
            Self::FinishAttempt => "F",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A token that is not one of the known opcode mnemonics.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown opcode `{0}`")]
pub struct UnknownOpcode(pub String);

impl FromStr for Opcode {
    type Err = UnknownOpcode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "I" => Ok(Self::Compute),
            "ES" => Ok(Self::IoWait),
            "F" => Ok(Self::FinishAttempt),
            other => Err(UnknownOpcode(other.to_owned())),
        }
    }
}
