//! Process model.
//!
//! This module defines the simulated process and its state machine. It provides:
//! 1. **Opcodes:** The closed set of instructions a tape may contain.
//! 2. **State Machine:** `New → Ready → Running → {Ready, Blocked, Terminated}` with checked transitions.
//! 3. **Execution:** The per-opcode transition table applied by the dispatcher.
//! 4. **Arena:** A table of live processes addressed by stable handles.
//!
//! A process is only ever mutated through the dispatcher's exclusive borrow of the
//! [`ProcessTable`], so its program counter, quantum counter, and state need no
//! lock of their own.

/// Opcode definitions and mnemonic parsing.
pub mod opcode;

/// Arena of live processes and their handles.
pub mod table;

pub use opcode::{Opcode, UnknownOpcode};
pub use table::{ProcessHandle, ProcessTable};

use crate::common::error::{SimError, SimResult};
use crate::common::pid::Pid;
use crate::sched::finish::FinishPolicy;

/// Scheduling state of a process. Authoritative over every derived flag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessState {
    /// Created by the loader, not yet admitted.
    New,
    /// Waiting in the ready queue.
    Ready,
    /// Owned by the dispatcher's current slot.
    Running,
    /// Parked in the blocked queue after an I/O request; never resumes.
    Blocked,
    /// Finished; removed from the process table at the next switch.
    Terminated,
}

/// A simulated process: identity, state, and a fixed opcode tape.
#[derive(Clone, Debug)]
pub struct Process {
    pid: Pid,
    name: String,
    state: ProcessState,
    /// Index of the next opcode; `program_counter == tape.len()` only when terminated.
    program_counter: usize,
    /// Opcodes executed since the process was last dispatched.
    quantum_ticks: usize,
    tape: Vec<Opcode>,
}

impl Process {
    /// Creates a process in the `New` state.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::EmptyTape`] if `tape` has no opcodes.
    pub fn new(pid: Pid, tape: Vec<Opcode>) -> SimResult<Self> {
        if tape.is_empty() {
            return Err(SimError::EmptyTape(pid));
        }
        Ok(Self {
            pid,
            name: pid.process_name(),
            state: ProcessState::New,
            program_counter: 0,
            quantum_ticks: 0,
            tape,
        })
    }

    /// Process identifier.
    pub const fn pid(&self) -> Pid {
        self.pid
    }

    /// Display name, `Proceso_<pid>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current scheduling state.
    pub const fn state(&self) -> ProcessState {
        self.state
    }

    /// Index of the next opcode to execute.
    pub const fn program_counter(&self) -> usize {
        self.program_counter
    }

    /// Opcodes executed since the last dispatch.
    pub const fn quantum_ticks(&self) -> usize {
        self.quantum_ticks
    }

    /// The opcode tape.
    pub fn tape(&self) -> &[Opcode] {
        &self.tape
    }

    /// True once the process has issued an I/O request.
    pub fn is_blocked(&self) -> bool {
        self.state == ProcessState::Blocked
    }

    /// True once the process has terminated.
    pub fn is_finished(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    /// True when the program counter has run off the end of the tape.
    pub fn is_exhausted(&self) -> bool {
        self.program_counter >= self.tape.len()
    }

    /// Opcode at the program counter, or `None` once the tape is exhausted.
    pub fn current_opcode(&self) -> Option<Opcode> {
        self.tape.get(self.program_counter).copied()
    }

    /// `New → Ready`: admission into the ready queue.
    pub fn admit(&mut self) -> SimResult<()> {
        self.transition(ProcessState::New, ProcessState::Ready)
    }

    /// `Ready → Running`: selected by the dispatcher.
    pub fn dispatch(&mut self) -> SimResult<()> {
        self.transition(ProcessState::Ready, ProcessState::Running)
    }

    /// `Running → Ready`: returned to the ready queue, quantum counter cleared.
    pub fn preempt(&mut self) -> SimResult<()> {
        self.transition(ProcessState::Running, ProcessState::Ready)?;
        self.quantum_ticks = 0;
        Ok(())
    }

    /// Clears the quantum counter without changing state.
    pub fn reset_quantum(&mut self) {
        self.quantum_ticks = 0;
    }

    /// Executes the opcode at the program counter and returns it.
    ///
    /// * `Compute` advances the program counter and terminates the process when the
    ///   tape is exhausted.
    /// * `IoWait` advances the program counter and blocks the process.
    /// * `FinishAttempt` terminates the process when `finish` succeeds; otherwise it
    ///   leaves the program counter in place, so the same opcode runs again next time.
    ///
    /// The quantum counter is incremented once per call.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidTransition`] if the process is not `Running`.
    pub fn execute(&mut self, finish: &mut dyn FinishPolicy) -> SimResult<Opcode> {
        let opcode = match (self.state, self.current_opcode()) {
            (ProcessState::Running, Some(opcode)) => opcode,
            (from, _) => {
                return Err(SimError::InvalidTransition {
                    pid: self.pid,
                    from,
                    to: ProcessState::Running,
                });
            }
        };

        match opcode {
            Opcode::Compute => {
                self.program_counter += 1;
                if self.is_exhausted() {
                    self.state = ProcessState::Terminated;
                }
            }
            Opcode::IoWait => {
                self.program_counter += 1;
                self.state = ProcessState::Blocked;
            }
            Opcode::FinishAttempt => {
                if finish.attempt() {
                    self.state = ProcessState::Terminated;
                }
            }
        }
        self.quantum_ticks += 1;
        Ok(opcode)
    }

    fn transition(&mut self, from: ProcessState, to: ProcessState) -> SimResult<()> {
        if self.state != from {
            return Err(SimError::InvalidTransition {
                pid: self.pid,
                from: self.state,
                to,
            });
        }
        self.state = to;
        Ok(())
    }
}
