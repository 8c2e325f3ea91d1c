//! Round-robin dispatcher.
//!
//! The dispatcher owns every live process (through its [`ProcessTable`]), the
//! handle of the running process, and the ready and blocked queues. One dispatch
//! cycle is:
//! 1. **Burst:** Execute up to `burst` opcodes on the running process, stopping early
//!    when it blocks, terminates, or reaches its quantum.
//! 2. **Trace:** Emit one [`TraceRecord`] describing the process after the burst.
//! 3. **Switch:** Return the process to the queue it now belongs to (ready, blocked, or
//!    none if terminated) and dispatch the head of the ready queue.
//!
//! The run ends when the ready queue is empty after a switch. Blocked processes stay
//! in the blocked queue for good; there is no I/O completion event.

use std::fmt;

use tracing::{debug, info, warn};

use crate::common::error::{SimError, SimResult};
use crate::common::pid::Pid;
use crate::config::SchedulerConfig;
use crate::process::{Opcode, Process, ProcessHandle, ProcessState, ProcessTable};
use crate::sim::trace::{TraceRecord, TraceSink};
use crate::stats::SimStats;

use super::finish::{FinishPolicy, Probabilistic};
use super::queue::ProcessQueue;

/// Why a burst stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BurstExit {
    /// All `burst` opcodes ran and the process is still runnable.
    Completed,
    /// The process reached its quantum and was preempted.
    Preempted,
    /// The process issued an `IoWait`.
    Blocked,
    /// The process exhausted its tape or a `FinishAttempt` succeeded.
    Terminated,
}

/// Result of a single [`Dispatcher::run_burst`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BurstOutcome {
    /// Opcodes executed in this burst (at least one).
    pub executed: usize,
    /// Last opcode processed.
    pub last: Opcode,
    /// Why the burst stopped.
    pub exit: BurstExit,
}

/// Preemptive round-robin dispatcher.
pub struct Dispatcher {
    table: ProcessTable,
    current: Option<ProcessHandle>,
    ready: ProcessQueue,
    blocked: ProcessQueue,
    burst: usize,
    quantum: usize,
    max_dispatches: Option<u64>,
    finish: Box<dyn FinishPolicy>,
    stats: SimStats,
}

impl Dispatcher {
    /// Creates an idle dispatcher with an explicit finish policy.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the scheduler parameters are out of range.
    pub fn new(config: &SchedulerConfig, finish: Box<dyn FinishPolicy>) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            table: ProcessTable::new(),
            current: None,
            ready: ProcessQueue::new(),
            blocked: ProcessQueue::new(),
            burst: config.burst,
            quantum: config.quantum,
            max_dispatches: config.max_dispatches,
            finish,
            stats: SimStats::default(),
        })
    }

    /// Creates an idle dispatcher whose FinishAttempt outcomes are drawn with
    /// probability `1 / finish_denominator`, seeded from `config.seed` when set.
    pub fn from_config(config: &SchedulerConfig) -> SimResult<Self> {
        let denominator = config.finish_denominator()?;
        Self::new(config, Box::new(Probabilistic::new(denominator, config.seed)))
    }

    /// Admits a `New` process: marks it `Ready` and appends it to the ready queue.
    pub fn admit(&mut self, mut process: Process) -> SimResult<ProcessHandle> {
        process.admit()?;
        info!(
            pid = process.pid().val(),
            process = process.name(),
            opcodes = process.tape().len(),
            "admitted"
        );
        let handle = self.table.insert(process);
        self.ready.enqueue(handle);
        Ok(handle)
    }

    /// Executes up to `burst` opcodes on the running process.
    ///
    /// Every opcode processed advances the global instruction count. The burst stops
    /// immediately when the process terminates or blocks, or when its quantum counter
    /// reaches `quantum`; in the last case the counter is cleared and the preemption
    /// is counted.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::NoCurrentProcess`] if nothing is dispatched.
    pub fn run_burst(&mut self) -> SimResult<BurstOutcome> {
        let handle = self.current.ok_or(SimError::NoCurrentProcess)?;
        let process = self
            .table
            .get_mut(handle)
            .ok_or(SimError::StaleHandle(handle))?;

        let mut executed = 0;
        loop {
            let opcode = process.execute(self.finish.as_mut())?;
            executed += 1;
            self.stats.instructions += 1;

            let exit = match process.state() {
                ProcessState::Terminated => {
                    self.stats.terminations += 1;
                    debug!(process = process.name(), pc = process.program_counter(), "terminated");
                    Some(BurstExit::Terminated)
                }
                ProcessState::Blocked => {
                    self.stats.io_blocks += 1;
                    info!(
                        cpu_time = self.stats.instructions,
                        process = process.name(),
                        "I/O event"
                    );
                    Some(BurstExit::Blocked)
                }
                _ => {
                    if opcode == Opcode::FinishAttempt {
                        self.stats.failed_finish_attempts += 1;
                    }
                    if process.quantum_ticks() >= self.quantum {
                        process.reset_quantum();
                        self.stats.preemptions += 1;
                        debug!(
                            cpu_time = self.stats.instructions,
                            process = process.name(),
                            "quantum exhausted"
                        );
                        Some(BurstExit::Preempted)
                    } else if executed >= self.burst {
                        Some(BurstExit::Completed)
                    } else {
                        None
                    }
                }
            };

            if let Some(exit) = exit {
                return Ok(BurstOutcome {
                    executed,
                    last: opcode,
                    exit,
                });
            }
        }
    }

    /// Releases the running process and dispatches the head of the ready queue.
    ///
    /// A process that is still `Running` goes back to the tail of the ready queue with
    /// a cleared quantum counter; a `Blocked` one moves to the blocked queue; a
    /// `Terminated` one is dropped from the process table. A dequeued process whose
    /// quantum counter is already at the threshold is preempted again and requeued.
    ///
    /// Returns the newly dispatched handle, or `None` when the ready queue is empty.
    pub fn switch_process(&mut self) -> SimResult<Option<ProcessHandle>> {
        if let Some(handle) = self.current.take() {
            self.release(handle)?;
        }

        while let Some(handle) = self.ready.dequeue() {
            let process = self
                .table
                .get_mut(handle)
                .ok_or(SimError::StaleHandle(handle))?;

            // `release` clears the counter of every process it requeues, so this only
            // fires for a handle that reached the ready queue with its quantum spent.
            if process.quantum_ticks() >= self.quantum {
                process.reset_quantum();
                self.stats.preemptions += 1;
                debug!(process = process.name(), "stale quantum at dispatch, requeued");
                self.ready.enqueue(handle);
                continue;
            }

            process.dispatch()?;
            debug!(
                cpu_time = self.stats.instructions,
                process = process.name(),
                pc = process.program_counter(),
                "dispatched"
            );
            self.current = Some(handle);
            return Ok(Some(handle));
        }
        Ok(None)
    }

    /// Runs one dispatch cycle: burst, trace record, switch.
    ///
    /// Returns the emitted record, or `None` if no process was dispatched.
    pub fn step(&mut self, sink: &mut dyn TraceSink) -> SimResult<Option<TraceRecord>> {
        let Some(handle) = self.current else {
            return Ok(None);
        };
        let outcome = self.run_burst()?;
        self.stats.dispatches += 1;

        let record = self.trace_record(handle, outcome.last)?;
        sink.record(&record)?;
        let _ = self.switch_process()?;
        Ok(Some(record))
    }

    /// Runs dispatch cycles until no process is ready or running.
    ///
    /// Dispatches the head of the ready queue first if nothing is running. On a
    /// normal exit the sink receives the final preemption count and the collected
    /// statistics are returned.
    ///
    /// # Errors
    ///
    /// Propagates sink failures. Returns [`SimError::DispatchLimit`] if
    /// `max_dispatches` is configured and reached while a process is still runnable;
    /// records emitted before that point have already been handed to the sink.
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> SimResult<SimStats> {
        if self.current.is_none() {
            let _ = self.switch_process()?;
        }

        while self.current.is_some() {
            if let Some(limit) = self
                .max_dispatches
                .filter(|&limit| self.stats.dispatches >= limit)
            {
                warn!(
                    limit,
                    cpu_time = self.stats.instructions,
                    "dispatch limit reached with runnable processes"
                );
                sink.finish(self.stats.preemptions)?;
                return Err(SimError::DispatchLimit(limit));
            }
            let _ = self.step(sink)?;
        }

        sink.finish(self.stats.preemptions)?;
        info!(
            instructions = self.stats.instructions,
            preemptions = self.stats.preemptions,
            blocked = self.blocked.len(),
            "simulation finished"
        );
        Ok(self.stats.clone())
    }

    /// Handle of the running process.
    pub const fn current(&self) -> Option<ProcessHandle> {
        self.current
    }

    /// The running process.
    pub fn current_process(&self) -> Option<&Process> {
        self.current.and_then(|h| self.table.get(h))
    }

    /// A live process by handle.
    pub fn process(&self, handle: ProcessHandle) -> Option<&Process> {
        self.table.get(handle)
    }

    /// All live processes.
    pub const fn table(&self) -> &ProcessTable {
        &self.table
    }

    /// The ready queue.
    pub const fn ready(&self) -> &ProcessQueue {
        &self.ready
    }

    /// The blocked queue.
    pub const fn blocked(&self) -> &ProcessQueue {
        &self.blocked
    }

    /// Pids in the ready queue, front to back.
    pub fn ready_pids(&self) -> Vec<Pid> {
        self.pids_of(&self.ready)
    }

    /// Pids in the blocked queue, front to back.
    pub fn blocked_pids(&self) -> Vec<Pid> {
        self.pids_of(&self.blocked)
    }

    /// Counters collected so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Global instruction count.
    pub const fn instruction_count(&self) -> u64 {
        self.stats.instructions
    }

    /// Quantum-exceeded preemptions so far.
    pub const fn preemption_count(&self) -> u64 {
        self.stats.preemptions
    }

    /// True when nothing is running and nothing is ready.
    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.ready.is_empty()
    }

    fn release(&mut self, handle: ProcessHandle) -> SimResult<()> {
        let process = self
            .table
            .get_mut(handle)
            .ok_or(SimError::StaleHandle(handle))?;

        match process.state() {
            ProcessState::Running => {
                process.preempt()?;
                self.ready.enqueue(handle);
            }
            ProcessState::Blocked => self.blocked.enqueue(handle),
            ProcessState::Terminated => {
                if let Some(retired) = self.table.remove(handle) {
                    debug!(process = retired.name(), "retired");
                }
            }
            from @ (ProcessState::New | ProcessState::Ready) => {
                return Err(SimError::InvalidTransition {
                    pid: process.pid(),
                    from,
                    to: ProcessState::Ready,
                });
            }
        }
        Ok(())
    }

    fn trace_record(&self, handle: ProcessHandle, opcode: Opcode) -> SimResult<TraceRecord> {
        let process = self.table.get(handle).ok_or(SimError::StaleHandle(handle))?;
        Ok(TraceRecord {
            instructions: self.stats.instructions,
            opcode,
            process: process.name().to_owned(),
            program_counter: process.program_counter(),
            next: process.current_opcode(),
        })
    }

    fn pids_of(&self, queue: &ProcessQueue) -> Vec<Pid> {
        queue
            .iter()
            .filter_map(|h| self.table.get(h).map(Process::pid))
            .collect()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("current", &self.current)
            .field("ready", &self.ready)
            .field("blocked", &self.blocked)
            .field("burst", &self.burst)
            .field("quantum", &self.quantum)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
