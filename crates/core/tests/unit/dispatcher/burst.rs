//! Burst execution tests.

use pretty_assertions::assert_eq;
use rrsim_core::SimError;
use rrsim_core::process::{Opcode, ProcessState};
use rrsim_core::sched::{BurstExit, BurstOutcome};

use crate::common::harness::TestContext;

/// Context with one admitted and dispatched process.
fn dispatched(burst: usize, quantum: usize, src: &str) -> TestContext {
    let mut ctx = TestContext::new(burst, quantum);
    let _ = ctx.spawn(100, src);
    let _ = ctx.dispatcher.switch_process().unwrap();
    ctx
}

#[test]
fn test_burst_without_current_process() {
    let mut ctx = TestContext::new(2, 4);
    assert!(matches!(
        ctx.dispatcher.run_burst(),
        Err(SimError::NoCurrentProcess)
    ));
}

#[test]
fn test_burst_runs_n_opcodes() {
    let mut ctx = dispatched(2, 4, "I I I I I");
    let outcome = ctx.dispatcher.run_burst().unwrap();
    assert_eq!(
        outcome,
        BurstOutcome {
            executed: 2,
            last: Opcode::Compute,
            exit: BurstExit::Completed,
        }
    );
    assert_eq!(ctx.dispatcher.instruction_count(), 2);
    assert_eq!(ctx.dispatcher.preemption_count(), 0);
    assert_eq!(ctx.dispatcher.current_process().unwrap().program_counter(), 2);
}

#[test]
fn test_burst_stops_at_quantum() {
    let mut ctx = dispatched(5, 2, "I I I I I");
    let outcome = ctx.dispatcher.run_burst().unwrap();
    assert_eq!(outcome.executed, 2);
    assert_eq!(outcome.exit, BurstExit::Preempted);
    assert_eq!(ctx.dispatcher.preemption_count(), 1);

    let process = ctx.dispatcher.current_process().unwrap();
    assert_eq!(process.quantum_ticks(), 0);
    assert_eq!(process.program_counter(), 2);
}

#[test]
fn test_quantum_equal_to_burst_counts_as_preemption() {
    let mut ctx = dispatched(3, 3, "I I I I");
    let outcome = ctx.dispatcher.run_burst().unwrap();
    assert_eq!(outcome.executed, 3);
    assert_eq!(outcome.exit, BurstExit::Preempted);
    assert_eq!(ctx.dispatcher.preemption_count(), 1);
}

#[test]
fn test_burst_stops_on_io_wait() {
    let mut ctx = dispatched(5, 5, "I ES I I");
    let outcome = ctx.dispatcher.run_burst().unwrap();
    assert_eq!(outcome.executed, 2);
    assert_eq!(outcome.last, Opcode::IoWait);
    assert_eq!(outcome.exit, BurstExit::Blocked);
    assert_eq!(
        ctx.dispatcher.current_process().unwrap().state(),
        ProcessState::Blocked
    );
    assert_eq!(ctx.dispatcher.stats().io_blocks, 1);
}

#[test]
fn test_burst_stops_on_tape_exhaustion() {
    let mut ctx = dispatched(5, 5, "I I");
    let outcome = ctx.dispatcher.run_burst().unwrap();
    assert_eq!(outcome.executed, 2);
    assert_eq!(outcome.exit, BurstExit::Terminated);
    assert_eq!(ctx.dispatcher.stats().terminations, 1);
}

#[test]
fn test_termination_on_quantum_boundary_is_not_a_preemption() {
    let mut ctx = dispatched(3, 2, "I I");
    let outcome = ctx.dispatcher.run_burst().unwrap();
    assert_eq!(outcome.exit, BurstExit::Terminated);
    assert_eq!(ctx.dispatcher.preemption_count(), 0);
}

#[test]
fn test_blocking_on_quantum_boundary_is_not_a_preemption() {
    let mut ctx = dispatched(3, 2, "I ES I");
    let outcome = ctx.dispatcher.run_burst().unwrap();
    assert_eq!(outcome.exit, BurstExit::Blocked);
    assert_eq!(ctx.dispatcher.preemption_count(), 0);
}

#[test]
fn test_failed_finish_attempts_consume_the_burst() {
    let mut ctx = dispatched(3, 10, "I F I");
    let outcome = ctx.dispatcher.run_burst().unwrap();
    assert_eq!(outcome.executed, 3);
    assert_eq!(outcome.last, Opcode::FinishAttempt);
    assert_eq!(outcome.exit, BurstExit::Completed);
    assert_eq!(ctx.dispatcher.stats().failed_finish_attempts, 2);
    assert_eq!(ctx.dispatcher.current_process().unwrap().program_counter(), 1);
}

#[test]
fn test_trace_record_carries_last_opcode_of_burst() {
    let mut ctx = dispatched(3, 5, "I ES I");
    let record = ctx.dispatcher.step(&mut ctx.sink).unwrap().unwrap();
    assert_eq!(record.opcode, Opcode::IoWait);
    assert_eq!(record.to_string(), "2 ES Proceso_100 2 I");
    assert_eq!(ctx.sink.records, vec![record]);
}
