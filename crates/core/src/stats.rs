//! Simulation statistics collection and reporting.
//!
//! This module tracks the dispatcher's counters. It provides:
//! 1. **Instruction count:** Opcodes executed across all processes (the trace clock).
//! 2. **Preemptions:** Quantum-exceeded events, the run's headline result.
//! 3. **Dispatch activity:** Dispatch cycles, I/O blocks, terminations, and failed finish attempts.

use std::time::Instant;

/// Counters owned by the dispatcher for the lifetime of a run.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Opcodes executed across all processes; never decreases.
    pub instructions: u64,
    /// Quantum-exceeded preemptions.
    pub preemptions: u64,
    /// Dispatch cycles run (one trace record each).
    pub dispatches: u64,
    /// Processes moved to the blocked queue by an `IoWait`.
    pub io_blocks: u64,
    /// Processes that terminated (tape exhausted or FinishAttempt succeeded).
    pub terminations: u64,
    /// `FinishAttempt` opcodes that did not terminate their process.
    pub failed_finish_attempts: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            instructions: 0,
            preemptions: 0,
            dispatches: 0,
            io_blocks: 0,
            terminations: 0,
            failed_finish_attempts: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"scheduling"`, `"processes"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "scheduling", "processes"];

impl SimStats {
    /// Average opcodes executed per dispatch cycle, or 0 before the first dispatch.
    pub fn mean_burst(&self) -> f64 {
        if self.dispatches == 0 {
            0.0
        } else {
            self.instructions as f64 / self.dispatches as f64
        }
    }

    /// Renders the requested sections as a report string.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an empty
    /// slice renders all of them.
    pub fn render_sections(&self, sections: &[String]) -> String {
        use std::fmt::Write;

        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::new();
        let rule = "----------------------------------------------------------";

        // Writing into a String cannot fail.
        let _ = writeln!(out, "==========================================================");
        let _ = writeln!(out, "ROUND-ROBIN DISPATCH STATISTICS");
        let _ = writeln!(out, "==========================================================");
        if want("summary") {
            let seconds = self.start_time.elapsed().as_secs_f64();
            let _ = writeln!(out, "host_seconds             {seconds:.4} s");
            let _ = writeln!(out, "sim_insts                {}", self.instructions);
            let _ = writeln!(out, "sim_preemptions          {}", self.preemptions);
            let _ = writeln!(out, "{rule}");
        }
        if want("scheduling") {
            let preempt_rate = if self.dispatches == 0 {
                0.0
            } else {
                (self.preemptions as f64 / self.dispatches as f64) * 100.0
            };
            let _ = writeln!(out, "SCHEDULING");
            let _ = writeln!(out, "  dispatches             {}", self.dispatches);
            let _ = writeln!(out, "  mean_burst             {:.2}", self.mean_burst());
            let _ = writeln!(out, "  preempt_rate           {preempt_rate:.2}%");
            let _ = writeln!(out, "{rule}");
        }
        if want("processes") {
            let _ = writeln!(out, "PROCESSES");
            let _ = writeln!(out, "  terminated             {}", self.terminations);
            let _ = writeln!(out, "  blocked.io             {}", self.io_blocks);
            let _ = writeln!(out, "  finish.failed          {}", self.failed_finish_attempts);
        }
        let _ = writeln!(out, "==========================================================");
        out
    }

    /// Prints only the requested statistics sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }
}
