//! Trace records and sinks.
//!
//! The dispatcher emits one [`TraceRecord`] per dispatch cycle. Records render as
//! `<instructions> <opcode> <process> <pc> [<next opcode>]`, the trailing field
//! present only while the process still has opcodes left on its tape.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::common::error::SimResult;
use crate::process::Opcode;

/// Scheduler state after one dispatch cycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    /// Global instruction count at the end of the burst.
    pub instructions: u64,
    /// Last opcode processed in the burst.
    pub opcode: Opcode,
    /// Display name of the dispatched process.
    pub process: String,
    /// Program counter after the burst.
    pub program_counter: usize,
    /// Opcode at the program counter, or `None` if the tape is exhausted.
    pub next: Option<Opcode>,
}

impl fmt::Display for TraceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.instructions, self.opcode, self.process, self.program_counter
        )?;
        if let Some(next) = self.next {
            write!(f, " {next}")?;
        }
        Ok(())
    }
}

/// Consumer of trace records and the final preemption count.
pub trait TraceSink {
    /// Accepts one record; called once per dispatch cycle.
    fn record(&mut self, record: &TraceRecord) -> SimResult<()>;

    /// Called once after the last record with the run's preemption count.
    fn finish(&mut self, _preemptions: u64) -> SimResult<()> {
        Ok(())
    }
}

/// Writes one line per record to any [`Write`] destination.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
    lines: u64,
}

impl<W: Write> WriterSink<W> {
    /// Wraps a writer.
    pub const fn new(out: W) -> Self {
        Self { out, lines: 0 }
    }

    /// Number of lines written so far.
    pub const fn lines(&self) -> u64 {
        self.lines
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl WriterSink<BufWriter<File>> {
    /// Creates (or truncates) `path` and writes records to it.
    pub fn create(path: &Path) -> SimResult<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn record(&mut self, record: &TraceRecord) -> SimResult<()> {
        writeln!(self.out, "{record}")?;
        self.lines += 1;
        Ok(())
    }

    fn finish(&mut self, _preemptions: u64) -> SimResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Keeps records in memory; used for inspection and tests.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    /// Records in emission order.
    pub records: Vec<TraceRecord>,
    /// Preemption count reported by `finish`, once the run has ended.
    pub preemptions: Option<u64>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records rendered as trace lines.
    pub fn lines(&self) -> Vec<String> {
        self.records.iter().map(ToString::to_string).collect()
    }
}

impl TraceSink for MemorySink {
    fn record(&mut self, record: &TraceRecord) -> SimResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(&mut self, preemptions: u64) -> SimResult<()> {
        self.preemptions = Some(preemptions);
        Ok(())
    }
}
