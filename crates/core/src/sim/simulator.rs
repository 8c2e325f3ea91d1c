//! Simulator: loads processes, admits them, and runs the dispatcher.
//!
//! Load errors surface before any trace record exists, so a failed load never
//! produces partial output.

use crate::common::error::SimResult;
use crate::config::Config;
use crate::sched::Dispatcher;
use crate::stats::SimStats;

use super::loader::{self, Admission};
use super::trace::TraceSink;

/// Top-level simulator wrapping a populated dispatcher.
#[derive(Debug)]
pub struct Simulator {
    dispatcher: Dispatcher,
}

impl Simulator {
    /// Validates `config`, loads every process it names, and admits them in file order.
    pub fn new(config: &Config) -> SimResult<Self> {
        config.validate()?;
        let admissions = loader::load_admissions(&config.input)?;
        let dispatcher = Dispatcher::from_config(&config.scheduler)?;
        Self::with_admissions(dispatcher, admissions)
    }

    /// Admits already-loaded processes into `dispatcher`.
    pub fn with_admissions(
        mut dispatcher: Dispatcher,
        admissions: Vec<Admission>,
    ) -> SimResult<Self> {
        for admission in admissions {
            let _ = dispatcher.admit(admission.process)?;
        }
        Ok(Self { dispatcher })
    }

    /// Runs to completion, streaming one record per dispatch cycle into `sink`.
    pub fn run(&mut self, sink: &mut dyn TraceSink) -> SimResult<SimStats> {
        self.dispatcher.run(sink)
    }

    /// The underlying dispatcher.
    pub const fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
