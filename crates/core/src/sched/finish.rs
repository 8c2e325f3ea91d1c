//! FinishAttempt outcome sources.
//!
//! A `FinishAttempt` opcode terminates its process with probability `1/p`. The
//! decision is delegated to a [`FinishPolicy`] so that runs can be reproduced
//! with a seed, or scripted outright in tests.
//!
//! A failed attempt does not advance the program counter. With a policy that
//! never succeeds, a process sitting on a `FinishAttempt` keeps consuming bursts
//! without progress; bound such runs with `SchedulerConfig::max_dispatches`.

use std::fmt;
use std::num::NonZeroU32;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Decides whether a `FinishAttempt` terminates its process.
pub trait FinishPolicy: Send {
    /// Returns `true` if the current attempt succeeds.
    fn attempt(&mut self) -> bool;
}

/// Succeeds with probability `1 / denominator`, drawn from a seedable RNG.
pub struct Probabilistic {
    rng: StdRng,
    denominator: NonZeroU32,
}

impl Probabilistic {
    /// Creates a policy; `seed` makes the sequence of outcomes reproducible.
    pub fn new(denominator: NonZeroU32, seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { rng, denominator }
    }
}

impl FinishPolicy for Probabilistic {
    fn attempt(&mut self) -> bool {
        self.rng.gen_ratio(1, self.denominator.get())
    }
}

impl fmt::Debug for Probabilistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Probabilistic")
            .field("denominator", &self.denominator)
            .finish_non_exhaustive()
    }
}
