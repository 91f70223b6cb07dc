//! Gap source adapters: a seeded RNG for play and a fixed script for tests.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::ports::GapSource;

/// Uniform gap offsets drawn from a [`StdRng`].
#[derive(Debug, Clone)]
pub struct RngGapSource {
    rng: StdRng,
}

impl RngGapSource {
    /// Deterministic source for reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the thread RNG
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Seeded when `seed` is given, entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl GapSource for RngGapSource {
    fn next_below(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        self.rng.random_range(0..upper_bound)
    }
}

/// Replays a fixed offset sequence, cycling when it runs out.
///
/// Values are reduced modulo the requested bound. An empty script always
/// yields zero.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGapSource {
    offsets: Vec<u32>,
    cursor: usize,
}

impl ScriptedGapSource {
    pub fn new(offsets: Vec<u32>) -> Self {
        Self { offsets, cursor: 0 }
    }

    /// Source that places every gap at the same offset
    pub fn constant(offset: u32) -> Self {
        Self::new(vec![offset])
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl GapSource for ScriptedGapSource {
    fn next_below(&mut self, upper_bound: u32) -> u32 {
        let value = if self.offsets.is_empty() || upper_bound == 0 {
            0
        } else {
            self.offsets[self.cursor % self.offsets.len()] % upper_bound
        };
        self.cursor += 1;
        value
    }
}
