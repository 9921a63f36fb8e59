//! Random source seam.
//!
//! The generator only ever asks for two shapes of number: a uniform integer
//! over an inclusive range and a uniform real over a half-open range. Tests
//! swap in [`ScriptedRandom`] to make a tick fully deterministic.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Uniform integer in `[min, max]`.
    fn int_inclusive(&mut self, min: u64, max: u64) -> u64;

    /// Uniform real in `[min, max)`.
    fn real(&mut self, min: f64, max: f64) -> f64;
}

/// Production source backed by `StdRng`.
#[derive(Debug)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible stream for a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl RandomSource for StdRandom {
    fn int_inclusive(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    fn real(&mut self, min: f64, max: f64) -> f64 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}

/// Deterministic source: integers and reals are served from two FIFO queues.
/// An exhausted queue yields the requested range minimum.
#[derive(Debug, Default, Clone)]
pub struct ScriptedRandom {
    ints: VecDeque<u64>,
    reals: VecDeque<f64>,
}

impl ScriptedRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ints(mut self, values: impl IntoIterator<Item = u64>) -> Self {
        self.ints.extend(values);
        self
    }

    pub fn with_reals(mut self, values: impl IntoIterator<Item = f64>) -> Self {
        self.reals.extend(values);
        self
    }

    #[cfg(test)]
    fn remaining(&self) -> (usize, usize) {
        (self.ints.len(), self.reals.len())
    }
}

impl RandomSource for ScriptedRandom {
    fn int_inclusive(&mut self, min: u64, _max: u64) -> u64 {
        self.ints.pop_front().unwrap_or(min)
    }

    fn real(&mut self, min: f64, _max: f64) -> f64 {
        self.reals.pop_front().unwrap_or(min)
    }
}
