use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniform integers for question generation.
///
/// Everything random in a question (operands, shapes, option order) is drawn
/// through this trait so tests can pin it down.
pub trait Randomizer {
    /// Uniform draw over the inclusive range `[min, max]`.
    fn rand_int(&mut self, min: i64, max: i64) -> i64;
}

/// Production randomizer backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandomizer;

impl Randomizer for ThreadRandomizer {
    fn rand_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = ordered(min, max);
        rand::thread_rng().gen_range(lo..=hi)
    }
}

/// Reproducible randomizer, used by `--seed` and the property tests
#[derive(Debug, Clone)]
pub struct SeededRandomizer {
    rng: StdRng,
}

impl SeededRandomizer {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Randomizer for SeededRandomizer {
    fn rand_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = ordered(min, max);
        self.rng.gen_range(lo..=hi)
    }
}

/// Replays a fixed list of draws.
///
/// Each value is clamped into the requested range. Once the script runs out
/// every draw returns the range minimum.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandomizer {
    script: VecDeque<i64>,
}

impl ScriptedRandomizer {
    pub fn new<I: IntoIterator<Item = i64>>(values: I) -> Self {
        Self {
            script: values.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Randomizer for ScriptedRandomizer {
    fn rand_int(&mut self, min: i64, max: i64) -> i64 {
        let (lo, hi) = ordered(min, max);
        match self.script.pop_front() {
            Some(v) => v.clamp(lo, hi),
            None => lo,
        }
    }
}

fn ordered(min: i64, max: i64) -> (i64, i64) {
    if min > max {
        tracing::warn!(min, max, "reversed random range, clamping to min");
        (min, min)
    } else {
        (min, max)
    }
}

/// Uniformly pick one element of a non-empty slice
pub fn pick<'a, T>(rng: &mut dyn Randomizer, items: &'a [T]) -> &'a T {
    let idx = rng.rand_int(0, items.len() as i64 - 1) as usize;
    &items[idx]
}

/// Unbiased in-place Fisher-Yates shuffle
pub fn shuffle<T>(rng: &mut dyn Randomizer, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.rand_int(0, i as i64) as usize;
        items.swap(i, j);
    }
}
