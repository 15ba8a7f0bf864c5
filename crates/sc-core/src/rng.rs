//! Deterministic simulation-level RNG wrapper.
//!
//! # Determinism strategy
//!
//! A space owns exactly one `SimRng`, seeded from `SimConfig::seed`.  It is
//! only touched during setup (random craft placement) and when building a
//! randomized copy of a space, never inside a tick, so integration stays
//! free of hidden randomness.
//!
//! `SimRng` is `Clone`: a cloned space continues from the same stream
//! position as the original, which keeps snapshot-and-rollout planning
//! reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG for setup-time and randomization operations.
#[derive(Clone, Debug)]
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.  Costs this
    /// stream a single draw.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
