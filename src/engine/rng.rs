//! Deterministic random number generation.
//!
//! Wraps PCG-64 behind an explicit handle that every sampler takes by
//! `&mut`. Nothing in the crate reaches for ambient global randomness.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, all draws are bitwise-identical across runs
//! and platforms. Runs seeded from entropy still record the seed they used,
//! so any run that starts on a fresh handle can be replayed. Once a handle
//! has produced output its seed no longer identifies the stream position,
//! and [`DemoRng::replay_seed`] returns `None`.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Seedable random source shared by one process's demo runs.
#[derive(Debug, Clone)]
pub struct DemoRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
    /// Number of generator calls made so far.
    draws: u64,
}

impl DemoRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            rng: Pcg64::seed_from_u64(master_seed),
            draws: 0,
        }
    }

    /// Create an RNG whose seed is drawn from operating-system entropy.
    ///
    /// The chosen seed is still available through [`Self::master_seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        let seed: u64 = rand::thread_rng().gen();
        tracing::debug!(seed, "seeded random source from entropy");
        Self::new(seed)
    }

    /// Use `seed` when present, otherwise seed from entropy.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Number of generator calls made since seeding.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.draws
    }

    /// Whether no output has been drawn since seeding.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.draws == 0
    }

    /// Seed that reproduces the stream from the current position.
    ///
    /// `Some(master_seed)` on a fresh handle, `None` once it has advanced.
    #[must_use]
    pub const fn replay_seed(&self) -> Option<u64> {
        if self.is_fresh() {
            Some(self.master_seed)
        } else {
            None
        }
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.gen()
    }
}

impl RngCore for DemoRng {
    fn next_u32(&mut self) -> u32 {
        self.draws += 1;
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.draws += 1;
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        if !dest.is_empty() {
            self.draws += 1;
        }
        self.rng.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        if !dest.is_empty() {
            self.draws += 1;
        }
        self.rng.try_fill_bytes(dest)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Reproducibility holds for any seed.
        #[test]
        fn prop_reproducibility(seed in 0u64..u64::MAX) {
            let mut rng1 = DemoRng::new(seed);
            let mut rng2 = DemoRng::new(seed);

            let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
            let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

            prop_assert_eq!(seq1, seq2);
        }

        /// Values stay in [0, 1) for any seed.
        #[test]
        fn prop_unit_interval(seed in 0u64..u64::MAX) {
            let mut rng = DemoRng::new(seed);

            for _ in 0..100 {
                let v = rng.gen_f64();
                prop_assert!((0.0..1.0).contains(&v), "Value {} not in [0, 1)", v);
            }
        }
    }
}
