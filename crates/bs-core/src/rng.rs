//! Seeded randomness for reproducible clustering.
//!
//! One root `SeededRng` is created from the configured seed; each k-means
//! restart draws from its own stream:
//!
//!   child_seed = (next u64 from root) XOR (restart * MIXING_CONSTANT)
//!
//! The golden-ratio constant spreads consecutive restart numbers across the
//! seed space.  Same seed and same restart count give the same streams, and
//! therefore the same centroids.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic RNG used by the clustering engine.
pub struct SeededRng(SmallRng);

impl SeededRng {
    pub fn new(seed: u64) -> Self {
        SeededRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive an independent stream for restart `offset`.
    pub fn child(&mut self, offset: u64) -> SeededRng {
        let child_seed = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SeededRng(SmallRng::seed_from_u64(child_seed))
    }

    /// Uniform index in `0..len`.
    ///
    /// # Panics
    /// Panics if `len == 0`.
    #[inline]
    pub fn index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }

    /// Uniform `f64` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }
}
