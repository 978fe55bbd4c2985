//! Deterministic RNG wrapper using PCG32.
//!
//! The decorative ring pattern is the only randomized element of a card,
//! and it must be reproducible: repeated renders of the same deck have to
//! produce the same pattern. Every random draw therefore goes through this
//! wrapper, constructed from an explicit seed, never a process-global
//! source.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Clone)]
pub struct DeckRng {
    inner: Pcg32,
}

impl DeckRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating the bits so distinct
    /// 32-bit seeds stay distinct in PCG32 state space.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Generate a random value in the given range.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }
}
