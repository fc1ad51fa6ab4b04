//! RNG module - seeded palette sampling
//!
//! Refill picks are uniform over the regular palette. The generator is a seeded
//! ChaCha8 stream so a game started from the same seed replays identically.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for palette sampling
#[derive(Debug, Clone)]
pub struct PaletteRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl PaletteRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn pick(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty palette");
        self.inner.gen_range(0..len.max(1))
    }

    /// The seed this stream started from (for restarting with the same sequence)
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for PaletteRng {
    fn default() -> Self {
        Self::new(1)
    }
}
