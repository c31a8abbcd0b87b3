//! The deterministic random source.
//!
//! Every random decision in a generation run flows through one
//! [`RandomSource`], so a run is a pure function of (seed, call sequence).
//! [`SeededSource`] is the production implementation; tests inject scripted
//! doubles to force specific draw sequences.

use bytes::Bytes;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::bits::BitBuf;

/// A deterministic stream of bounded integers, bit patterns, and coin flips.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` must be nonzero.
    fn below(&mut self, bound: u64) -> u64;

    /// `len` uniformly random bits.
    fn bits(&mut self, len: usize) -> BitBuf;

    /// Bernoulli draw with the given probability of `true`.
    fn chance(&mut self, probability: f64) -> bool;
}

/// A seeded ChaCha-backed random source.
///
/// ChaCha's output stream is stable across `rand` releases, which keeps
/// golden vectors valid over time.
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Create a source from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn below(&mut self, bound: u64) -> u64 {
        debug_assert!(bound > 0, "below() requires a nonzero bound");
        self.rng.gen_range(0..bound)
    }

    fn bits(&mut self, len: usize) -> BitBuf {
        let byte_len = len.div_ceil(8);
        let mut data = vec![0u8; byte_len];
        self.rng.fill_bytes(&mut data);
        if len % 8 != 0 {
            data[byte_len - 1] &= 0xFFu8 << (8 - len % 8);
        }
        BitBuf::from_raw_parts(Bytes::from(data), len)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }
}
