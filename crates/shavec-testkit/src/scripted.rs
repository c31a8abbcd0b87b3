//! Scripted random source for forcing exact draw sequences.

use std::collections::VecDeque;

use shavec_core::{BitBuf, BitBufMut, RandomSource};

/// A [`RandomSource`] test double that replays queued draws.
///
/// `below` pops from the integer queue, `chance` from the flip queue, and
/// `bits` returns all-zero bits. Exhausting a queue panics with a
/// descriptive message, which is the desired behavior in a test.
pub struct ScriptedSource {
    ints: VecDeque<u64>,
    flips: VecDeque<bool>,
}

impl ScriptedSource {
    /// Queue up integer and coin-flip draws.
    pub fn new(
        ints: impl IntoIterator<Item = u64>,
        flips: impl IntoIterator<Item = bool>,
    ) -> Self {
        Self {
            ints: ints.into_iter().collect(),
            flips: flips.into_iter().collect(),
        }
    }

    /// Check whether every queued draw has been consumed.
    pub fn is_drained(&self) -> bool {
        self.ints.is_empty() && self.flips.is_empty()
    }
}

impl RandomSource for ScriptedSource {
    fn below(&mut self, bound: u64) -> u64 {
        let draw = self
            .ints
            .pop_front()
            .expect("scripted integer draws exhausted");
        assert!(draw < bound, "scripted draw {draw} out of bound {bound}");
        draw
    }

    fn bits(&mut self, len: usize) -> BitBuf {
        let mut builder = BitBufMut::with_capacity(len);
        builder.push_zeros(len);
        builder.freeze()
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.flips
            .pop_front()
            .expect("scripted coin-flip draws exhausted")
    }
}
