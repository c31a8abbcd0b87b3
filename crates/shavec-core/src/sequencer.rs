//! Wraparound packet ID sequencing.
//!
//! Each pipeline side (buffer, hash) owns one [`IdSequencer`]. A sequencer
//! hands out the current tag, then advances its counter by one — plus one
//! more with a configurable probability, modeling a pipeline stage that
//! speculatively skips ahead. Tags wrap at [`ID_MODULUS`]; the no-wrap
//! counter never wraps and is what reconciliation compares.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rng::RandomSource;

/// Modulus for wrapped ID tags.
pub const ID_MODULUS: u64 = 64;

/// Default probability of the extra advancement step.
pub const DEFAULT_EXTRA_ADVANCE_PROBABILITY: f64 = 0.20;

/// A wrapped packet ID tag, always in `[0, ID_MODULUS)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdTag(pub u8);

impl IdTag {
    /// The raw tag value.
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for IdTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdTag({})", self.0)
    }
}

impl fmt::Display for IdTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One step of a sequencer: the wrapped tag and its no-wrap counterpart.
///
/// Invariant: `no_wrap % ID_MODULUS == tag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequencerStep {
    pub tag: IdTag,
    pub no_wrap: u64,
}

/// A monotonic ID counter with probabilistic extra advancement.
#[derive(Debug, Clone)]
pub struct IdSequencer {
    no_wrap: u64,
    extra_advance_probability: f64,
}

impl IdSequencer {
    /// Create a sequencer starting at zero.
    ///
    /// `extra_advance_probability` must be in `[0, 1]`.
    pub fn new(extra_advance_probability: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&extra_advance_probability),
            "extra advance probability {extra_advance_probability} out of range"
        );
        Self {
            no_wrap: 0,
            extra_advance_probability,
        }
    }

    /// The configured extra-advancement probability.
    pub fn extra_advance_probability(&self) -> f64 {
        self.extra_advance_probability
    }

    /// The no-wrap value the next call will return.
    pub fn position(&self) -> u64 {
        self.no_wrap
    }

    /// Return the current tag, then advance.
    ///
    /// The counter always advances by one, plus one more on a `chance`
    /// draw. The draw is made on every call, so the shared draw sequence
    /// does not depend on the probability value.
    pub fn next(&mut self, rng: &mut dyn RandomSource) -> SequencerStep {
        let no_wrap = self.no_wrap;
        let tag = IdTag((no_wrap % ID_MODULUS) as u8);

        self.no_wrap += 1;
        if rng.chance(self.extra_advance_probability) {
            self.no_wrap += 1;
        }

        SequencerStep { tag, no_wrap }
    }
}

impl Default for IdSequencer {
    fn default() -> Self {
        Self::new(DEFAULT_EXTRA_ADVANCE_PROBABILITY)
    }
}
