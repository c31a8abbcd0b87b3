//! # Shavec Core
//!
//! Pure primitives for the Shavec test-vector generator: packed bit
//! buffers, Merkle–Damgård message padding, wraparound ID sequencing, the
//! deterministic random source, and the SHA-256 reference oracle.
//!
//! This crate contains no I/O, no generation policy, no formatting. It is
//! pure computation over in-memory bit sequences.
//!
//! ## Key Types
//!
//! - [`BitBuf`] / [`BitBufMut`] - packed bit sequences with explicit length
//! - [`MessageBlock`] - a 512-bit padded block with its last-in-message flag
//! - [`IdSequencer`] - wraparound tag counter with probabilistic skip-ahead
//! - [`Sha256Digest`] - the black-box reference digest
//!
//! ## Determinism
//!
//! All randomness flows through the [`RandomSource`] trait; with the seeded
//! implementation, every derived artifact is a pure function of the seed
//! and the draw order.

pub mod bits;
pub mod block;
pub mod digest;
pub mod error;
pub mod padding;
pub mod rng;
pub mod sequencer;

pub use bits::{BitBuf, BitBufMut};
pub use block::{MessageBlock, BLOCK_BITS, BLOCK_BYTES, LENGTH_FIELD_BITS};
pub use digest::Sha256Digest;
pub use error::CoreError;
pub use padding::{pad, unpad};
pub use rng::{RandomSource, SeededSource};
pub use sequencer::{
    IdSequencer, IdTag, SequencerStep, DEFAULT_EXTRA_ADVANCE_PROBABILITY, ID_MODULUS,
};
