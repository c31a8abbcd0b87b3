//! Error types for Shavec core primitives.

use thiserror::Error;

/// Core errors that can occur while building or unpadding messages.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("bit length {bits} requires {expected} bytes of storage, got {actual}")]
    StorageLengthMismatch {
        bits: usize,
        expected: usize,
        actual: usize,
    },

    #[error("trailing bits beyond length {bits} must be zero")]
    TrailingBitsSet { bits: usize },

    #[error("message block must be exactly {expected} bytes, got {actual}")]
    InvalidBlockLength { expected: usize, actual: usize },

    #[error("message length {bits} bits does not fit the {width}-bit length field")]
    MessageTooLong { bits: u128, width: usize },

    #[error("cannot unpad an empty block sequence")]
    EmptyBlockSequence,

    #[error("last flag misplaced at block {index}")]
    MisplacedLastFlag { index: usize },

    #[error("padding corrupt: {0}")]
    PaddingCorrupt(String),
}
