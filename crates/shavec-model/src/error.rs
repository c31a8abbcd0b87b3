//! Error types for the Shavec reference model.

use thiserror::Error;

use shavec_core::CoreError;

use crate::reconcile::Side;

/// Errors that can occur during generation or reconciliation.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("cannot reconcile an empty batch")]
    EmptyBatch,

    #[error("{side} trace exhausted at step {step}: index {index} out of {len} entries")]
    TraceExhausted {
        side: Side,
        step: usize,
        index: i64,
        len: usize,
    },
}
