//! Reconciliation of the buffer-side and hash-side completion traces.
//!
//! The two pipeline sides advance their ID counters independently, so by
//! the end of a batch one side may have silently run ahead of the other.
//! This module reconstructs, for every position of the completion stream,
//! which digest was actually produced and whether the two traces disagree
//! there.
//!
//! The walk is greedy and single-pass: a shared step index with two read
//! offsets that only ever move backwards. Divergence between the traces is
//! small and transient (bounded by the extra-advance probability), so no
//! backtracking is needed.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use shavec_core::Sha256Digest;

use crate::error::ModelError;

/// Which trace an out-of-bounds access hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buffer,
    Hash,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buffer => write!(f, "buffer"),
            Side::Hash => write!(f, "hash"),
        }
    }
}

/// One reconciled completion: the digest observed at a position and
/// whether the traces disagreed there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRecord {
    /// The digest at this completion position.
    pub digest: Sha256Digest,

    /// Whether the traces disagree at this position.
    pub error: bool,

    /// The completion position this record was emitted for.
    pub index: usize,
}

/// Align the two no-wrap traces against the digest list.
///
/// Emits exactly `hashes.len()` records. At each step the traces are
/// compared at their offset positions: equal values are aligned (no
/// error); a greater buffer value means the hash side is lagging, so the
/// buffer offset absorbs the correction and the same buffer entry is
/// retried against the next digest; a lesser buffer value is the mirror
/// case. Offsets only ever move backwards.
///
/// Fails on an empty digest list, or when an offset access would leave
/// either trace — the generator-level sign that the two pipelines disagree
/// on how many completions occurred.
pub fn reconcile(
    buffer_no_wrap: &[u64],
    hash_no_wrap: &[u64],
    hashes: &[Sha256Digest],
) -> Result<Vec<ValidationRecord>, ModelError> {
    if hashes.is_empty() {
        return Err(ModelError::EmptyBatch);
    }

    let mut buffer_offset: i64 = 0;
    let mut hash_offset: i64 = 0;
    let mut records = Vec::with_capacity(hashes.len());

    for step in 0..hashes.len() {
        let buffer_index = offset_index(step, buffer_offset, buffer_no_wrap.len(), Side::Buffer)?;
        let hash_index = offset_index(step, hash_offset, hash_no_wrap.len(), Side::Hash)?;

        let buffer_value = buffer_no_wrap[buffer_index];
        let hash_value = hash_no_wrap[hash_index];
        let digest = hashes[hash_index];

        match buffer_value.cmp(&hash_value) {
            Ordering::Equal => {
                records.push(ValidationRecord {
                    digest,
                    error: false,
                    index: step,
                });
            }
            Ordering::Greater => {
                // Hash side is lagging: flag, and retry this buffer entry
                // against the next digest.
                tracing::debug!(step, buffer_value, hash_value, "buffer trace ahead");
                records.push(ValidationRecord {
                    digest,
                    error: true,
                    index: step,
                });
                buffer_offset -= 1;
            }
            Ordering::Less => {
                tracing::debug!(step, buffer_value, hash_value, "hash trace ahead");
                records.push(ValidationRecord {
                    digest,
                    error: true,
                    index: step,
                });
                hash_offset -= 1;
            }
        }
    }

    Ok(records)
}

fn offset_index(step: usize, offset: i64, len: usize, side: Side) -> Result<usize, ModelError> {
    let index = step as i64 + offset;
    if index < 0 || index >= len as i64 {
        return Err(ModelError::TraceExhausted {
            side,
            step,
            index,
            len,
        });
    }
    Ok(index as usize)
}
