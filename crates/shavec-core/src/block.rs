//! Message blocks: the 512-bit units consumed by the hash core.

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Width of a message block in bits.
pub const BLOCK_BITS: usize = 512;

/// Width of a message block in bytes.
pub const BLOCK_BYTES: usize = 64;

/// Width of the trailing message-length field in bits.
pub const LENGTH_FIELD_BITS: usize = 64;

/// A single 512-bit message block with its last-in-message marker.
///
/// Blocks are produced by [`crate::padding::pad`] and are immutable. The
/// final block of each message carries `last = true`; its trailing 64 bits
/// hold the message bit length, big-endian.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBlock {
    data: Bytes,
    last: bool,
}

impl MessageBlock {
    /// Create a block from exactly [`BLOCK_BYTES`] bytes.
    pub fn from_slice(data: &[u8], last: bool) -> Result<Self, CoreError> {
        if data.len() != BLOCK_BYTES {
            return Err(CoreError::InvalidBlockLength {
                expected: BLOCK_BYTES,
                actual: data.len(),
            });
        }
        Ok(Self {
            data: Bytes::copy_from_slice(data),
            last,
        })
    }

    /// Create a block from an owned 64-byte array.
    pub fn from_array(data: [u8; BLOCK_BYTES], last: bool) -> Self {
        Self {
            data: Bytes::copy_from_slice(&data),
            last,
        }
    }

    /// The block's 64 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whether this is the final block of its message.
    pub fn is_last(&self) -> bool {
        self.last
    }

    /// Get bit `index` within the block.
    ///
    /// Panics if `index >= BLOCK_BITS`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < BLOCK_BITS, "block bit index {index} out of range");
        self.data[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// The trailing 64 bits as a big-endian integer.
    ///
    /// Meaningful only on a message's final block, where it encodes the
    /// unpadded bit length.
    pub fn length_field(&self) -> u64 {
        let mut field = [0u8; 8];
        field.copy_from_slice(&self.data[BLOCK_BYTES - 8..]);
        u64::from_be_bytes(field)
    }

    /// Convert the block bytes to hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }
}

impl fmt::Debug for MessageBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MessageBlock({}{})",
            &self.to_hex()[..16],
            if self.last { ", last" } else { "" }
        )
    }
}
