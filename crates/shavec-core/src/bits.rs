//! Packed bit buffers with explicit bit lengths.
//!
//! Messages fed to the accelerator are bit sequences that need not be
//! byte-aligned. [`BitBuf`] stores them packed MSB-first, with unused
//! trailing bits of the final byte always zero. [`BitBufMut`] is the
//! append-only builder; freeze it into a [`BitBuf`] once built.

use bytes::{Bytes, BytesMut};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// An immutable, packed sequence of bits.
///
/// Bits are stored MSB-first: bit `i` lives in byte `i / 8` at mask
/// `0x80 >> (i % 8)`. Unused bits of the final byte are zero.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitBuf {
    data: Bytes,
    bit_len: usize,
}

impl BitBuf {
    /// The empty bit buffer.
    pub fn empty() -> Self {
        Self {
            data: Bytes::new(),
            bit_len: 0,
        }
    }

    /// Create from packed bytes and an explicit bit length.
    ///
    /// The byte count must match `bit_len` exactly and any bits beyond
    /// `bit_len` in the final byte must be zero.
    pub fn from_bytes(data: impl Into<Bytes>, bit_len: usize) -> Result<Self, CoreError> {
        let data = data.into();
        let expected = bit_len.div_ceil(8);
        if data.len() != expected {
            return Err(CoreError::StorageLengthMismatch {
                bits: bit_len,
                expected,
                actual: data.len(),
            });
        }
        if bit_len % 8 != 0 {
            let mask = 0xFFu8 >> (bit_len % 8);
            if data[expected - 1] & mask != 0 {
                return Err(CoreError::TrailingBitsSet { bits: bit_len });
            }
        }
        Ok(Self { data, bit_len })
    }

    /// Construct without validation. Callers must uphold the invariants.
    pub(crate) fn from_raw_parts(data: Bytes, bit_len: usize) -> Self {
        debug_assert_eq!(data.len(), bit_len.div_ceil(8));
        Self { data, bit_len }
    }

    /// Length in bits.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Check whether the buffer holds no bits.
    pub fn is_empty(&self) -> bool {
        self.bit_len == 0
    }

    /// Get bit `index` (0-based from the front).
    ///
    /// Panics if `index >= bit_len`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(index < self.bit_len, "bit index {index} out of range");
        self.data[index / 8] & (0x80 >> (index % 8)) != 0
    }

    /// The packed storage bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// A new buffer holding the first `bits` bits.
    ///
    /// Panics if `bits > bit_len`.
    pub fn prefix(&self, bits: usize) -> BitBuf {
        assert!(bits <= self.bit_len, "prefix of {bits} bits out of range");
        let byte_len = bits.div_ceil(8);
        let mut data = self.data[..byte_len].to_vec();
        if bits % 8 != 0 {
            data[byte_len - 1] &= 0xFFu8 << (8 - bits % 8);
        }
        Self {
            data: Bytes::from(data),
            bit_len: bits,
        }
    }

    /// Convert the packed bytes to hex.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }
}

impl fmt::Debug for BitBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let preview = hex::encode(&self.data[..self.data.len().min(8)]);
        write!(f, "BitBuf({} bits, {})", self.bit_len, preview)
    }
}

/// An append-only bit buffer under construction.
#[derive(Debug, Default)]
pub struct BitBufMut {
    data: BytesMut,
    bit_len: usize,
}

impl BitBufMut {
    /// A new, empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A new builder with capacity reserved for `bits` bits.
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(bits.div_ceil(8)),
            bit_len: 0,
        }
    }

    /// Length in bits so far.
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    /// Append a single bit.
    pub fn push_bit(&mut self, bit: bool) {
        if self.bit_len % 8 == 0 {
            self.data.extend_from_slice(&[0]);
        }
        if bit {
            let byte = self.bit_len / 8;
            self.data[byte] |= 0x80 >> (self.bit_len % 8);
        }
        self.bit_len += 1;
    }

    /// Append `count` zero bits.
    pub fn push_zeros(&mut self, count: usize) {
        let new_len = self.bit_len + count;
        self.data.resize(new_len.div_ceil(8), 0);
        self.bit_len = new_len;
    }

    /// Append the low `width` bits of `value`, most significant first.
    ///
    /// Panics if `width > 64`.
    pub fn push_bits(&mut self, value: u64, width: u32) {
        assert!(width <= 64, "bit field width {width} out of range");
        if width == 64 && self.bit_len % 8 == 0 {
            self.data.extend_from_slice(&value.to_be_bytes());
            self.bit_len += 64;
            return;
        }
        for i in (0..width).rev() {
            self.push_bit((value >> i) & 1 == 1);
        }
    }

    /// Append every bit of another buffer.
    pub fn extend_from(&mut self, other: &BitBuf) {
        if self.bit_len % 8 == 0 {
            self.data.extend_from_slice(other.as_bytes());
            self.bit_len += other.bit_len();
        } else {
            for i in 0..other.bit_len() {
                self.push_bit(other.bit(i));
            }
        }
    }

    /// Finish building and return the immutable buffer.
    pub fn freeze(self) -> BitBuf {
        BitBuf::from_raw_parts(self.data.freeze(), self.bit_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer() {
        let buf = BitBuf::empty();
        assert_eq!(buf.bit_len(), 0);
        assert!(buf.is_empty());
        assert!(buf.as_bytes().is_empty());
    }

    #[test]
    fn test_push_bit_msb_first() {
        let mut builder = BitBufMut::new();
        builder.push_bit(true);
        builder.push_bit(false);
        builder.push_bit(true);
        let buf = builder.freeze();

        assert_eq!(buf.bit_len(), 3);
        assert_eq!(buf.as_bytes(), &[0b1010_0000]);
        assert!(buf.bit(0));
        assert!(!buf.bit(1));
        assert!(buf.bit(2));
    }

    #[test]
    fn test_push_zeros_extends_storage() {
        let mut builder = BitBufMut::new();
        builder.push_bit(true);
        builder.push_zeros(15);
        let buf = builder.freeze();

        assert_eq!(buf.bit_len(), 16);
        assert_eq!(buf.as_bytes(), &[0x80, 0x00]);
    }

    #[test]
    fn test_push_bits_big_endian() {
        let mut builder = BitBufMut::new();
        builder.push_bits(0xAB, 8);
        builder.push_bits(0x3, 4);
        let buf = builder.freeze();

        assert_eq!(buf.bit_len(), 12);
        assert_eq!(buf.as_bytes(), &[0xAB, 0x30]);
    }

    #[test]
    fn test_push_bits_aligned_u64() {
        let mut builder = BitBufMut::new();
        builder.push_bits(24, 64);
        let buf = builder.freeze();

        assert_eq!(buf.bit_len(), 64);
        assert_eq!(buf.as_bytes(), &24u64.to_be_bytes());
    }

    #[test]
    fn test_extend_from_aligned() {
        let a = BitBuf::from_bytes(vec![0xDE, 0xAD], 16).unwrap();
        let mut builder = BitBufMut::new();
        builder.extend_from(&a);
        builder.extend_from(&a);
        let buf = builder.freeze();

        assert_eq!(buf.as_bytes(), &[0xDE, 0xAD, 0xDE, 0xAD]);
    }

    #[test]
    fn test_extend_from_unaligned() {
        let a = BitBuf::from_bytes(vec![0b1100_0000], 2).unwrap();
        let mut builder = BitBufMut::new();
        builder.push_bit(false);
        builder.extend_from(&a);
        let buf = builder.freeze();

        assert_eq!(buf.bit_len(), 3);
        assert_eq!(buf.as_bytes(), &[0b0110_0000]);
    }

    #[test]
    fn test_from_bytes_rejects_wrong_storage() {
        let result = BitBuf::from_bytes(vec![0u8; 3], 9);
        assert!(matches!(
            result,
            Err(CoreError::StorageLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_from_bytes_rejects_dirty_tail() {
        let result = BitBuf::from_bytes(vec![0xFF], 4);
        assert!(matches!(result, Err(CoreError::TrailingBitsSet { .. })));
    }

    #[test]
    fn test_prefix_masks_tail() {
        let buf = BitBuf::from_bytes(vec![0xFF, 0xFF], 16).unwrap();
        let head = buf.prefix(5);

        assert_eq!(head.bit_len(), 5);
        assert_eq!(head.as_bytes(), &[0b1111_1000]);
    }

    #[test]
    fn test_serde_roundtrip() {
        let buf = BitBuf::from_bytes(vec![0xCA, 0xFE, 0x80], 17).unwrap();
        let json = serde_json::to_string(&buf).unwrap();
        let back: BitBuf = serde_json::from_str(&json).unwrap();
        assert_eq!(buf, back);
    }
}
