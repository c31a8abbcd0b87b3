//! Merkle–Damgård message padding.
//!
//! A message of `n` bits becomes a whole number of 512-bit blocks: the
//! message, a single `1` marker bit, a zero fill out to 448 mod 512, and
//! the bit length as a 64-bit big-endian field. [`unpad`] inverts the
//! scheme, validating every part of the layout.

use bytes::Bytes;

use crate::bits::{BitBuf, BitBufMut};
use crate::block::{MessageBlock, BLOCK_BITS, BLOCK_BYTES, LENGTH_FIELD_BITS};
use crate::error::CoreError;

/// Total padded length in bits for a message of `n` bits.
fn padded_bit_len(n: usize) -> usize {
    let used = (n + 1 + LENGTH_FIELD_BITS) % BLOCK_BITS;
    let zeros = if used == 0 { 0 } else { BLOCK_BITS - used };
    n + 1 + zeros + LENGTH_FIELD_BITS
}

/// Pad a message into 512-bit blocks.
///
/// Exactly the final block carries the last-in-message marker. The message
/// bit length must fit the 64-bit length field.
pub fn pad(message: &BitBuf) -> Result<Vec<MessageBlock>, CoreError> {
    let n = message.bit_len();
    if (n as u128) > u64::MAX as u128 {
        return Err(CoreError::MessageTooLong {
            bits: n as u128,
            width: LENGTH_FIELD_BITS,
        });
    }

    let total = padded_bit_len(n);
    let mut padded = BitBufMut::with_capacity(total);
    padded.extend_from(message);
    padded.push_bit(true);
    padded.push_zeros(total - n - 1 - LENGTH_FIELD_BITS);
    padded.push_bits(n as u64, LENGTH_FIELD_BITS as u32);
    let padded = padded.freeze();

    let bytes = padded.as_bytes();
    let block_count = total / BLOCK_BITS;
    let mut blocks = Vec::with_capacity(block_count);
    for i in 0..block_count {
        let chunk = &bytes[i * BLOCK_BYTES..(i + 1) * BLOCK_BYTES];
        blocks.push(MessageBlock::from_slice(chunk, i + 1 == block_count)?);
    }
    Ok(blocks)
}

/// Recover the original message bits from a padded block sequence.
pub fn unpad(blocks: &[MessageBlock]) -> Result<BitBuf, CoreError> {
    if blocks.is_empty() {
        return Err(CoreError::EmptyBlockSequence);
    }

    // 1. The last flag must sit on the final block and nowhere else
    for (index, block) in blocks.iter().enumerate() {
        if block.is_last() != (index + 1 == blocks.len()) {
            return Err(CoreError::MisplacedLastFlag { index });
        }
    }

    // 2. The length field must be consistent with the block count
    let total = blocks.len() * BLOCK_BITS;
    let field = blocks[blocks.len() - 1].length_field();
    if field as u128 + 1 + LENGTH_FIELD_BITS as u128 > total as u128 {
        return Err(CoreError::PaddingCorrupt(format!(
            "length field {field} exceeds padded size {total}"
        )));
    }
    let n = field as usize;
    if padded_bit_len(n) != total {
        return Err(CoreError::PaddingCorrupt(format!(
            "length field {field} implies {} blocks, got {}",
            padded_bit_len(n) / BLOCK_BITS,
            blocks.len()
        )));
    }

    // 3. Marker bit and zero fill
    let mut data = Vec::with_capacity(blocks.len() * BLOCK_BYTES);
    for block in blocks {
        data.extend_from_slice(block.as_bytes());
    }
    let bit = |i: usize| data[i / 8] & (0x80 >> (i % 8)) != 0;
    if !bit(n) {
        return Err(CoreError::PaddingCorrupt(
            "missing end-of-message marker bit".into(),
        ));
    }
    for i in (n + 1)..(total - LENGTH_FIELD_BITS) {
        if bit(i) {
            return Err(CoreError::PaddingCorrupt(format!("nonzero fill bit at {i}")));
        }
    }

    // 4. Recover the message bits
    let byte_len = n.div_ceil(8);
    let mut message = data[..byte_len].to_vec();
    if n % 8 != 0 {
        message[byte_len - 1] &= 0xFFu8 << (8 - n % 8);
    }
    BitBuf::from_bytes(Bytes::from(message), n)
}
