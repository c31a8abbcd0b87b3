//! Proptest generators for property-based testing.

use proptest::prelude::*;

use shavec_core::{BitBuf, Sha256Digest};
use shavec_model::Descriptor;

/// Generate a bit buffer of up to `max_bits` bits, any alignment.
pub fn bit_buf(max_bits: usize) -> impl Strategy<Value = BitBuf> {
    (0..=max_bits).prop_flat_map(|bit_len| {
        prop::collection::vec(any::<u8>(), bit_len.div_ceil(8)).prop_map(move |mut data| {
            if bit_len % 8 != 0 {
                let last = data.len() - 1;
                data[last] &= 0xFFu8 << (8 - bit_len % 8);
            }
            BitBuf::from_bytes(data, bit_len).expect("masked bytes are well-formed")
        })
    })
}

/// Generate a random digest.
pub fn digest() -> impl Strategy<Value = Sha256Digest> {
    any::<[u8; 32]>().prop_map(Sha256Digest::from_bytes)
}

/// Generate a descriptor with small packet counts and limits.
pub fn descriptor() -> impl Strategy<Value = Descriptor> {
    (any::<u64>(), 0usize..=32, 0u64..=8, 0u64..=8).prop_map(|(seed, count, gap, stall)| {
        Descriptor::new(seed, count)
            .with_gap_limit(gap)
            .with_stall_limit(stall)
    })
}

/// Generate `len` extra-advance flags, one per packet.
pub fn extra_advance_flags(len: usize) -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), len)
}

/// Build the no-wrap trace a sequencer would emit for these flags.
pub fn trace_from_flags(flags: &[bool]) -> Vec<u64> {
    let mut value = 0u64;
    let mut trace = Vec::with_capacity(flags.len());
    for &extra in flags {
        trace.push(value);
        value += 1 + u64::from(extra);
    }
    trace
}

/// Generate a no-wrap trace of the given length (steps of 1 or 2).
pub fn no_wrap_trace(len: usize) -> impl Strategy<Value = Vec<u64>> {
    extra_advance_flags(len).prop_map(|flags| trace_from_flags(&flags))
}
