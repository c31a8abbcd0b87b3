//! Packets and batches: the in-memory output of a generation run.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use shavec_core::{BitBuf, IdTag, MessageBlock, Sha256Digest, BLOCK_BITS, BLOCK_BYTES};

use crate::error::ModelError;
use crate::reconcile::{reconcile, ValidationRecord};

/// One logical input message with everything derived from it.
///
/// Immutable after creation; one packet per generated message. Gap and
/// stall values are opaque timing hints for an external stimulus emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Packet {
    /// The raw message bits (always byte-aligned for generated packets).
    pub raw: BitBuf,

    /// The padded 512-bit message blocks.
    pub blocks: Vec<MessageBlock>,

    /// Buffer-side ID tag for this packet.
    pub buffer_tag: IdTag,

    /// Buffer-side no-wrap counter value.
    pub buffer_no_wrap: u64,

    /// Hash-side ID tag for this packet.
    pub hash_tag: IdTag,

    /// Hash-side no-wrap counter value.
    pub hash_no_wrap: u64,

    /// Gap before the configuration word.
    pub cfg_gap: u64,

    /// Gap before each raw input word.
    pub word_gaps: Vec<u64>,

    /// Gap before each padded block.
    pub block_gaps: Vec<u64>,

    /// Stall before reading back each padded block.
    pub block_stalls: Vec<u64>,

    /// Stall before reading back the digest.
    pub hash_stall: u64,

    /// The reference digest of the raw message.
    pub digest: Sha256Digest,
}

impl Packet {
    /// The raw message length in bits.
    pub fn bit_len(&self) -> usize {
        self.raw.bit_len()
    }

    /// The input-port stimulus view: the raw message chunked into 512-bit
    /// zero-filled words, the final word flagged last.
    ///
    /// An empty message produces no input words.
    pub fn input_words(&self) -> Vec<MessageBlock> {
        let words = self.raw.bit_len().div_ceil(BLOCK_BITS);
        let bytes = self.raw.as_bytes();
        (0..words)
            .map(|i| {
                let mut word = [0u8; BLOCK_BYTES];
                let start = i * BLOCK_BYTES;
                let end = bytes.len().min(start + BLOCK_BYTES);
                word[..end - start].copy_from_slice(&bytes[start..end]);
                MessageBlock::from_array(word, i + 1 == words)
            })
            .collect()
    }

    /// Flatten into the boundary record consumed by external formatters.
    pub fn to_record(&self) -> PacketRecord {
        PacketRecord {
            raw_bit_length: self.raw.bit_len() as u64,
            message_blocks: self
                .blocks
                .iter()
                .map(|b| Bytes::copy_from_slice(b.as_bytes()))
                .collect(),
            block_last_flags: self.blocks.iter().map(|b| b.is_last()).collect(),
            buffer_id_tag: self.buffer_tag.value(),
            hash_id_tag: self.hash_tag.value(),
            cfg_gap: self.cfg_gap,
            word_gaps: self.word_gaps.clone(),
            block_gaps: self.block_gaps.clone(),
            block_stalls: self.block_stalls.clone(),
            hash_stall: self.hash_stall,
            reference_hash: self.digest,
        }
    }
}

/// The flat, serializable per-packet boundary record.
///
/// Purely data-shaped: any hex/binary text rendering happens outside the
/// core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketRecord {
    pub raw_bit_length: u64,
    pub message_blocks: Vec<Bytes>,
    pub block_last_flags: Vec<bool>,
    pub buffer_id_tag: u8,
    pub hash_id_tag: u8,
    pub cfg_gap: u64,
    pub word_gaps: Vec<u64>,
    pub block_gaps: Vec<u64>,
    pub block_stalls: Vec<u64>,
    pub hash_stall: u64,
    pub reference_hash: Sha256Digest,
}

/// An ordered batch of packets from one generation run.
///
/// Order is significant: the reconciliation engine consumes the traces
/// positionally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    packets: Vec<Packet>,
}

impl Batch {
    /// Wrap packets in generation order.
    pub fn new(packets: Vec<Packet>) -> Self {
        Self { packets }
    }

    /// The packets in generation order.
    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    /// Number of packets.
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    /// Check whether the batch holds no packets.
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// The buffer-side no-wrap trace, one entry per packet.
    pub fn buffer_trace(&self) -> Vec<u64> {
        self.packets.iter().map(|p| p.buffer_no_wrap).collect()
    }

    /// The hash-side no-wrap trace, one entry per packet.
    pub fn hash_trace(&self) -> Vec<u64> {
        self.packets.iter().map(|p| p.hash_no_wrap).collect()
    }

    /// The reference digests in generation order.
    pub fn reference_digests(&self) -> Vec<Sha256Digest> {
        self.packets.iter().map(|p| p.digest).collect()
    }

    /// The boundary records, one per packet.
    pub fn records(&self) -> Vec<PacketRecord> {
        self.packets.iter().map(Packet::to_record).collect()
    }

    /// Reconcile this batch's traces against its digest list.
    pub fn reconcile(&self) -> Result<Vec<ValidationRecord>, ModelError> {
        reconcile(
            &self.buffer_trace(),
            &self.hash_trace(),
            &self.reference_digests(),
        )
    }

    /// Consume the batch, yielding its packets.
    pub fn into_packets(self) -> Vec<Packet> {
        self.packets
    }
}
