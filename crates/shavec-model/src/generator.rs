//! The packet generator: orchestrates padding, sequencing, and the oracle.

use shavec_core::{
    pad, IdSequencer, RandomSource, SeededSource, Sha256Digest, BLOCK_BITS,
    DEFAULT_EXTRA_ADVANCE_PROBABILITY,
};

use crate::descriptor::Descriptor;
use crate::error::ModelError;
use crate::packet::{Batch, Packet};

/// Inclusive upper bound for a drawn message length in bits.
pub const MAX_MESSAGE_BITS: usize = 1 << 14;

/// Generates a deterministic batch of packets from a descriptor.
#[derive(Debug, Clone)]
pub struct PacketGenerator {
    descriptor: Descriptor,
    extra_advance_probability: f64,
}

impl PacketGenerator {
    /// Create a generator with the default extra-advance probability.
    pub fn new(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            extra_advance_probability: DEFAULT_EXTRA_ADVANCE_PROBABILITY,
        }
    }

    /// Override the ID sequencers' extra-advance probability.
    pub fn with_extra_advance_probability(mut self, probability: f64) -> Self {
        self.extra_advance_probability = probability;
        self
    }

    /// The descriptor this generator runs from.
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Generate the batch, seeding the random source from the descriptor.
    pub fn generate(&self) -> Result<Batch, ModelError> {
        let mut rng = SeededSource::from_seed(self.descriptor.seed);
        self.generate_with(&mut rng)
    }

    /// Generate the batch from an injected random source.
    pub fn generate_with(&self, rng: &mut dyn RandomSource) -> Result<Batch, ModelError> {
        let mut buffer_sequencer = IdSequencer::new(self.extra_advance_probability);
        let mut hash_sequencer = IdSequencer::new(self.extra_advance_probability);

        let mut packets = Vec::with_capacity(self.descriptor.packet_count);
        for _ in 0..self.descriptor.packet_count {
            packets.push(self.generate_packet(rng, &mut buffer_sequencer, &mut hash_sequencer)?);
        }

        tracing::debug!(
            seed = self.descriptor.seed,
            packets = packets.len(),
            "generated batch"
        );
        Ok(Batch::new(packets))
    }

    fn generate_packet(
        &self,
        rng: &mut dyn RandomSource,
        buffer_sequencer: &mut IdSequencer,
        hash_sequencer: &mut IdSequencer,
    ) -> Result<Packet, ModelError> {
        let gap_limit = self.descriptor.gap_limit;
        let stall_limit = self.descriptor.stall_limit;

        // The draw order is part of the golden-vector contract: cfg gap,
        // hash stall, size, message bits, per-word gaps, per-block
        // stall+gap pairs, buffer extra-advance, hash extra-advance.
        let cfg_gap = draw_limited(rng, gap_limit);
        let hash_stall = draw_limited(rng, stall_limit);

        let size_bits = round_up_to_byte(rng.below(MAX_MESSAGE_BITS as u64 + 1) as usize);
        let raw = rng.bits(size_bits);
        let blocks = pad(&raw)?;

        let word_count = size_bits.div_ceil(BLOCK_BITS);
        let word_gaps = (0..word_count).map(|_| draw_limited(rng, gap_limit)).collect();
        let mut block_stalls = Vec::with_capacity(blocks.len());
        let mut block_gaps = Vec::with_capacity(blocks.len());
        for _ in 0..blocks.len() {
            block_stalls.push(draw_limited(rng, stall_limit));
            block_gaps.push(draw_limited(rng, gap_limit));
        }

        let buffer_step = buffer_sequencer.next(rng);
        let hash_step = hash_sequencer.next(rng);

        let digest = Sha256Digest::hash(raw.as_bytes());

        Ok(Packet {
            raw,
            blocks,
            buffer_tag: buffer_step.tag,
            buffer_no_wrap: buffer_step.no_wrap,
            hash_tag: hash_step.tag,
            hash_no_wrap: hash_step.no_wrap,
            cfg_gap,
            word_gaps,
            block_gaps,
            block_stalls,
            hash_stall,
            digest,
        })
    }
}

/// One draw below `limit`, or 0 without consuming a draw when disabled.
fn draw_limited(rng: &mut dyn RandomSource, limit: u64) -> u64 {
    if limit > 0 {
        rng.below(limit)
    } else {
        0
    }
}

fn round_up_to_byte(bits: usize) -> usize {
    bits.div_ceil(8) * 8
}

#[cfg(test)]
mod tests {
    use super::*;
    use shavec_core::{unpad, BitBuf, BitBufMut, ID_MODULUS};

    /// Replays scripted integer and coin-flip draws; `bits` returns zeros.
    struct ScriptedDraws {
        ints: Vec<u64>,
        chances: Vec<bool>,
        int_cursor: usize,
        chance_cursor: usize,
    }

    impl ScriptedDraws {
        fn new(ints: &[u64], chances: &[bool]) -> Self {
            Self {
                ints: ints.to_vec(),
                chances: chances.to_vec(),
                int_cursor: 0,
                chance_cursor: 0,
            }
        }
    }

    impl RandomSource for ScriptedDraws {
        fn below(&mut self, bound: u64) -> u64 {
            let draw = self.ints[self.int_cursor];
            self.int_cursor += 1;
            assert!(draw < bound, "scripted draw {draw} out of bound {bound}");
            draw
        }

        fn bits(&mut self, len: usize) -> BitBuf {
            let mut builder = BitBufMut::new();
            builder.push_zeros(len);
            builder.freeze()
        }

        fn chance(&mut self, _probability: f64) -> bool {
            let draw = self.chances[self.chance_cursor];
            self.chance_cursor += 1;
            draw
        }
    }

    fn generator(seed: u64, count: usize) -> PacketGenerator {
        PacketGenerator::new(Descriptor::new(seed, count))
    }

    #[test]
    fn test_batch_is_deterministic() {
        let descriptor = Descriptor::new(0xDEAD_BEEF, 20)
            .with_gap_limit(10)
            .with_stall_limit(7);
        let first = PacketGenerator::new(descriptor).generate().unwrap();
        let second = PacketGenerator::new(descriptor).generate().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_batch_has_descriptor_count() {
        let batch = generator(1, 17).generate().unwrap();
        assert_eq!(batch.len(), 17);
    }

    #[test]
    fn test_sizes_byte_aligned_and_bounded() {
        let batch = generator(2, 50).generate().unwrap();
        for packet in batch.packets() {
            assert_eq!(packet.bit_len() % 8, 0);
            assert!(packet.bit_len() <= MAX_MESSAGE_BITS);
        }
    }

    #[test]
    fn test_digest_matches_oracle_recompute() {
        let batch = generator(3, 10).generate().unwrap();
        for packet in batch.packets() {
            assert_eq!(packet.digest, Sha256Digest::hash(packet.raw.as_bytes()));
        }
    }

    #[test]
    fn test_blocks_unpad_to_raw() {
        let batch = generator(4, 10).generate().unwrap();
        for packet in batch.packets() {
            assert_eq!(unpad(&packet.blocks).unwrap(), packet.raw);
        }
    }

    #[test]
    fn test_annotation_lengths() {
        let descriptor = Descriptor::new(5, 10).with_gap_limit(4).with_stall_limit(3);
        let batch = PacketGenerator::new(descriptor).generate().unwrap();
        for packet in batch.packets() {
            assert_eq!(packet.word_gaps.len(), packet.bit_len().div_ceil(BLOCK_BITS));
            assert_eq!(packet.block_gaps.len(), packet.blocks.len());
            assert_eq!(packet.block_stalls.len(), packet.blocks.len());
            assert!(packet.word_gaps.iter().all(|&g| g < 4));
            assert!(packet.block_gaps.iter().all(|&g| g < 4));
            assert!(packet.block_stalls.iter().all(|&s| s < 3));
            assert!(packet.cfg_gap < 4);
            assert!(packet.hash_stall < 3);
        }
    }

    #[test]
    fn test_zero_limits_zero_annotations() {
        let batch = generator(6, 10).generate().unwrap();
        for packet in batch.packets() {
            assert_eq!(packet.cfg_gap, 0);
            assert_eq!(packet.hash_stall, 0);
            assert!(packet.word_gaps.iter().all(|&g| g == 0));
            assert!(packet.block_gaps.iter().all(|&g| g == 0));
            assert!(packet.block_stalls.iter().all(|&s| s == 0));
        }
    }

    #[test]
    fn test_traces_monotonic_with_bounded_steps() {
        let batch = generator(7, 100).generate().unwrap();
        for trace in [batch.buffer_trace(), batch.hash_trace()] {
            assert_eq!(trace[0], 0);
            for pair in trace.windows(2) {
                let step = pair[1] - pair[0];
                assert!(step == 1 || step == 2, "unexpected step {step}");
            }
        }
    }

    #[test]
    fn test_tags_wrap_no_wrap_invariant() {
        let batch = generator(8, 200).generate().unwrap();
        for packet in batch.packets() {
            assert_eq!(
                u64::from(packet.buffer_tag.value()),
                packet.buffer_no_wrap % ID_MODULUS
            );
            assert_eq!(
                u64::from(packet.hash_tag.value()),
                packet.hash_no_wrap % ID_MODULUS
            );
        }
    }

    #[test]
    fn test_forced_divergence_scenario() {
        // Three empty-message packets; the buffer sequencer skips ahead on
        // the second packet only. Per-packet draws with gapping and
        // stalling disabled: size, then the two extra-advance flips.
        let mut rng = ScriptedDraws::new(
            &[0, 0, 0],
            &[false, false, true, false, false, false],
        );
        let batch = generator(0, 3).generate_with(&mut rng).unwrap();

        assert_eq!(batch.buffer_trace(), vec![0, 1, 3]);
        assert_eq!(batch.hash_trace(), vec![0, 1, 2]);

        let records = batch.reconcile().unwrap();
        assert_eq!(records.len(), 3);
        assert!(!records[0].error);
        assert!(!records[1].error);
        assert!(records[2].error);
    }

    #[test]
    fn test_empty_descriptor_empty_batch() {
        let batch = generator(9, 0).generate().unwrap();
        assert!(batch.is_empty());
    }
}
