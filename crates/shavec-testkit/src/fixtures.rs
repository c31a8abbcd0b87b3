//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use shavec_model::{Batch, Descriptor, PacketGenerator};

use crate::scripted::ScriptedSource;

/// A ready-made generation scenario.
pub struct ScenarioFixture {
    pub descriptor: Descriptor,
}

impl ScenarioFixture {
    /// A scenario with gapping and stalling disabled.
    pub fn new(seed: u64, packet_count: usize) -> Self {
        Self {
            descriptor: Descriptor::new(seed, packet_count),
        }
    }

    /// A scenario with gap and stall limits.
    pub fn with_limits(seed: u64, packet_count: usize, gap_limit: u64, stall_limit: u64) -> Self {
        Self {
            descriptor: Descriptor::new(seed, packet_count)
                .with_gap_limit(gap_limit)
                .with_stall_limit(stall_limit),
        }
    }

    /// A generator for this scenario.
    pub fn generator(&self) -> PacketGenerator {
        PacketGenerator::new(self.descriptor)
    }

    /// Generate the scenario's batch.
    pub fn batch(&self) -> Batch {
        self.generator()
            .generate()
            .expect("generation succeeds for in-range descriptors")
    }
}

/// Generate batches for `count` distinct seeds.
pub fn multi_seed_batches(count: u64) -> Vec<Batch> {
    (0..count)
        .map(|seed| ScenarioFixture::new(seed, 8).batch())
        .collect()
}

/// A three-packet batch where the buffer sequencer skips ahead on the
/// second packet while the hash sequencer never does.
///
/// Buffer trace `[0, 1, 3]`, hash trace `[0, 1, 2]`: reconciliation must
/// flag exactly the third completion.
pub fn skewed_sequencer_batch() -> Batch {
    // Per packet with gapping and stalling disabled: one size draw, then
    // the buffer and hash extra-advance flips.
    let mut rng = ScriptedSource::new(
        [0, 0, 0],
        [false, false, true, false, false, false],
    );
    PacketGenerator::new(Descriptor::new(0, 3))
        .generate_with(&mut rng)
        .expect("scripted generation succeeds")
}
