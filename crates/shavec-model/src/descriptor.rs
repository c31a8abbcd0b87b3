//! Generation descriptors.
//!
//! A descriptor is the external collaborator's complete specification of a
//! run: how it got here (file, CLI, environment) is out of scope.

use serde::{Deserialize, Serialize};

/// Parameters for one deterministic generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptor {
    /// Seed for the shared random source.
    pub seed: u64,

    /// Number of packets to generate.
    pub packet_count: usize,

    /// Exclusive upper bound for gap draws; 0 disables gapping.
    pub gap_limit: u64,

    /// Exclusive upper bound for stall draws; 0 disables stalling.
    pub stall_limit: u64,
}

impl Descriptor {
    /// A descriptor with gapping and stalling disabled.
    pub fn new(seed: u64, packet_count: usize) -> Self {
        Self {
            seed,
            packet_count,
            gap_limit: 0,
            stall_limit: 0,
        }
    }

    /// Set the gap limit.
    pub fn with_gap_limit(mut self, limit: u64) -> Self {
        self.gap_limit = limit;
        self
    }

    /// Set the stall limit.
    pub fn with_stall_limit(mut self, limit: u64) -> Self {
        self.stall_limit = limit;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let descriptor = Descriptor::new(42, 10);
        assert_eq!(descriptor.seed, 42);
        assert_eq!(descriptor.packet_count, 10);
        assert_eq!(descriptor.gap_limit, 0);
        assert_eq!(descriptor.stall_limit, 0);
    }

    #[test]
    fn test_builder_limits() {
        let descriptor = Descriptor::new(1, 2).with_gap_limit(5).with_stall_limit(9);
        assert_eq!(descriptor.gap_limit, 5);
        assert_eq!(descriptor.stall_limit, 9);
    }

    #[test]
    fn test_serde_roundtrip() {
        let descriptor = Descriptor::new(7, 3).with_gap_limit(4);
        let json = serde_json::to_string(&descriptor).unwrap();
        let back: Descriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(descriptor, back);
    }
}
