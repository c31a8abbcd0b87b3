//! # Shavec Testkit
//!
//! Testing utilities for the Shavec workspace.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: descriptor inputs whose batches must reproduce
//!   identically across runs and reimplementations
//! - **Generators**: Proptest strategies for property-based testing
//! - **Scripted randomness**: a [`RandomSource`](shavec_core::RandomSource)
//!   double that replays exact draw sequences
//! - **Fixtures**: helper structs for setting up generation scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use shavec_testkit::vectors::{all_vectors, generate_batch_from_vector};
//!
//! for vector in all_vectors() {
//!     let batch = generate_batch_from_vector(&vector);
//!     println!("{}: {} packets", vector.name, batch.len());
//! }
//! ```
//!
//! ## Scripted Randomness
//!
//! Forcing the sequencer skew directly:
//!
//! ```rust
//! use shavec_testkit::fixtures::skewed_sequencer_batch;
//!
//! let batch = skewed_sequencer_batch();
//! assert_eq!(batch.buffer_trace(), vec![0, 1, 3]);
//! ```

pub mod fixtures;
pub mod generators;
pub mod scripted;
pub mod vectors;

pub use fixtures::{multi_seed_batches, skewed_sequencer_batch, ScenarioFixture};
pub use scripted::ScriptedSource;
pub use vectors::{all_vectors, generate_batch_from_vector, verify_all_vectors, GoldenVector};
