//! # Shavec Model
//!
//! The streaming hash-accelerator reference model: deterministic packet
//! generation and out-of-order completion reconciliation.
//!
//! A [`PacketGenerator`] turns a [`Descriptor`] into a [`Batch`] of
//! packets — random byte-aligned messages, their padded 512-bit blocks,
//! opaque gap/stall annotations, wraparound ID tags from two independently
//! advancing sequencers, and the reference digest of each message. The
//! [`reconcile`] engine then aligns the two ID traces after the fact and
//! flags every completion position where they disagree.
//!
//! Formatting and persistence are the caller's concern: the model's
//! boundary is [`PacketRecord`] and [`ValidationRecord`] values, plain
//! in-memory data.

pub mod descriptor;
pub mod error;
pub mod generator;
pub mod packet;
pub mod reconcile;

pub use descriptor::Descriptor;
pub use error::ModelError;
pub use generator::{PacketGenerator, MAX_MESSAGE_BITS};
pub use packet::{Batch, Packet, PacketRecord};
pub use reconcile::{reconcile, Side, ValidationRecord};
