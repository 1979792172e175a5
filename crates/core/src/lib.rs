//! Shared vocabulary for the TCC workspace.
//!
//! This crate defines the types every other crate builds on: the durable
//! [`types::Transaction`] record and its derived-status rule, and the
//! [`participant::Participant`] trait that every business capability
//! driven by the coordinator must implement.

#![warn(missing_docs)]

pub mod error;
pub mod participant;
pub mod types;

pub use error::ParticipantError;
pub use participant::{Ack, Participant};
pub use types::{
    ParticipantEntry, ParticipantId, Payload, RequestEntity, Transaction, TryStatus, TxId,
    TxStatus,
};
