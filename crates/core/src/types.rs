//! Core data types shared by every crate in the workspace.
//!
//! This module defines the durable [`Transaction`] record and its derived
//! status computation, plus the small transient types (`RequestEntity`,
//! `ComponentEntity`) that flow from a caller's `transaction(..)` call down
//! into the two-phase commit driver.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a transaction, allocated by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(Uuid);

impl TxId {
    /// Generate a new random transaction id.
    pub fn new() -> Self {
        TxId(Uuid::new_v4())
    }
}

impl Default for TxId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identifier of a registered participant.
pub type ParticipantId = String;

/// Free-form payload handed to a participant's `Try`. Interpretation is
/// entirely participant-defined.
pub type Payload = HashMap<String, serde_json::Value>;

/// One caller-supplied unit of work: which participant should try what.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEntity {
    /// The participant this request targets.
    pub participant_id: ParticipantId,
    /// Opaque data forwarded to the participant's `Try`.
    pub request_payload: Payload,
}

impl RequestEntity {
    /// Build a request entity for `participant_id` carrying `request_payload`.
    pub fn new(participant_id: impl Into<ParticipantId>, request_payload: Payload) -> Self {
        Self {
            participant_id: participant_id.into(),
            request_payload,
        }
    }
}

/// Outcome of a single participant's `Try` within one transaction, as
/// recorded in the durable log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TryStatus {
    /// `Try` has not yet returned a terminal outcome for this participant.
    Hanging,
    /// `Try` returned `ack = true`.
    Success,
    /// `Try` errored, returned `ack = false`, or was never attempted before
    /// the coordinator gave up.
    Failure,
}

/// Top-level status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Not every participant has reached a terminal `Try` outcome.
    Hanging,
    /// Every participant acked `Try`; Confirm has been (or will be) issued.
    Success,
    /// At least one participant failed `Try`, or the transaction aged out;
    /// Cancel has been (or will be) issued.
    Failure,
}

/// A single participant's entry within a transaction's durable record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantEntry {
    /// The participant this entry belongs to.
    pub participant_id: ParticipantId,
    /// That participant's `Try` outcome.
    pub try_status: TryStatus,
}

/// The durable record of one transaction, as persisted by the store.
///
/// `participants` is append-only and fixed in length once the transaction
/// is created; only each entry's `try_status`, and the transaction's own
/// `status`, ever change, and only forward through `Hanging -> {Success,
/// Failure}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique id, assigned at creation.
    pub tx_id: TxId,
    /// Wall-clock time the transaction was created.
    pub created_at: DateTime<Utc>,
    /// Top-level status.
    pub status: TxStatus,
    /// Ordered per-participant entries, in the order requests were given.
    pub participants: Vec<ParticipantEntry>,
}

impl Transaction {
    /// Derive this transaction's effective status as of `now`, given the
    /// configured `timeout`.
    ///
    /// Age-out takes precedence over the per-participant scan: a
    /// transaction older than `timeout` is `Failure` even if every
    /// participant's `Try` has since come back `Success`, because by the
    /// time age-out is observed the coordinator has already committed to
    /// driving it towards `Failure`.
    pub fn derived_status(&self, now: DateTime<Utc>, timeout: Duration) -> TxStatus {
        let cutoff = now
            - chrono::Duration::from_std(timeout).unwrap_or_else(|_| chrono::Duration::zero());
        if self.created_at < cutoff {
            return TxStatus::Failure;
        }
        if self
            .participants
            .iter()
            .any(|p| p.try_status == TryStatus::Failure)
        {
            return TxStatus::Failure;
        }
        if self
            .participants
            .iter()
            .any(|p| p.try_status == TryStatus::Hanging)
        {
            return TxStatus::Hanging;
        }
        TxStatus::Success
    }
}
