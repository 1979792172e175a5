//! The participant contract: `Try`, `Confirm`, `Cancel`.
//!
//! A participant is a business capability that can durably reserve a
//! resource on `Try`, materialize the reservation on `Confirm`, or release
//! it on `Cancel`. Every method must be idempotent on `(participant id,
//! tx_id)` — the coordinator retries freely, including after a crash.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ParticipantError;
use crate::types::{ParticipantId, Payload, TxId};

/// Reply shape shared by `Try`, `Confirm`, and `Cancel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// Whether the participant accepted the call.
    pub ack: bool,
    /// Echoes the participant id the call was addressed to.
    pub participant_id: ParticipantId,
    /// Echoes the transaction id the call belongs to.
    pub tx_id: TxId,
}

impl Ack {
    /// Build an acknowledging reply.
    pub fn accepted(participant_id: impl Into<ParticipantId>, tx_id: TxId) -> Self {
        Self {
            ack: true,
            participant_id: participant_id.into(),
            tx_id,
        }
    }

    /// Build a refusing reply.
    pub fn refused(participant_id: impl Into<ParticipantId>, tx_id: TxId) -> Self {
        Self {
            ack: false,
            participant_id: participant_id.into(),
            tx_id,
        }
    }
}

/// A business capability driven through the Try-Confirm-Cancel protocol.
///
/// Implementors are held behind `Arc<dyn Participant>` and invoked
/// concurrently from multiple tasks; `&self` methods must not assume
/// exclusive access.
#[async_trait]
pub trait Participant: Send + Sync {
    /// Stable, unique identifier used to register and address this
    /// participant.
    fn id(&self) -> &str;

    /// Attempt to reserve resources for `tx_id`. Must be idempotent: a
    /// second call with the same `tx_id` returns the same effective
    /// outcome as the first.
    async fn try_(
        &self,
        tx_id: TxId,
        data: Payload,
        cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError>;

    /// Materialize the reservation made by a prior successful `try_`.
    /// Calling `confirm` for a `tx_id` that was already confirmed returns
    /// `ack = true` again. Calling `confirm` after `cancel` for the same
    /// `tx_id` is an illegal state transition and must error.
    async fn confirm(
        &self,
        tx_id: TxId,
        cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError>;

    /// Release the reservation made by a prior `try_`. Calling `cancel`
    /// for an already-cancelled `tx_id` returns `ack = true` again.
    /// Calling `cancel` after a successful `confirm` for the same `tx_id`
    /// is an illegal state transition and must error.
    async fn cancel(
        &self,
        tx_id: TxId,
        cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError>;
}
