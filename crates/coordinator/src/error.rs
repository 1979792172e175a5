//! Errors raised by the coordinator.

use tcc_core::ParticipantError;
use tcc_registry::RegistryError;
use tcc_store::StoreError;
use thiserror::Error;

/// Everything a call into the coordinator can fail with.
#[derive(Debug, Error)]
pub enum CoordinatorError {
    /// `transaction` was called with no requests.
    #[error("empty task")]
    EmptyTask,

    /// The same participant id appeared more than once in one
    /// `transaction` call.
    #[error("repeat component: {0}")]
    RepeatComponent(String),

    /// A participant's `Confirm`/`Cancel` returned `ack = false` during
    /// finalization.
    #[error("component {participant_id} ack failed")]
    ComponentAckFailed {
        /// The participant that refused.
        participant_id: String,
    },

    /// A participant's `Try` returned `ack = false`.
    #[error("component {participant_id} try refused")]
    ParticipantRefused {
        /// The participant that refused.
        participant_id: String,
    },

    /// A participant call errored.
    #[error("participant {participant_id} call failed")]
    Participant {
        /// The participant whose call failed.
        participant_id: String,
        /// The underlying error.
        #[source]
        source: ParticipantError,
    },

    /// The registry could not resolve or accept a participant.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// The store rejected an operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoordinatorError {
    /// True if this is the store reporting that the reconciliation lock is
    /// currently held elsewhere — an expected, routine condition rather
    /// than a failure.
    pub fn is_lock_held(&self) -> bool {
        matches!(self, CoordinatorError::Store(StoreError::LockHeld))
    }
}
