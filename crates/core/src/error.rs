//! Errors raised out of the participant contract.

use thiserror::Error;

/// Everything a [`crate::participant::Participant`] implementation can go
/// wrong with.
#[derive(Debug, Error)]
pub enum ParticipantError {
    /// The underlying RPC/call failed (network error, panic caught by the
    /// implementation, etc).
    #[error("participant call failed: {0}")]
    Rpc(String),

    /// The participant was asked to `confirm` or `cancel` a transaction
    /// already in the opposite terminal state (confirm-after-cancel or
    /// cancel-after-confirm).
    #[error("illegal state transition for tx {tx_id}: {reason}")]
    IllegalStateTransition {
        /// The transaction id this happened for.
        tx_id: String,
        /// Human-readable explanation.
        reason: String,
    },

    /// The call's deadline elapsed before the participant responded.
    #[error("participant call timed out")]
    Timeout,

    /// The call was cancelled before it completed.
    #[error("participant call cancelled")]
    Cancelled,
}
