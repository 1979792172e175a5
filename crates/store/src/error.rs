//! Errors raised out of the [`crate::Store`] contract.

use thiserror::Error;
use tcc_core::TxId;

/// Everything a [`crate::Store`] implementation can go wrong with.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No transaction exists with this id.
    #[error("transaction {0} not found")]
    NotFound(TxId),

    /// A participant's `try_status` was already terminal and the caller
    /// tried to set it to a different terminal value. `tx_update` is
    /// idempotent for a repeated identical value, but a flip from
    /// `Success` to `Failure` (or back) is rejected.
    #[error("participant {participant_id} in tx {tx_id} already has a terminal try_status")]
    AlreadyTerminal {
        /// The transaction this happened in.
        tx_id: TxId,
        /// The participant whose status could not be changed.
        participant_id: String,
    },

    /// `tx_submit(tx_id, true)` was called while some participant entry is
    /// not yet `Success`.
    #[error("tx {0} cannot be submitted as successful: not every participant has acked")]
    NotReadyForSuccess(TxId),

    /// `tx_submit` was called with a verdict that contradicts the
    /// transaction's already-terminal status.
    #[error("tx {0} already has a terminal status that disagrees with this verdict")]
    StatusAlreadyTerminal(TxId),

    /// The distributed lock is currently held by someone else.
    #[error("lock is currently held")]
    LockHeld,

    /// The backing store could not be reached or returned an
    /// implementation-specific failure.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
