//! The store contract: a durable transaction log plus a single
//! process-wide distributed lock.

use std::time::Duration;

use async_trait::async_trait;
use tcc_core::{ParticipantId, Transaction, TxId};

use crate::error::StoreError;

/// Durable persistence and leader-election backing for the coordinator.
///
/// A production implementation backs this with a real database and a real
/// distributed lock (e.g. a lease row with a TTL); this crate also ships
/// [`crate::InMemoryStore`], a reference implementation used by tests and
/// the workspace's demos.
#[async_trait]
pub trait Store: Send + Sync {
    /// Atomically allocate a new `TxId` and persist a `Hanging` transaction
    /// with one `Hanging` participant entry per id in `participant_ids`,
    /// in the given order.
    async fn create_tx(&self, participant_ids: Vec<ParticipantId>) -> Result<TxId, StoreError>;

    /// Flip `participant_id`'s `try_status` within `tx_id` to `Success`
    /// (if `accept`) or `Failure`. Idempotent for a repeated identical
    /// value; rejects a flip between terminal values.
    async fn tx_update(
        &self,
        tx_id: TxId,
        participant_id: &str,
        accept: bool,
    ) -> Result<(), StoreError>;

    /// Set the transaction's top-level status. Idempotent. Rejects
    /// `success = true` unless every participant entry is `Success`.
    async fn tx_submit(&self, tx_id: TxId, success: bool) -> Result<(), StoreError>;

    /// Every transaction whose top-level status is still `Hanging`,
    /// regardless of age. Order is unspecified.
    async fn hanging_txs(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Fetch one transaction by id.
    async fn get_tx(&self, tx_id: TxId) -> Result<Transaction, StoreError>;

    /// Acquire the single process-wide reconciliation lock, self-expiring
    /// after `expire` if never explicitly released. Errors with
    /// [`StoreError::LockHeld`] if another holder currently has it.
    async fn lock(&self, expire: Duration) -> Result<(), StoreError>;

    /// Release the reconciliation lock. Safe to call even if the lock has
    /// already self-expired.
    async fn unlock(&self) -> Result<(), StoreError>;
}
