//! An in-process reference [`Store`] implementation.
//!
//! Backed by a `parking_lot::Mutex<HashMap<..>>`. This is the store used by
//! the workspace's own tests and by `demos/basic-tcc`; it is not meant to
//! back a real multi-process deployment, since its lock only excludes
//! other `InMemoryStore` handles cloned from the same `Arc`, not other
//! processes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tcc_core::{ParticipantEntry, ParticipantId, Transaction, TryStatus, TxId, TxStatus};

use crate::error::StoreError;
use crate::store::Store;

struct LockState {
    held_until: Option<DateTime<Utc>>,
}

/// In-memory [`Store`] reference implementation.
#[derive(Clone)]
pub struct InMemoryStore {
    transactions: Arc<Mutex<HashMap<TxId, Transaction>>>,
    lock_state: Arc<Mutex<LockState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            transactions: Arc::new(Mutex::new(HashMap::new())),
            lock_state: Arc::new(Mutex::new(LockState { held_until: None })),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn create_tx(&self, participant_ids: Vec<ParticipantId>) -> Result<TxId, StoreError> {
        let tx_id = TxId::new();
        let tx = Transaction {
            tx_id,
            created_at: Utc::now(),
            status: TxStatus::Hanging,
            participants: participant_ids
                .into_iter()
                .map(|participant_id| ParticipantEntry {
                    participant_id,
                    try_status: TryStatus::Hanging,
                })
                .collect(),
        };
        self.transactions.lock().insert(tx_id, tx);
        tracing::debug!(%tx_id, "created transaction");
        Ok(tx_id)
    }

    async fn tx_update(
        &self,
        tx_id: TxId,
        participant_id: &str,
        accept: bool,
    ) -> Result<(), StoreError> {
        let mut txs = self.transactions.lock();
        let tx = txs.get_mut(&tx_id).ok_or(StoreError::NotFound(tx_id))?;
        let entry = tx
            .participants
            .iter_mut()
            .find(|p| p.participant_id == participant_id)
            .ok_or_else(|| StoreError::NotFound(tx_id))?;

        let new_status = if accept {
            TryStatus::Success
        } else {
            TryStatus::Failure
        };

        match entry.try_status {
            TryStatus::Hanging => {
                entry.try_status = new_status;
                Ok(())
            }
            current if current == new_status => Ok(()),
            _ => Err(StoreError::AlreadyTerminal {
                tx_id,
                participant_id: participant_id.to_string(),
            }),
        }
    }

    async fn tx_submit(&self, tx_id: TxId, success: bool) -> Result<(), StoreError> {
        let mut txs = self.transactions.lock();
        let tx = txs.get_mut(&tx_id).ok_or(StoreError::NotFound(tx_id))?;

        let new_status = if success {
            if !tx
                .participants
                .iter()
                .all(|p| p.try_status == TryStatus::Success)
            {
                return Err(StoreError::NotReadyForSuccess(tx_id));
            }
            TxStatus::Success
        } else {
            TxStatus::Failure
        };

        match tx.status {
            TxStatus::Hanging => tx.status = new_status,
            current if current == new_status => {}
            _ => return Err(StoreError::StatusAlreadyTerminal(tx_id)),
        }
        Ok(())
    }

    async fn hanging_txs(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .transactions
            .lock()
            .values()
            .filter(|tx| tx.status == TxStatus::Hanging)
            .cloned()
            .collect())
    }

    async fn get_tx(&self, tx_id: TxId) -> Result<Transaction, StoreError> {
        self.transactions
            .lock()
            .get(&tx_id)
            .cloned()
            .ok_or(StoreError::NotFound(tx_id))
    }

    async fn lock(&self, expire: Duration) -> Result<(), StoreError> {
        let mut state = self.lock_state.lock();
        let now = Utc::now();
        if let Some(held_until) = state.held_until {
            if held_until > now {
                return Err(StoreError::LockHeld);
            }
        }
        state.held_until = Some(
            now + chrono::Duration::from_std(expire).unwrap_or_else(|_| chrono::Duration::zero()),
        );
        tracing::trace!("acquired reconciliation lock");
        Ok(())
    }

    async fn unlock(&self) -> Result<(), StoreError> {
        self.lock_state.lock().held_until = None;
        tracing::trace!("released reconciliation lock");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_tx_starts_hanging() {
        let store = InMemoryStore::new();
        let tx_id = store
            .create_tx(vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        let tx = store.get_tx(tx_id).await.unwrap();
        assert_eq!(tx.status, TxStatus::Hanging);
        assert_eq!(tx.participants.len(), 2);
        assert!(tx
            .participants
            .iter()
            .all(|p| p.try_status == TryStatus::Hanging));
    }

    #[tokio::test]
    async fn tx_update_is_idempotent() {
        let store = InMemoryStore::new();
        let tx_id = store.create_tx(vec!["a".to_string()]).await.unwrap();
        store.tx_update(tx_id, "a", true).await.unwrap();
        store.tx_update(tx_id, "a", true).await.unwrap();
        let tx = store.get_tx(tx_id).await.unwrap();
        assert_eq!(tx.participants[0].try_status, TryStatus::Success);
    }

    #[tokio::test]
    async fn tx_update_rejects_flip_between_terminal_values() {
        let store = InMemoryStore::new();
        let tx_id = store.create_tx(vec!["a".to_string()]).await.unwrap();
        store.tx_update(tx_id, "a", true).await.unwrap();
        let err = store.tx_update(tx_id, "a", false).await.unwrap_err();
        assert!(matches!(err, StoreError::AlreadyTerminal { .. }));
    }

    #[tokio::test]
    async fn tx_submit_requires_all_success() {
        let store = InMemoryStore::new();
        let tx_id = store
            .create_tx(vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        store.tx_update(tx_id, "a", true).await.unwrap();
        let err = store.tx_submit(tx_id, true).await.unwrap_err();
        assert!(matches!(err, StoreError::NotReadyForSuccess(_)));

        store.tx_update(tx_id, "b", true).await.unwrap();
        store.tx_submit(tx_id, true).await.unwrap();
        let tx = store.get_tx(tx_id).await.unwrap();
        assert_eq!(tx.status, TxStatus::Success);
    }

    #[tokio::test]
    async fn hanging_txs_excludes_terminal() {
        let store = InMemoryStore::new();
        let hanging = store.create_tx(vec!["a".to_string()]).await.unwrap();
        let done = store.create_tx(vec!["a".to_string()]).await.unwrap();
        store.tx_update(done, "a", true).await.unwrap();
        store.tx_submit(done, true).await.unwrap();

        let still_hanging = store.hanging_txs().await.unwrap();
        assert_eq!(still_hanging.len(), 1);
        assert_eq!(still_hanging[0].tx_id, hanging);
    }

    #[tokio::test]
    async fn lock_excludes_concurrent_holder_until_expiry() {
        let store = InMemoryStore::new();
        store.lock(Duration::from_millis(20)).await.unwrap();
        assert!(matches!(
            store.lock(Duration::from_secs(5)).await,
            Err(StoreError::LockHeld)
        ));
        store.unlock().await.unwrap();
        store.lock(Duration::from_secs(5)).await.unwrap();
    }
}
