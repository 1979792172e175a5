//! The coordinator: registers participants, drives the happy-path
//! two-phase commit, and hosts the background reconciler.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use tcc_core::{Participant, ParticipantId, RequestEntity};
use tcc_registry::Registry;
use tcc_store::Store;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::advance::advance_progress;
use crate::error::CoordinatorError;
use crate::options::Options;
use crate::reconciler;

struct Inner {
    store: Arc<dyn Store>,
    registry: Arc<Registry>,
    options: Options,
    shutdown: CancellationToken,
    reconciler: Mutex<Option<JoinHandle<()>>>,
}

/// Drives participants through Try-Confirm-Cancel against a [`Store`].
///
/// Cheap to clone: internally it's an `Arc`, so handing a `Coordinator` to
/// multiple tasks shares the same registry, store handle, and background
/// reconciler.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

impl Coordinator {
    /// Construct a coordinator over `store` and immediately spawn its
    /// reconciler loop.
    pub fn new(store: Arc<dyn Store>, options: Options) -> Self {
        let registry = Arc::new(Registry::new());
        let shutdown = CancellationToken::new();

        let handle = tokio::spawn(reconciler::run(
            store.clone(),
            registry.clone(),
            options,
            shutdown.clone(),
        ));

        Self {
            inner: Arc::new(Inner {
                store,
                registry,
                options,
                shutdown,
                reconciler: Mutex::new(Some(handle)),
            }),
        }
    }

    /// Register a participant. Errors if its id is already registered.
    pub fn register(&self, participant: Arc<dyn Participant>) -> Result<(), CoordinatorError> {
        self.inner
            .registry
            .register(participant)
            .map_err(CoordinatorError::from)
    }

    /// Drive one transaction through the Try phase and return its
    /// tentative verdict. Finalization (Confirm-all or Cancel-all) is
    /// handed off to a detached task and to the reconciler; this call
    /// does not wait for it.
    pub async fn transaction(&self, requests: Vec<RequestEntity>) -> Result<bool, CoordinatorError> {
        if requests.is_empty() {
            return Err(CoordinatorError::EmptyTask);
        }

        let mut seen = HashSet::with_capacity(requests.len());
        for request in &requests {
            if !seen.insert(request.participant_id.clone()) {
                return Err(CoordinatorError::RepeatComponent(
                    request.participant_id.clone(),
                ));
            }
        }

        let ids: Vec<ParticipantId> = requests.iter().map(|r| r.participant_id.clone()).collect();
        let participants = self.inner.registry.get_components(&ids)?;

        let tx_id = self.inner.store.create_tx(ids).await?;
        tracing::info!(%tx_id, participants = requests.len(), "transaction created");

        let child_token = self.inner.shutdown.child_token();
        let (failure_tx, mut failure_rx) =
            tokio::sync::mpsc::channel::<CoordinatorError>(requests.len());

        for (participant, request) in participants.into_iter().zip(requests.into_iter()) {
            let store = self.inner.store.clone();
            let token = child_token.clone();
            let failure_tx = failure_tx.clone();
            let participant_id = request.participant_id;

            tokio::spawn(async move {
                let outcome = participant
                    .try_(tx_id, request.request_payload, token)
                    .await;

                match outcome {
                    Ok(ack) if ack.ack => {
                        if let Err(e) = store.tx_update(tx_id, &participant_id, true).await {
                            tracing::warn!(
                                %tx_id, participant = %participant_id, error = %e,
                                "failed to record try success"
                            );
                            let _ = failure_tx.send(CoordinatorError::Store(e)).await;
                        }
                    }
                    Ok(_) => {
                        let _ = store.tx_update(tx_id, &participant_id, false).await;
                        let _ = failure_tx
                            .send(CoordinatorError::ParticipantRefused { participant_id })
                            .await;
                    }
                    Err(source) => {
                        let _ = store.tx_update(tx_id, &participant_id, false).await;
                        let _ = failure_tx
                            .send(CoordinatorError::Participant {
                                participant_id,
                                source,
                            })
                            .await;
                    }
                }
            });
        }
        drop(failure_tx);

        let success = match tokio::time::timeout(self.inner.options.timeout, failure_rx.recv()).await
        {
            Ok(Some(_first_failure)) => {
                child_token.cancel();
                false
            }
            Ok(None) => true,
            Err(_elapsed) => {
                tracing::warn!(%tx_id, "transaction call timed out waiting on try phase");
                child_token.cancel();
                false
            }
        };

        let store = self.inner.store.clone();
        let registry = self.inner.registry.clone();
        let options = self.inner.options;
        let shutdown = self.inner.shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = advance_progress(&store, &registry, options, tx_id, shutdown).await {
                tracing::warn!(%tx_id, error = %e, "finalize failed after try phase; reconciler will retry");
            }
        });

        Ok(success)
    }

    /// Stop the background reconciler. Idempotent; does not wait for
    /// in-flight finalization tasks.
    pub fn stop(&self) {
        self.inner.shutdown.cancel();
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.shutdown.cancel();
        if let Some(handle) = self.reconciler.lock().take() {
            handle.abort();
        }
    }
}
