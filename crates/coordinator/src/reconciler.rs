//! Background loop that finds hanging transactions under the store's
//! distributed lock and drives each towards a terminal state.

use std::sync::Arc;

use tcc_registry::Registry;
use tcc_store::Store;
use tokio_util::sync::CancellationToken;

use crate::advance::advance_progress;
use crate::error::CoordinatorError;
use crate::options::Options;

/// Run until `shutdown` is cancelled. Tick starts at `options.monitor_tick`
/// and backs off exponentially, capped at eight times that, whenever a
/// scan errors; a successful scan (including "lock held elsewhere", which
/// is routine, not an error condition for backoff purposes) resets it.
pub(crate) async fn run(
    store: Arc<dyn Store>,
    registry: Arc<Registry>,
    options: Options,
    shutdown: CancellationToken,
) {
    let mut tick = options.monitor_tick;
    let max_tick = options.monitor_tick * 8;

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                tracing::info!("reconciler stopped");
                return;
            }
            _ = tokio::time::sleep(tick) => {}
        }

        match scan_once(&store, &registry, options, &shutdown).await {
            Ok(()) => tick = options.monitor_tick,
            Err(e) if e.is_lock_held() => tick = options.monitor_tick,
            Err(e) => {
                tracing::warn!(error = %e, tick_secs = tick.as_secs(), "reconciler scan failed, backing off");
                tick = std::cmp::min(tick * 2, max_tick);
            }
        }
    }
}

async fn scan_once(
    store: &Arc<dyn Store>,
    registry: &Arc<Registry>,
    options: Options,
    shutdown: &CancellationToken,
) -> Result<(), CoordinatorError> {
    store.lock(options.timeout).await?;

    let outcome = scan_locked(store, registry, options, shutdown).await;

    if let Err(e) = store.unlock().await {
        tracing::warn!(error = %e, "failed to release reconciliation lock");
    }

    outcome
}

async fn scan_locked(
    store: &Arc<dyn Store>,
    registry: &Arc<Registry>,
    options: Options,
    shutdown: &CancellationToken,
) -> Result<(), CoordinatorError> {
    let hanging = store.hanging_txs().await?;
    tracing::debug!(count = hanging.len(), "reconciler scan");

    let mut handles = Vec::with_capacity(hanging.len());
    for tx in hanging {
        let store = store.clone();
        let registry = registry.clone();
        let token = shutdown.child_token();
        handles.push(tokio::spawn(async move {
            advance_progress(&store, &registry, options, tx.tx_id, token).await
        }));
    }

    let mut first_error = None;
    for handle in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
            Err(join_err) => {
                tracing::warn!(error = %join_err, "advance_progress task panicked");
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
