//! Finalization: driving one transaction from `Hanging` to a terminal
//! state by confirming or cancelling every participant in order.

use std::sync::Arc;

use chrono::Utc;
use tcc_core::{TxId, TxStatus};
use tcc_registry::Registry;
use tcc_store::Store;
use tokio_util::sync::CancellationToken;

use crate::error::CoordinatorError;
use crate::options::Options;

/// Finalize `tx_id` if it has reached a terminal derived status; a no-op
/// if it is still `Hanging`. Used both by the synchronous hand-off after
/// `transaction()` returns and by the reconciler.
pub(crate) async fn advance_progress(
    store: &Arc<dyn Store>,
    registry: &Registry,
    options: Options,
    tx_id: TxId,
    cancel: CancellationToken,
) -> Result<(), CoordinatorError> {
    let tx = store.get_tx(tx_id).await?;
    let status = tx.derived_status(Utc::now(), options.timeout);

    let confirm = match status {
        TxStatus::Hanging => return Ok(()),
        TxStatus::Success => true,
        TxStatus::Failure => false,
    };

    for entry in &tx.participants {
        let participant = registry.get_component(&entry.participant_id)?;
        let ack = if confirm {
            participant.confirm(tx_id, cancel.clone()).await
        } else {
            participant.cancel(tx_id, cancel.clone()).await
        }
        .map_err(|source| CoordinatorError::Participant {
            participant_id: entry.participant_id.clone(),
            source,
        })?;

        if !ack.ack {
            return Err(CoordinatorError::ComponentAckFailed {
                participant_id: entry.participant_id.clone(),
            });
        }

        tracing::debug!(
            %tx_id,
            participant = %entry.participant_id,
            confirm,
            "finalized participant"
        );
    }

    store.tx_submit(tx_id, confirm).await?;
    tracing::info!(%tx_id, confirm, "transaction finalized");
    Ok(())
}
