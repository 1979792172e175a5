//! Drives two transactions end to end against an in-memory store: one
//! where every participant acks, and one where a participant refuses.

use std::sync::Arc;
use std::time::Duration;

use tcc::{CoordinatorBuilder, RequestEntity};
use tcc_mock_participant::MockParticipant;

#[tokio::main]
async fn main() -> tcc::Result<()> {
    tracing_subscriber::fmt::init();

    let coordinator = CoordinatorBuilder::new()
        .timeout(Duration::from_secs(2))
        .monitor_tick(Duration::from_secs(1))
        .build_in_memory();

    coordinator.register(Arc::new(MockParticipant::new("inventory")))?;
    coordinator.register(Arc::new(MockParticipant::new("payments")))?;
    coordinator.register(Arc::new(MockParticipant::always_refuse("fraud-check")))?;

    let ok = coordinator
        .transaction(vec![
            RequestEntity::new("inventory", Default::default()),
            RequestEntity::new("payments", Default::default()),
        ])
        .await?;
    tracing::info!(ok, "all-ack transaction finished");

    let ok = coordinator
        .transaction(vec![
            RequestEntity::new("inventory", Default::default()),
            RequestEntity::new("fraud-check", Default::default()),
        ])
        .await?;
    tracing::info!(ok, "mid-failure transaction finished");

    // Give the detached finalize tasks and one reconciler tick a chance
    // to run before we tear the coordinator down.
    tokio::time::sleep(Duration::from_secs(2)).await;
    coordinator.stop();

    Ok(())
}
