//! Property-based tests for the atomicity invariant: a transaction's
//! participants are either all confirmed or all cancelled, never mixed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use proptest::prelude::*;
use tcc_core::{Ack, Participant, ParticipantError, Payload, RequestEntity, TxId};
use tcc_coordinator::{Coordinator, OptionsBuilder};
use tcc_store::InMemoryStore;
use tokio_util::sync::CancellationToken;

struct CountingParticipant {
    id: String,
    ack: bool,
    confirms: AtomicUsize,
    cancels: AtomicUsize,
}

impl CountingParticipant {
    fn new(id: impl Into<String>, ack: bool) -> Self {
        Self {
            id: id.into(),
            ack,
            confirms: AtomicUsize::new(0),
            cancels: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Participant for CountingParticipant {
    fn id(&self) -> &str {
        &self.id
    }

    async fn try_(
        &self,
        tx_id: TxId,
        _data: Payload,
        _cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError> {
        if self.ack {
            Ok(Ack::accepted(self.id.clone(), tx_id))
        } else {
            Ok(Ack::refused(self.id.clone(), tx_id))
        }
    }

    async fn confirm(
        &self,
        tx_id: TxId,
        _cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError> {
        self.confirms.fetch_add(1, Ordering::SeqCst);
        Ok(Ack::accepted(self.id.clone(), tx_id))
    }

    async fn cancel(
        &self,
        tx_id: TxId,
        _cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError> {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        Ok(Ack::accepted(self.id.clone(), tx_id))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// For any mix of participant `Try` outcomes, every participant ends
    /// up either confirmed exactly once or cancelled exactly once — never
    /// both, and never a mix of confirmed-some/cancelled-others.
    #[test]
    fn atomicity_holds_across_random_ack_vectors(acks in proptest::collection::vec(any::<bool>(), 1..6)) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let store = Arc::new(InMemoryStore::new());
            let options = OptionsBuilder::new()
                .timeout(Duration::from_millis(200))
                .monitor_tick(Duration::from_secs(10))
                .build();
            let coordinator = Coordinator::new(store, options);

            let mut participants = Vec::new();
            let mut requests = Vec::new();
            for (i, ack) in acks.iter().enumerate() {
                let id = format!("p{i}");
                let participant = Arc::new(CountingParticipant::new(id.clone(), *ack));
                coordinator.register(participant.clone()).unwrap();
                participants.push(participant);
                requests.push(RequestEntity::new(id, Payload::new()));
            }

            let _ = coordinator.transaction(requests).await.unwrap();
            tokio::time::sleep(Duration::from_millis(400)).await;

            let any_refused = acks.iter().any(|ack| !ack);
            for p in &participants {
                let confirms = p.confirms.load(Ordering::SeqCst);
                let cancels = p.cancels.load(Ordering::SeqCst);
                if any_refused {
                    prop_assert_eq!(cancels, 1, "participant {} should have been cancelled exactly once", p.id);
                    prop_assert_eq!(confirms, 0, "participant {} should never have been confirmed", p.id);
                } else {
                    prop_assert_eq!(confirms, 1, "participant {} should have been confirmed exactly once", p.id);
                    prop_assert_eq!(cancels, 0, "participant {} should never have been cancelled", p.id);
                }
            }

            coordinator.stop();
            Ok(())
        })?;
    }
}
