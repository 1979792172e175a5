//! An in-memory participant for tests and demos, modeled on the
//! `tried -> confirmed` / `tried -> canceled` state machine a real
//! participant backs with durable storage.
//!
//! Every participant an application plugs into the coordinator ends up
//! guarding some resource with a small per-transaction state machine; this
//! one guards nothing but a `HashMap` entry, which is enough to exercise
//! the idempotence and illegal-state-transition rules every participant
//! must honor.

#![warn(missing_docs)]

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use tcc_core::{Ack, Participant, ParticipantError, Payload, TxId};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Tried,
    Confirmed,
    Canceled,
}

/// How [`MockParticipant::try_`] should behave for every call that
/// follows `set_try_behavior`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryBehavior {
    /// Accept every `Try` (the default).
    Ack,
    /// Refuse every `Try` with `ack = false`.
    Refuse,
    /// Fail every `Try` with an RPC error.
    Error,
}

/// A participant backed by an in-memory per-transaction state machine.
pub struct MockParticipant {
    id: String,
    try_behavior: Mutex<TryBehavior>,
    state: Mutex<HashMap<TxId, State>>,
}

impl MockParticipant {
    /// Create a participant that acks every `Try`.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            try_behavior: Mutex::new(TryBehavior::Ack),
            state: Mutex::new(HashMap::new()),
        }
    }

    /// Create a participant that refuses every `Try`.
    pub fn always_refuse(id: impl Into<String>) -> Self {
        let participant = Self::new(id);
        *participant.try_behavior.lock() = TryBehavior::Refuse;
        participant
    }

    /// Change how subsequent `Try` calls behave.
    pub fn set_try_behavior(&self, behavior: TryBehavior) {
        *self.try_behavior.lock() = behavior;
    }

    /// Inspect this participant's recorded state for `tx_id`, if any.
    pub fn state_of(&self, tx_id: TxId) -> Option<&'static str> {
        self.state.lock().get(&tx_id).map(|s| match s {
            State::Tried => "tried",
            State::Confirmed => "confirmed",
            State::Canceled => "canceled",
        })
    }
}

#[async_trait]
impl Participant for MockParticipant {
    fn id(&self) -> &str {
        &self.id
    }

    async fn try_(
        &self,
        tx_id: TxId,
        _data: Payload,
        _cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError> {
        match *self.try_behavior.lock() {
            TryBehavior::Error => {
                return Err(ParticipantError::Rpc(format!(
                    "{} refuses to try",
                    self.id
                )))
            }
            TryBehavior::Refuse => return Ok(Ack::refused(self.id.clone(), tx_id)),
            TryBehavior::Ack => {}
        }
        self.state.lock().entry(tx_id).or_insert(State::Tried);
        Ok(Ack::accepted(self.id.clone(), tx_id))
    }

    async fn confirm(
        &self,
        tx_id: TxId,
        _cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError> {
        let mut state = self.state.lock();
        match state.get(&tx_id) {
            Some(State::Canceled) => Err(ParticipantError::IllegalStateTransition {
                tx_id: tx_id.to_string(),
                reason: "confirm after cancel".to_string(),
            }),
            _ => {
                state.insert(tx_id, State::Confirmed);
                Ok(Ack::accepted(self.id.clone(), tx_id))
            }
        }
    }

    async fn cancel(
        &self,
        tx_id: TxId,
        _cancel: CancellationToken,
    ) -> Result<Ack, ParticipantError> {
        let mut state = self.state.lock();
        match state.get(&tx_id) {
            Some(State::Confirmed) => Err(ParticipantError::IllegalStateTransition {
                tx_id: tx_id.to_string(),
                reason: "cancel after confirm".to_string(),
            }),
            _ => {
                state.insert(tx_id, State::Canceled);
                Ok(Ack::accepted(self.id.clone(), tx_id))
            }
        }
    }
}
