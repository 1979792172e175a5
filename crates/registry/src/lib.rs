//! In-process registry mapping participant ids to live participants.
//!
//! Populated once at startup (`register`) and read on every transaction
//! (`get_components`). Registration is rare relative to lookups, but both
//! are serialized under a single mutex — contention is not a concern at
//! the scale this registry is meant for.

#![warn(missing_docs)]

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tcc_core::{Participant, ParticipantId};

pub mod error;
pub use error::RegistryError;

/// Holds every participant the coordinator knows about.
pub struct Registry {
    participants: Mutex<HashMap<ParticipantId, Arc<dyn Participant>>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            participants: Mutex::new(HashMap::new()),
        }
    }

    /// Register a participant. Errors if its id is already registered.
    pub fn register(&self, participant: Arc<dyn Participant>) -> Result<(), RegistryError> {
        let id = participant.id().to_string();
        let mut participants = self.participants.lock();
        if participants.contains_key(&id) {
            return Err(RegistryError::AlreadyRegistered(id));
        }
        participants.insert(id, participant);
        Ok(())
    }

    /// Resolve a single participant by id.
    pub fn get_component(&self, id: &str) -> Result<Arc<dyn Participant>, RegistryError> {
        self.participants
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Resolve every id in `ids`, in order. Fails on the first id nothing
    /// has registered.
    pub fn get_components(
        &self,
        ids: &[ParticipantId],
    ) -> Result<Vec<Arc<dyn Participant>>, RegistryError> {
        let participants = self.participants.lock();
        ids.iter()
            .map(|id| {
                participants
                    .get(id)
                    .cloned()
                    .ok_or_else(|| RegistryError::NotFound(id.clone()))
            })
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
