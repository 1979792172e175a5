//! Unified error type for `tcc`.
//!
//! This module flattens the internal error enums of `tcc-coordinator`,
//! `tcc-registry`, `tcc-store`, and `tcc-core` into one public `Error`
//! with a consistent interface, the way the rest of this workspace
//! collapses layered internal errors at its public boundary.

use thiserror::Error;

/// All `tcc` errors.
#[derive(Debug, Error)]
pub enum Error {
    /// `transaction` was called with no requests.
    #[error("empty task")]
    EmptyTask,

    /// The same participant id appeared twice in one `transaction` call.
    #[error("repeat component: {0}")]
    RepeatComponent(String),

    /// A requested participant id has nothing registered for it.
    #[error("unknown component: {0}")]
    UnknownComponent(String),

    /// A participant id was registered twice.
    #[error("repeat register component id: {0}")]
    AlreadyRegistered(String),

    /// A participant refused a call (`Try`, `Confirm`, or `Cancel`
    /// returned `ack = false`).
    #[error("component {0} refused")]
    ComponentRefused(String),

    /// A participant's call errored, including the illegal-state-transition
    /// case (confirm-after-cancel, cancel-after-confirm).
    #[error("component {participant_id} call failed: {message}")]
    Participant {
        /// The participant whose call failed.
        participant_id: String,
        /// Human-readable detail.
        message: String,
    },

    /// The store rejected an operation or could not be reached.
    #[error("store error: {0}")]
    Store(String),

    /// A `CoordinatorBuilder` was built without a store.
    #[error("coordinator misconfigured: {0}")]
    Configuration(String),
}

/// Result type for `tcc` operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for errors that may succeed if the caller retries: transient
    /// store failures and the store's distributed lock being held
    /// elsewhere.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Store(_))
    }

    /// True for errors that mean the caller passed bad input — fixing
    /// them requires changing the call, not retrying it.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::EmptyTask | Error::RepeatComponent(_) | Error::UnknownComponent(_)
        )
    }
}

impl From<tcc_coordinator::CoordinatorError> for Error {
    fn from(e: tcc_coordinator::CoordinatorError) -> Self {
        use tcc_coordinator::CoordinatorError as CE;
        match e {
            CE::EmptyTask => Error::EmptyTask,
            CE::RepeatComponent(id) => Error::RepeatComponent(id),
            CE::ComponentAckFailed { participant_id } => Error::Participant {
                participant_id,
                message: "ack failed during finalization".to_string(),
            },
            CE::ParticipantRefused { participant_id } => Error::ComponentRefused(participant_id),
            CE::Participant {
                participant_id,
                source,
            } => Error::Participant {
                participant_id,
                message: source.to_string(),
            },
            CE::Registry(re) => re.into(),
            CE::Store(se) => Error::Store(se.to_string()),
        }
    }
}

impl From<tcc_registry::RegistryError> for Error {
    fn from(e: tcc_registry::RegistryError) -> Self {
        use tcc_registry::RegistryError as RE;
        match e {
            RE::AlreadyRegistered(id) => Error::AlreadyRegistered(id),
            RE::NotFound(id) => Error::UnknownComponent(id),
        }
    }
}

impl From<tcc_store::StoreError> for Error {
    fn from(e: tcc_store::StoreError) -> Self {
        Error::Store(e.to_string())
    }
}
