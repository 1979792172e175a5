//! Errors raised out of the participant registry.

use thiserror::Error;

/// Everything that can go wrong registering or resolving participants.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// `register` was called twice with the same participant id.
    #[error("repeat register component id: {0}")]
    AlreadyRegistered(String),

    /// `get_components` was asked for an id nothing has registered.
    #[error("unknown component id: {0}")]
    NotFound(String),
}
