//! The two-phase commit driver: happy-path `transaction()` plus a
//! background reconciler that finalizes whatever the happy path didn't.
//!
//! ## Lifecycle
//!
//! A [`Coordinator`] wraps a [`tcc_store::Store`] and owns a
//! [`tcc_registry::Registry`]. Constructing one spawns its reconciler
//! loop; [`Coordinator::stop`] cancels it. A call to
//! [`Coordinator::transaction`] fans Try out to every requested
//! participant, returns as soon as the Try-phase verdict is known, and
//! hands finalization (Confirm-all or Cancel-all) off to a detached task —
//! the reconciler is the safety net that catches whatever that task
//! doesn't finish, including across a coordinator restart.

#![warn(missing_docs)]

mod advance;
mod coordinator;
mod error;
mod options;
mod reconciler;

pub use coordinator::Coordinator;
pub use error::CoordinatorError;
pub use options::{Options, OptionsBuilder};
