//! # tcc
//!
//! A Try-Confirm-Cancel distributed transaction coordinator.
//!
//! `tcc` drives a set of heterogeneous participants through a two-phase
//! commit: every participant's `Try` either all succeed (then every
//! participant is `Confirm`ed) or any fail (then every participant that
//! was tried is `Cancel`led). A background reconciler finalizes whatever
//! a crash or a slow caller left hanging, coordinating with other
//! coordinator instances through the store's distributed lock.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use tcc::prelude::*;
//! use tcc_mock_participant::MockParticipant;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let coordinator = CoordinatorBuilder::new().build_in_memory();
//! coordinator.register(Arc::new(MockParticipant::new("inventory")))?;
//! coordinator.register(Arc::new(MockParticipant::new("payments")))?;
//!
//! let ok = coordinator
//!     .transaction(vec![
//!         RequestEntity::new("inventory", Default::default()),
//!         RequestEntity::new("payments", Default::default()),
//!     ])
//!     .await?;
//! assert!(ok);
//!
//! coordinator.stop();
//! # Ok(())
//! # }
//! ```
//!
//! ## Crates
//!
//! - [`tcc_core`] — the [`Participant`] contract and the durable
//!   `Transaction` record.
//! - [`tcc_store`] — the [`Store`] contract and an in-memory reference
//!   implementation.
//! - [`tcc_registry`] — the participant registry.
//! - [`tcc_coordinator`] — the happy-path driver and the reconciler.
//!
//! This crate is a thin facade over those: [`CoordinatorBuilder`] wires a
//! store and options together, and [`Error`] flattens the internal error
//! enums into one type.

#![warn(missing_docs)]

mod coordinator;
mod error;
mod types;

pub mod prelude;

pub use coordinator::CoordinatorBuilder;
pub use error::{Error, Result};

pub use tcc_coordinator::{Coordinator, Options};
pub use tcc_core::Participant;
pub use tcc_store::{InMemoryStore, Store};

pub use types::*;
