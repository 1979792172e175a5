//! Builder for constructing a [`Coordinator`].

use std::sync::Arc;
use std::time::Duration;

use tcc_coordinator::{Coordinator, OptionsBuilder};
use tcc_store::{InMemoryStore, Store};

use crate::error::{Error, Result};

/// Builds a [`Coordinator`] one setting at a time.
///
/// # Examples
///
/// ```
/// use tcc::CoordinatorBuilder;
///
/// let coordinator = CoordinatorBuilder::new().build_in_memory();
/// ```
pub struct CoordinatorBuilder {
    store: Option<Arc<dyn Store>>,
    options: OptionsBuilder,
}

impl CoordinatorBuilder {
    /// Start from the default options (5s timeout, 10s monitor tick) with
    /// no store configured yet.
    pub fn new() -> Self {
        Self {
            store: None,
            options: OptionsBuilder::new(),
        }
    }

    /// Use `store` as the durable transaction log and distributed lock.
    pub fn store(mut self, store: Arc<dyn Store>) -> Self {
        self.store = Some(store);
        self
    }

    /// Bound a single `transaction()` call and the age at which a hanging
    /// transaction is declared failed. Default: 5 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options = self.options.timeout(timeout);
        self
    }

    /// Set the reconciler's base tick; backoff caps at eight times this.
    /// Default: 10 seconds.
    pub fn monitor_tick(mut self, monitor_tick: Duration) -> Self {
        self.options = self.options.monitor_tick(monitor_tick);
        self
    }

    /// Build the coordinator. Fails if no store was supplied.
    pub fn build(self) -> Result<Coordinator> {
        let store = self
            .store
            .ok_or_else(|| Error::Configuration("no store configured".to_string()))?;
        Ok(Coordinator::new(store, self.options.build()))
    }

    /// Build a coordinator backed by an ephemeral in-memory store.
    ///
    /// Handy for tests and demos. Not suitable for a multi-process
    /// deployment — see [`tcc_store::InMemoryStore`].
    pub fn build_in_memory(self) -> Coordinator {
        Coordinator::new(Arc::new(InMemoryStore::new()), self.options.build())
    }
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
