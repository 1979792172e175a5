//! Coordinator configuration.

use std::time::Duration;

/// Tunables for a [`crate::Coordinator`].
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Bound on a single `transaction()` call, and the age past which a
    /// hanging transaction is declared failed. Also used as the TTL
    /// passed to the store's distributed lock.
    pub timeout: Duration,
    /// Base period of the reconciler loop. Backoff caps at eight times
    /// this value.
    pub monitor_tick: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            monitor_tick: Duration::from_secs(10),
        }
    }
}

/// Builds an [`Options`] one field at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Start from the defaults (5s timeout, 10s monitor tick).
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.options.timeout = timeout;
        self
    }

    /// Override the reconciler's base tick.
    pub fn monitor_tick(mut self, monitor_tick: Duration) -> Self {
        self.options.monitor_tick = monitor_tick;
        self
    }

    /// Finish building.
    pub fn build(self) -> Options {
        self.options
    }
}
