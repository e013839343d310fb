use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Resolver configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Upper bound on a single remote account/status fetch.
    pub fetch_timeout_ms: u64,
    /// Fetch the surrounding thread after a status is dereferenced.
    pub thread_backfill: bool,
    /// Upper bound on a thread back-fill.
    pub backfill_timeout_ms: u64,
    /// Serialize concurrent remote fetches of the same target.
    pub single_flight: bool,
}

impl ResolverConfig {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn backfill_timeout(&self) -> Duration {
        Duration::from_millis(self.backfill_timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: defaults::DEFAULT_FETCH_TIMEOUT_MS,
            thread_backfill: defaults::DEFAULT_THREAD_BACKFILL,
            backfill_timeout_ms: defaults::DEFAULT_BACKFILL_TIMEOUT_MS,
            single_flight: defaults::DEFAULT_SINGLE_FLIGHT,
        }
    }
}
