use serde::{Deserialize, Serialize};

use super::defaults;

/// Entity cache configuration.
///
/// Capacities are pre-allocation hints only; the caches are unbounded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub account_capacity: usize,
    pub status_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            account_capacity: defaults::DEFAULT_ACCOUNT_CACHE_CAPACITY,
            status_capacity: defaults::DEFAULT_STATUS_CACHE_CAPACITY,
        }
    }
}
