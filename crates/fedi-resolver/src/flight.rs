//! Single-flight guard for remote fetches.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Serialises concurrent fetches of the same key.
///
/// The second caller for a key waits for the first to finish and is then
/// expected to re-check the cache before fetching again.
#[derive(Debug)]
pub struct FlightGuard {
    enabled: bool,
    flights: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

/// Held for the duration of one fetch. Dropping it releases the key.
#[derive(Debug)]
pub struct FlightPermit {
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
    flights: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl FlightGuard {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            flights: Arc::new(DashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Wait until no other fetch of `key` is in flight.
    pub async fn acquire(&self, key: &str) -> FlightPermit {
        let mut permit = FlightPermit {
            key: key.to_string(),
            guard: None,
            flights: Arc::clone(&self.flights),
        };
        if !self.enabled {
            return permit;
        }
        let lock = Arc::clone(self.flights.entry(key.to_string()).or_default().value());
        permit.guard = Some(lock.lock_owned().await);
        permit
    }

    /// Keys with a fetch in flight or waiting.
    pub fn in_flight(&self) -> usize {
        self.flights.len()
    }
}

impl Drop for FlightPermit {
    fn drop(&mut self) {
        drop(self.guard.take());
        // The map's own Arc is the only one left once nobody holds or waits.
        self.flights
            .remove_if(&self.key, |_, lock| Arc::strong_count(lock) == 1);
    }
}
