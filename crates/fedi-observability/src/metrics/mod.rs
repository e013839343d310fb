//! Resolution counters shared by the resolver and the search frontend.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Lock-free counters, safe to share behind an `Arc`.
#[derive(Debug, Default)]
pub struct ResolutionMetrics {
    searches: AtomicU64,
    cancelled_searches: AtomicU64,
    cache_hits: AtomicU64,
    store_hits: AtomicU64,
    remote_fetches: AtomicU64,
    remote_failures: AtomicU64,
    backfill_failures: AtomicU64,
    filtered: AtomicU64,
}

/// Point-in-time copy of [`ResolutionMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub searches: u64,
    pub cancelled_searches: u64,
    pub cache_hits: u64,
    pub store_hits: u64,
    pub remote_fetches: u64,
    pub remote_failures: u64,
    pub backfill_failures: u64,
    pub filtered: u64,
}

impl MetricsSnapshot {
    /// Fraction of local hits served by the cache rather than the store.
    pub fn cache_hit_rate(&self) -> f64 {
        let local = self.cache_hits + self.store_hits;
        if local == 0 {
            return 0.0;
        }
        self.cache_hits as f64 / local as f64
    }
}

impl ResolutionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_search(&self) {
        self.searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cancelled(&self) {
        self.cancelled_searches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_hit(&self) {
        self.store_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_remote_fetch(&self) {
        self.remote_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_remote_failure(&self) {
        self.remote_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_backfill_failure(&self) {
        self.backfill_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Count candidates dropped by the visibility gate or failed conversion.
    pub fn record_filtered(&self, count: usize) {
        self.filtered.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            searches: self.searches.load(Ordering::Relaxed),
            cancelled_searches: self.cancelled_searches.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            store_hits: self.store_hits.load(Ordering::Relaxed),
            remote_fetches: self.remote_fetches.load(Ordering::Relaxed),
            remote_failures: self.remote_failures.load(Ordering::Relaxed),
            backfill_failures: self.backfill_failures.load(Ordering::Relaxed),
            filtered: self.filtered.load(Ordering::Relaxed),
        }
    }
}
