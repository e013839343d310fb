//! # fedi-observability
//!
//! Tracing subscriber setup, span macros for search/resolve/fetch, and the
//! counters the resolver and search frontend report into.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{MetricsSnapshot, ResolutionMetrics};
pub use tracing_setup::{init_tracing, init_tracing_from_config, init_tracing_with_filter};
