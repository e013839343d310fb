//! Span definitions per operation: search, resolve, fetch, back-fill.

/// Create a search span.
#[macro_export]
macro_rules! search_span {
    ($query:expr, $resolve:expr) => {
        tracing::info_span!("fedi.search", query = %$query, resolve = $resolve)
    };
}

/// Create a resolve span for one strategy.
#[macro_export]
macro_rules! resolve_span {
    ($strategy:expr) => {
        tracing::debug_span!("fedi.resolve", strategy = ?$strategy)
    };
}

/// Create a remote fetch span.
#[macro_export]
macro_rules! fetch_span {
    ($kind:expr, $target:expr) => {
        tracing::debug_span!("fedi.fetch", kind = $kind, object = %$target)
    };
}

/// Create a thread back-fill span.
#[macro_export]
macro_rules! backfill_span {
    ($uri:expr) => {
        tracing::debug_span!("fedi.backfill", uri = %$uri)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const SEARCH: &str = "fedi.search";
    pub const RESOLVE: &str = "fedi.resolve";
    pub const FETCH: &str = "fedi.fetch";
    pub const BACKFILL: &str = "fedi.backfill";
}
