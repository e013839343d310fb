// Single source of truth for all default values.

// --- Instance ---
pub const DEFAULT_HOST: &str = "localhost";

// --- Cache ---
pub const DEFAULT_ACCOUNT_CACHE_CAPACITY: usize = 1_024;
pub const DEFAULT_STATUS_CACHE_CAPACITY: usize = 4_096;

// --- Resolver ---
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_THREAD_BACKFILL: bool = true;
pub const DEFAULT_BACKFILL_TIMEOUT_MS: u64 = 30_000;
pub const DEFAULT_SINGLE_FLIGHT: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
