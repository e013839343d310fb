//! Cancellation and deadline wrappers for collaborator calls.

use std::future::Future;
use std::time::Duration;

use fedi_core::errors::{FediResult, FetchError, SearchError};
use tokio_util::sync::CancellationToken;

/// Run `fut` unless `cancel` fires first. Cancellation wins ties.
pub async fn cancellable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = FediResult<T>>,
) -> FediResult<T> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SearchError::Cancelled.into()),
        result = fut => result,
    }
}

/// Bound a remote call by `limit`, reporting expiry as a fetch timeout.
pub async fn timed<T>(
    limit: Duration,
    target: &str,
    fut: impl Future<Output = FediResult<T>>,
) -> FediResult<T> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Timeout {
            target: target.to_string(),
            timeout_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
        .into()),
    }
}
