/// Remote dereferencing errors.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("remote entity not found: {target}")]
    NotFound { target: String },

    #[error("transport error fetching {target}: {reason}")]
    Transport { target: String, reason: String },

    #[error("fetching {target} timed out after {timeout_ms}ms")]
    Timeout { target: String, timeout_ms: u64 },

    #[error("remote refused {target}: {reason}")]
    Refused { target: String, reason: String },
}
