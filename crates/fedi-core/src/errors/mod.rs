mod fetch_error;
mod search_error;
mod store_error;

pub use fetch_error::FetchError;
pub use search_error::SearchError;
pub use store_error::StoreError;

/// Result alias used throughout the workspace.
pub type FediResult<T> = Result<T, FediError>;

/// Top-level error type. Subsystem errors convert into it via `From`.
#[derive(Debug, thiserror::Error)]
pub enum FediError {
    #[error(transparent)]
    SearchError(#[from] SearchError),

    #[error(transparent)]
    StoreError(#[from] StoreError),

    #[error(transparent)]
    FetchError(#[from] FetchError),

    #[error("invalid mention namestring: {namestring}")]
    InvalidMention { namestring: String },

    #[error("invalid uri {uri}: {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("conversion to api model failed for {entity_id}: {reason}")]
    ConversionError { entity_id: String, reason: String },

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Coarse classification used by the API layer to pick a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    ClientInput,
    Cancelled,
    NotFound,
    Transient,
    Internal,
}

impl FediError {
    /// Whether this error is a request cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FediError::SearchError(SearchError::Cancelled))
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            FediError::SearchError(SearchError::EmptyQuery)
            | FediError::InvalidMention { .. }
            | FediError::InvalidUri { .. } => ErrorClass::ClientInput,
            FediError::SearchError(SearchError::Cancelled) => ErrorClass::Cancelled,
            FediError::FetchError(FetchError::NotFound { .. }) => ErrorClass::NotFound,
            FediError::FetchError(_) => ErrorClass::Transient,
            FediError::StoreError(_)
            | FediError::ConversionError { .. }
            | FediError::ConfigError(_)
            | FediError::SerializationError(_) => ErrorClass::Internal,
        }
    }

    /// HTTP status code the API layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self.class() {
            ErrorClass::ClientInput => 400,
            ErrorClass::NotFound => 404,
            ErrorClass::Cancelled => 499,
            ErrorClass::Transient => 502,
            ErrorClass::Internal => 500,
        }
    }
}
