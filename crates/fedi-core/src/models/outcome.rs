/// Result of resolving a single entity, recording whether the network was touched.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome<T> {
    /// Served from the cache or the durable store.
    FoundLocal(T),
    /// Dereferenced from a remote server.
    FoundRemote(T),
    NotFound,
    /// A lookup failed; callers treat this as not found once logged.
    Error { reason: String },
}

impl<T> ResolutionOutcome<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::FoundLocal(_) | Self::FoundRemote(_))
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Self::FoundRemote(_))
    }

    /// The found entity, if any. `Error` collapses to `None`.
    pub fn found(self) -> Option<T> {
        match self {
            Self::FoundLocal(entity) | Self::FoundRemote(entity) => Some(entity),
            Self::NotFound | Self::Error { .. } => None,
        }
    }
}
