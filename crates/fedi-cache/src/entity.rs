use fedi_core::{Account, Status};

/// A secondary key an entity can be found under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndexKey {
    Uri(String),
    Url(String),
    /// `domain` is empty for local accounts.
    Handle { username: String, domain: String },
}

impl IndexKey {
    pub fn handle(username: &str, domain: &str) -> Self {
        Self::Handle {
            username: username.to_string(),
            domain: domain.to_ascii_lowercase(),
        }
    }

    /// Empty keys are never indexed and never match.
    pub fn is_empty(&self) -> bool {
        match self {
            IndexKey::Uri(uri) => uri.is_empty(),
            IndexKey::Url(url) => url.is_empty(),
            IndexKey::Handle { username, .. } => username.is_empty(),
        }
    }
}

/// An entity that can live in an [`EntityCache`](crate::EntityCache).
pub trait CacheEntity: Clone + Send + Sync {
    /// Primary key. Entities with an empty id are not cached.
    fn cache_id(&self) -> &str;

    /// Secondary keys, possibly empty.
    fn index_keys(&self) -> Vec<IndexKey>;
}

impl CacheEntity for Account {
    fn cache_id(&self) -> &str {
        &self.id
    }

    fn index_keys(&self) -> Vec<IndexKey> {
        vec![
            IndexKey::Uri(self.uri.clone()),
            IndexKey::Url(self.url.clone()),
            IndexKey::handle(&self.username, self.domain.as_deref().unwrap_or_default()),
        ]
    }
}

impl CacheEntity for Status {
    fn cache_id(&self) -> &str {
        &self.id
    }

    fn index_keys(&self) -> Vec<IndexKey> {
        vec![IndexKey::Uri(self.uri.clone()), IndexKey::Url(self.url.clone())]
    }
}
