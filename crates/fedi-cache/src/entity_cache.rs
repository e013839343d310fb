//! EntityCache: one lock over the primary map and every secondary index.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use fedi_core::Account;
use tracing::trace;

use crate::entity::{CacheEntity, IndexKey};

struct Entry<T> {
    value: T,
    /// Keys currently pointing at this entry, so a replacement can unhook them.
    keys: Vec<IndexKey>,
}

struct Inner<T> {
    entries: HashMap<String, Entry<T>>,
    index: HashMap<IndexKey, String>,
}

/// Unbounded multi-index cache.
///
/// `put` stores a clone and every `get_*` returns a fresh clone, so
/// mutating either side never leaks into the other.
pub struct EntityCache<T> {
    inner: RwLock<Inner<T>>,
}

impl<T: CacheEntity> EntityCache<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Pre-allocate room for `capacity` entities. The cache still grows past it.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner {
                entries: HashMap::with_capacity(capacity),
                index: HashMap::with_capacity(capacity * 2),
            }),
        }
    }

    /// Insert or replace `entity` under its id, re-indexing every non-empty
    /// secondary key. A key previously held by another entity moves to this one.
    pub fn put(&self, entity: &T) {
        let id = entity.cache_id();
        if id.is_empty() {
            trace!("refusing to cache entity without id");
            return;
        }
        let keys: Vec<IndexKey> = entity
            .index_keys()
            .into_iter()
            .filter(|key| !key.is_empty())
            .collect();
        let value = entity.clone();

        let mut inner = self.write();

        if let Some(previous) = inner.entries.remove(id) {
            for key in previous.keys {
                if inner.index.get(&key).is_some_and(|owner| owner == id) {
                    inner.index.remove(&key);
                }
            }
        }

        for key in &keys {
            if let Some(owner) = inner.index.insert(key.clone(), id.to_string()) {
                if owner != id {
                    if let Some(displaced) = inner.entries.get_mut(&owner) {
                        displaced.keys.retain(|k| k != key);
                    }
                }
            }
        }

        trace!(id, keys = keys.len(), "cache put");
        inner.entries.insert(id.to_string(), Entry { value, keys });
    }

    pub fn get_by_id(&self, id: &str) -> Option<T> {
        if id.is_empty() {
            return None;
        }
        self.read().entries.get(id).map(|entry| entry.value.clone())
    }

    pub fn get_by_uri(&self, uri: &str) -> Option<T> {
        self.get_by_key(&IndexKey::Uri(uri.to_string()))
    }

    pub fn get_by_url(&self, url: &str) -> Option<T> {
        self.get_by_key(&IndexKey::Url(url.to_string()))
    }

    /// Look up by any secondary key. Empty keys always miss.
    pub fn get_by_key(&self, key: &IndexKey) -> Option<T> {
        if key.is_empty() {
            return None;
        }
        let inner = self.read();
        let id = inner.index.get(key)?;
        inner.entries.get(id).map(|entry| entry.value.clone())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.read().entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // No user code runs while the write lock is held, so poisoning is recovered.
    fn read(&self) -> RwLockReadGuard<'_, Inner<T>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner<T>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: CacheEntity> Default for EntityCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityCache<Account> {
    /// Look up an account by handle. Pass an empty `domain` for local accounts.
    pub fn get_by_handle(&self, username: &str, domain: &str) -> Option<Account> {
        self.get_by_key(&IndexKey::handle(username, domain))
    }
}
