//! # fedi-cache
//!
//! In-memory caches for frequently accessed accounts and statuses.
//!
//! Every cache is an [`EntityCache`]: a primary map keyed by id plus one
//! index per secondary key (uri, url, and for accounts the handle), all
//! guarded by a single lock so a `put` is never observed half-applied.
//! Entities are cloned on the way in and on the way out; callers and the
//! cache never share mutable state.

mod entity;
mod entity_cache;

pub use entity::{CacheEntity, IndexKey};
pub use entity_cache::EntityCache;

use fedi_core::{Account, Status};

/// Cache of accounts, indexed by id, uri, url, and `username@domain`.
pub type AccountCache = EntityCache<Account>;

/// Cache of statuses, indexed by id, uri, and url.
pub type StatusCache = EntityCache<Status>;
