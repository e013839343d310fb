use async_trait::async_trait;

use crate::errors::FediResult;
use crate::models::{Account, Status};

/// Durable storage of accounts, statuses, and relationships.
///
/// Lookups return `Ok(None)` when no row matches; `Err` is reserved for
/// genuine backend failures.
#[async_trait]
pub trait ILocalStore: Send + Sync {
    // --- Accounts ---
    async fn get_account_by_id(&self, id: &str) -> FediResult<Option<Account>>;
    async fn get_account_by_uri(&self, uri: &str) -> FediResult<Option<Account>>;
    async fn get_account_by_url(&self, url: &str) -> FediResult<Option<Account>>;
    async fn get_local_account_by_username(&self, username: &str) -> FediResult<Option<Account>>;
    async fn get_account_by_username_domain(
        &self,
        username: &str,
        domain: &str,
    ) -> FediResult<Option<Account>>;

    // --- Statuses ---
    async fn get_status_by_id(&self, id: &str) -> FediResult<Option<Status>>;
    async fn get_status_by_uri(&self, uri: &str) -> FediResult<Option<Status>>;
    async fn get_status_by_url(&self, url: &str) -> FediResult<Option<Status>>;

    // --- Relationships ---

    /// Whether `requester_id` blocks `target_id`, or, when `bidirectional`,
    /// either blocks the other.
    async fn is_blocked(
        &self,
        requester_id: &str,
        target_id: &str,
        bidirectional: bool,
    ) -> FediResult<bool>;

    /// Audience check for a status, accounting for follows, mutes, and blocks.
    async fn status_visible(&self, status: &Status, requester: &Account) -> FediResult<bool>;
}
