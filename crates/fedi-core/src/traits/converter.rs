use async_trait::async_trait;

use crate::errors::FediResult;
use crate::models::{Account, PublicAccount, PublicStatus, Status};

/// Converts internal models into their client-facing representation.
#[async_trait]
pub trait ITypeConverter: Send + Sync {
    async fn account_to_public(&self, account: &Account) -> FediResult<PublicAccount>;

    async fn status_to_public(
        &self,
        status: &Status,
        requester: &Account,
    ) -> FediResult<PublicStatus>;
}
