//! Field-for-field API converter double.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use fedi_core::errors::{FediError, FediResult};
use fedi_core::models::{PublicAccount, PublicStatus};
use fedi_core::traits::ITypeConverter;
use fedi_core::{Account, Status};

#[derive(Default)]
pub struct PlainConverter {
    fail_for: Mutex<HashSet<String>>,
}

impl PlainConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make conversion of the entity with this id fail.
    pub fn fail_for(&self, entity_id: &str) {
        self.fail_for.lock().unwrap().insert(entity_id.to_string());
    }

    fn check(&self, entity_id: &str) -> FediResult<()> {
        if self.fail_for.lock().unwrap().contains(entity_id) {
            return Err(FediError::ConversionError {
                entity_id: entity_id.to_string(),
                reason: "injected failure".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ITypeConverter for PlainConverter {
    async fn account_to_public(&self, account: &Account) -> FediResult<PublicAccount> {
        self.check(&account.id)?;
        Ok(PublicAccount {
            id: account.id.clone(),
            username: account.username.clone(),
            acct: account.acct(),
            display_name: account.display_name.clone(),
            note: account.note.clone(),
            url: account.url.clone(),
            locked: account.locked.unwrap_or_default(),
            bot: account.bot.unwrap_or_default(),
            created_at: account.created_at,
        })
    }

    async fn status_to_public(
        &self,
        status: &Status,
        _requester: &Account,
    ) -> FediResult<PublicStatus> {
        self.check(&status.id)?;
        Ok(PublicStatus {
            id: status.id.clone(),
            uri: status.uri.clone(),
            url: status.url.clone(),
            content: status.content.clone(),
            visibility: status.visibility,
            sensitive: status.sensitive.unwrap_or_default(),
            pinned: status.pinned.unwrap_or_default(),
            in_reply_to_id: status.in_reply_to_id.clone(),
            account_id: status.account_id.clone(),
            created_at: status.created_at,
        })
    }
}
