//! VisibilityGate: fail-closed block and audience checks.

use std::sync::Arc;

use fedi_core::errors::FediError;
use fedi_core::policy::{policy_for, ErrorPolicy, SubCall};
use fedi_core::traits::ILocalStore;
use fedi_core::{Account, Status};
use tracing::{debug, warn};

/// Decides which candidates a requester may see.
///
/// Any predicate error hides the candidate. Filtering preserves order.
pub struct VisibilityGate<S> {
    store: Arc<S>,
}

impl<S: ILocalStore> VisibilityGate<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Visible unless either side blocks the other.
    pub async fn account_visible(&self, requester: &Account, candidate: &Account) -> bool {
        match self.store.is_blocked(&requester.id, &candidate.id, true).await {
            Ok(blocked) => {
                if blocked {
                    debug!(account = %candidate.id, "account hidden by block");
                }
                !blocked
            }
            Err(err) => fail_closed(SubCall::BlockCheck, &candidate.id, &err),
        }
    }

    pub async fn status_visible(&self, requester: &Account, candidate: &Status) -> bool {
        match self.store.status_visible(candidate, requester).await {
            Ok(visible) => {
                if !visible {
                    debug!(status = %candidate.id, "status not visible to requester");
                }
                visible
            }
            Err(err) => fail_closed(SubCall::StatusVisibility, &candidate.id, &err),
        }
    }

    pub async fn filter_accounts(
        &self,
        requester: &Account,
        candidates: Vec<Account>,
    ) -> Vec<Account> {
        let mut visible = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if self.account_visible(requester, &candidate).await {
                visible.push(candidate);
            }
        }
        visible
    }

    pub async fn filter_statuses(
        &self,
        requester: &Account,
        candidates: Vec<Status>,
    ) -> Vec<Status> {
        let mut visible = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if self.status_visible(requester, &candidate).await {
                visible.push(candidate);
            }
        }
        visible
    }
}

fn fail_closed(call: SubCall, entity_id: &str, err: &FediError) -> bool {
    if policy_for(call, err) != ErrorPolicy::Propagate {
        warn!(
            call = call.as_str(),
            entity = entity_id,
            error = %err,
            "visibility check failed, hiding candidate"
        );
    }
    false
}
