//! SearchProcessor: validate → resolve → gate → convert.

use std::sync::Arc;

use fedi_cache::{AccountCache, StatusCache};
use fedi_core::errors::{FediError, FediResult, SearchError};
use fedi_core::models::{PublicAccount, PublicStatus};
use fedi_core::policy::{policy_for, ErrorPolicy, SubCall};
use fedi_core::traits::{ILocalStore, IRemoteFetcher, ITypeConverter};
use fedi_core::{Account, FediConfig, SearchQuery, SearchResult, Status};
use fedi_observability::{search_span, ResolutionMetrics};
use fedi_resolver::cancel::cancellable;
use fedi_resolver::Resolver;
use fedi_visibility::VisibilityGate;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

/// Answers search requests for one server.
pub struct SearchProcessor<S, F, C> {
    resolver: Resolver<S, F>,
    gate: VisibilityGate<S>,
    converter: Arc<C>,
}

impl<S, F, C> SearchProcessor<S, F, C>
where
    S: ILocalStore,
    F: IRemoteFetcher,
    C: ITypeConverter,
{
    pub fn new(store: Arc<S>, fetcher: Arc<F>, converter: Arc<C>, config: &FediConfig) -> Self {
        Self {
            gate: VisibilityGate::new(Arc::clone(&store)),
            resolver: Resolver::new(store, fetcher, config),
            converter,
        }
    }

    /// Share entity caches with the rest of the server.
    pub fn with_caches(
        mut self,
        accounts: Arc<AccountCache>,
        statuses: Arc<StatusCache>,
    ) -> Self {
        self.resolver = self.resolver.with_caches(accounts, statuses);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ResolutionMetrics>) -> Self {
        self.resolver = self.resolver.with_metrics(metrics);
        self
    }

    pub fn resolver(&self) -> &Resolver<S, F> {
        &self.resolver
    }

    pub fn metrics(&self) -> &Arc<ResolutionMetrics> {
        self.resolver.metrics()
    }

    /// Search for accounts and statuses matching `query` on behalf of `requester`.
    ///
    /// # Errors
    /// [`SearchError::EmptyQuery`] when the query is blank, and
    /// [`SearchError::Cancelled`] when `cancel` fires before anything was
    /// resolved. Once resolution finished, cancellation returns whatever
    /// had been filtered and converted so far.
    pub async fn search(
        &self,
        requester: &Account,
        query: &SearchQuery,
        cancel: &CancellationToken,
    ) -> FediResult<SearchResult> {
        let trimmed = query.query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::EmptyQuery.into());
        }

        async {
            self.metrics().record_search();
            let resolution = self
                .resolver
                .resolve(requester, trimmed, query.resolve, cancel)
                .await
                .inspect_err(|err| {
                    if err.is_cancelled() {
                        self.metrics().record_cancelled();
                    }
                })?;

            let mut result = SearchResult::default();
            let mut dropped = 0;
            let mut cancelled = false;

            for account in &resolution.accounts {
                match cancellable(cancel, async {
                    Ok(self.present_account(requester, account).await)
                })
                .await
                {
                    Ok(Some(public)) => result.accounts.push(public),
                    Ok(None) => dropped += 1,
                    Err(_) => {
                        cancelled = true;
                        break;
                    }
                }
            }
            if !cancelled {
                for status in &resolution.statuses {
                    match cancellable(cancel, async {
                        Ok(self.present_status(requester, status).await)
                    })
                    .await
                    {
                        Ok(Some(public)) => result.statuses.push(public),
                        Ok(None) => dropped += 1,
                        Err(_) => {
                            cancelled = true;
                            break;
                        }
                    }
                }
            }

            self.metrics().record_filtered(dropped);
            if cancelled {
                self.metrics().record_cancelled();
                info!(
                    accounts = result.accounts.len(),
                    statuses = result.statuses.len(),
                    "search cancelled, returning partial result"
                );
            } else {
                debug!(
                    accounts = result.accounts.len(),
                    statuses = result.statuses.len(),
                    dropped,
                    "search complete"
                );
            }
            Ok::<_, FediError>(result)
        }
        .instrument(search_span!(trimmed, query.resolve))
        .await
    }

    async fn present_account(
        &self,
        requester: &Account,
        account: &Account,
    ) -> Option<PublicAccount> {
        if !self.gate.account_visible(requester, account).await {
            return None;
        }
        match self.converter.account_to_public(account).await {
            Ok(public) => Some(public),
            Err(err) => conversion_failed(&account.id, &err),
        }
    }

    async fn present_status(
        &self,
        requester: &Account,
        status: &Status,
    ) -> Option<PublicStatus> {
        if !self.gate.status_visible(requester, status).await {
            return None;
        }
        match self.converter.status_to_public(status, requester).await {
            Ok(public) => Some(public),
            Err(err) => conversion_failed(&status.id, &err),
        }
    }
}

fn conversion_failed<T>(entity_id: &str, err: &FediError) -> Option<T> {
    if policy_for(SubCall::ApiConversion, err) != ErrorPolicy::Propagate {
        warn!(entity = entity_id, error = %err, "api conversion failed, dropping entity");
    }
    None
}
