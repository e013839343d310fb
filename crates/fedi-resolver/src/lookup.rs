//! Cache → store → remote lookups with write-through caching.

use std::future::Future;

use fedi_cache::{CacheEntity, EntityCache};
use fedi_core::errors::{FediError, FediResult};
use fedi_core::policy::{policy_for, ErrorPolicy, SubCall};
use fedi_core::traits::{FetchOptions, FetchTarget, ILocalStore, IRemoteFetcher};
use fedi_core::{Account, ResolutionOutcome, Status};
use fedi_observability::fetch_span;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument};
use url::Url;

use crate::cancel::{cancellable, timed};
use crate::engine::Resolver;

/// Remote lookups wait for the entity to be fully stored before returning.
const FETCH_OPTIONS: FetchOptions = FetchOptions {
    blocking: true,
    skip_resolve: false,
};

impl<S, F> Resolver<S, F>
where
    S: ILocalStore,
    F: IRemoteFetcher,
{
    /// Serve from `cached` if present, otherwise from the store via `lookup`.
    pub(crate) async fn local<T, Fut>(
        &self,
        cache: &EntityCache<T>,
        cached: Option<T>,
        target: &str,
        lookup: Fut,
        cancel: &CancellationToken,
    ) -> FediResult<ResolutionOutcome<T>>
    where
        T: CacheEntity,
        Fut: Future<Output = FediResult<Option<T>>>,
    {
        if let Some(entity) = cached {
            self.metrics.record_cache_hit();
            return Ok(ResolutionOutcome::FoundLocal(entity));
        }
        match cancellable(cancel, lookup).await {
            Ok(Some(entity)) => {
                self.metrics.record_store_hit();
                cache.put(&entity);
                Ok(ResolutionOutcome::FoundLocal(entity))
            }
            Ok(None) => Ok(ResolutionOutcome::NotFound),
            Err(err) => absorb(SubCall::LocalLookup, target, err),
        }
    }

    /// Dereference an account, unless a concurrent fetch already cached it.
    pub(crate) async fn remote_account(
        &self,
        requester: &Account,
        target: FetchTarget,
        recheck: impl Fn() -> Option<Account>,
        cancel: &CancellationToken,
    ) -> FediResult<ResolutionOutcome<Account>> {
        let name = target.to_string();
        let _permit = cancellable(cancel, async {
            Ok(self.flights.acquire(&format!("account:{name}")).await)
        })
        .await?;
        if let Some(account) = recheck() {
            debug!(object = %name, "account cached by a concurrent fetch");
            self.metrics.record_cache_hit();
            return Ok(ResolutionOutcome::FoundLocal(account));
        }

        let fetch = timed(
            self.config.fetch_timeout(),
            &name,
            self.fetcher
                .fetch_account(&requester.username, &target, FETCH_OPTIONS),
        );
        match cancellable(cancel, fetch)
            .instrument(fetch_span!("account", name))
            .await
        {
            Ok(account) => {
                self.metrics.record_remote_fetch();
                self.accounts.put(&account);
                Ok(ResolutionOutcome::FoundRemote(account))
            }
            Err(err) => {
                if !err.is_cancelled() {
                    self.metrics.record_remote_failure();
                }
                absorb(SubCall::RemoteFetch, &name, err)
            }
        }
    }

    /// Dereference a status and back-fill its thread.
    pub(crate) async fn remote_status(
        &self,
        requester: &Account,
        query: &str,
        uri: &Url,
        cancel: &CancellationToken,
    ) -> FediResult<ResolutionOutcome<Status>> {
        let permit = cancellable(cancel, async {
            Ok(self.flights.acquire(&format!("status:{uri}")).await)
        })
        .await?;
        let cached = self
            .statuses
            .get_by_uri(query)
            .or_else(|| self.statuses.get_by_url(query));
        if let Some(status) = cached {
            debug!(%uri, "status cached by a concurrent fetch");
            self.metrics.record_cache_hit();
            return Ok(ResolutionOutcome::FoundLocal(status));
        }

        let fetch = timed(
            self.config.fetch_timeout(),
            uri.as_str(),
            self.fetcher
                .fetch_status(&requester.username, uri, FETCH_OPTIONS),
        );
        let status = match cancellable(cancel, fetch)
            .instrument(fetch_span!("status", uri))
            .await
        {
            Ok(status) => status,
            Err(err) => {
                if !err.is_cancelled() {
                    self.metrics.record_remote_failure();
                }
                return absorb(SubCall::RemoteFetch, uri.as_str(), err);
            }
        };
        self.metrics.record_remote_fetch();
        self.statuses.put(&status);
        // Waiters can be served from the cache now; the back-fill runs unguarded.
        drop(permit);

        self.backfill_thread(requester, uri, cancel).await;
        Ok(ResolutionOutcome::FoundRemote(status))
    }
}

/// Apply the policy table to a failed lookup or fetch.
fn absorb<T>(call: SubCall, target: &str, err: FediError) -> FediResult<ResolutionOutcome<T>> {
    match policy_for(call, &err) {
        ErrorPolicy::Propagate => Err(err),
        ErrorPolicy::LogAsNotFound | ErrorPolicy::LogAndContinue => {
            warn!(call = call.as_str(), object = target, error = %err, "lookup failed, treating as not found");
            Ok(ResolutionOutcome::Error {
                reason: err.to_string(),
            })
        }
    }
}
