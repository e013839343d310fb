//! Resolver: orchestrates the ordered strategies over cache, store, and fetcher.

use std::sync::Arc;

use fedi_cache::{AccountCache, StatusCache};
use fedi_core::config::{InstanceConfig, ResolverConfig};
use fedi_core::errors::{FediResult, SearchError};
use fedi_core::traits::{FetchTarget, ILocalStore, IRemoteFetcher};
use fedi_core::{Account, FediConfig, Mention};
use fedi_observability::{resolve_span, ResolutionMetrics};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, Instrument};

use crate::flight::FlightGuard;
use crate::query;
use crate::strategy::{Resolution, Strategy};

/// Resolves search queries to accounts and statuses.
pub struct Resolver<S, F> {
    pub(crate) store: Arc<S>,
    pub(crate) fetcher: Arc<F>,
    pub(crate) accounts: Arc<AccountCache>,
    pub(crate) statuses: Arc<StatusCache>,
    pub(crate) instance: InstanceConfig,
    pub(crate) config: ResolverConfig,
    pub(crate) flights: FlightGuard,
    pub(crate) metrics: Arc<ResolutionMetrics>,
}

impl<S, F> Resolver<S, F>
where
    S: ILocalStore,
    F: IRemoteFetcher,
{
    pub fn new(store: Arc<S>, fetcher: Arc<F>, config: &FediConfig) -> Self {
        Self {
            store,
            fetcher,
            accounts: Arc::new(AccountCache::with_capacity(config.cache.account_capacity)),
            statuses: Arc::new(StatusCache::with_capacity(config.cache.status_capacity)),
            instance: config.instance.clone(),
            config: config.resolver.clone(),
            flights: FlightGuard::new(config.resolver.single_flight),
            metrics: Arc::new(ResolutionMetrics::new()),
        }
    }

    /// Share caches with other resolvers or processors.
    pub fn with_caches(mut self, accounts: Arc<AccountCache>, statuses: Arc<StatusCache>) -> Self {
        self.accounts = accounts;
        self.statuses = statuses;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<ResolutionMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn account_cache(&self) -> &Arc<AccountCache> {
        &self.accounts
    }

    pub fn status_cache(&self) -> &Arc<StatusCache> {
        &self.statuses
    }

    pub fn metrics(&self) -> &Arc<ResolutionMetrics> {
        &self.metrics
    }

    pub fn instance(&self) -> &InstanceConfig {
        &self.instance
    }

    /// Resolve an already-trimmed, non-empty `query` on behalf of `requester`.
    ///
    /// Strategies run in [`Strategy::ORDER`]; the first one that finds
    /// anything wins. Finding nothing is an empty [`Resolution`], not an
    /// error. The only error is cancellation before any strategy finished.
    pub async fn resolve(
        &self,
        requester: &Account,
        query: &str,
        resolve: bool,
        cancel: &CancellationToken,
    ) -> FediResult<Resolution> {
        for strategy in Strategy::ORDER {
            if cancel.is_cancelled() {
                return Err(SearchError::Cancelled.into());
            }
            let found = match strategy {
                Strategy::Mention => {
                    self.by_mention(requester, query, resolve, cancel)
                        .instrument(resolve_span!(strategy))
                        .await?
                }
                Strategy::Uri => {
                    self.by_uri(requester, query, resolve, cancel)
                        .instrument(resolve_span!(strategy))
                        .await?
                }
            };
            if let Some(resolution) = found {
                debug!(%strategy, remote = resolution.remote, "query resolved");
                return Ok(resolution);
            }
        }
        debug!(query, "query matched nothing");
        Ok(Resolution::empty())
    }

    async fn by_mention(
        &self,
        requester: &Account,
        query: &str,
        resolve: bool,
        cancel: &CancellationToken,
    ) -> FediResult<Option<Resolution>> {
        let mention = match Mention::from_query(query) {
            Ok(mention) => mention,
            Err(err) => {
                trace!(%err, "not a mention");
                return Ok(None);
            }
        };
        let target = mention.to_string();

        // Local accounts are only ever looked up locally.
        if !mention.has_domain() || self.instance.is_local_host(&mention.domain) {
            let outcome = self
                .local(
                    self.accounts.as_ref(),
                    self.accounts.get_by_handle(&mention.username, ""),
                    &target,
                    self.store.get_local_account_by_username(&mention.username),
                    cancel,
                )
                .await?;
            return Ok(Resolution::from_account(Strategy::Mention, outcome));
        }

        let mut outcome = self
            .local(
                self.accounts.as_ref(),
                self.accounts
                    .get_by_handle(&mention.username, &mention.domain),
                &target,
                self.store
                    .get_account_by_username_domain(&mention.username, &mention.domain),
                cancel,
            )
            .await?;

        if !outcome.is_found() && resolve {
            let fetch_target = FetchTarget::Handle {
                username: mention.username.clone(),
                domain: mention.domain.clone(),
            };
            outcome = self
                .remote_account(
                    requester,
                    fetch_target,
                    || {
                        self.accounts
                            .get_by_handle(&mention.username, &mention.domain)
                    },
                    cancel,
                )
                .await?;
        }
        Ok(Resolution::from_account(Strategy::Mention, outcome))
    }

    async fn by_uri(
        &self,
        requester: &Account,
        query: &str,
        resolve: bool,
        cancel: &CancellationToken,
    ) -> FediResult<Option<Resolution>> {
        let Some(uri) = query::dereferenceable_uri(query) else {
            trace!("not a dereferenceable uri");
            return Ok(None);
        };
        // Never dereference our own objects.
        let local = self.instance.is_local_host(&query::authority(&uri));
        let resolve = resolve && !local;

        // A status is tried first: by uri, by url, then remotely.
        let mut status = self
            .local(
                self.statuses.as_ref(),
                self.statuses.get_by_uri(query),
                query,
                self.store.get_status_by_uri(query),
                cancel,
            )
            .await?;
        if !status.is_found() {
            status = self
                .local(
                    self.statuses.as_ref(),
                    self.statuses.get_by_url(query),
                    query,
                    self.store.get_status_by_url(query),
                    cancel,
                )
                .await?;
        }
        if !status.is_found() && resolve {
            status = self.remote_status(requester, query, &uri, cancel).await?;
        }
        if let Some(resolution) = Resolution::from_status(Strategy::Uri, status) {
            return Ok(Some(resolution));
        }

        // Then an account: web url first, then ActivityPub uri, then remotely.
        let mut account = self
            .local(
                self.accounts.as_ref(),
                self.accounts.get_by_url(query),
                query,
                self.store.get_account_by_url(query),
                cancel,
            )
            .await?;
        if !account.is_found() {
            account = self
                .local(
                    self.accounts.as_ref(),
                    self.accounts.get_by_uri(query),
                    query,
                    self.store.get_account_by_uri(query),
                    cancel,
                )
                .await?;
        }
        if !account.is_found() && resolve {
            account = self
                .remote_account(
                    requester,
                    FetchTarget::Uri(uri),
                    || {
                        self.accounts
                            .get_by_uri(query)
                            .or_else(|| self.accounts.get_by_url(query))
                    },
                    cancel,
                )
                .await?;
        }
        Ok(Resolution::from_account(Strategy::Uri, account))
    }
}
