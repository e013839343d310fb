//! Thread back-fill after a remote status is dereferenced.

use fedi_core::policy::{policy_for, ErrorPolicy, SubCall};
use fedi_core::traits::{ILocalStore, IRemoteFetcher};
use fedi_core::Account;
use fedi_observability::backfill_span;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn, Instrument};
use url::Url;

use crate::cancel::{cancellable, timed};
use crate::engine::Resolver;

impl<S, F> Resolver<S, F>
where
    S: ILocalStore,
    F: IRemoteFetcher,
{
    /// Fetch ancestors and replies of the status at `uri`.
    ///
    /// Never fails: errors and cancellation are logged and the status that
    /// triggered the back-fill is still returned by the caller.
    pub(crate) async fn backfill_thread(
        &self,
        requester: &Account,
        uri: &Url,
        cancel: &CancellationToken,
    ) {
        if !self.config.thread_backfill {
            return;
        }
        let fetch = timed(
            self.config.backfill_timeout(),
            uri.as_str(),
            self.fetcher.fetch_thread(&requester.username, uri),
        );
        let result = cancellable(cancel, fetch)
            .instrument(backfill_span!(uri))
            .await;

        let Err(err) = result else {
            debug!(%uri, "thread back-filled");
            return;
        };
        if err.is_cancelled() {
            debug!(%uri, "thread back-fill abandoned");
            return;
        }
        self.metrics.record_backfill_failure();
        if policy_for(SubCall::ThreadBackfill, &err) == ErrorPolicy::LogAndContinue {
            warn!(%uri, error = %err, "thread back-fill failed");
        }
    }
}
