use std::fmt;

use async_trait::async_trait;
use url::Url;

use crate::errors::FediResult;
use crate::models::{Account, Status};

/// What to dereference when fetching a remote account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget {
    /// An ActivityPub id or profile url.
    Uri(Url),
    /// A `username@domain` handle, resolved through webfinger.
    Handle { username: String, domain: String },
}

impl fmt::Display for FetchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchTarget::Uri(uri) => write!(f, "{uri}"),
            FetchTarget::Handle { username, domain } => write!(f, "@{username}@{domain}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Wait for dependent objects (avatars, pinned posts) before returning.
    pub blocking: bool,
    /// Only consult what is already known; never touch the network.
    pub skip_resolve: bool,
}

/// Signed retrieval of remote ActivityPub objects.
///
/// Implementations persist what they fetch; the resolver only caches it.
#[async_trait]
pub trait IRemoteFetcher: Send + Sync {
    async fn fetch_account(
        &self,
        requesting_username: &str,
        target: &FetchTarget,
        options: FetchOptions,
    ) -> FediResult<Account>;

    async fn fetch_status(
        &self,
        requesting_username: &str,
        uri: &Url,
        options: FetchOptions,
    ) -> FediResult<Status>;

    /// Fetch ancestors and descendants of the status at `uri`.
    async fn fetch_thread(&self, requesting_username: &str, uri: &Url) -> FediResult<()>;
}
