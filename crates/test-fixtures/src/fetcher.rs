//! Scripted remote fetcher double that records every call.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use fedi_core::errors::{FediResult, FetchError};
use fedi_core::traits::{FetchOptions, FetchTarget, IRemoteFetcher};
use fedi_core::{Account, Status};
use url::Url;

/// A call observed by [`MockFetcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCall {
    Account {
        requesting_username: String,
        target: FetchTarget,
        options: FetchOptions,
    },
    Status {
        requesting_username: String,
        uri: String,
    },
    Thread {
        requesting_username: String,
        uri: String,
    },
}

/// `IRemoteFetcher` serving pre-registered "remote" entities.
#[derive(Default)]
pub struct MockFetcher {
    accounts: Mutex<Vec<Account>>,
    statuses: Mutex<Vec<Status>>,
    calls: Mutex<Vec<FetchCall>>,
    fail_transport: AtomicBool,
    fail_threads: AtomicBool,
    delay: Mutex<Option<Duration>>,
    thread_delay: Mutex<Option<Duration>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `account` dereferenceable by uri, url, or handle.
    pub fn serve_account(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    /// Make `status` dereferenceable by uri or url.
    pub fn serve_status(&self, status: Status) {
        self.statuses.lock().unwrap().push(status);
    }

    /// Fail every account/status fetch with a transport error.
    pub fn fail_transport(&self) {
        self.fail_transport.store(true, Ordering::SeqCst);
    }

    pub fn fail_threads(&self) {
        self.fail_threads.store(true, Ordering::SeqCst);
    }

    /// Sleep this long inside every call before answering.
    pub fn delay_by(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    /// Sleep this long inside thread fetches, overriding [`delay_by`](Self::delay_by).
    pub fn delay_threads_by(&self, delay: Duration) {
        *self.thread_delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn thread_calls(&self) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| matches!(call, FetchCall::Thread { .. }))
            .count()
    }

    async fn answer(&self, call: FetchCall) {
        let thread_delay = match call {
            FetchCall::Thread { .. } => *self.thread_delay.lock().unwrap(),
            _ => None,
        };
        self.calls.lock().unwrap().push(call);
        let delay = thread_delay.or(*self.delay.lock().unwrap());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn transport_error(&self, target: &str) -> Option<FetchError> {
        self.fail_transport
            .load(Ordering::SeqCst)
            .then(|| FetchError::Transport {
                target: target.to_string(),
                reason: "connection refused".into(),
            })
    }
}

#[async_trait]
impl IRemoteFetcher for MockFetcher {
    async fn fetch_account(
        &self,
        requesting_username: &str,
        target: &FetchTarget,
        options: FetchOptions,
    ) -> FediResult<Account> {
        self.answer(FetchCall::Account {
            requesting_username: requesting_username.to_string(),
            target: target.clone(),
            options,
        })
        .await;

        let name = target.to_string();
        if let Some(err) = self.transport_error(&name) {
            return Err(err.into());
        }
        if options.skip_resolve {
            return Err(FetchError::NotFound { target: name }.into());
        }

        let accounts = self.accounts.lock().unwrap();
        let found = accounts.iter().find(|account| match target {
            FetchTarget::Uri(uri) => account.uri == uri.as_str() || account.url == uri.as_str(),
            FetchTarget::Handle { username, domain } => {
                account.username == *username
                    && account
                        .domain
                        .as_deref()
                        .is_some_and(|d| d.eq_ignore_ascii_case(domain))
            }
        });
        found
            .cloned()
            .ok_or_else(|| FetchError::NotFound { target: name }.into())
    }

    async fn fetch_status(
        &self,
        requesting_username: &str,
        uri: &Url,
        options: FetchOptions,
    ) -> FediResult<Status> {
        self.answer(FetchCall::Status {
            requesting_username: requesting_username.to_string(),
            uri: uri.to_string(),
        })
        .await;

        if let Some(err) = self.transport_error(uri.as_str()) {
            return Err(err.into());
        }
        if options.skip_resolve {
            return Err(FetchError::NotFound {
                target: uri.to_string(),
            }
            .into());
        }

        let statuses = self.statuses.lock().unwrap();
        let found = statuses
            .iter()
            .find(|status| status.uri == uri.as_str() || status.url == uri.as_str());
        found.cloned().ok_or_else(|| {
            FetchError::NotFound {
                target: uri.to_string(),
            }
            .into()
        })
    }

    async fn fetch_thread(&self, requesting_username: &str, uri: &Url) -> FediResult<()> {
        self.answer(FetchCall::Thread {
            requesting_username: requesting_username.to_string(),
            uri: uri.to_string(),
        })
        .await;

        if self.fail_threads.load(Ordering::SeqCst) {
            return Err(FetchError::Transport {
                target: uri.to_string(),
                reason: "thread context unavailable".into(),
            }
            .into());
        }
        Ok(())
    }
}
