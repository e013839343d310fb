//! In-memory durable store double.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use fedi_core::errors::{FediResult, StoreError};
use fedi_core::traits::ILocalStore;
use fedi_core::{Account, Status, Visibility};

use crate::Block;

/// `ILocalStore` over plain vectors, with switches for injecting failures.
#[derive(Default)]
pub struct MemoryStore {
    accounts: Mutex<Vec<Account>>,
    statuses: Mutex<Vec<Status>>,
    blocks: Mutex<Vec<Block>>,
    follows: Mutex<Vec<(String, String)>>,
    fail_lookups: AtomicBool,
    fail_block_checks: AtomicBool,
    fail_visibility_for: Mutex<HashSet<String>>,
    lookups: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding every fixture account, status, and block.
    pub fn from_fixtures() -> Self {
        let store = Self::new();
        for account in crate::accounts().into_values() {
            store.insert_account(account);
        }
        for status in crate::statuses().into_values() {
            store.insert_status(status);
        }
        for block in crate::blocks() {
            store.block(&block.account_id, &block.target_account_id);
        }
        store
    }

    pub fn insert_account(&self, account: Account) {
        self.accounts.lock().unwrap().push(account);
    }

    pub fn insert_status(&self, status: Status) {
        self.statuses.lock().unwrap().push(status);
    }

    pub fn block(&self, account_id: &str, target_account_id: &str) {
        self.blocks.lock().unwrap().push(Block {
            account_id: account_id.to_string(),
            target_account_id: target_account_id.to_string(),
        });
    }

    pub fn follow(&self, account_id: &str, target_account_id: &str) {
        self.follows
            .lock()
            .unwrap()
            .push((account_id.to_string(), target_account_id.to_string()));
    }

    /// Make every account/status lookup fail with a backend error.
    pub fn fail_lookups(&self) {
        self.fail_lookups.store(true, Ordering::SeqCst);
    }

    pub fn fail_block_checks(&self) {
        self.fail_block_checks.store(true, Ordering::SeqCst);
    }

    /// Make the visibility predicate fail for one status.
    pub fn fail_visibility_for(&self, status_id: &str) {
        self.fail_visibility_for
            .lock()
            .unwrap()
            .insert(status_id.to_string());
    }

    /// Number of account/status lookups served so far.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn find_account(&self, pred: impl Fn(&Account) -> bool) -> FediResult<Option<Account>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(backend_error());
        }
        Ok(self.accounts.lock().unwrap().iter().find(|a| pred(a)).cloned())
    }

    fn find_status(&self, pred: impl Fn(&Status) -> bool) -> FediResult<Option<Status>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(backend_error());
        }
        Ok(self.statuses.lock().unwrap().iter().find(|s| pred(s)).cloned())
    }

    fn blocked(&self, a: &str, b: &str) -> bool {
        self.blocks
            .lock()
            .unwrap()
            .iter()
            .any(|block| block.account_id == a && block.target_account_id == b)
    }

    fn follows(&self, a: &str, b: &str) -> bool {
        self.follows
            .lock()
            .unwrap()
            .iter()
            .any(|(from, to)| from == a && to == b)
    }
}

fn backend_error() -> fedi_core::FediError {
    StoreError::Backend {
        message: "injected failure".into(),
    }
    .into()
}

#[async_trait]
impl ILocalStore for MemoryStore {
    async fn get_account_by_id(&self, id: &str) -> FediResult<Option<Account>> {
        self.find_account(|a| a.id == id)
    }

    async fn get_account_by_uri(&self, uri: &str) -> FediResult<Option<Account>> {
        self.find_account(|a| !a.uri.is_empty() && a.uri == uri)
    }

    async fn get_account_by_url(&self, url: &str) -> FediResult<Option<Account>> {
        self.find_account(|a| !a.url.is_empty() && a.url == url)
    }

    async fn get_local_account_by_username(&self, username: &str) -> FediResult<Option<Account>> {
        self.find_account(|a| a.is_local() && a.username == username)
    }

    async fn get_account_by_username_domain(
        &self,
        username: &str,
        domain: &str,
    ) -> FediResult<Option<Account>> {
        self.find_account(|a| {
            a.username == username
                && a.domain
                    .as_deref()
                    .is_some_and(|d| d.eq_ignore_ascii_case(domain))
        })
    }

    async fn get_status_by_id(&self, id: &str) -> FediResult<Option<Status>> {
        self.find_status(|s| s.id == id)
    }

    async fn get_status_by_uri(&self, uri: &str) -> FediResult<Option<Status>> {
        self.find_status(|s| !s.uri.is_empty() && s.uri == uri)
    }

    async fn get_status_by_url(&self, url: &str) -> FediResult<Option<Status>> {
        self.find_status(|s| !s.url.is_empty() && s.url == url)
    }

    async fn is_blocked(
        &self,
        requester_id: &str,
        target_id: &str,
        bidirectional: bool,
    ) -> FediResult<bool> {
        if self.fail_block_checks.load(Ordering::SeqCst) {
            return Err(backend_error());
        }
        Ok(self.blocked(requester_id, target_id)
            || (bidirectional && self.blocked(target_id, requester_id)))
    }

    async fn status_visible(&self, status: &Status, requester: &Account) -> FediResult<bool> {
        if self.fail_visibility_for.lock().unwrap().contains(&status.id) {
            return Err(backend_error());
        }
        if status.account_id == requester.id {
            return Ok(true);
        }
        if self.blocked(&requester.id, &status.account_id)
            || self.blocked(&status.account_id, &requester.id)
        {
            return Ok(false);
        }
        Ok(match status.visibility {
            Visibility::Public | Visibility::Unlocked => true,
            Visibility::FollowersOnly => self.follows(&requester.id, &status.account_id),
            Visibility::MutualsOnly => {
                self.follows(&requester.id, &status.account_id)
                    && self.follows(&status.account_id, &requester.id)
            }
            Visibility::Direct => false,
        })
    }
}
