use std::fmt;

use fedi_core::{Account, ResolutionOutcome, Status};

/// A way of interpreting a query, tried in [`Strategy::ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `@user`, `user@domain`, or `@user@domain`.
    Mention,
    /// An `http`/`https` URI naming a status or an account.
    Uri,
}

impl Strategy {
    pub const ORDER: [Strategy; 2] = [Strategy::Mention, Strategy::Uri];

    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Mention => "mention",
            Strategy::Uri => "uri",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entities a query resolved to, before any visibility filtering.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// The strategy that produced this, `None` when nothing matched.
    pub strategy: Option<Strategy>,
    pub accounts: Vec<Account>,
    pub statuses: Vec<Status>,
    /// Whether anything had to be dereferenced from a remote server.
    pub remote: bool,
}

impl Resolution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.statuses.is_empty()
    }

    pub(crate) fn from_account(
        strategy: Strategy,
        outcome: ResolutionOutcome<Account>,
    ) -> Option<Self> {
        let remote = outcome.is_remote();
        outcome.found().map(|account| Self {
            strategy: Some(strategy),
            accounts: vec![account],
            statuses: Vec::new(),
            remote,
        })
    }

    pub(crate) fn from_status(
        strategy: Strategy,
        outcome: ResolutionOutcome<Status>,
    ) -> Option<Self> {
        let remote = outcome.is_remote();
        outcome.found().map(|status| Self {
            strategy: Some(strategy),
            accounts: Vec::new(),
            statuses: vec![status],
            remote,
        })
    }
}
