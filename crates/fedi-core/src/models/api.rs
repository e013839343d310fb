//! Client-facing representations returned by the search endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::status::Visibility;

/// Parameters of a search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(rename = "q")]
    pub query: String,
    /// Permit dereferencing entities not yet known to this server.
    #[serde(default)]
    pub resolve: bool,
}

impl SearchQuery {
    pub fn new(query: impl Into<String>, resolve: bool) -> Self {
        Self {
            query: query.into(),
            resolve,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicAccount {
    pub id: String,
    pub username: String,
    pub acct: String,
    pub display_name: String,
    pub note: String,
    pub url: String,
    pub locked: bool,
    pub bot: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicStatus {
    pub id: String,
    pub uri: String,
    pub url: String,
    pub content: String,
    pub visibility: Visibility,
    pub sensitive: bool,
    pub pinned: bool,
    pub in_reply_to_id: Option<String>,
    pub account_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTag {
    pub name: String,
    pub url: String,
}

/// Search response envelope. `hashtags` is filled by full-text search, which
/// lives outside this workspace, so it is always empty here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub accounts: Vec<PublicAccount>,
    pub statuses: Vec<PublicStatus>,
    pub hashtags: Vec<PublicTag>,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty() && self.statuses.is_empty() && self.hashtags.is_empty()
    }
}
