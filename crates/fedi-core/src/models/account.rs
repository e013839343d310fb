use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An account known to this server, local or remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Locally unique primary key.
    pub id: String,
    pub username: String,
    /// Home domain of a remote account. `None` for local accounts.
    #[serde(default)]
    pub domain: Option<String>,
    /// ActivityPub id, e.g. `https://example.org/users/alice`.
    #[serde(default)]
    pub uri: String,
    /// Web-facing profile url, e.g. `https://example.org/@alice`.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub locked: Option<bool>,
    #[serde(default)]
    pub bot: Option<bool>,
    #[serde(default)]
    pub discoverable: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn is_local(&self) -> bool {
        self.domain.as_deref().map_or(true, str::is_empty)
    }

    /// `username` for local accounts, `username@domain` for remote ones.
    pub fn acct(&self) -> String {
        match self.domain.as_deref() {
            Some(domain) if !domain.is_empty() => format!("{}@{}", self.username, domain),
            _ => self.username.clone(),
        }
    }
}
