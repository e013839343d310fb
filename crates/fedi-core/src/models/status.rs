use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audience of a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    Unlocked,
    FollowersOnly,
    MutualsOnly,
    Direct,
}

/// A post known to this server, local or remote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub id: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
    pub account_id: String,
    #[serde(default)]
    pub account_uri: String,
    #[serde(default)]
    pub in_reply_to_id: Option<String>,
    #[serde(default)]
    pub in_reply_to_uri: Option<String>,
    pub visibility: Visibility,
    #[serde(default)]
    pub local: Option<bool>,
    #[serde(default)]
    pub sensitive: Option<bool>,
    /// Pinned to the author's profile.
    #[serde(default)]
    pub pinned: Option<bool>,
    pub created_at: DateTime<Utc>,
}

impl Status {
    pub fn is_reply(&self) -> bool {
        self.in_reply_to_id.is_some() || self.in_reply_to_uri.is_some()
    }
}
