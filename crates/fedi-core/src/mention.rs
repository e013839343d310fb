//! Mention namestrings: `@username` or `@username@domain`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::constants::MENTION_PREFIX;
use crate::errors::{FediError, FediResult};

static MENTION_NAMESTRING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^@([a-zA-Z0-9_]+)(?:@([a-zA-Z0-9_\-\.:]+))?$").ok());

/// A parsed mention. `domain` is empty for a bare `@username`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub username: String,
    pub domain: String,
}

impl Mention {
    /// Parse a namestring that already carries its leading `@`.
    pub fn parse(namestring: &str) -> FediResult<Self> {
        let invalid = || FediError::InvalidMention {
            namestring: namestring.to_string(),
        };
        let regex = MENTION_NAMESTRING.as_ref().ok_or_else(invalid)?;
        let captures = regex.captures(namestring).ok_or_else(invalid)?;

        let username = captures
            .get(1)
            .map(|m| m.as_str().to_string())
            .ok_or_else(invalid)?;
        let domain = captures
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Ok(Self { username, domain })
    }

    /// Parse a free-form search query as a mention, prepending `@` if absent.
    pub fn from_query(query: &str) -> FediResult<Self> {
        if query.starts_with(MENTION_PREFIX) {
            Self::parse(query)
        } else {
            Self::parse(&format!("{MENTION_PREFIX}{query}"))
        }
    }

    pub fn has_domain(&self) -> bool {
        !self.domain.is_empty()
    }
}

impl fmt::Display for Mention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_domain() {
            write!(f, "@{}@{}", self.username, self.domain)
        } else {
            write!(f, "@{}", self.username)
        }
    }
}
