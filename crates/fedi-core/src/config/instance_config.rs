use serde::{Deserialize, Serialize};

use super::defaults;

/// Identity of this server within the federation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Host this server is reachable at, optionally with a port.
    pub host: String,
    /// Domain used in account handles when it differs from `host`.
    pub account_domain: Option<String>,
}

impl InstanceConfig {
    pub fn new(host: impl Into<String>, account_domain: Option<String>) -> Self {
        Self {
            host: host.into(),
            account_domain,
        }
    }

    /// Whether `host` names this server, by host or by account domain.
    ///
    /// An empty host never matches; callers decide what an absent host means.
    pub fn is_local_host(&self, host: &str) -> bool {
        if host.is_empty() {
            return false;
        }
        host.eq_ignore_ascii_case(&self.host)
            || self
                .account_domain
                .as_deref()
                .is_some_and(|domain| host.eq_ignore_ascii_case(domain))
    }
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            host: defaults::DEFAULT_HOST.to_string(),
            account_domain: None,
        }
    }
}
