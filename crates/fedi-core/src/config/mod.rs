mod cache_config;
pub mod defaults;
mod instance_config;
mod observability_config;
mod resolver_config;

pub use cache_config::CacheConfig;
pub use instance_config::InstanceConfig;
pub use observability_config::ObservabilityConfig;
pub use resolver_config::ResolverConfig;

use serde::{Deserialize, Serialize};

use crate::errors::{FediError, FediResult};

/// Top-level configuration aggregating every subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FediConfig {
    pub instance: InstanceConfig,
    pub cache: CacheConfig,
    pub resolver: ResolverConfig,
    pub observability: ObservabilityConfig,
}

impl FediConfig {
    /// Parse a TOML document. Missing sections and fields fall back to defaults.
    pub fn from_toml(toml_str: &str) -> FediResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| FediError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FediResult<()> {
        if self.instance.host.trim().is_empty() {
            return Err(FediError::ConfigError("instance.host must not be empty".into()));
        }
        if self.resolver.fetch_timeout_ms == 0 {
            return Err(FediError::ConfigError(
                "resolver.fetch_timeout_ms must be greater than zero".into(),
            ));
        }
        if self.resolver.backfill_timeout_ms == 0 {
            return Err(FediError::ConfigError(
                "resolver.backfill_timeout_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
