//! # fedi-core
//!
//! Foundation crate for federated entity resolution.
//! Defines the account/status models, the collaborator traits (durable
//! store, remote fetcher, API converter), errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod mention;
pub mod models;
pub mod policy;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FediConfig;
pub use errors::{ErrorClass, FediError, FediResult};
pub use mention::Mention;
pub use models::{Account, ResolutionOutcome, SearchQuery, SearchResult, Status, Visibility};
