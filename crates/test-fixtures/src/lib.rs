//! Test fixtures for the fedi workspace.
//!
//! Provides the JSON account/status/block datasets, typed loaders for them,
//! and in-process doubles for the external collaborators: a durable store,
//! a remote fetcher, and an API converter.

mod converter;
mod fetcher;
mod store;

use std::collections::BTreeMap;
use std::path::PathBuf;

use fedi_core::config::InstanceConfig;
use fedi_core::{Account, FediConfig, Status};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub use converter::PlainConverter;
pub use fetcher::{FetchCall, MockFetcher};
pub use store::MemoryStore;

/// Host the fixture data treats as this server.
pub const LOCAL_HOST: &str = "localhost:8080";

/// A block relationship: `account_id` blocks `target_account_id`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Block {
    pub account_id: String,
    pub target_account_id: String,
}

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// All fixture accounts keyed by fixture name (`local_account_1`, ...).
pub fn accounts() -> BTreeMap<String, Account> {
    load_fixture("accounts.json")
}

/// All fixture statuses keyed by fixture name.
pub fn statuses() -> BTreeMap<String, Status> {
    load_fixture("statuses.json")
}

pub fn blocks() -> Vec<Block> {
    load_fixture("blocks.json")
}

/// A single fixture account.
///
/// # Panics
/// Panics if no account has that fixture name.
pub fn account(name: &str) -> Account {
    accounts()
        .remove(name)
        .unwrap_or_else(|| panic!("no fixture account named {name}"))
}

/// A single fixture status.
///
/// # Panics
/// Panics if no status has that fixture name.
pub fn status(name: &str) -> Status {
    statuses()
        .remove(name)
        .unwrap_or_else(|| panic!("no fixture status named {name}"))
}

/// Config whose instance host matches the fixture data.
pub fn test_config() -> FediConfig {
    FediConfig {
        instance: InstanceConfig::new(LOCAL_HOST, None),
        ..FediConfig::default()
    }
}
