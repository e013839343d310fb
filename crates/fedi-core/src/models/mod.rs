mod account;
pub mod api;
mod outcome;
mod status;

pub use account::Account;
pub use api::{PublicAccount, PublicStatus, PublicTag, SearchQuery, SearchResult};
pub use outcome::ResolutionOutcome;
pub use status::{Status, Visibility};
