//! # fedi-search
//!
//! The search endpoint's processor. Validates the query, resolves it,
//! drops whatever the requester may not see, and converts the rest into
//! API representations.

mod processor;

pub use processor::SearchProcessor;
