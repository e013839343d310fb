//! # fedi-resolver
//!
//! Turns a search query into accounts and statuses.
//!
//! The [`Resolver`] tries each [`Strategy`] in order (mention, then URI) and
//! stops at the first one that finds something. Every lookup goes cache,
//! then durable store, then (when allowed) the remote fetcher, and every hit
//! is written back into the cache. Remote statuses trigger a bounded thread
//! back-fill. All collaborator calls race the caller's cancellation token.

mod backfill;
pub mod cancel;
mod engine;
mod flight;
mod lookup;
pub mod query;
mod strategy;

pub use engine::Resolver;
pub use flight::{FlightGuard, FlightPermit};
pub use strategy::{Resolution, Strategy};
