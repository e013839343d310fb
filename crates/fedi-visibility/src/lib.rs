//! # fedi-visibility
//!
//! Filters resolved entities down to what a requester may see.

mod gate;

pub use gate::VisibilityGate;
