//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod duplicate_place;
pub mod generic_text;
pub mod self_reference;

// Re-export for convenience
pub use duplicate_place::DuplicatePlaceFilter;
pub use generic_text::GenericTextFilter;
pub use self_reference::{SelfReferenceFilter, mentions_place};
