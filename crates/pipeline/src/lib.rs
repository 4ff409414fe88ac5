//! Pipeline for filtering and enriching travel candidates.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - RegionResolver for assigning each candidate a region
//! - Backfill for activities and rationales the text left out
//!
//! ## Architecture
//! Candidates from the chunk source are processed in stages:
//! 1. Filters remove boilerplate and duplicate places, and strip
//!    self-referencing activities
//! 2. RegionResolver assigns regions (in parallel)
//! 3. Backfill synthesizes missing activities and rationales
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{Backfill, FilterPipeline, RegionResolver};
//! use pipeline::filters::*;
//!
//! // Build the filter pipeline
//! let pipeline = FilterPipeline::new()
//!     .add_filter(GenericTextFilter::new())
//!     .add_filter(DuplicatePlaceFilter)
//!     .add_filter(SelfReferenceFilter);
//!
//! // Apply filters
//! let filtered = pipeline.apply(candidates, &context)?;
//!
//! // Resolve regions, then fill gaps
//! let resolver = RegionResolver::new(gazetteer.clone());
//! let resolved = resolver.resolve_all(filtered, &context);
//! let complete = Backfill::default().apply(resolved, &context);
//! ```

pub mod backfill;
pub mod filter_pipeline;
pub mod filters;
pub mod region_resolver;
pub mod traits;

// Re-export main types
pub use backfill::{Backfill, VibeActivities};
pub use filter_pipeline::FilterPipeline;
pub use region_resolver::{CategoryRegion, RegionResolver, RegionTier};
pub use traits::Filter;
