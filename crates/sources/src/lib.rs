//! # Sources Crate
//!
//! Candidate generation from raw generator text.
//!
//! ## Components
//!
//! ### JSON Block Source
//! Strict decoding of the first balanced `{...}` object in the text:
//! - Expects `{"recommendations": [...]}`
//! - Any failure means "not applicable", nothing is repaired
//!
//! ### Chunk Source
//! Best-effort extraction from free-form text:
//! - Chunker: `Name (Region):` headings first, blank-line paragraphs otherwise
//! - Place-name strategies: emphasis, ordinal lines, capitalized words,
//!   category suffixes
//! - Field parser: labelled lines, bullets, currency mentions
//!
//! ## Example Usage
//!
//! ```
//! use sources::{ChunkSource, JsonBlockSource, RequestContext};
//!
//! let context = RequestContext::new("Manali (Himachal Pradesh):\n- Activities: Trekking")
//!     .with_location(Some("Delhi"))
//!     .with_tags(&["mountains"]);
//!
//! let candidates = JsonBlockSource::new()
//!     .get_candidates(&context)
//!     .unwrap_or_else(|| ChunkSource::new().get_candidates(&context));
//!
//! assert_eq!(candidates[0].place, "Manali");
//! ```

pub mod chunk_source;
pub mod chunker;
pub mod field_parser;
pub mod json_block;
pub mod place_name;
pub mod types;

pub use chunk_source::ChunkSource;
pub use field_parser::FieldParser;
pub use json_block::JsonBlockSource;
pub use place_name::{PlaceNameExtractor, PlaceNameStrategy};
pub use types::{Candidate, CandidateSource, Chunk, RequestContext, normalize_place};
