//! Engine crate for the travel recommendation extractor.
//!
//! This crate contains the assembler that turns free-form generator output
//! into a bounded list of recommendations, plus the output data model,
//! request shape, configuration and error types.
//!
//! ## Example Usage
//!
//! ```
//! use engine::RecommendationAssembler;
//!
//! let assembler = RecommendationAssembler::with_defaults()?;
//! let result = assembler.extract(
//!     "Manali (Himachal Pradesh):\n- Activities: Trekking, paragliding",
//!     Some("Delhi"),
//!     &["mountains"],
//! );
//!
//! assert_eq!(result.recommendations[0].place, "Manali");
//! assert_eq!(result.recommendations[0].region, "Himachal Pradesh");
//! # Ok::<(), engine::EngineError>(())
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod recommendation;
pub mod request;

pub use assembler::RecommendationAssembler;
pub use config::{EngineConfig, FallbackRule};
pub use error::{EngineError, Result};
pub use recommendation::{ExtractionResult, ExtractionStrategy, Recommendation, RecommendationList};
pub use request::ExtractionRequest;
