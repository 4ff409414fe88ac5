//! # Gazetteer Crate
//!
//! Static mapping from canonical region names to the alias strings
//! (destinations, landmarks, abbreviations) used to spot them in free text.
//!
//! ## Main Components
//!
//! - **types**: `Gazetteer` and `GazetteerEntry`
//! - **parser**: Parse `regions.dat` style alias tables
//! - **index**: Build, load and validate a Gazetteer
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use gazetteer::Gazetteer;
//! use std::sync::Arc;
//!
//! // Built once at startup, then shared read-only
//! let gazetteer = Arc::new(Gazetteer::builtin()?);
//!
//! assert_eq!(gazetteer.canonical_for_alias("Manali"), Some("Himachal Pradesh"));
//! assert_eq!(
//!     gazetteer.region_in_window("a short drive from Shimla"),
//!     Some("Himachal Pradesh")
//! );
//! ```

pub mod error;
pub mod types;
pub mod parser;
pub mod index;

pub use error::{GazetteerError, Result};
pub use types::{Gazetteer, GazetteerEntry};
