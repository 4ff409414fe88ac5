//! Building and validating the Gazetteer.
//!
//! - Build the table from the embedded `regions.dat` or a file on disk
//! - Index every alias for exact lookups
//! - Validate the table before it is shared

use crate::error::{GazetteerError, Result};
use crate::parser;
use crate::types::{Gazetteer, GazetteerEntry};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Alias table compiled into the binary.
const BUILTIN_REGIONS: &str = include_str!("../data/regions.dat");

impl Gazetteer {
    /// Build from already-parsed entries, preserving their order.
    pub fn from_entries(entries: impl IntoIterator<Item = GazetteerEntry>) -> Self {
        let mut gazetteer = Gazetteer::new();
        for entry in entries {
            gazetteer.insert_entry(entry);
        }
        gazetteer
    }

    /// Parse and validate a table given as text.
    pub fn from_table(content: &str, file: &str) -> Result<Self> {
        let gazetteer = Self::from_entries(parser::parse_entries(content, file)?);
        gazetteer.validate()?;
        Ok(gazetteer)
    }

    /// The table shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_table(BUILTIN_REGIONS, "regions.dat")
    }

    /// Load a replacement table from disk.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let entries = parser::parse_file(path)?;
        let gazetteer = Self::from_entries(entries);
        gazetteer.validate()?;
        debug!(
            "Loaded gazetteer from {} ({} regions, {} aliases)",
            path.display(),
            gazetteer.len(),
            gazetteer.alias_count()
        );
        Ok(gazetteer)
    }

    /// Total number of distinct indexed aliases
    pub fn alias_count(&self) -> usize {
        self.alias_index.len()
    }

    /// Check that:
    /// - the table has at least one region
    /// - every region name is non-empty and declared once
    /// - every region has at least one alias besides its own name
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(GazetteerError::ValidationError(
                "Gazetteer has no regions".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.region.is_empty() {
                return Err(GazetteerError::ValidationError(
                    "Region with empty name".to_string(),
                ));
            }
            if !seen.insert(entry.region.to_lowercase()) {
                return Err(GazetteerError::ValidationError(format!(
                    "Duplicate region: {}",
                    entry.region
                )));
            }
            if entry.aliases.len() < 2 {
                return Err(GazetteerError::ValidationError(format!(
                    "Region '{}' has no aliases",
                    entry.region
                )));
            }
        }
        Ok(())
    }
}
