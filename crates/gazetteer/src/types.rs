//! Core types for the region gazetteer.
//!
//! A gazetteer maps a canonical region name ("Himachal Pradesh") to the
//! alias strings that identify it in free text ("manali", "shimla", ...).
//! Entries keep their definition order because lookups resolve ties by the
//! first matching entry, not by alias specificity.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One canonical region and the lowercase aliases that point to it.
///
/// The canonical name itself is always stored as the first alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GazetteerEntry {
    pub region: String,
    pub aliases: Vec<String>,
}

impl GazetteerEntry {
    /// Build an entry, lowercasing aliases and adding the canonical name.
    pub fn new(region: impl Into<String>, aliases: impl IntoIterator<Item = impl AsRef<str>>) -> Self {
        let region = region.into().trim().to_string();
        let mut normalized = vec![region.to_lowercase()];
        for alias in aliases {
            let alias = alias.as_ref().trim().to_lowercase();
            if !alias.is_empty() && !normalized.contains(&alias) {
                normalized.push(alias);
            }
        }
        Self {
            region,
            aliases: normalized,
        }
    }

    /// True if any alias occurs in `haystack_lower` (already lowercased).
    pub fn matches_within(&self, haystack_lower: &str) -> bool {
        self.aliases
            .iter()
            .any(|alias| haystack_lower.contains(alias.as_str()))
    }
}

/// Immutable alias table, built once and shared by reference.
///
/// `alias_index` maps every lowercase alias to the position of the first
/// entry that declared it, giving O(1) exact lookups while `entries` keeps
/// definition order for window scans.
#[derive(Debug, Clone, Default)]
pub struct Gazetteer {
    pub(crate) entries: Vec<GazetteerEntry>,
    pub(crate) alias_index: HashMap<String, usize>,
}

impl Gazetteer {
    /// Creates a new, empty Gazetteer
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries in definition order
    pub fn entries(&self) -> &[GazetteerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append an entry. Aliases already claimed by an earlier entry keep
    /// pointing at that earlier entry.
    pub fn insert_entry(&mut self, entry: GazetteerEntry) {
        let position = self.entries.len();
        for alias in &entry.aliases {
            self.alias_index.entry(alias.clone()).or_insert(position);
        }
        self.entries.push(entry);
    }

    /// Exact, case-insensitive alias lookup returning the canonical region.
    /// Runs of whitespace in `alias` count as one space.
    pub fn canonical_for_alias(&self, alias: &str) -> Option<&str> {
        let key = alias.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        self.alias_index
            .get(&key)
            .map(|&i| self.entries[i].region.as_str())
    }

    /// Aliases registered for a canonical region (case-insensitive)
    pub fn aliases_for(&self, region: &str) -> &[String] {
        let region_lower = region.trim().to_lowercase();
        self.entries
            .iter()
            .find(|e| e.region.to_lowercase() == region_lower)
            .map(|e| e.aliases.as_slice())
            .unwrap_or(&[])
    }

    /// First canonical region, in definition order, with an alias that
    /// occurs as a case-insensitive substring of `window`.
    pub fn region_in_window(&self, window: &str) -> Option<&str> {
        let window_lower = window.to_lowercase();
        self.entries
            .iter()
            .find(|e| e.matches_within(&window_lower))
            .map(|e| e.region.as_str())
    }
}
