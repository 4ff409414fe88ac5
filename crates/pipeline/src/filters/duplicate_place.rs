//! Filter to remove repeated destinations.
//!
//! Generators often name a place once in a summary line and again in its
//! own section. Keys are compared after trim, case-fold and whitespace
//! collapse; the first occurrence wins.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, RequestContext};
use std::collections::HashSet;

/// Keeps the first candidate per normalized place name.
///
/// ## Algorithm
/// Uses a HashSet of normalized names for O(1) lookups.
pub struct DuplicatePlaceFilter;

impl Filter for DuplicatePlaceFilter {
    fn name(&self) -> &str {
        "DuplicatePlaceFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &RequestContext,
    ) -> Result<Vec<Candidate>> {
        let mut seen = HashSet::new();
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| seen.insert(candidate.normalized_place()))
            .collect();
        Ok(filtered)
    }
}
