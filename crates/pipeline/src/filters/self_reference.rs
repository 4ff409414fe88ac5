//! Filter to remove activities that just name the place itself.
//!
//! Unlike the other filters this never drops candidates; it rewrites their
//! activity lists.

use crate::traits::Filter;
use anyhow::Result;
use sources::{Candidate, RequestContext};

/// True if `activity` contains `place` as a whole-word sequence,
/// ignoring case and punctuation.
pub fn mentions_place(activity: &str, place: &str) -> bool {
    let place = words_padded(place);
    if place.trim().is_empty() {
        return false;
    }
    words_padded(activity).contains(&place)
}

/// " word word " form used for whole-word containment checks.
fn words_padded(text: &str) -> String {
    let words: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    format!(" {} ", words.split_whitespace().collect::<Vec<_>>().join(" "))
}

pub struct SelfReferenceFilter;

impl Filter for SelfReferenceFilter {
    fn name(&self) -> &str {
        "SelfReferenceFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &RequestContext,
    ) -> Result<Vec<Candidate>> {
        Ok(candidates
            .into_iter()
            .map(|mut candidate| {
                let place = candidate.place.clone();
                candidate
                    .activities
                    .retain(|activity| !mentions_place(activity, &place));
                candidate
            })
            .collect())
    }
}
