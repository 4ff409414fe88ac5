//! Filter to remove candidates whose "place" is generator boilerplate.
//!
//! Chunking is heuristic, so greetings and section headers ("Here are your
//! recommendations:") regularly come through as place names. This is
//! typically the first filter in the pipeline.

use crate::traits::Filter;
use anyhow::Result;
use sources::place_name::is_structural_name;
use sources::{Candidate, RequestContext};

/// Phrases that mark a place name as boilerplate. Matched case-insensitively
/// at the start of a word, so "recommendation" also catches
/// "Recommendations".
pub const DEFAULT_BOILERPLATE: &[&str] = &[
    "here are",
    "here is",
    "recommendation",
    "based on",
    "suggest",
    "itinerary",
    "i hope",
    "enjoy your",
    "happy travels",
    "let me know",
    "sure",
    "certainly",
    "overview",
    "summary",
];

/// Words that are placeholders when they make up the whole name,
/// optionally followed by a number ("Day 2", "Option 1").
const PLACEHOLDER_WORDS: &[&str] = &[
    "day", "stop", "step", "option", "place", "destination", "location", "name", "n/a", "na",
    "none", "tbd", "unknown",
];

/// Removes candidates whose place is boilerplate, a bare ordinal, a
/// placeholder or a field header ("Best Time", "Evening").
pub struct GenericTextFilter {
    phrases: Vec<String>,
}

impl GenericTextFilter {
    pub fn new() -> Self {
        Self::with_phrases(DEFAULT_BOILERPLATE)
    }

    pub fn with_phrases<S: AsRef<str>>(phrases: &[S]) -> Self {
        Self {
            phrases: phrases
                .iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// True when `place` should never become a recommendation.
    pub fn is_generic(&self, place: &str) -> bool {
        let lower = place.trim().to_lowercase();
        if lower.is_empty() || !lower.chars().any(char::is_alphabetic) {
            // Empty, or a bare ordinal like "1." / "2)"
            return true;
        }
        if is_placeholder(&lower) || is_structural_name(&lower) {
            return true;
        }
        self.phrases
            .iter()
            .any(|phrase| contains_at_word_start(&lower, phrase))
    }
}

impl Default for GenericTextFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for GenericTextFilter {
    fn name(&self) -> &str {
        "GenericTextFilter"
    }

    fn apply(
        &self,
        candidates: Vec<Candidate>,
        _context: &RequestContext,
    ) -> Result<Vec<Candidate>> {
        let filtered: Vec<Candidate> = candidates
            .into_iter()
            .filter(|candidate| !self.is_generic(&candidate.place))
            .collect();
        Ok(filtered)
    }
}

fn is_placeholder(lower: &str) -> bool {
    let mut words = lower.split_whitespace();
    let Some(first) = words.next() else {
        return true;
    };
    let first = first.trim_end_matches([':', '.', '#']);
    let rest_is_numeric = words.all(|w| w.trim_matches(['#', '.', ':', ')']).chars().all(|c| c.is_ascii_digit()));
    rest_is_numeric && (PLACEHOLDER_WORDS.contains(&first) || first.chars().all(|c| c == 'x'))
}

fn contains_at_word_start(haystack: &str, phrase: &str) -> bool {
    haystack.match_indices(phrase).any(|(i, _)| {
        haystack[..i]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sources::CandidateSource;

    #[test]
    fn test_boilerplate_rejected() {
        let filter = GenericTextFilter::new();
        assert!(filter.is_generic("Here are your recommendations"));
        assert!(filter.is_generic("Recommendations"));
        assert!(filter.is_generic("Based on your vibes"));
        assert!(filter.is_generic("I hope you enjoy"));
        assert!(!filter.is_generic("Treasure Island"));
        assert!(!filter.is_generic("Manali"));
    }

    #[test]
    fn test_ordinals_and_placeholders_rejected() {
        let filter = GenericTextFilter::new();
        assert!(filter.is_generic("1."));
        assert!(filter.is_generic("  "));
        assert!(filter.is_generic("Day 2"));
        assert!(filter.is_generic("Option #1"));
        assert!(filter.is_generic("N/A"));
        assert!(filter.is_generic("XXX"));
        assert!(!filter.is_generic("Dayara Bugyal"));
    }

    #[test]
    fn test_field_headers_rejected() {
        let filter = GenericTextFilter::new();
        assert!(filter.is_generic("Activities"));
        assert!(filter.is_generic("Budget"));
        assert!(filter.is_generic("Best Time"));
        assert!(filter.is_generic("Duration"));
        assert!(filter.is_generic("Morning"));
        assert!(!filter.is_generic("Goa"));
    }

    #[test]
    fn test_generic_text_filter() {
        let context = RequestContext::new("");
        let candidates = vec![
            Candidate::new("Here are your recommendations", CandidateSource::Paragraph),
            Candidate::new("Rishikesh", CandidateSource::Paragraph),
            Candidate::new("3)", CandidateSource::Paragraph),
            Candidate::new("Kasol", CandidateSource::Paragraph),
        ];

        let filtered = GenericTextFilter::new().apply(candidates, &context).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].place, "Rishikesh");
        assert_eq!(filtered[1].place, "Kasol");
    }

    #[test]
    fn test_custom_phrases() {
        let filter = GenericTextFilter::with_phrases(&["top picks"]);
        assert!(filter.is_generic("Top Picks for May"));
        assert!(!filter.is_generic("Here are places"));
    }
}
