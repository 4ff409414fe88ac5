//! Region resolution for extracted candidates.
//!
//! Each candidate gets exactly one region, from the first tier that
//! produces one:
//!
//! 1. **Hint** - region carried by the candidate (heading or labelled line)
//! 2. **Gazetteer** - a window of text around the place's first mention;
//!    the first region in gazetteer definition order with an alias in it
//! 3. **Preposition** - `in|at|near|located in <Capitalized Phrase>` in the
//!    same window
//! 4. **Category** - place-type words in the name ("Lake", "Beach", ...)
//! 5. **Default** - seeded from the location hint, else the configured
//!    default region

use gazetteer::Gazetteer;
use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use sources::{Candidate, RequestContext, normalize_place};
use std::sync::{Arc, OnceLock};

/// Characters of context taken on either side of a place mention.
pub const DEFAULT_CONTEXT_RADIUS: usize = 200;

/// Region used when nothing else resolves.
pub const DEFAULT_REGION: &str = "India";

/// Tokens that never name a region, even after "in"/"at".
const NON_REGION_TOKENS: &[&str] = &[
    "the", "a", "an", "day", "stop", "duration", "morning", "afternoon", "evening", "night",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday",
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "summer", "winter", "spring", "autumn", "monsoon",
    "am", "pm", "i", "you", "your",
];

/// Which tier produced a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegionTier {
    Hint,
    Gazetteer,
    Preposition,
    Category,
    Default,
}

/// Place-type keywords mapped to a likely region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRegion {
    pub keywords: Vec<String>,
    pub region: String,
}

impl CategoryRegion {
    pub fn new(keywords: &[&str], region: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            region: region.to_string(),
        }
    }

    /// True if any word of `place` is a keyword or its plural
    /// ("Hills" matches "hill", "Fortune" doesn't match "fort").
    pub fn matches(&self, place: &str) -> bool {
        let lower = place.to_lowercase();
        lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .any(|word| self.keywords.iter().any(|k| is_word_or_plural(word, k)))
    }
}

fn is_word_or_plural(word: &str, keyword: &str) -> bool {
    match word.strip_prefix(keyword) {
        Some(suffix) => matches!(suffix, "" | "s" | "es"),
        None => false,
    }
}

/// Built-in category guesses.
pub fn default_category_regions() -> Vec<CategoryRegion> {
    vec![
        CategoryRegion::new(&["hill", "mountain"], "Himachal Pradesh"),
        CategoryRegion::new(&["lake", "palace", "fort"], "Rajasthan"),
        CategoryRegion::new(&["beach", "coast"], "Goa"),
        CategoryRegion::new(&["temple", "shrine"], "Tamil Nadu"),
    ]
}

fn preposition_re() -> &'static Regex {
    static PREPOSITION_RE: OnceLock<Regex> = OnceLock::new();
    PREPOSITION_RE.get_or_init(|| {
        Regex::new(r"\b(?:[Ll]ocated in|in|at|near)\s+([A-Z][a-zA-Z]+(?:[ \t]+[A-Z][a-zA-Z]+)*)").unwrap()
    })
}

/// Resolves candidate regions against a shared gazetteer.
///
/// ## Performance Note
/// Resolution is independent per candidate, so batches run on the rayon
/// pool. Output order always matches input order.
#[derive(Clone)]
pub struct RegionResolver {
    gazetteer: Arc<Gazetteer>,
    context_radius: usize,
    category_regions: Vec<CategoryRegion>,
    default_region: String,
}

impl RegionResolver {
    /// Create a resolver with the built-in categories and defaults.
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self {
            gazetteer,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            category_regions: default_category_regions(),
            default_region: DEFAULT_REGION.to_string(),
        }
    }

    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    pub fn with_category_regions(mut self, categories: Vec<CategoryRegion>) -> Self {
        self.category_regions = categories;
        self
    }

    pub fn with_default_region(mut self, region: impl Into<String>) -> Self {
        self.default_region = region.into();
        self
    }

    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// Region used when every other tier fails.
    ///
    /// A location hint the gazetteer knows seeds it with that canonical
    /// region; otherwise the configured default.
    pub fn default_region(&self, context: &RequestContext) -> String {
        context
            .location_hint
            .as_deref()
            .and_then(|hint| self.gazetteer.canonical_for_alias(hint))
            .map(str::to_string)
            .unwrap_or_else(|| self.default_region.clone())
    }

    /// Resolve regions for all candidates in parallel.
    ///
    /// # Returns
    /// The candidates, in the same order, each with `region` set
    pub fn resolve_all(&self, candidates: Vec<Candidate>, context: &RequestContext) -> Vec<Candidate> {
        candidates
            .into_par_iter()
            .map(|mut candidate| {
                let (region, tier) = self.resolve(&candidate, context);
                tracing::debug!("Region for '{}': {} ({:?})", candidate.place, region, tier);
                candidate.region = Some(region);
                candidate
            })
            .collect()
    }

    /// Resolve one candidate's region and report the tier that produced it.
    pub fn resolve(&self, candidate: &Candidate, context: &RequestContext) -> (String, RegionTier) {
        if let Some(hint) = candidate.region.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            return (hint.to_string(), RegionTier::Hint);
        }

        let window = self.context_window(&candidate.place, &context.raw_text, &candidate.context);
        if let Some(region) = self.gazetteer.region_in_window(window) {
            return (region.to_string(), RegionTier::Gazetteer);
        }

        if let Some(region) = self.preposition_region(&candidate.place, window) {
            return (region, RegionTier::Preposition);
        }

        if let Some(category) = self.category_regions.iter().find(|c| c.matches(&candidate.place)) {
            return (category.region.clone(), RegionTier::Category);
        }

        (self.default_region(context), RegionTier::Default)
    }

    /// Up to `context_radius` characters either side of the place's first
    /// case-insensitive mention in `full_text`; `fallback` when the place
    /// isn't mentioned.
    pub fn context_window<'a>(&self, place: &str, full_text: &'a str, fallback: &'a str) -> &'a str {
        match find_case_insensitive(full_text, place.trim()) {
            Some((start, end)) => {
                let from = full_text[..start]
                    .char_indices()
                    .rev()
                    .take(self.context_radius)
                    .last()
                    .map(|(i, _)| i)
                    .unwrap_or(start);
                let to = full_text[end..]
                    .char_indices()
                    .nth(self.context_radius)
                    .map(|(i, _)| end + i)
                    .unwrap_or(full_text.len());
                &full_text[from..to]
            }
            None => fallback,
        }
    }

    /// First capitalized phrase after a locative preposition that is not
    /// the place itself or a structural token. Known aliases map to their
    /// canonical region; anything else is used verbatim.
    fn preposition_region(&self, place: &str, window: &str) -> Option<String> {
        let place_key = normalize_place(place);
        preposition_re()
            .captures_iter(window)
            .map(|caps| caps[1].split_whitespace().collect::<Vec<_>>().join(" "))
            .find(|phrase| {
                let key = normalize_place(phrase);
                key != place_key
                    && !place_key.contains(&key)
                    && !key.split_whitespace().any(|w| NON_REGION_TOKENS.contains(&w))
            })
            .map(|phrase| {
                self.gazetteer
                    .canonical_for_alias(&phrase)
                    .map(str::to_string)
                    .unwrap_or(phrase)
            })
    }
}

/// Byte range of the first case-insensitive occurrence of `needle`.
fn find_case_insensitive(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let needle_lower: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();

    haystack.char_indices().find_map(|(start, _)| {
        let mut matched = 0;
        for (offset, ch) in haystack[start..].char_indices() {
            for lower in ch.to_lowercase() {
                if needle_lower.get(matched) != Some(&lower) {
                    return None;
                }
                matched += 1;
            }
            if matched == needle_lower.len() {
                return Some((start, start + offset + ch.len_utf8()));
            }
        }
        None
    })
}
