//! JSON Block Source
//!
//! Generators are asked for a strict JSON object but often wrap it in prose,
//! code fences or a greeting. This source finds the first balanced `{...}`
//! span in the text and decodes it against the expected shape:
//!
//! ```text
//! { "recommendations": [ { "place", "state", "why", "activities" } ] }
//! ```
//!
//! Any failure (no span, unbalanced braces, decode error, missing list)
//! means "not applicable": the caller moves on to the chunk source. Nothing
//! is repaired.

use crate::types::{Candidate, CandidateSource, RequestContext};
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Debug, Deserialize)]
struct RecommendationEnvelope {
    recommendations: Vec<JsonRecord>,
}

/// One record as the generator declares it.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRecord {
    #[serde(alias = "place_name", alias = "name")]
    pub place: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default, alias = "rationale", alias = "reason")]
    pub why: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

impl JsonRecord {
    /// First non-blank of `state`, `location_name`, `region`
    pub fn declared_region(&self) -> Option<&str> {
        [&self.state, &self.location_name, &self.region]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
    }
}

/// Extracts candidates from an embedded JSON object.
#[derive(Debug, Clone, Default)]
pub struct JsonBlockSource;

impl JsonBlockSource {
    pub fn new() -> Self {
        Self
    }

    /// Candidates from the embedded JSON, or `None` when the text holds no
    /// usable block. An empty `recommendations` list counts as unusable.
    #[instrument(skip_all, fields(text_len = context.raw_text.len()))]
    pub fn get_candidates(&self, context: &RequestContext) -> Option<Vec<Candidate>> {
        let records = decode_recommendations(&context.raw_text)?;
        let candidates: Vec<Candidate> = records
            .into_iter()
            .filter_map(record_to_candidate)
            .collect();

        if candidates.is_empty() {
            debug!("JSON block decoded but held no usable records");
            return None;
        }
        debug!("JSON block yielded {} candidates", candidates.len());
        Some(candidates)
    }
}

/// Minimal trimming only: the generator's fields are trusted as declared.
fn record_to_candidate(record: JsonRecord) -> Option<Candidate> {
    let place = record.place.trim();
    if place.is_empty() {
        return None;
    }

    let mut candidate = Candidate::new(place, CandidateSource::JsonBlock);
    if let Some(region) = record.declared_region() {
        candidate.region = Some(region.to_string());
    }
    candidate.rationale = record
        .why
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string);
    candidate.activities = record
        .activities
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();
    Some(candidate)
}

/// Strictly decode the first balanced JSON object in `text`.
pub fn decode_recommendations(text: &str) -> Option<Vec<JsonRecord>> {
    let block = first_balanced_block(text)?;
    match serde_json::from_str::<RecommendationEnvelope>(block) {
        Ok(envelope) => Some(envelope.recommendations),
        Err(e) => {
            debug!("JSON block not applicable: {}", e);
            None
        }
    }
}

/// The substring from the first `{` to its matching `}`.
///
/// Braces inside string literals (including escaped quotes) don't count.
pub fn first_balanced_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}
