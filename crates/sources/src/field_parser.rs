//! Field extraction for a single chunk.
//!
//! Turns one chunk into a candidate: a place name (heading hint or the
//! place-name strategies), an optional region hint, a rationale and a flat
//! activity list.
//!
//! `<label>: <value>` lines are classified by their normalized label. Timing
//! and budget values are folded into the activity list so the output shape
//! stays uniform. Unrecognized labels still contribute as generic
//! activities; generator output formats drift, so the catch-all is
//! deliberately permissive and the result is approximate by nature.

use crate::place_name::{PlaceNameExtractor, clean_place_name, is_valid_place_name};
use crate::types::{Candidate, Chunk, normalize_place};
use regex::Regex;
use std::sync::OnceLock;

/// What a labelled line contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Activities,
    Timing,
    Rationale,
    Budget,
    /// "Place: X" style lines naming the destination
    Place,
    /// "State: X" style lines naming the region
    Region,
}

/// Normalized label synonyms. A label matches when it equals a synonym or
/// starts with one followed by a space ("why perfect for you").
const LABELS: &[(FieldKind, &[&str])] = &[
    (
        FieldKind::Activities,
        &["activities", "activity", "things to do", "what to do", "top activities", "must do", "highlights", "experiences"],
    ),
    (
        FieldKind::Timing,
        &["best timing", "best time", "timing", "when to visit", "when to go", "ideal time", "season"],
    ),
    (
        FieldKind::Rationale,
        &["why perfect", "why famous", "famous for", "why its perfect", "why visit", "why go", "why", "known for", "description"],
    ),
    (
        FieldKind::Budget,
        &["budget range", "budget", "estimated cost", "approx cost", "cost", "price range", "price"],
    ),
    (FieldKind::Place, &["place", "place name", "destination", "name"]),
    (FieldKind::Region, &["state", "location name", "location", "region"]),
];

/// Keys too vague to carry meaning on their own ("S", "B", "Note").
const PLACEHOLDER_KEYS: &[&str] = &["note", "notes", "tip", "e g", "eg", "example", "answer", "response", "output"];

fn label_line_re() -> &'static Regex {
    static LABEL_RE: OnceLock<Regex> = OnceLock::new();
    LABEL_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?:[-•*]\s*)?(?:\*\*|__)?\s*(?P<label>[^:\n*_]{1,40}?)\s*(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(?P<value>.*?)\s*$",
        )
        .unwrap()
    })
}

fn activity_split_re() -> &'static Regex {
    static SPLIT_RE: OnceLock<Regex> = OnceLock::new();
    SPLIT_RE.get_or_init(|| Regex::new(r"(?i)\s*(?:[,;]|\band\b)\s*").unwrap())
}

fn currency_re() -> &'static Regex {
    static CURRENCY_RE: OnceLock<Regex> = OnceLock::new();
    CURRENCY_RE.get_or_init(|| Regex::new(r"(?i)(₹|\$|\brs\.?|\binr)\s*(\d[\d,]*)").unwrap())
}

/// Lowercase, keep letters/digits/spaces, collapse whitespace.
pub fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Classify a raw label by its synonyms.
pub fn classify_label(label: &str) -> Option<FieldKind> {
    let normalized = normalize_label(label);
    LABELS.iter().find_map(|(kind, synonyms)| {
        synonyms
            .iter()
            .any(|s| normalized == *s || normalized.starts_with(&format!("{s} ")))
            .then_some(*kind)
    })
}

/// True for keys that are too short or generic for the catch-all.
pub fn is_placeholder_key(label: &str) -> bool {
    let normalized = normalize_label(label);
    normalized.chars().count() <= 2 || PLACEHOLDER_KEYS.contains(&normalized.as_str())
}

/// Split an activity value on commas, semicolons and the word "and".
pub fn split_activities(value: &str) -> Vec<String> {
    activity_split_re()
        .split(value)
        .map(|a| a.trim().trim_end_matches('.').trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// "Budget-friendly, around ~₹2,000" for the first currency mention.
pub fn currency_activity(text: &str) -> Option<String> {
    let caps = currency_re().captures(text)?;
    let symbol = match caps[1].to_lowercase().as_str() {
        "₹" => "₹".to_string(),
        "$" => "$".to_string(),
        "inr" => "INR ".to_string(),
        _ => "Rs ".to_string(),
    };
    Some(format!("Budget-friendly, around ~{}{}", symbol, &caps[2]))
}

/// A `<label>: <value>` line split into its parts.
fn split_label_line(line: &str) -> Option<(String, String)> {
    let caps = label_line_re().captures(line)?;
    let label = caps["label"].trim();
    if label.is_empty() {
        return None;
    }
    Some((label.to_string(), caps["value"].trim().to_string()))
}

/// Bullet marker and emphasis stripped from an unlabelled bullet line.
fn bullet_text(line: &str) -> Option<String> {
    let trimmed = line.trim_start();
    let rest = trimmed.strip_prefix(['-', '•', '*'])?;
    let text: String = rest.chars().filter(|c| !matches!(c, '*' | '_')).collect();
    let text = text.trim().trim_end_matches('.').trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Intermediate field values collected from one chunk.
#[derive(Debug, Default)]
struct Fields {
    place: Option<String>,
    region: Option<String>,
    rationale: Option<String>,
    activities: Vec<String>,
    /// `<place>: <description>` lines, used as a rationale of last resort
    self_described: Option<String>,
}

/// Parses chunks into candidates.
pub struct FieldParser {
    extractor: PlaceNameExtractor,
}

impl FieldParser {
    pub fn new(extractor: PlaceNameExtractor) -> Self {
        Self { extractor }
    }

    /// Parse one chunk; `None` when no acceptable place name is found.
    pub fn parse(&self, chunk: &Chunk) -> Option<Candidate> {
        let fields = self.collect_fields(chunk);

        let place = chunk
            .heading_place
            .as_deref()
            .map(clean_place_name)
            .filter(|p| !p.is_empty())
            .or_else(|| fields.place.clone())
            .or_else(|| self.extractor.extract(&chunk.text))?;

        let mut candidate = Candidate::new(place.clone(), chunk.source()).with_context(chunk.text.clone());
        candidate.region = chunk
            .heading_region
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .or(fields.region);
        candidate.rationale = fields.rationale.or(fields.self_described);

        let place_key = normalize_place(&place);
        let mut activities: Vec<String> = Vec::new();
        for activity in fields.activities {
            // Values that merely repeat the place name are tautological.
            if normalize_place(&activity) == place_key {
                continue;
            }
            if !activities.iter().any(|a| a.eq_ignore_ascii_case(&activity)) {
                activities.push(activity);
            }
        }
        candidate.activities = activities;
        Some(candidate)
    }

    fn collect_fields(&self, chunk: &Chunk) -> Fields {
        let mut fields = Fields::default();
        let heading_key = chunk.heading_place.as_deref().map(normalize_place);

        for line in chunk.text.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let Some((label, value)) = split_label_line(line) else {
                if let Some(text) = bullet_text(line) {
                    fields.activities.push(text);
                }
                continue;
            };
            if value.is_empty() {
                continue;
            }

            match classify_label(&label) {
                Some(FieldKind::Activities) => fields.activities.extend(split_activities(&value)),
                Some(FieldKind::Timing) => fields.activities.push(format!("Best time: {}", value)),
                Some(FieldKind::Budget) => fields.activities.push(format!("Budget: {}", value)),
                Some(FieldKind::Rationale) => {
                    if fields.rationale.is_none() {
                        fields.rationale = Some(value);
                    }
                }
                Some(FieldKind::Place) => {
                    let cleaned = clean_place_name(&value);
                    if fields.place.is_none() && is_valid_place_name(&cleaned) {
                        fields.place = Some(cleaned);
                    }
                }
                Some(FieldKind::Region) => {
                    if fields.region.is_none() {
                        fields.region = Some(value);
                    }
                }
                None => {
                    let key = clean_place_name(&label);
                    let describes_place = heading_key.as_deref() == Some(normalize_place(&key).as_str())
                        || fields.place.as_deref().map(normalize_place) == Some(normalize_place(&key));
                    if describes_place {
                        fields.self_described.get_or_insert(value);
                    } else if !is_placeholder_key(&label) {
                        fields.activities.push(format!("{}: {}", key, value));
                    }
                }
            }
        }

        if let Some(budget) = currency_activity(&chunk.text) {
            fields.activities.push(budget);
        }
        fields
    }
}

impl Default for FieldParser {
    fn default() -> Self {
        Self::new(PlaceNameExtractor::default())
    }
}
