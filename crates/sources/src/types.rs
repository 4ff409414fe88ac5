//! Shared types for candidate sources.

use serde::{Deserialize, Serialize};

/// Where a candidate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandidateSource {
    /// Decoded from a JSON object embedded in the text
    JsonBlock,
    /// A `Name (Region):` heading chunk
    Heading,
    /// A blank-line separated paragraph
    Paragraph,
    /// Substituted from the fallback destination table
    Fallback,
}

/// A text segment hypothesized to describe one destination.
///
/// Lives only for the duration of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub text: String,
    pub heading_place: Option<String>,
    pub heading_region: Option<String>,
}

impl Chunk {
    /// A chunk with no heading hints (paragraph segmentation)
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            heading_place: None,
            heading_region: None,
        }
    }

    /// A chunk opened by a `Name (Region):` heading line
    pub fn heading(place: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            heading_place: Some(place.into()),
            heading_region: Some(region.into()),
        }
    }

    /// Append one line to the chunk body
    pub fn push_line(&mut self, line: &str) {
        if !self.text.is_empty() {
            self.text.push('\n');
        }
        self.text.push_str(line);
    }

    pub fn source(&self) -> CandidateSource {
        if self.heading_place.is_some() {
            CandidateSource::Heading
        } else {
            CandidateSource::Paragraph
        }
    }
}

/// A recommendation under construction.
///
/// Filters and the region resolver refine candidates in place; the
/// assembler turns the survivors into final recommendations.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub place: String,
    pub region: Option<String>,
    pub rationale: Option<String>,
    pub activities: Vec<String>,
    /// Text of the chunk the candidate was parsed from, used as a fallback
    /// context window when the place can't be located in the full text.
    pub context: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub fn new(place: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            place: place.into(),
            region: None,
            rationale: None,
            activities: Vec::new(),
            context: String::new(),
            source,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }

    pub fn with_activities(mut self, activities: Vec<String>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Place name trimmed, case-folded and whitespace-collapsed, used as
    /// the deduplication key.
    pub fn normalized_place(&self) -> String {
        normalize_place(&self.place)
    }
}

/// Trim, lowercase and collapse inner whitespace.
pub fn normalize_place(place: &str) -> String {
    place
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Everything the caller tells us about one extraction request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub raw_text: String,
    pub location_hint: Option<String>,
    pub preference_tags: Vec<String>,
}

impl RequestContext {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Default::default()
        }
    }

    /// Set the user's declared area; blank hints are ignored.
    pub fn with_location(mut self, location: Option<&str>) -> Self {
        self.location_hint = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.preference_tags = tags
            .iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    /// Lowercased tags, for keyword matching
    pub fn tags_lower(&self) -> Vec<String> {
        self.preference_tags.iter().map(|t| t.to_lowercase()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_place() {
        assert_eq!(normalize_place("  Lake   Pichola "), "lake pichola");
        assert_eq!(normalize_place("MANALI"), normalize_place("manali"));
    }

    #[test]
    fn test_chunk_push_line() {
        let mut chunk = Chunk::heading("Manali", "Himachal Pradesh");
        chunk.push_line("- Paragliding");
        chunk.push_line("- Camping");
        assert_eq!(chunk.text, "- Paragliding\n- Camping");
        assert_eq!(chunk.source(), CandidateSource::Heading);
    }

    #[test]
    fn test_request_context_trims_inputs() {
        let context = RequestContext::new("text")
            .with_location(Some("   "))
            .with_tags(&["Mountains", " ", "lakes "]);
        assert_eq!(context.location_hint, None);
        assert_eq!(context.preference_tags, vec!["Mountains", "lakes"]);
        assert_eq!(context.tags_lower(), vec!["mountains", "lakes"]);
    }
}
