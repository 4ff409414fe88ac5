//! Output data model.
//!
//! The wire shape keeps the field names downstream clients already read:
//! `state` and `location_name` both carry the region, `why` carries the
//! rationale.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use sources::normalize_place;

/// One final travel recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "WireRecommendation")]
pub struct Recommendation {
    pub place: String,
    pub region: String,
    pub rationale: String,
    pub activities: Vec<String>,
}

/// Accepts every field spelling the wire shape uses. `state` and
/// `location_name` usually both appear, so they can't be serde aliases of
/// one field.
#[derive(Deserialize)]
struct WireRecommendation {
    #[serde(alias = "place_name", alias = "name")]
    place: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    location_name: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default, alias = "rationale", alias = "reason")]
    why: Option<String>,
    #[serde(default)]
    activities: Vec<String>,
}

impl From<WireRecommendation> for Recommendation {
    fn from(wire: WireRecommendation) -> Self {
        let region = [wire.state, wire.location_name, wire.region]
            .into_iter()
            .flatten()
            .find(|r| !r.trim().is_empty())
            .unwrap_or_default();
        Self {
            place: wire.place,
            region,
            rationale: wire.why.unwrap_or_default(),
            activities: wire.activities,
        }
    }
}

impl Recommendation {
    pub fn new(
        place: impl Into<String>,
        region: impl Into<String>,
        rationale: impl Into<String>,
        activities: Vec<String>,
    ) -> Self {
        Self {
            place: place.into(),
            region: region.into(),
            rationale: rationale.into(),
            activities,
        }
    }

    /// Deduplication key for the place name
    pub fn place_key(&self) -> String {
        normalize_place(&self.place)
    }
}

impl Serialize for Recommendation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Recommendation", 5)?;
        state.serialize_field("place", &self.place)?;
        state.serialize_field("state", &self.region)?;
        state.serialize_field("location_name", &self.region)?;
        state.serialize_field("why", &self.rationale)?;
        state.serialize_field("activities", &self.activities)?;
        state.end()
    }
}

/// `{ "recommendations": [...] }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationList {
    pub recommendations: Vec<Recommendation>,
}

/// Which path produced the recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStrategy {
    /// Embedded JSON object
    JsonBlock,
    /// Chunked free-form text
    Chunks,
    /// Configured default destinations
    FallbackTable,
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExtractionStrategy::JsonBlock => "json block",
            ExtractionStrategy::Chunks => "chunks",
            ExtractionStrategy::FallbackTable => "fallback table",
        };
        f.write_str(name)
    }
}

/// Result of one extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    /// 1 to `max_recommendations` records, in extraction order
    pub recommendations: Vec<Recommendation>,
    /// True when any synthetic content replaced extracted content
    pub used_fallback: bool,
    pub strategy: ExtractionStrategy,
}

impl ExtractionResult {
    /// The wire envelope, without the extraction metadata
    pub fn to_list(&self) -> RecommendationList {
        RecommendationList {
            recommendations: self.recommendations.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.recommendations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recommendations.is_empty()
    }
}
