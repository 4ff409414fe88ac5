//! External request shape.
//!
//! ```text
//! { "rawText": "...", "location": "Delhi", "selectedVibes": ["mountains"] }
//! ```
//!
//! `raw_text` and `response` are accepted for the text, `preference_tags`
//! and `preferenceTags` for the tags.

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const RAW_TEXT_KEYS: &[&str] = &["rawText", "raw_text", "response"];
const LOCATION_KEYS: &[&str] = &["location", "locationHint", "location_hint"];
const TAG_KEYS: &[&str] = &["selectedVibes", "preference_tags", "preferenceTags"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    #[serde(rename = "rawText", alias = "raw_text", alias = "response")]
    pub raw_text: String,
    #[serde(default, alias = "locationHint", alias = "location_hint")]
    pub location: Option<String>,
    #[serde(
        default,
        rename = "selectedVibes",
        alias = "preference_tags",
        alias = "preferenceTags"
    )]
    pub preference_tags: Vec<String>,
}

impl ExtractionRequest {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Default::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tags<S: AsRef<str>>(mut self, tags: &[S]) -> Self {
        self.preference_tags = tags.iter().map(|t| t.as_ref().to_string()).collect();
        self
    }

    /// Lenient decoding of an untyped request.
    ///
    /// The raw text must be present and a string (it may be empty). A
    /// non-string location is ignored, as are non-string tags.
    pub fn from_value(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| EngineError::InvalidInput("request must be a JSON object".to_string()))?;

        let raw = RAW_TEXT_KEYS
            .iter()
            .find_map(|key| object.get(*key))
            .ok_or_else(|| EngineError::InvalidInput("missing rawText".to_string()))?;
        let raw_text = raw
            .as_str()
            .ok_or_else(|| EngineError::InvalidInput(format!("rawText must be a string, got {}", type_name(raw))))?;

        let location = LOCATION_KEYS
            .iter()
            .find_map(|key| object.get(*key))
            .and_then(Value::as_str)
            .map(str::to_string);

        let preference_tags = TAG_KEYS
            .iter()
            .find_map(|key| object.get(*key))
            .and_then(Value::as_array)
            .map(|tags| {
                tags.iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            raw_text: raw_text.to_string(),
            location,
            preference_tags,
        })
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
