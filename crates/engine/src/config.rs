//! Engine configuration.
//!
//! Every fallback constant lives here so deployments and tests can swap
//! them without touching extraction code. Missing fields take their
//! defaults, so a config file only needs the values it changes.

use crate::error::{EngineError, Result};
use crate::recommendation::Recommendation;
use pipeline::backfill::{
    DEFAULT_RATIONALE_TEMPLATE, default_generic_activities, default_vibe_activities,
};
use pipeline::region_resolver::{DEFAULT_CONTEXT_RADIUS, DEFAULT_REGION, default_category_regions};
use pipeline::{CategoryRegion, VibeActivities};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default destinations selected by preference tags.
///
/// Every entry of `keywords` must match at least one tag (substring of the
/// lowercased tag). An entry may list alternatives separated by `|`
/// ("lake|water"). `origin`, when set, must also match the location hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRule {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub origin: Option<String>,
    pub destinations: Vec<Recommendation>,
}

impl FallbackRule {
    pub fn matches(&self, tags_lower: &[String], location_hint: Option<&str>) -> bool {
        if self.keywords.is_empty() {
            return false;
        }
        if let Some(origin) = &self.origin {
            let hint_matches = location_hint
                .is_some_and(|hint| hint.trim().eq_ignore_ascii_case(origin.trim()));
            if !hint_matches {
                return false;
            }
        }
        self.keywords.iter().all(|group| {
            group
                .split('|')
                .map(|alt| alt.trim().to_lowercase())
                .filter(|alt| !alt.is_empty())
                .any(|alt| tags_lower.iter().any(|tag| tag.contains(&alt)))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub max_recommendations: usize,
    pub max_activities: usize,
    /// Characters of context either side of a place mention
    pub context_radius: usize,
    pub default_region: String,
    /// `{vibes}` is replaced by the request's preference tags
    pub rationale_template: String,
    /// First matching rule wins
    pub fallback_rules: Vec<FallbackRule>,
    /// Used when no fallback rule matches
    pub default_destinations: Vec<Recommendation>,
    pub vibe_activities: Vec<VibeActivities>,
    pub generic_activities: Vec<String>,
    pub category_regions: Vec<CategoryRegion>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recommendations: 3,
            max_activities: 4,
            context_radius: DEFAULT_CONTEXT_RADIUS,
            default_region: DEFAULT_REGION.to_string(),
            rationale_template: DEFAULT_RATIONALE_TEMPLATE.to_string(),
            fallback_rules: default_fallback_rules(),
            default_destinations: vec![manali(), udaipur(), goa()],
            vibe_activities: default_vibe_activities(),
            generic_activities: default_generic_activities(),
            category_regions: default_category_regions(),
        }
    }
}

impl EngineConfig {
    /// Load a JSON config file; absent fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content, &path.display().to_string())?;
        debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate JSON config text. `source` names it in errors.
    pub fn from_json(content: &str, source: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(content).map_err(|e| EngineError::Config {
                path: source.to_string(),
                reason: e.to_string(),
            })?;
        config.validate().map_err(|reason| EngineError::Config {
            path: source.to_string(),
            reason,
        })?;
        Ok(config)
    }

    /// Check that:
    /// - at least one recommendation is allowed
    /// - the default region and default destinations are usable, so the
    ///   fallback chain can always produce a result
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.max_recommendations == 0 {
            return Err("max_recommendations must be at least 1".to_string());
        }
        if self.default_region.trim().is_empty() {
            return Err("default_region must not be empty".to_string());
        }
        if self.default_destinations.is_empty() {
            return Err("default_destinations must not be empty".to_string());
        }
        let all_destinations = self
            .default_destinations
            .iter()
            .chain(self.fallback_rules.iter().flat_map(|r| r.destinations.iter()));
        for destination in all_destinations {
            if destination.place.trim().is_empty() {
                return Err("fallback destinations need a place".to_string());
            }
        }
        if let Some(rule) = self.fallback_rules.iter().find(|r| r.destinations.is_empty()) {
            return Err(format!(
                "fallback rule {:?} has no destinations",
                rule.keywords
            ));
        }
        Ok(())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn manali() -> Recommendation {
    Recommendation::new(
        "Manali",
        "Himachal Pradesh",
        "Perfect for mountain vibes with stunning Himalayan views",
        strings(&[
            "Trek to Rohtang Pass",
            "Visit Solang Valley",
            "Paragliding in Bir",
            "Camping by Beas River",
        ]),
    )
}

fn udaipur() -> Recommendation {
    Recommendation::new(
        "Udaipur",
        "Rajasthan",
        "City of Lakes with beautiful water bodies and palaces",
        strings(&[
            "Boat ride on Lake Pichola",
            "Visit City Palace",
            "Explore Jag Mandir",
            "Sunset at Gangaur Ghat",
        ]),
    )
}

fn goa() -> Recommendation {
    Recommendation::new(
        "Goa",
        "Goa",
        "Perfect beach destination with vibrant nightlife",
        strings(&[
            "Beach hopping",
            "Water sports",
            "Explore Portuguese architecture",
            "Enjoy local cuisine",
        ]),
    )
}

fn rishikesh() -> Recommendation {
    Recommendation::new(
        "Rishikesh",
        "Uttarakhand",
        "Himalayan foothills with rafting, treks and riverside calm",
        strings(&[
            "River rafting on the Ganges",
            "Attend the evening Ganga Aarti",
            "Walk across Laxman Jhula",
            "Trek to Neer Garh Waterfall",
        ]),
    )
}

fn default_fallback_rules() -> Vec<FallbackRule> {
    vec![
        FallbackRule {
            keywords: strings(&["mountain|hill", "lake|water|river"]),
            origin: None,
            destinations: vec![manali(), udaipur()],
        },
        FallbackRule {
            keywords: strings(&["mountain|hill|trek|hik"]),
            origin: None,
            destinations: vec![manali(), rishikesh()],
        },
        FallbackRule {
            keywords: strings(&["lake|water|river"]),
            origin: None,
            destinations: vec![udaipur()],
        },
        FallbackRule {
            keywords: strings(&["beach|sea|coast"]),
            origin: None,
            destinations: vec![goa()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn tags(items: &[&str]) -> Vec<String> {
        items.iter().map(|t| t.to_lowercase()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_recommendations, 3);
        assert_eq!(config.max_activities, 4);
        assert_eq!(config.context_radius, 200);
        assert_eq!(config.default_region, "India");
        let places: Vec<&str> = config.default_destinations.iter().map(|d| d.place.as_str()).collect();
        assert_eq!(places, vec!["Manali", "Udaipur", "Goa"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rule_needs_every_keyword_group() {
        let rules = default_fallback_rules();
        let both = tags(&["mountains", "lakes"]);
        assert!(rules[0].matches(&both, None));
        assert!(!rules[0].matches(&tags(&["mountains"]), None));
        assert!(rules[1].matches(&tags(&["Hiking"]), None));
        assert!(!rules[3].matches(&tags(&["museums"]), None));
    }

    #[test]
    fn test_rule_origin() {
        let rule = FallbackRule {
            keywords: strings(&["beach"]),
            origin: Some("Mumbai".to_string()),
            destinations: vec![goa()],
        };
        let beach = tags(&["beaches"]);
        assert!(rule.matches(&beach, Some("mumbai")));
        assert!(!rule.matches(&beach, Some("Delhi")));
        assert!(!rule.matches(&beach, None));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"max_recommendations": 2, "default_region": "Bharat"}}"#).unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.max_recommendations, 2);
        assert_eq!(config.default_region, "Bharat");
        assert_eq!(config.max_activities, 4);
        assert_eq!(config.default_destinations.len(), 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = EngineConfig::from_json(r#"{"max_recommendations": 0}"#, "test.json").unwrap_err();
        assert!(matches!(err, EngineError::Config { ref path, .. } if path == "test.json"));

        let err = EngineConfig::from_json("{not json", "broken.json").unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));

        let err = EngineConfig::from_json(r#"{"default_destinations": []}"#, "empty.json").unwrap_err();
        assert!(err.to_string().contains("default_destinations"));
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/engine.json")).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
