//! Synthesized content for candidates the text left incomplete.
//!
//! Preference tags only ever feed synthesized text here; they never decide
//! which places survive.

use serde::{Deserialize, Serialize};
use sources::{Candidate, RequestContext};

/// Default rationale template; `{vibes}` is replaced by the joined tags.
pub const DEFAULT_RATIONALE_TEMPLATE: &str = "Perfect for your {vibes} vibe";

/// Canned activities for tags containing any of `keywords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibeActivities {
    pub keywords: Vec<String>,
    pub activities: Vec<String>,
}

impl VibeActivities {
    pub fn new(keywords: &[&str], activities: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            activities: activities.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// True if any keyword is a substring of the lowercased tag.
    pub fn matches(&self, tag_lower: &str) -> bool {
        self.keywords.iter().any(|k| tag_lower.contains(k.as_str()))
    }
}

pub fn default_vibe_activities() -> Vec<VibeActivities> {
    vec![
        VibeActivities::new(
            &["mountain", "hill"],
            &["Trek to a scenic viewpoint", "Visit a mountain village"],
        ),
        VibeActivities::new(&["lake", "water", "river"], &["Take a boat ride", "Walk along the waterfront"]),
        VibeActivities::new(&["beach", "sea", "coast"], &["Relax on the beach", "Try water sports"]),
        VibeActivities::new(&["hik", "trek"], &["Hike a local trail", "Join a guided nature walk"]),
        VibeActivities::new(&["camp"], &["Camp under the stars", "Cook a meal outdoors"]),
        VibeActivities::new(&["adventure"], &["Try paragliding or rafting", "Go rock climbing"]),
        VibeActivities::new(&["histor", "heritage"], &["Tour a heritage site", "Take a guided history walk"]),
        VibeActivities::new(&["museum", "art"], &["Visit a local museum", "Browse an art gallery"]),
        VibeActivities::new(&["restaurant", "food", "cuisine"], &["Try the regional cuisine", "Explore a local food market"]),
        VibeActivities::new(&["spiritual", "temple", "yoga"], &["Attend an evening aarti", "Join a yoga session"]),
        VibeActivities::new(&["shop", "store", "market"], &["Browse the local markets", "Pick up handmade souvenirs"]),
    ]
}

pub fn default_generic_activities() -> Vec<String> {
    vec![
        "Explore the local area".to_string(),
        "Learn about the local history".to_string(),
        "Take photos of the scenery".to_string(),
    ]
}

/// Fills empty activity lists and missing rationales.
#[derive(Debug, Clone)]
pub struct Backfill {
    vibe_activities: Vec<VibeActivities>,
    generic_activities: Vec<String>,
    rationale_template: String,
}

impl Backfill {
    pub fn new(
        vibe_activities: Vec<VibeActivities>,
        generic_activities: Vec<String>,
        rationale_template: impl Into<String>,
    ) -> Self {
        Self {
            vibe_activities,
            generic_activities,
            rationale_template: rationale_template.into(),
        }
    }

    /// Activities synthesized from the tags, in tag order; the generic list
    /// when no tag matches.
    pub fn activities_for(&self, context: &RequestContext) -> Vec<String> {
        let mut activities: Vec<String> = Vec::new();
        for tag in context.tags_lower() {
            for rule in self.vibe_activities.iter().filter(|r| r.matches(&tag)) {
                for activity in &rule.activities {
                    if !activities.contains(activity) {
                        activities.push(activity.clone());
                    }
                }
            }
        }
        if activities.is_empty() {
            return self.generic_activities.clone();
        }
        activities
    }

    /// The rationale template filled with the request's tags.
    pub fn rationale_for(&self, context: &RequestContext) -> String {
        self.rationale_template.replace("{vibes}", &vibe_phrase(&context.preference_tags))
    }

    /// Backfill every candidate that needs it.
    pub fn apply(&self, candidates: Vec<Candidate>, context: &RequestContext) -> Vec<Candidate> {
        candidates
            .into_iter()
            .map(|mut candidate| {
                if candidate.activities.is_empty() {
                    candidate.activities = self.activities_for(context);
                }
                let missing = candidate.rationale.as_deref().is_none_or(|r| r.trim().is_empty());
                if missing {
                    candidate.rationale = Some(self.rationale_for(context));
                }
                candidate
            })
            .collect()
    }
}

impl Default for Backfill {
    fn default() -> Self {
        Self::new(
            default_vibe_activities(),
            default_generic_activities(),
            DEFAULT_RATIONALE_TEMPLATE,
        )
    }
}

/// "mountains", "mountains and lakes", "a, b and c"; "travel" for no tags.
/// Underscores in tags read as spaces ("historic_places").
pub fn vibe_phrase(tags: &[String]) -> String {
    let tags: Vec<String> = tags
        .iter()
        .map(|t| t.replace('_', " ").trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    match tags.as_slice() {
        [] => "travel".to_string(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {}", init.join(", "), last),
    }
}
