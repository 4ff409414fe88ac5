//! Place-name extraction strategies.
//!
//! Chunks without a heading hint go through an ordered list of strategies,
//! each proposing candidate names from the chunk text. The first proposal
//! that survives cleanup and the stopword check wins.
//!
//! ## Strategies (default order)
//! 1. `MarkdownEmphasis` - `**Name**` / `__Name__`
//! 2. `OrdinalLine` - `1. Name` / `2) Name - ...`
//! 3. `CapitalizedSequence` - two or more capitalized words
//! 4. `CategorySuffix` - a capitalized word followed by a place-type word
//!    (`Chilika lake`, `Amber Fort`)

use regex::Regex;
use std::sync::OnceLock;

/// Minimum length, in characters, of an accepted place name.
pub const MIN_PLACE_LEN: usize = 4;

/// A pure rule proposing place names from chunk text.
///
/// `Send + Sync` so one strategy list can serve concurrent extractions.
pub trait PlaceNameStrategy: Send + Sync {
    /// Returns the name of this strategy (for logging/debugging)
    fn name(&self) -> &str;

    /// All raw proposals, in text order. Cleanup and validation happen in
    /// `PlaceNameExtractor`.
    fn propose(&self, text: &str) -> Vec<String>;
}

pub struct MarkdownEmphasis;

impl PlaceNameStrategy for MarkdownEmphasis {
    fn name(&self) -> &str {
        "MarkdownEmphasis"
    }

    fn propose(&self, text: &str) -> Vec<String> {
        static EMPHASIS_RE: OnceLock<Regex> = OnceLock::new();
        let re = EMPHASIS_RE
            .get_or_init(|| Regex::new(r"\*\*([^*\n]+)\*\*|__([^_\n]+)__").unwrap());
        re.captures_iter(text)
            .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

pub struct OrdinalLine;

impl PlaceNameStrategy for OrdinalLine {
    fn name(&self) -> &str {
        "OrdinalLine"
    }

    fn propose(&self, text: &str) -> Vec<String> {
        static ORDINAL_RE: OnceLock<Regex> = OnceLock::new();
        let re = ORDINAL_RE.get_or_init(|| {
            Regex::new(r"(?m)^\s*\d+[.)]\s+([^\n:(–—]+?)(?:\s+-\s.*|\s*[:(–—].*)?$").unwrap()
        });
        re.captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

pub struct CapitalizedSequence;

impl PlaceNameStrategy for CapitalizedSequence {
    fn name(&self) -> &str {
        "CapitalizedSequence"
    }

    fn propose(&self, text: &str) -> Vec<String> {
        static CAPS_RE: OnceLock<Regex> = OnceLock::new();
        let re = CAPS_RE.get_or_init(|| {
            Regex::new(r"\b[A-Z][a-zA-Z'’]+(?:[ \t]+(?:of[ \t]+|the[ \t]+)?[A-Z][a-zA-Z'’]+)+\b").unwrap()
        });
        re.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

pub struct CategorySuffix;

impl PlaceNameStrategy for CategorySuffix {
    fn name(&self) -> &str {
        "CategorySuffix"
    }

    fn propose(&self, text: &str) -> Vec<String> {
        static SUFFIX_RE: OnceLock<Regex> = OnceLock::new();
        let re = SUFFIX_RE.get_or_init(|| {
            Regex::new(
                r"\b[A-Z][a-zA-Z]+[ \t]+(?i:fort|palace|lake|beach|temple|valley|falls|hills?|ghat|pass|island|national park|sanctuary|caves?|dam|peak|gardens?)\b",
            )
            .unwrap()
        });
        re.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

/// Runs strategies in order and validates their proposals.
pub struct PlaceNameExtractor {
    strategies: Vec<Box<dyn PlaceNameStrategy>>,
}

impl PlaceNameExtractor {
    /// An extractor with no strategies
    pub fn empty() -> Self {
        Self {
            strategies: Vec::new(),
        }
    }

    /// Add a strategy to the end of the list (builder pattern).
    pub fn add_strategy(mut self, strategy: impl PlaceNameStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    /// Strategy names in evaluation order
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// First valid place name any strategy proposes.
    pub fn extract(&self, text: &str) -> Option<String> {
        for strategy in &self.strategies {
            let found = strategy
                .propose(text)
                .iter()
                .map(|raw| clean_place_name(raw))
                .find(|name| is_valid_place_name(name));
            if let Some(name) = found {
                tracing::trace!("Place name '{}' from {}", name, strategy.name());
                return Some(name);
            }
        }
        None
    }
}

impl Default for PlaceNameExtractor {
    fn default() -> Self {
        Self::empty()
            .add_strategy(MarkdownEmphasis)
            .add_strategy(OrdinalLine)
            .add_strategy(CapitalizedSequence)
            .add_strategy(CategorySuffix)
    }
}

/// Strip markdown markers, leading ordinals/bullets and trailing punctuation.
pub fn clean_place_name(raw: &str) -> String {
    static ORDINAL_PREFIX_RE: OnceLock<Regex> = OnceLock::new();
    let ordinal_prefix =
        ORDINAL_PREFIX_RE.get_or_init(|| Regex::new(r"^\s*(?:[-•]\s*)?(?:\d+[.)]\s*)?").unwrap());

    let without_markers: String = raw.chars().filter(|c| !matches!(c, '*' | '_' | '#' | '`')).collect();
    let without_ordinal = ordinal_prefix.replace(&without_markers, "");
    without_ordinal
        .trim()
        .trim_end_matches([':', '.', ',', ';', '-', '–', '—', '!'])
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Structural words that open non-place lines ("Day 1", "Stop 2", ...)
const STRUCTURAL_TOKENS: &[&str] = &[
    "stop", "duration", "day", "days", "morning", "afternoon", "evening", "night", "week",
    "monday", "tuesday", "wednesday", "thursday", "friday", "saturday", "sunday", "am", "pm",
    "step", "option", "tip", "tips", "note", "total",
];

/// Whole names that are headers, not places
const GENERIC_HEADERS: &[&str] = &[
    "activities", "things to do", "best time", "best timing", "timing", "budget",
    "budget range", "cost", "why perfect", "why famous", "famous for", "itinerary",
    "overview", "summary", "recommendations", "travel tips", "highlights", "place",
    "destination", "name of the place", "state", "location",
];

/// Length, stopword and header checks for a cleaned name.
pub fn is_valid_place_name(name: &str) -> bool {
    name.chars().count() >= MIN_PLACE_LEN && !is_structural_name(name)
}

/// True for field headers ("Best Time"), schedule labels ("Day 2 Morning")
/// and names without letters. Length is not considered.
pub fn is_structural_name(name: &str) -> bool {
    let lower = name.trim().to_lowercase();
    if GENERIC_HEADERS.contains(&lower.as_str()) {
        return true;
    }
    if !lower.chars().any(char::is_alphabetic) {
        return true;
    }
    // A structural token anywhere in the name marks a schedule/label line,
    // e.g. "Day 2 Morning" or "Stop 3".
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .any(|w| STRUCTURAL_TOKENS.contains(&w) || is_clock_time(w))
}

/// "9am", "10pm", "7:30" style tokens
fn is_clock_time(word: &str) -> bool {
    let digits = word.trim_end_matches("am").trim_end_matches("pm");
    digits.len() < word.len() && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_order() {
        let extractor = PlaceNameExtractor::default();
        assert_eq!(
            extractor.strategy_names(),
            vec!["MarkdownEmphasis", "OrdinalLine", "CapitalizedSequence", "CategorySuffix"]
        );
    }

    #[test]
    fn test_markdown_emphasis() {
        let proposals = MarkdownEmphasis.propose("Visit **Manali** or __Kasol__ soon");
        assert_eq!(proposals, vec!["Manali", "Kasol"]);
    }

    #[test]
    fn test_ordinal_line() {
        let proposals = OrdinalLine.propose("1. Rishikesh - yoga capital\n2) Jaipur: pink city\n3. Udaipur");
        assert_eq!(proposals, vec!["Rishikesh", "Jaipur", "Udaipur"]);
    }

    #[test]
    fn test_capitalized_sequence() {
        let proposals = CapitalizedSequence.propose("Head to Valley of Flowers and then Nainital.");
        assert_eq!(proposals, vec!["Valley of Flowers"]);
    }

    #[test]
    fn test_category_suffix() {
        let proposals = CategorySuffix.propose("a calm morning at Chilika lake");
        assert_eq!(proposals, vec!["Chilika lake"]);
    }

    #[test]
    fn test_clean_place_name() {
        assert_eq!(clean_place_name("**1. Manali:**"), "Manali");
        assert_eq!(clean_place_name("  2)  Lake   Pichola - "), "Lake Pichola");
        assert_eq!(clean_place_name("- Goa!"), "Goa");
    }

    #[test]
    fn test_rejects_structural_names() {
        assert!(!is_valid_place_name("Day 1"));
        assert!(!is_valid_place_name("Stop 2"));
        assert!(!is_valid_place_name("Duration"));
        assert!(!is_valid_place_name("Monday Morning"));
        assert!(!is_valid_place_name("Leave 9am"));
        assert!(!is_valid_place_name("Best time"));
        assert!(!is_valid_place_name("Goa"));
        assert!(!is_valid_place_name("2024"));
        assert!(is_valid_place_name("Manali"));
        assert!(is_valid_place_name("Amber Fort"));
    }

    #[test]
    fn test_structural_name_ignores_length() {
        assert!(is_structural_name("Activities"));
        assert!(is_structural_name("Budget"));
        assert!(is_structural_name("Evening"));
        assert!(is_structural_name("1."));
        assert!(!is_structural_name("Goa"));
        assert!(!is_structural_name("Udaipur"));
    }

    #[test]
    fn test_first_valid_proposal_wins() {
        let extractor = PlaceNameExtractor::default();
        // "Day 1" is emphasized but rejected; the next emphasized span is used.
        assert_eq!(
            extractor.extract("**Day 1** then **Kasol** for the river"),
            Some("Kasol".to_string())
        );
        // No emphasis or ordinal: falls through to capitalized words.
        assert_eq!(
            extractor.extract("You could try Jim Corbett for wildlife."),
            Some("Jim Corbett".to_string())
        );
        assert_eq!(extractor.extract("nothing capitalized here"), None);
    }
}
