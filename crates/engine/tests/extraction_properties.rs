//! End-to-end properties of the assembler.
//!
//! Each test feeds realistic generator output through the public API and
//! checks a guarantee callers rely on.

use engine::{ExtractionStrategy, RecommendationAssembler};
use serde_json::json;

const NO_TAGS: &[&str] = &[];

fn assembler() -> RecommendationAssembler {
    RecommendationAssembler::with_defaults().unwrap()
}

fn places(result: &engine::ExtractionResult) -> Vec<&str> {
    result.recommendations.iter().map(|r| r.place.as_str()).collect()
}

const HEADING_RESPONSE: &str = "Here are some places that match your vibe:

**Manali (Himachal Pradesh):**
- Activities: Trekking, paragliding and camping
- Best time: March to June
- Why perfect: Snowy peaks a night's drive from Delhi

Udaipur (Rajasthan): City of lakes
- Things to do: Boat ride on Lake Pichola; visit City Palace
- Budget: Rs 2,500 per day

Rishikesh (Uttarakhand):
- River rafting
- Yoga by the Ganges

Munnar (Kerala):
- Tea garden walks";

#[test]
fn test_result_count_always_between_one_and_three() {
    let inputs = [
        "",
        "   \n\n  ",
        "no places in this text at all",
        "{\"recommendations\": [",
        HEADING_RESPONSE,
        "1. **Kasol**\n\n2. **Tosh**\n\n3. **Malana**\n\n4. **Jibhi**\n\n5. **Shoja**",
    ];
    let assembler = assembler();
    for input in inputs {
        let result = assembler.extract(input, Some("Delhi"), &["mountains"]);
        assert!(
            (1..=3).contains(&result.len()),
            "{} results for {:?}",
            result.len(),
            input
        );
    }
}

#[test]
fn test_extraction_is_idempotent() {
    let assembler = assembler();
    let first = assembler.extract(HEADING_RESPONSE, Some("Delhi"), &["mountains", "lakes"]);
    let second = assembler.extract(HEADING_RESPONSE, Some("Delhi"), &["mountains", "lakes"]);
    assert_eq!(first, second);
}

#[test]
fn test_heading_response_fields() {
    let result = assembler().extract(HEADING_RESPONSE, Some("Delhi"), NO_TAGS);
    assert_eq!(result.strategy, ExtractionStrategy::Chunks);
    assert_eq!(places(&result), vec!["Manali", "Udaipur", "Rishikesh"]);

    let manali = &result.recommendations[0];
    assert_eq!(manali.region, "Himachal Pradesh");
    assert_eq!(manali.rationale, "Snowy peaks a night's drive from Delhi");
    assert_eq!(
        manali.activities,
        vec!["Trekking", "paragliding", "camping", "Best time: March to June"]
    );

    let udaipur = &result.recommendations[1];
    assert_eq!(
        udaipur.activities,
        vec![
            "Boat ride on Lake Pichola",
            "visit City Palace",
            "Budget: Rs 2,500 per day",
            "Budget-friendly, around ~Rs 2,500",
        ]
    );
    assert_eq!(result.recommendations[2].activities, vec!["River rafting", "Yoga by the Ganges"]);
}

#[test]
fn test_no_self_referencing_activities() {
    let text = "Kasol (Himachal Pradesh):
- Activities: Kasol, cafe hopping in Kasol, hike to Kheerganga
- KASOL
- Kasol: the Israeli village of India";
    let result = assembler().extract(text, None, NO_TAGS);
    let kasol = &result.recommendations[0];
    assert_eq!(kasol.place, "Kasol");
    assert_eq!(kasol.activities, vec!["hike to Kheerganga"]);
    for rec in &result.recommendations {
        let place = rec.place.to_lowercase();
        assert!(rec.activities.iter().all(|a| !a.to_lowercase().split_whitespace().any(|w| w == place)));
    }
}

#[test]
fn test_duplicates_ignore_case_and_spacing() {
    let text = "Lake Pichola (Rajasthan):
- Boat ride

lake   PICHOLA (Rajasthan):
- Sunset cruise

Goa (Goa):
- Beach hopping";
    let result = assembler().extract(text, None, NO_TAGS);
    assert_eq!(places(&result), vec!["Lake Pichola", "Goa"]);
    assert_eq!(result.recommendations[0].activities, vec!["Boat ride"]);
}

#[test]
fn test_json_block_takes_precedence() {
    let text = r#"Udaipur (Rajasthan):
- Boat ride
Here is the same as JSON:
{"recommendations":[{"place":"Jaisalmer","state":"Rajasthan","why":"Desert dunes","activities":["Camel safari"]}]}"#;
    let result = assembler().extract(text, None, NO_TAGS);
    assert_eq!(result.strategy, ExtractionStrategy::JsonBlock);
    assert_eq!(places(&result), vec!["Jaisalmer"]);
    assert_eq!(result.recommendations[0].rationale, "Desert dunes");
}

#[test]
fn test_json_dedup_and_truncation() {
    let text = r#"{"recommendations":[
        {"place":"Goa","state":"Goa","why":"a","activities":[]},
        {"place":" goa ","state":"Goa","why":"b","activities":[]},
        {"place":"Coorg","state":"Karnataka","why":"c","activities":["1","2","3","4","5"]},
        {"place":"Ooty","state":"Tamil Nadu","why":"d","activities":[]},
        {"place":"Munnar","state":"Kerala","why":"e","activities":[]}
    ]}"#;
    let result = assembler().extract(text, None, NO_TAGS);
    assert_eq!(places(&result), vec!["Goa", "Coorg", "Ooty"]);
    assert_eq!(result.recommendations[0].rationale, "a");
    assert_eq!(result.recommendations[1].activities.len(), 4);
}

#[test]
fn test_gazetteer_resolves_region_from_context() {
    let text = "If waterfalls are your thing, **Test Falls** is a hidden gem deep in the valleys of Himachal, a short walk from the road.";
    let result = assembler().extract(text, None, NO_TAGS);
    assert_eq!(places(&result), vec!["Test Falls"]);
    assert_eq!(result.recommendations[0].region, "Himachal Pradesh");
}

#[test]
fn test_mountain_lake_fallback_pair() {
    for raw in ["", "sorry, I can't help with that", "{\"recommendations\": []}"] {
        let result = assembler().extract(raw, Some("Delhi"), &["mountains", "lakes"]);
        assert_eq!(result.strategy, ExtractionStrategy::FallbackTable);
        assert!(result.used_fallback);
        assert_eq!(places(&result), vec!["Manali", "Udaipur"], "{raw:?}");
    }
}

#[test]
fn test_single_tag_fallbacks_differ_from_pair() {
    let assembler = assembler();
    let mountains = assembler.extract("", Some("Delhi"), &["mountains"]);
    let lakes = assembler.extract("", Some("Delhi"), &["lakes"]);
    let none = assembler.extract("", Some("Delhi"), NO_TAGS);
    assert_eq!(places(&mountains), vec!["Manali", "Rishikesh"]);
    assert_eq!(places(&lakes), vec!["Udaipur"]);
    assert_eq!(places(&none), vec!["Manali", "Udaipur", "Goa"]);
}

#[test]
fn test_generic_heading_never_a_place() {
    let assembler = assembler();
    let texts = [
        "Here are your recommendations:\n\n**Kasol** is a quiet river village.",
        "Here are your recommendations (India):\n- Relax\n\nKasol (Himachal Pradesh):\n- Hiking",
        "**Here are your recommendations:**",
    ];
    for text in texts {
        let result = assembler.extract(text, None, NO_TAGS);
        for rec in &result.recommendations {
            assert!(
                !rec.place.to_lowercase().contains("here are"),
                "boilerplate place from {text:?}"
            );
        }
    }
    let result = assembler.extract(texts[1], None, NO_TAGS);
    assert_eq!(places(&result), vec!["Kasol"]);
}

#[test]
fn test_parenthesised_field_labels_stay_with_their_place() {
    let text = "Manali (Himachal Pradesh):
- Activities (summer): trekking, camping
- Budget (per person): Rs 5000
Udaipur (Rajasthan):
- Boat ride";
    let result = assembler().extract(text, None, NO_TAGS);
    assert_eq!(places(&result), vec!["Manali", "Udaipur"]);

    let manali = &result.recommendations[0];
    assert_eq!(manali.region, "Himachal Pradesh");
    assert_eq!(
        manali.activities,
        vec![
            "trekking",
            "camping",
            "Budget: Rs 5000",
            "Budget-friendly, around ~Rs 5000",
        ]
    );
    assert_eq!(result.recommendations[1].region, "Rajasthan");
    assert_eq!(result.recommendations[1].activities, vec!["Boat ride"]);
}

#[test]
fn test_field_headers_never_become_places() {
    let text = "Best Time (October to March):\n- Cool and dry\n\nKasol (Himachal Pradesh):\n- Riverside cafes";
    let result = assembler().extract(text, None, NO_TAGS);
    assert_eq!(places(&result), vec!["Kasol"]);
}

#[test]
fn test_window_region_follows_gazetteer_order() {
    let result = assembler().extract("**Rishikesh** is a short bus ride from Kasol.", None, NO_TAGS);
    assert_eq!(places(&result), vec!["Rishikesh"]);
    assert_eq!(result.recommendations[0].region, "Himachal Pradesh");
}

#[test]
fn test_location_hint_seeds_default_region_only() {
    let assembler = assembler();
    // Unresolvable place: the hint's canonical region is used.
    let result = assembler.extract("**Nowhere Special** is calm.", Some("Jaipur"), NO_TAGS);
    assert_eq!(result.recommendations[0].region, "Rajasthan");

    // Resolved place: the hint never overrides it.
    let result = assembler.extract("**Munnar** is calm.", Some("Jaipur"), NO_TAGS);
    assert_eq!(result.recommendations[0].region, "Kerala");
}

#[test]
fn test_wire_output_shape() {
    let result = assembler().extract("", None, NO_TAGS);
    let value = serde_json::to_value(result.to_list()).unwrap();
    let first = &value["recommendations"][0];
    assert_eq!(first["place"], "Manali");
    assert_eq!(first["state"], "Himachal Pradesh");
    assert_eq!(first["location_name"], "Himachal Pradesh");
    assert_eq!(first["why"], "Perfect for mountain vibes with stunning Himalayan views");
}

#[test]
fn test_extract_value_requires_string_text() {
    let assembler = assembler();
    assert!(matches!(
        assembler.extract_value(&json!({"selectedVibes": ["mountains"]})),
        Err(engine::EngineError::InvalidInput(_))
    ));
    assert!(matches!(
        assembler.extract_value(&json!({"rawText": ["not", "a", "string"]})),
        Err(engine::EngineError::InvalidInput(_))
    ));

    let result = assembler
        .extract_value(&json!({"rawText": "", "location": "Delhi", "selectedVibes": ["mountains", "lakes"]}))
        .unwrap();
    assert_eq!(places(&result), vec!["Manali", "Udaipur"]);
}

#[test]
fn test_assembler_shared_across_threads() {
    let assembler = assembler();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let assembler = assembler.clone();
            std::thread::spawn(move || assembler.extract(HEADING_RESPONSE, None, &["lakes"]))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}
