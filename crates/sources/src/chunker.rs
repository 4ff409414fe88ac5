//! Splits generator output into destination chunks.
//!
//! Two segmentation strategies, in precedence order:
//! 1. Heading lines of the form `Name (Region):` open a chunk; the bullet
//!    lines below them are its body.
//! 2. If the text has no such headings, every blank-line separated paragraph
//!    becomes a chunk without hints.

use crate::field_parser::classify_label;
use crate::place_name::{clean_place_name, is_structural_name};
use crate::types::Chunk;
use regex::Regex;
use std::sync::OnceLock;

fn heading_re() -> &'static Regex {
    static HEADING_RE: OnceLock<Regex> = OnceLock::new();
    HEADING_RE.get_or_init(|| {
        Regex::new(
            r"^\s*(?:[-•*]\s+|\d+[.)]\s+|#{1,6}\s+)?(?:\*\*|__)?\s*(?P<place>[^()\n:*_]+?)\s*(?:\*\*|__)?\s*\((?P<region>[^()\n]+)\)\s*(?:\*\*|__)?\s*:\s*(?:\*\*|__)?\s*(?P<rest>.*)$",
        )
        .unwrap()
    })
}

fn paragraph_break_re() -> &'static Regex {
    static BREAK_RE: OnceLock<Regex> = OnceLock::new();
    BREAK_RE.get_or_init(|| Regex::new(r"\n[ \t\r]*\n").unwrap())
}

/// Split `text` into chunks, heading segmentation first.
pub fn split_chunks(text: &str) -> Vec<Chunk> {
    let chunks = heading_chunks(text);
    if !chunks.is_empty() {
        return chunks;
    }
    paragraph_chunks(text)
}

/// Parse a `Name (Region):` heading line into (place, region, inline rest).
pub fn parse_heading(line: &str) -> Option<(String, String, String)> {
    let caps = heading_re().captures(line)?;
    let place = caps["place"].trim();
    let region = caps["region"].trim();
    if place.is_empty() || region.is_empty() {
        return None;
    }
    Some((
        place.to_string(),
        region.to_string(),
        caps["rest"].trim().to_string(),
    ))
}

/// Field labels and structural names shaped like a heading
/// ("- Budget (per person): Rs 5000") belong to the chunk above them.
fn is_label_heading(place: &str) -> bool {
    classify_label(place).is_some() || is_structural_name(&clean_place_name(place))
}

/// Lines starting with `-`, `•` or `*`.
pub fn is_bullet_line(line: &str) -> bool {
    matches!(line.trim_start().chars().next(), Some('-' | '•' | '*'))
}

/// Heading segmentation.
///
/// A heading with nothing under it still produces a chunk so terse
/// responses ("Goa (Goa):") are not lost. Lines that are neither bullets
/// nor headings don't end the current chunk; they are skipped.
pub fn heading_chunks(text: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Option<Chunk> = None;

    for line in text.lines() {
        let heading = parse_heading(line);
        if matches!(&heading, Some((place, _, _)) if is_label_heading(place)) {
            if let Some(chunk) = current.as_mut() {
                chunk.push_line(line.trim());
            }
            continue;
        }

        if let Some((place, region, rest)) = heading {
            if let Some(done) = current.take() {
                chunks.push(done);
            }
            let mut chunk = Chunk::heading(place, region);
            if !rest.is_empty() {
                chunk.push_line(&rest);
            }
            current = Some(chunk);
            continue;
        }

        if let Some(chunk) = current.as_mut() {
            if is_bullet_line(line) {
                chunk.push_line(line.trim());
            }
        }
    }

    if let Some(done) = current {
        chunks.push(done);
    }
    chunks
}

/// Paragraph segmentation: every non-empty blank-line separated block.
pub fn paragraph_chunks(text: &str) -> Vec<Chunk> {
    paragraph_break_re()
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(Chunk::paragraph)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heading_variants() {
        let expected = ("Manali".to_string(), "Himachal Pradesh".to_string(), String::new());
        assert_eq!(parse_heading("Manali (Himachal Pradesh):"), Some(expected.clone()));
        assert_eq!(parse_heading("1. Manali (Himachal Pradesh):"), Some(expected.clone()));
        assert_eq!(parse_heading("**Manali (Himachal Pradesh):**"), Some(expected.clone()));
        assert_eq!(parse_heading("- **Manali** (Himachal Pradesh):"), Some(expected.clone()));
        assert_eq!(parse_heading("### Manali (Himachal Pradesh):"), Some(expected));
    }

    #[test]
    fn test_parse_heading_inline_rest() {
        let (place, region, rest) = parse_heading("Udaipur (Rajasthan): City of lakes").unwrap();
        assert_eq!(place, "Udaipur");
        assert_eq!(region, "Rajasthan");
        assert_eq!(rest, "City of lakes");
    }

    #[test]
    fn test_non_headings() {
        assert_eq!(parse_heading("Here are your recommendations:"), None);
        assert_eq!(parse_heading("- Activities: trekking, camping"), None);
        assert_eq!(parse_heading("Visit Manali (Himachal Pradesh) in May"), None);
    }

    #[test]
    fn test_heading_chunks_collect_bullets() {
        let text = "Here are your picks:\n\nManali (Himachal Pradesh):\n- Activities: Trekking, camping\n- Best time: March to June\nSome prose line\n\nUdaipur (Rajasthan):\n• Boat ride on Lake Pichola\n";
        let chunks = split_chunks(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].heading_place.as_deref(), Some("Manali"));
        assert_eq!(chunks[0].text, "- Activities: Trekking, camping\n- Best time: March to June");
        assert_eq!(chunks[1].heading_region.as_deref(), Some("Rajasthan"));
        assert_eq!(chunks[1].text, "• Boat ride on Lake Pichola");
    }

    #[test]
    fn test_label_lines_with_parentheses_stay_in_chunk() {
        let text = "Manali (Himachal Pradesh):\n- Activities (summer): trekking, camping\n- Budget (per person): Rs 5000\nBest Time (ideal): May\nUdaipur (Rajasthan):\n- Boat ride";
        let chunks = split_chunks(text);
        assert_eq!(chunks.len(), 2);
        assert_eq!(
            chunks[0].text,
            "- Activities (summer): trekking, camping\n- Budget (per person): Rs 5000\nBest Time (ideal): May"
        );
        assert_eq!(chunks[1].heading_place.as_deref(), Some("Udaipur"));
    }

    #[test]
    fn test_terse_heading_still_chunked() {
        let chunks = split_chunks("Goa (Goa):\nKerala (Kerala):");
        assert_eq!(chunks.len(), 2);
        assert!(chunks[0].text.is_empty());
        assert_eq!(chunks[1].heading_place.as_deref(), Some("Kerala"));
    }

    #[test]
    fn test_paragraph_fallback() {
        let text = "1. **Manali** is great for mountains.\n\n  \n2. **Udaipur** has lakes.\r\n\r\nEnjoy!";
        let chunks = split_chunks(text);
        assert_eq!(chunks.len(), 3);
        assert!(chunks.iter().all(|c| c.heading_place.is_none()));
        assert_eq!(chunks[1].text, "2. **Udaipur** has lakes.");
    }

    #[test]
    fn test_empty_text() {
        assert!(split_chunks("").is_empty());
        assert!(split_chunks("  \n\n  ").is_empty());
    }
}
