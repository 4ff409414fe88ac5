//! Chunk Source
//!
//! Segments free-form text with the chunker and parses every chunk into a
//! candidate. Used when the text holds no usable JSON block.

use crate::chunker::split_chunks;
use crate::field_parser::FieldParser;
use crate::types::{Candidate, RequestContext};
use tracing::{debug, instrument};

pub struct ChunkSource {
    parser: FieldParser,
}

impl ChunkSource {
    pub fn new() -> Self {
        Self {
            parser: FieldParser::default(),
        }
    }

    pub fn with_parser(parser: FieldParser) -> Self {
        Self { parser }
    }

    /// Candidates in chunk order. Chunks without an acceptable place name
    /// are dropped.
    #[instrument(skip_all, fields(text_len = context.raw_text.len()))]
    pub fn get_candidates(&self, context: &RequestContext) -> Vec<Candidate> {
        let chunks = split_chunks(&context.raw_text);
        let total = chunks.len();

        let candidates: Vec<Candidate> = chunks
            .iter()
            .filter_map(|chunk| self.parser.parse(chunk))
            .collect();

        debug!("{} chunks yielded {} candidates", total, candidates.len());
        candidates
    }
}

impl Default for ChunkSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CandidateSource;

    #[test]
    fn test_heading_format() {
        let context = RequestContext::new(
            "Here are 2 places for you:\n\nManali (Himachal Pradesh):\n- Activities: Trekking, camping\n\nUdaipur (Rajasthan): City of lakes\n- Visit City Palace",
        );
        let candidates = ChunkSource::new().get_candidates(&context);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].place, "Manali");
        assert_eq!(candidates[0].activities, vec!["Trekking", "camping"]);
        assert_eq!(candidates[1].place, "Udaipur");
        assert_eq!(candidates[1].region.as_deref(), Some("Rajasthan"));
        assert_eq!(candidates[1].activities, vec!["Visit City Palace"]);
        assert!(candidates.iter().all(|c| c.source == CandidateSource::Heading));
    }

    #[test]
    fn test_paragraph_format() {
        let context = RequestContext::new(
            "1. **Rishikesh**\nActivities: rafting, yoga\n\n2. **Kasol**\nActivities: hiking\n\nHave a great trip!",
        );
        let candidates = ChunkSource::new().get_candidates(&context);
        let places: Vec<&str> = candidates.iter().map(|c| c.place.as_str()).collect();
        assert_eq!(places, vec!["Rishikesh", "Kasol"]);
        assert_eq!(candidates[0].context, "1. **Rishikesh**\nActivities: rafting, yoga");
    }

    #[test]
    fn test_no_chunks() {
        let context = RequestContext::new("");
        assert!(ChunkSource::new().get_candidates(&context).is_empty());
    }
}
