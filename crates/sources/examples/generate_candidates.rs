//! Example: Generate candidates from a generator response
//!
//! Run with: cargo run --package sources --example generate_candidates
//!
//! Shows the JSON block source declining free text, then the chunk source
//! splitting it into per-destination candidates.

use sources::{ChunkSource, JsonBlockSource, RequestContext};
use std::time::Instant;

const RESPONSE: &str = "Here are a few places for your mountain trip:

Manali (Himachal Pradesh):
- Activities (summer): Trekking, paragliding and camping
- Best time: March to June
- Budget (per person): Rs 4,000 per day

Rishikesh (Uttarakhand):
- River rafting
- Yoga by the Ganges

Happy travels!";

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    println!("=== Candidate Generation Example ===\n");

    let context = RequestContext::new(RESPONSE)
        .with_location(Some("Delhi"))
        .with_tags(&["mountains"]);

    let start = Instant::now();
    match JsonBlockSource::new().get_candidates(&context) {
        Some(candidates) => println!("JSON block: {} candidates", candidates.len()),
        None => println!("JSON block: not applicable"),
    }
    let json_time = start.elapsed();

    let start = Instant::now();
    let candidates = ChunkSource::new().get_candidates(&context);
    let chunk_time = start.elapsed();

    println!("\nChunk candidates:");
    for (i, candidate) in candidates.iter().enumerate() {
        println!(
            "  {}. {} ({}) via {:?}",
            i + 1,
            candidate.place,
            candidate.region.as_deref().unwrap_or("unresolved"),
            candidate.source
        );
        for activity in &candidate.activities {
            println!("     - {}", activity);
        }
    }

    println!("\n=== Summary ===");
    println!("JSON block time: {:?}", json_time);
    println!("Chunk time: {:?}", chunk_time);
}
