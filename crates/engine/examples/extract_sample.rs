use engine::RecommendationAssembler;
use std::time::Instant;

const SAMPLE: &str = "Based on your love for mountains and lakes, here are my picks!

1. **Manali (Himachal Pradesh):**
- Activities: Trekking, paragliding and camping
- Best time: March to June
- Why perfect: Snowy peaks a night's drive from Delhi

2. **Udaipur (Rajasthan):**
- Things to do: Boat ride on Lake Pichola; sunset at Gangaur Ghat
- Budget: around ₹3,000 per day

Have a wonderful trip!";

fn main() {
    let assembler = RecommendationAssembler::with_defaults()
        .expect("Failed to build assembler");

    println!("Extracting recommendations from sample response...\n");

    let start = Instant::now();
    let result = assembler.extract(SAMPLE, Some("Delhi"), &["mountains", "lakes"]);
    let elapsed = start.elapsed();

    for (i, rec) in result.recommendations.iter().enumerate() {
        println!("{}. {} ({})", i + 1, rec.place, rec.region);
        println!("   {}", rec.rationale);
        for activity in &rec.activities {
            println!("   - {}", activity);
        }
    }

    println!("\n=== Extraction Complete ===");
    println!("Strategy: {}", result.strategy);
    println!("Used fallback: {}", result.used_fallback);
    println!("Time taken: {:?}", elapsed);
}
