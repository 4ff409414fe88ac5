//! Benchmarks for end-to-end extraction
//!
//! Run with: cargo bench --package engine
//!
//! One benchmark per extraction path: embedded JSON, heading chunks,
//! paragraph chunks and the fallback table.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::RecommendationAssembler;

const JSON_RESPONSE: &str = r#"Sure! Here you go:
{"recommendations":[
  {"place":"Manali","state":"Himachal Pradesh","why":"Snow peaks","activities":["Trekking","Paragliding"]},
  {"place":"Udaipur","state":"Rajasthan","why":"Lakes","activities":["Boat ride"]},
  {"place":"Goa","state":"Goa","why":"Beaches","activities":["Beach hopping"]}
]}"#;

const HEADING_RESPONSE: &str = "Here are some places that match your vibe:

Manali (Himachal Pradesh):
- Activities: Trekking, paragliding and camping
- Best time: March to June
- Why perfect: Snowy peaks close to Delhi

Udaipur (Rajasthan):
- Things to do: Boat ride on Lake Pichola; visit City Palace
- Budget: Rs 2,500 per day

Rishikesh (Uttarakhand):
- River rafting";

const PARAGRAPH_RESPONSE: &str = "1. **Kasol**
A quiet river village in the Parvati valley, close to Manikaran.

2. **Test Falls**
A hidden waterfall a few hours from Shimla.

3. **Sunset Beach**
Things to do: swimming, kayaking";

fn bench_json_block(c: &mut Criterion) {
    let assembler = RecommendationAssembler::with_defaults().unwrap();
    c.bench_function("extract_json_block", |b| {
        b.iter(|| black_box(assembler.extract(black_box(JSON_RESPONSE), Some("Delhi"), &["mountains"])))
    });
}

fn bench_heading_chunks(c: &mut Criterion) {
    let assembler = RecommendationAssembler::with_defaults().unwrap();
    c.bench_function("extract_heading_chunks", |b| {
        b.iter(|| black_box(assembler.extract(black_box(HEADING_RESPONSE), Some("Delhi"), &["mountains"])))
    });
}

fn bench_paragraph_chunks(c: &mut Criterion) {
    let assembler = RecommendationAssembler::with_defaults().unwrap();
    c.bench_function("extract_paragraph_chunks", |b| {
        b.iter(|| black_box(assembler.extract(black_box(PARAGRAPH_RESPONSE), None, &["waterfalls"])))
    });
}

fn bench_fallback_table(c: &mut Criterion) {
    let assembler = RecommendationAssembler::with_defaults().unwrap();
    c.bench_function("extract_fallback_table", |b| {
        b.iter(|| black_box(assembler.extract(black_box(""), Some("Delhi"), &["mountains", "lakes"])))
    });
}

criterion_group!(
    benches,
    bench_json_block,
    bench_heading_chunks,
    bench_paragraph_chunks,
    bench_fallback_table
);
criterion_main!(benches);
