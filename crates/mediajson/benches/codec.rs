use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use mediajson::{dumps, loads};

/// A grain-metadata-shaped document: a list of grains, each carrying every media type.
fn sample_document(grains: usize) -> String {
    let items: Vec<String> = (0..grains)
        .map(|i| {
            format!(
                r#"{{"id":"b8b4a34f-3293-11e8-89c0-acde4800{i:04x}","origin":"{}:0","rate":{{"numerator":30000,"denominator":1001}},"offset":"+0:{}","valid":"[{}:0_{}:0)","label":"grain {i}"}}"#,
                417_798_915 + i,
                i * 40_000_000 % 1_000_000_000,
                417_798_915 + i,
                417_798_916 + i,
            )
        })
        .collect();
    format!(r#"{{"source":"cam1","grains":[{}]}}"#, items.join(","))
}

fn bench_codec(c: &mut Criterion) {
    let text = sample_document(256);
    let value = loads(&text).expect("sample document decodes");

    c.bench_function("loads_256_grains", |b| b.iter(|| loads(black_box(&text))));
    c.bench_function("dumps_256_grains", |b| b.iter(|| dumps(black_box(&value))));
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
