//! Criterion benchmarks for feature alignment

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feature_engine::{FeatureAligner, RawFeatureRow, ReferenceFrame};
use std::sync::Arc;

const STATES: [&str; 8] = ["AZ", "CA", "CO", "FL", "GA", "NY", "TX", "WA"];

fn listing(i: usize) -> RawFeatureRow {
    RawFeatureRow {
        category: Some("housing/rent/apartment".to_string()),
        bathrooms: (i % 3) as f64 + 1.0,
        bedrooms: (i % 4) as f64,
        has_photo: Some(if i % 2 == 0 { "Yes" } else { "Thumbnail" }.to_string()),
        pets_allowed: Some("Cats,Dogs".to_string()),
        square_feet: 400.0 + (i % 1000) as f64,
        cityname: Some(format!("City{}", i % 500)),
        state: Some(STATES[i % STATES.len()].to_string()),
        latitude: 30.0,
        longitude: -95.0,
        source: Some("RentLingo".to_string()),
        body_count: (i % 900) as u32,
    }
}

fn bench_align(c: &mut Criterion) {
    let mut group = c.benchmark_group("Feature Alignment");

    for rows in [1_000usize, 10_000, 100_000].iter() {
        let reference: ReferenceFrame = (0..*rows).map(listing).collect();
        let aligner = match FeatureAligner::new(Arc::new(reference)) {
            Ok(aligner) => aligner,
            Err(e) => panic!("reference frame rejected: {}", e),
        };
        let input = [listing(7)];

        group.bench_with_input(BenchmarkId::new("reference_rows", rows), &input, |b, input| {
            b.iter(|| aligner.align(black_box(input)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_align);
criterion_main!(benches);
