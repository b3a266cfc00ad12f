use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::{normalize_torque, FeatureSchema, RawRecord, RecordNormalizer, Vocabulary};

fn listing() -> RawRecord {
    RawRecord {
        km_driven: Some(70000.0),
        fuel: Some("Petrol".into()),
        seller_type: Some("Individual".into()),
        transmission: Some("Manual".into()),
        owner: Some("First Owner".into()),
        mileage: Some("20.0 kmpl".into()),
        engine: Some("1197 CC".into()),
        max_power: Some("82 bhp".into()),
        torque: Some("12.7@ 2,700(kgm@ rpm)".into()),
        seats: Some(5.0),
        year: Some(2015.0),
        ..Default::default()
    }
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = RecordNormalizer::new(FeatureSchema::full(), Vocabulary::default(), 2025);
    let record = listing();

    c.bench_function("normalize_record_full", |b| {
        b.iter(|| normalizer.normalize(black_box(&record)))
    });

    c.bench_function("normalize_torque_kgm", |b| {
        b.iter(|| normalize_torque(black_box(Some("22.4 kgm at 1750-2750rpm"))))
    });
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
