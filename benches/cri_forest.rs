use courtside::features::{FeatureVector, FEATURE_COUNT};
use courtside::forest::{ForestConfig, RandomForest};
use criterion::{criterion_group, criterion_main, Criterion};
use tinyrand::{Rand, Seeded, StdRand};

fn synthetic(samples: usize) -> (Vec<FeatureVector>, Vec<bool>) {
    let mut rand = StdRand::seed(7);
    let mut rows = Vec::with_capacity(samples);
    let mut labels = Vec::with_capacity(samples);
    for _ in 0..samples {
        let wins = (rand.next_u64() % 40) as f64;
        let mut row = [0.; FEATURE_COUNT];
        row[0] = wins;
        row[1] = 40. - wins;
        for value in &mut row[2..] {
            *value = (rand.next_u64() % 1_000) as f64 / 10.;
        }
        rows.push(row);
        labels.push(wins > 20.);
    }
    (rows, labels)
}

fn criterion_benchmark(c: &mut Criterion) {
    let (rows, labels) = synthetic(64);
    let config = ForestConfig::default();
    c.bench_function("cri_forest_fit_64", |b| {
        b.iter(|| RandomForest::fit(&config, &rows, &labels));
    });

    let forest = RandomForest::fit(&config, &rows, &labels).unwrap();
    c.bench_function("cri_forest_predict_proba", |b| {
        b.iter(|| forest.predict_proba(&rows[0]));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
