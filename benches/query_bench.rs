//! Query engine benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `load` | Decoding a wire payload and deriving both vocabularies |
//! | `lookup` | Exact antecedent / consequent lookup |
//! | `search` | Case-insensitive substring search, hit and miss |
//! | `scaling` | Search throughput as the rule set grows from 1k to 100k |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench query_bench
//! open target/criterion/report/index.html
//! ```

use armview_core::{
    predict_by_weather, query_by_antecedent, query_by_consequent, search_rules, Rule, RuleSet,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

const WEATHER: &[&str] = &[
    "Rainy", "Sunny", "Cold", "Heavy Rain", "Light Rain", "Fog", "Humid", "Windy", "Snow",
    "Sunny, Hot", "Cold, Windy", "Thunderstorm",
];
const SYMPTOMS: &[&str] = &[
    "Cough", "Fatigue", "Headache", "Joint Pain", "Sore Throat", "Asthma", "Dizziness",
    "Runny Nose",
];

fn synthetic_rules(n: usize) -> Vec<Rule> {
    (0..n)
        .map(|i| {
            let f = (i % 97) as f64 / 97.0;
            Rule::new(
                WEATHER[i % WEATHER.len()],
                SYMPTOMS[(i / WEATHER.len()) % SYMPTOMS.len()],
                f * 0.2,
                f,
                0.5 + f * 2.0,
            )
        })
        .collect()
}

fn load_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let payload = serde_json::to_vec(&synthetic_rules(10_000)).unwrap();
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("from_json_10k", |b| {
        b.iter(|| RuleSet::from_json(black_box(&payload)).unwrap())
    });
    group.finish();
}

fn lookup_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let set = RuleSet::load(synthetic_rules(10_000));
    group.bench_function("antecedent_10k", |b| {
        b.iter(|| query_by_antecedent(&set, black_box("Heavy Rain")).len())
    });
    group.bench_function("consequent_10k", |b| {
        b.iter(|| query_by_consequent(&set, black_box("Cough")).len())
    });
    group.bench_function("predict_two_terms_10k", |b| {
        b.iter(|| predict_by_weather(&set, black_box(&["rain", "cold"])).len())
    });
    group.finish();
}

fn search_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let set = RuleSet::load(synthetic_rules(10_000));
    for term in ["rain", "PAIN", "zzz", ""] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{term:?}")), term, |b, t| {
            b.iter(|| search_rules(&set, black_box(t)).len())
        });
    }
    group.finish();
}

fn scaling_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    for n in [1_000usize, 10_000, 100_000] {
        let set = RuleSet::load(synthetic_rules(n));
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &set, |b, set| {
            b.iter(|| search_rules(set, black_box("rain")).len())
        });
    }
    group.finish();
}

criterion_group!(benches, load_bench, lookup_bench, search_bench, scaling_bench);
criterion_main!(benches);
