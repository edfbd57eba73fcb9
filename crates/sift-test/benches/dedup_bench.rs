//! Benchmarks for deduplication strategies

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sift_core::{EqualityOnly, Unhashable};
use sift_engine::{
    dedup_by_representative, dedup_identity, dedup_keyed, Deduper, HashDeduper, LinearDeduper,
    OrderDeduper, Policy, StrategySelector,
};
use sift_test::{SequenceConfig, SequenceGenerator};

fn integers() -> Vec<u32> {
    SequenceGenerator::new(SequenceConfig::default()).integers()
}

fn bench_hash_deduper(c: &mut Criterion) {
    let seq = integers();

    c.bench_function("hash_deduper", |b| {
        b.iter(|| black_box(HashDeduper.survivors(black_box(&seq))))
    });
}

fn bench_order_deduper(c: &mut Criterion) {
    let seq = integers();

    c.bench_function("order_deduper", |b| {
        b.iter(|| black_box(OrderDeduper.survivors(black_box(&seq))))
    });
}

fn bench_linear_deduper(c: &mut Criterion) {
    let seq = integers();

    c.bench_function("linear_deduper", |b| {
        b.iter(|| black_box(LinearDeduper.retain_first(black_box(&seq))))
    });
}

fn bench_selector_fallthrough(c: &mut Criterion) {
    let values = SequenceGenerator::new(SequenceConfig::default()).values();
    let selector = StrategySelector::new();

    // Lists defeat hashing and mixed kinds defeat sorting
    c.bench_function("selector_dynamic_values", |b| {
        b.iter(|| black_box(selector.run(black_box(&values))))
    });

    let seq: Vec<Unhashable<u32>> = integers().into_iter().map(Unhashable).collect();
    c.bench_function("selector_unhashable", |b| {
        b.iter(|| black_box(selector.run(black_box(&seq))))
    });
}

fn bench_keyed(c: &mut Criterion) {
    let words = SequenceGenerator::new(SequenceConfig::default()).words();

    c.bench_function("keyed_first_wins", |b| {
        b.iter(|| {
            black_box(dedup_keyed(
                black_box(&words),
                |w| w.to_lowercase(),
                Policy::FirstWins,
            ))
        })
    });

    c.bench_function("keyed_last_wins", |b| {
        b.iter(|| {
            black_box(dedup_keyed(
                black_box(&words),
                |w| w.to_lowercase(),
                Policy::LastWins,
            ))
        })
    });

    let seq = SequenceGenerator::new(SequenceConfig::light()).integers();
    c.bench_function("identity_equality_only", |b| {
        b.iter(|| {
            black_box(dedup_identity(
                black_box(&seq).iter().copied().map(EqualityOnly),
                Policy::FirstWins,
            ))
        })
    });
}

fn bench_picker(c: &mut Criterion) {
    let words = SequenceGenerator::new(SequenceConfig::default()).words();

    c.bench_function("picker_prefer_uppercase", |b| {
        b.iter(|| {
            black_box(dedup_by_representative(
                black_box(&words),
                |w| w.to_lowercase(),
                |challenger, current| {
                    if challenger.item() < current.item() {
                        challenger
                    } else {
                        current
                    }
                },
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_hash_deduper,
    bench_order_deduper,
    bench_linear_deduper,
    bench_selector_fallthrough,
    bench_keyed,
    bench_picker,
);

criterion_main!(benches);
