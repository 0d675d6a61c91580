//! Criterion benchmarks for chainsplit-alloc.
//!
//! Covers: allocation at typical and long chain lengths, and amount derivation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chainsplit_alloc::{allocate, distributed_total};

fn bench_allocate_small(c: &mut Criterion) {
    c.bench_function("allocate_5", |b| b.iter(|| allocate(black_box(5))));
}

fn bench_allocate_long(c: &mut Criterion) {
    c.bench_function("allocate_1000", |b| b.iter(|| allocate(black_box(1000))));
}

fn bench_distributed_total(c: &mut Criterion) {
    let shares = allocate(100);

    c.bench_function("distributed_total_100", |b| {
        b.iter(|| distributed_total(black_box(1000.0), black_box(&shares)))
    });
}

criterion_group!(
    benches,
    bench_allocate_small,
    bench_allocate_long,
    bench_distributed_total
);
criterion_main!(benches);
