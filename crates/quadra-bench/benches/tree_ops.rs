//! Criterion micro-benchmarks for per-step rebuild and point queries.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use quadra_bench::{crowded_profile, rebuild, uniform_profile};
use quadra_space::QuadTree;

/// Benchmark: rebuild the tree from 10K uniformly scattered entities.
fn bench_rebuild_uniform_10k(c: &mut Criterion) {
    let profile = uniform_profile(10_000, 42);
    let mut tree = QuadTree::new(profile.config).unwrap();

    c.bench_function("rebuild_uniform_10k", |b| {
        b.iter(|| {
            rebuild(&mut tree, &profile.positions).unwrap();
            black_box(tree.step());
        });
    });
}

/// Benchmark: rebuild with 90% of 10K entities in one crowd.
fn bench_rebuild_crowded_10k(c: &mut Criterion) {
    let profile = crowded_profile(10_000, 42);
    let mut tree = QuadTree::new(profile.config).unwrap();

    c.bench_function("rebuild_crowded_10k", |b| {
        b.iter(|| {
            rebuild(&mut tree, &profile.positions).unwrap();
            black_box(tree.step());
        });
    });
}

/// Benchmark: query the leaf of every entity once, on a built tree.
fn bench_query_uniform_10k(c: &mut Criterion) {
    let profile = uniform_profile(10_000, 42);
    let mut tree = QuadTree::new(profile.config).unwrap();
    rebuild(&mut tree, &profile.positions).unwrap();

    c.bench_function("query_uniform_10k", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for &position in &profile.positions {
                total += tree.query(position).unwrap().len();
            }
            black_box(total);
        });
    });
}

criterion_group!(
    benches,
    bench_rebuild_uniform_10k,
    bench_rebuild_crowded_10k,
    bench_query_uniform_10k
);
criterion_main!(benches);
