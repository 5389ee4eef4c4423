//! Criterion micro-benchmarks for arena allocation and array growth.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use quadra_arena::{ArenaConfig, GrowVec, Lifetime, StepArena};
use quadra_core::EntityId;

/// Benchmark: append 10K ids to a transient array starting at capacity 20.
fn bench_grow_vec_append_10k(c: &mut Criterion) {
    let mut arena = StepArena::<EntityId>::new(ArenaConfig::default()).unwrap();

    c.bench_function("grow_vec_append_10k", |b| {
        b.iter(|| {
            arena.reset_transient();
            let mut vec = GrowVec::with_capacity(&mut arena, 20, Lifetime::Transient).unwrap();
            for i in 0..10_000u32 {
                vec.push(&mut arena, EntityId(i)).unwrap();
            }
            black_box(vec.len());
        });
    });
}

/// Benchmark: 1K small transient allocations followed by a rewind.
fn bench_transient_alloc_reset(c: &mut Criterion) {
    let mut arena = StepArena::<EntityId>::new(ArenaConfig::default()).unwrap();

    c.bench_function("transient_alloc_reset_1k", |b| {
        b.iter(|| {
            for _ in 0..1_000 {
                let region = arena.alloc(20, Lifetime::Transient).unwrap();
                black_box(region);
            }
            arena.reset_transient();
        });
    });
}

criterion_group!(benches, bench_grow_vec_append_10k, bench_transient_alloc_reset);
criterion_main!(benches);
