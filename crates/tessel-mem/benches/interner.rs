//! Interner benchmarks.
//!
//! Models the resolver's two workloads: a function table interned once, and a
//! per-function slot table that is cleared and refilled for every body.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tessel_mem::Interner;

fn bench_intern_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern_new");

    for size in [10, 100, 1_000].iter() {
        let names: Vec<String> = (0..*size).map(|i| format!("local_{i}")).collect();
        group.bench_with_input(BenchmarkId::from_parameter(size), &names, |b, names| {
            b.iter(|| {
                let mut interner = Interner::new();
                for name in names {
                    black_box(interner.intern(name));
                }
            });
        });
    }

    group.finish();
}

fn bench_reuse_after_clear(c: &mut Criterion) {
    let names: Vec<String> = (0..32).map(|i| format!("v{i}")).collect();

    c.bench_function("reuse_after_clear", |b| {
        let mut interner = Interner::new();
        b.iter(|| {
            for _ in 0..16 {
                interner.clear();
                // Each body touches its names several times.
                for name in names.iter().chain(names.iter()) {
                    black_box(interner.intern(name));
                }
            }
        });
    });
}

fn bench_lookup_hit_and_miss(c: &mut Criterion) {
    let names: Vec<String> = (0..100).map(|i| format!("fn_{i}")).collect();
    let mut interner = Interner::with_reserved(&["main"]);
    for name in &names {
        interner.intern(name);
    }

    c.bench_function("lookup_hit", |b| {
        b.iter(|| black_box(interner.lookup(black_box("fn_57"))));
    });
    c.bench_function("lookup_miss", |b| {
        b.iter(|| black_box(interner.lookup(black_box("not_a_function"))));
    });
}

criterion_group!(
    benches,
    bench_intern_new,
    bench_reuse_after_clear,
    bench_lookup_hit_and_miss
);
criterion_main!(benches);
