//! Parser throughput benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tessel_syntax::parse;

fn functions(count: usize) -> String {
    let mut source = String::new();
    for i in 0..count {
        source.push_str(&format!(
            "(defun (f{i} a b)\n  (set t (table \"k\" (list a b {i} 1.5)))\n  (return (item t \"k\")))\n"
        ));
    }
    source.push_str("(defun (main) (print (f0 1 2)))\n");
    source
}

fn bench_parse_functions(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse/functions");

    for count in [10, 100, 1_000] {
        let source = functions(count);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &source, |b, source| {
            b.iter(|| parse(black_box(source)));
        });
    }

    group.finish();
}

fn bench_parse_deep_nesting(c: &mut Criterion) {
    let depth = 500;
    let source = format!("{}1{}", "(+ 1 ".repeat(depth), ")".repeat(depth));

    c.bench_function("parse/deep_nesting", |b| {
        b.iter(|| parse(black_box(&source)));
    });
}

criterion_group!(benches, bench_parse_functions, bench_parse_deep_nesting);
criterion_main!(benches);
