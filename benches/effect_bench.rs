//! Benchmarks for computation composition and interpretation.
//!
//! The left-nested/right-nested pair exercises the continuation queue's
//! re-association: both shapes must evaluate in linear time.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use effree::effect::{Eff, Effects, State, Writer, run_pure_or_fail, run_state, run_writer};
use std::hint::black_box;

struct Bench;

impl Effects for Bench {}
impl State<i64> for Bench {}
impl Writer<i64> for Bench {}

fn left_nested(n: i64) -> Eff<Bench, i64> {
    (0..n).fold(Bench::get(), |acc, _| acc.flat_map(|x| Eff::pure(x + 1)))
}

fn right_nested(remaining: i64) -> Eff<Bench, i64> {
    if remaining == 0 {
        Bench::get()
    } else {
        Bench::get().flat_map(move |_| right_nested(remaining - 1))
    }
}

fn counter(n: i64) -> Eff<Bench, i64> {
    (0..n)
        .fold(Eff::pure(()), |acc, _| {
            acc.then(Bench::modify(|x| x + 1))
        })
        .then(Bench::get())
}

fn log_chain(n: i64) -> Eff<Bench, i64> {
    (0..n)
        .fold(Eff::pure(()), |acc, i| acc.then(Bench::tell(i)))
        .then(Eff::pure(n))
}

fn bench_bind_shapes(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("bind_shapes");
    for size in [100i64, 1_000] {
        group.bench_with_input(BenchmarkId::new("left_nested", size), &size, |b, &n| {
            b.iter(|| {
                let result = run_pure_or_fail(run_state(0, left_nested(black_box(n))));
                black_box(result.value)
            });
        });
        group.bench_with_input(BenchmarkId::new("right_nested", size), &size, |b, &n| {
            b.iter(|| {
                let result = run_pure_or_fail(run_state(0, right_nested(black_box(n))));
                black_box(result.value)
            });
        });
    }
    group.finish();
}

fn bench_interpreters(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("interpreters");
    for size in [100i64, 1_000] {
        group.bench_with_input(BenchmarkId::new("state_counter", size), &size, |b, &n| {
            b.iter(|| {
                let result = run_pure_or_fail(run_state(0, counter(black_box(n))));
                black_box(result.state)
            });
        });
        group.bench_with_input(BenchmarkId::new("writer_log", size), &size, |b, &n| {
            b.iter(|| {
                let result = run_pure_or_fail(run_writer(log_chain(black_box(n))));
                black_box(result.written.len())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_bind_shapes, bench_interpreters);
criterion_main!(benches);
