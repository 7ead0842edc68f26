//! Benchmarks for group-by and distinct over synthetic tables.
//!
//! Key cardinality is fixed at 100 so the partition map stays hot while the
//! row count scales; the interesting cost is the per-row key-tuple
//! computation plus the permutation-driven slicing.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nframe_table::{Column, Selector, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn build_table(rows: usize, cardinality: i64) -> Table {
    let mut rng = StdRng::seed_from_u64(42);
    let keys: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..cardinality)).collect();
    let values: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..1_000_000)).collect();
    Table::new(vec![Column::of("key", keys), Column::of("value", values)]).unwrap()
}

fn bench_group_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_by");
    for &rows in &[1_000usize, 10_000, 100_000] {
        let table = build_table(rows, 100);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, t| {
            b.iter(|| black_box(t.group_by(&Selector::name("key")).unwrap()))
        });
    }
    group.finish();
}

fn bench_distinct(c: &mut Criterion) {
    let mut group = c.benchmark_group("distinct_by");
    for &rows in &[1_000usize, 10_000, 100_000] {
        let table = build_table(rows, 100);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, t| {
            b.iter(|| black_box(t.distinct_by(&Selector::name("key")).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_group_by, bench_distinct);
criterion_main!(benches);
