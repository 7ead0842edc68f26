//! Benchmarks for hash join operations.
//!
//! Build and probe are both O(rows); the dominant costs are key-tuple
//! hashing and the gather that assembles the output columns.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nframe_join::{inner_join, left_join, JoinKey};
use nframe_table::{Column, Table};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

/// Two tables with a 50% id overlap.
fn build_tables(rows: usize) -> (Table, Table) {
    let mut rng = StdRng::seed_from_u64(7);
    let left_ids: Vec<i64> = (0..rows as i64).collect();
    let right_ids: Vec<i64> = (0..rows as i64).map(|i| i + rows as i64 / 2).collect();
    let left_payload: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..1_000)).collect();
    let right_payload: Vec<i64> = (0..rows).map(|_| rng.gen_range(0..1_000)).collect();

    let left = Table::new(vec![
        Column::of("id", left_ids),
        Column::of("value", left_payload),
    ])
    .unwrap();
    let right = Table::new(vec![
        Column::of("id", right_ids),
        Column::of("score", right_payload),
    ])
    .unwrap();
    (left, right)
}

fn bench_inner_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("inner_join");
    for &rows in &[1_000usize, 10_000, 100_000] {
        let (left, right) = build_tables(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(rows),
            &(left, right),
            |b, (left, right)| {
                b.iter(|| black_box(inner_join(left, right, &[JoinKey::on("id")]).unwrap()))
            },
        );
    }
    group.finish();
}

fn bench_left_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("left_join");
    for &rows in &[1_000usize, 10_000, 100_000] {
        let (left, right) = build_tables(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(rows),
            &(left, right),
            |b, (left, right)| {
                b.iter(|| black_box(left_join(left, right, &[JoinKey::on("id")]).unwrap()))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_inner_join, bench_left_join);
criterion_main!(benches);
