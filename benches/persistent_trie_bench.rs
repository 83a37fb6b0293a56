//! Benchmark for Trie vs standard BTreeMap.
//!
//! Compares the copy-on-write trie against `BTreeMap<Vec<u8>, u64>` for the
//! operations a snapshot-versioned catalog performs most.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cowtrie::persistent::Trie;
use std::collections::BTreeMap;
use std::hint::black_box;

fn key_for(index: u64) -> String {
    format!("table/{:08}/column", index.wrapping_mul(2_654_435_761) % 1_000_000)
}

// =============================================================================
// put Benchmark
// =============================================================================

fn benchmark_put(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("put");

    for size in [100u64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("Trie", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut trie = Trie::new();
                for index in 0..size {
                    trie = trie.put(black_box(key_for(index)), black_box(index));
                }
                black_box(trie)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for index in 0..size {
                    map.insert(black_box(key_for(index).into_bytes()), black_box(index));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// get Benchmark
// =============================================================================

fn benchmark_get(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("get");

    for size in [100u64, 1_000, 10_000] {
        let trie: Trie = (0..size).map(|index| (key_for(index), index)).collect();
        let map: BTreeMap<Vec<u8>, u64> = (0..size)
            .map(|index| (key_for(index).into_bytes(), index))
            .collect();
        let keys: Vec<String> = (0..size).map(key_for).collect();

        group.bench_with_input(BenchmarkId::new("Trie", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut sum = 0u64;
                for key in &keys {
                    if let Some(&value) = trie.get::<u64>(black_box(key)) {
                        sum = sum.wrapping_add(value);
                    }
                }
                black_box(sum)
            });
        });

        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut sum = 0u64;
                for key in &keys {
                    if let Some(&value) = map.get(black_box(key.as_bytes())) {
                        sum = sum.wrapping_add(value);
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in [100u64, 1_000, 10_000] {
        let trie: Trie = (0..size).map(|index| (key_for(index), index)).collect();
        let keys: Vec<String> = (0..size).map(key_for).collect();

        group.bench_with_input(BenchmarkId::new("Trie", size), &size, |bencher, _| {
            bencher.iter(|| {
                let mut current = trie.clone();
                for key in &keys {
                    current = current.remove(black_box(key));
                }
                black_box(current)
            });
        });
    }

    group.finish();
}

// =============================================================================
// snapshot Benchmark
// =============================================================================

fn benchmark_snapshot_update(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("snapshot_update");

    let size = 10_000u64;
    let trie: Trie = (0..size).map(|index| (key_for(index), index)).collect();
    let map: BTreeMap<Vec<u8>, u64> = (0..size)
        .map(|index| (key_for(index).into_bytes(), index))
        .collect();

    group.bench_function("Trie", |bencher| {
        bencher.iter(|| black_box(trie.put(black_box("table/new/column"), 1u64)));
    });

    group.bench_function("BTreeMap clone", |bencher| {
        bencher.iter(|| {
            let mut copy = map.clone();
            copy.insert(black_box(b"table/new/column".to_vec()), 1u64);
            black_box(copy)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_put,
    benchmark_get,
    benchmark_remove,
    benchmark_snapshot_update
);
criterion_main!(benches);
