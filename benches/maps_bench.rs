//! Benchmark for OrderedMap vs ChainedHashMap.
//!
//! Times the three things a map gets used for most: filling it with random
//! keys, probing it for keys, and walking every entry once. The hash map is
//! given half as many buckets as planned entries, plus one.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing_subscriber::EnvFilter;
use twin_maps::{ChainedHashMap, Map, OrderedMap};

const SEED: u64 = 0x5eed;
const SIZES: [i32; 3] = [1_000, 10_000, 100_000];

fn random_keys(size: i32) -> Vec<i32> {
    let mut rng = StdRng::seed_from_u64(SEED);
    (0..size).map(|_| rng.random_range(0..size)).collect()
}

fn bucket_count_for(size: i32) -> usize {
    size as usize / 2 + 1
}

fn hash_map_for(size: i32) -> ChainedHashMap<i32, i32> {
    match ChainedHashMap::with_buckets(bucket_count_for(size)) {
        Ok(map) => map,
        Err(error) => panic!("cannot build benchmark map: {error}"),
    }
}

fn populate<M: Map<i32, i32>>(map: &mut M, keys: &[i32]) {
    for (index, key) in keys.iter().enumerate() {
        *map.get_or_insert(*key) = index as i32;
    }
}

fn init_tracing() {
    // RUST_LOG=twin_maps=debug shows the maps being built
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

// =============================================================================
// populate Benchmark
// =============================================================================

fn benchmark_populate(criterion: &mut Criterion) {
    init_tracing();
    let mut group = criterion.benchmark_group("populate");

    for size in SIZES {
        let keys = random_keys(size);

        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = OrderedMap::new();
                populate(&mut map, black_box(keys));
                black_box(map)
            });
        });

        group.bench_with_input(BenchmarkId::new("ChainedHashMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = hash_map_for(size);
                populate(&mut map, black_box(keys));
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// find Benchmark
// =============================================================================

fn benchmark_find(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("find");

    for size in SIZES {
        let keys = random_keys(size);
        let mut tree = OrderedMap::new();
        populate(&mut tree, &keys);
        let mut hash = hash_map_for(size);
        populate(&mut hash, &keys);

        group.bench_with_input(BenchmarkId::new("OrderedMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut hits = 0;
                for key in (1..=size).rev() {
                    if !tree.find(&black_box(key)).is_end() {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });

        group.bench_with_input(BenchmarkId::new("ChainedHashMap", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut hits = 0;
                for key in (1..=size).rev() {
                    if !hash.find(&black_box(key)).is_end() {
                        hits += 1;
                    }
                }
                black_box(hits)
            });
        });
    }

    group.finish();
}

// =============================================================================
// iterate Benchmark
// =============================================================================

fn benchmark_iterate(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iterate");

    for size in SIZES {
        let keys = random_keys(size);
        let mut tree = OrderedMap::new();
        populate(&mut tree, &keys);
        let mut hash = hash_map_for(size);
        populate(&mut hash, &keys);

        group.bench_function(BenchmarkId::new("OrderedMap", size), |bencher| {
            bencher.iter(|| {
                let mut cursor = tree.begin();
                while cursor.move_next().is_ok() {}
                black_box(cursor.is_end())
            });
        });

        group.bench_function(BenchmarkId::new("ChainedHashMap", size), |bencher| {
            bencher.iter(|| {
                let mut cursor = hash.begin();
                while cursor.move_next().is_ok() {}
                black_box(cursor.is_end())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_populate, benchmark_find, benchmark_iterate);

criterion_main!(benches);
