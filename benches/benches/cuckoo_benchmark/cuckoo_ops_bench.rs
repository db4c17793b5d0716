use std::{collections::HashMap, hint::black_box, time::Duration};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use small_cuckoo::{HashScheme, KeyMixing, SecondHash, SmallCuckoo, DEFAULT_MAX_LOOPS};

const SIZES: &[usize] = &[100, 1_000, 10_000, 65_534];

fn random_keys(n: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(0xc0c0);
    let mut keys: Vec<u64> = (0..n).map(|_| rng.gen()).collect();
    keys.sort_unstable();
    keys.dedup();
    keys
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("cuckoo/insert");
    group.warm_up_time(Duration::from_secs(2));
    group.measurement_time(Duration::from_secs(5));

    for &n in SIZES {
        let keys = random_keys(n);
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("hint_0", n), &keys, |b, keys| {
            b.iter(|| {
                let mut index = SmallCuckoo::new(0);
                for &k in keys {
                    index.insert(black_box(k), k);
                }
                black_box(index)
            })
        });

        group.bench_with_input(BenchmarkId::new("exact_hint", n), &keys, |b, keys| {
            b.iter(|| {
                let mut index = SmallCuckoo::new(keys.len());
                for &k in keys {
                    index.insert(black_box(k), k);
                }
                black_box(index)
            })
        });

        group.bench_with_input(BenchmarkId::new("jenkins_full", n), &keys, |b, keys| {
            let scheme = HashScheme::new(KeyMixing::Full, SecondHash::Jenkins);
            b.iter(|| {
                let mut index = SmallCuckoo::with_scheme(keys.len(), scheme, DEFAULT_MAX_LOOPS);
                for &k in keys {
                    index.insert(black_box(k), k);
                }
                black_box(index)
            })
        });

        group.bench_with_input(BenchmarkId::new("std_hashmap", n), &keys, |b, keys| {
            b.iter(|| {
                let mut map = HashMap::with_capacity(keys.len());
                for &k in keys {
                    map.insert(black_box(k), k);
                }
                black_box(map)
            })
        });
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("cuckoo/find");

    for &n in SIZES {
        let keys = random_keys(n);
        let index: SmallCuckoo = keys.iter().map(|&k| (k, k)).collect();
        let misses: Vec<u64> = keys.iter().map(|k| k ^ 1).collect();
        group.throughput(Throughput::Elements(keys.len() as u64));

        group.bench_with_input(BenchmarkId::new("hit", n), &keys, |b, keys| {
            b.iter(|| {
                for &k in keys {
                    black_box(index.find(black_box(k)));
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("miss", n), &misses, |b, misses| {
            b.iter(|| {
                for &k in misses {
                    black_box(index.find(black_box(k)));
                }
            })
        });
    }
    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("cuckoo/iter");

    for &n in SIZES {
        let index: SmallCuckoo = random_keys(n).into_iter().map(|k| (k, k)).collect();
        group.throughput(Throughput::Elements(index.len() as u64));

        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| black_box(index.iter().fold(0u64, |acc, (k, v)| acc ^ k ^ v)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert, bench_find, bench_iter);
criterion_main!(benches);
