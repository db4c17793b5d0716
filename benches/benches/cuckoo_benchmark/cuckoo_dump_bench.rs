use std::{hint::black_box, io::Cursor};

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use small_cuckoo::SmallCuckoo;

const SIZES: &[usize] = &[1_000, 10_000, 65_534];

fn build(n: usize) -> SmallCuckoo {
    let mut rng = SmallRng::seed_from_u64(42);
    let mut index = SmallCuckoo::new(n);
    while index.len() < n {
        let k: u64 = rng.gen();
        if !index.contains_key(k) {
            index.insert(k, k.rotate_left(17));
        }
    }
    index
}

fn bench_serialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump/serialize");

    for &n in SIZES {
        let index = build(n);
        group.throughput(Throughput::Bytes(index.serialized_len() as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n), &index, |b, index| {
            let mut buf = Vec::with_capacity(index.serialized_len());
            b.iter(|| {
                buf.clear();
                index.serialize(&mut buf).unwrap();
                black_box(buf.len())
            })
        });
    }
    group.finish();
}

fn bench_deserialize(c: &mut Criterion) {
    let mut group = c.benchmark_group("dump/deserialize");

    for &n in SIZES {
        let index = build(n);
        let mut bytes = Vec::new();
        index.serialize(&mut bytes).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        // Загрузка включает полную перестройку таблицы слотов
        group.bench_with_input(BenchmarkId::from_parameter(n), &bytes, |b, bytes| {
            b.iter(|| {
                let restored = SmallCuckoo::deserialize(&mut Cursor::new(bytes)).unwrap();
                black_box(restored)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_serialize, bench_deserialize);
criterion_main!(benches);
