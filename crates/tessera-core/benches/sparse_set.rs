//! Arena churn benchmarks for the object store.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use tessera_core::alloc::{
    HashMap,
    sparse_set::{IndexSlot, SparseSet},
};

#[derive(Clone, Copy, Default)]
struct Slot {
    id: u64,
    dirty: bool,
}

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_push");
    for size in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut set = SparseSet::with_capacity(size);
                for i in 0..size {
                    set.push(black_box(Slot { id: i as u64, dirty: false }));
                }
                set
            });
        });
    }
    group.finish();
}

fn bench_lookup_vs_hashmap(c: &mut Criterion) {
    let mut group = c.benchmark_group("sparse_set_lookup");
    let size = 1000;
    group.throughput(Throughput::Elements(size as u64));

    let mut set = SparseSet::new();
    let slots: Vec<IndexSlot> = (0..size).map(|i| set.push(Slot { id: i, dirty: false })).collect();
    group.bench_function("sparse_set", |b| {
        b.iter(|| {
            let mut dirty = 0;
            for &idx in &slots {
                dirty += set.get(black_box(idx)).dirty as u32;
            }
            black_box(dirty)
        });
    });

    let map: HashMap<u64, Slot> = (0..size).map(|i| (i, Slot { id: i, dirty: false })).collect();
    group.bench_function("hashmap", |b| {
        b.iter(|| {
            let mut dirty = 0;
            for i in 0..size {
                if let Some(slot) = map.get(&black_box(i)) {
                    dirty += slot.dirty as u32;
                }
            }
            black_box(dirty)
        });
    });
    group.finish();
}

fn bench_create_delete_cycle(c: &mut Criterion) {
    c.bench_function("sparse_set_create_delete_cycle", |b| {
        let mut set = SparseSet::new();
        b.iter(|| {
            let slots: Vec<_> = (0..64).map(|i| set.push(Slot { id: i, dirty: true })).collect();
            for idx in slots {
                black_box(set.remove(idx).id);
            }
        });
    });
}

criterion_group!(benches, bench_push, bench_lookup_vs_hashmap, bench_create_delete_cycle);
criterion_main!(benches);
