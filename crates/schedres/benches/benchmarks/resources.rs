use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};

use schedres::resources::{Quantity, ResourceList, ResourceQuantity};

fn create_list(entry_count: usize) -> ResourceList {
    let names = ["cpu", "memory", "accelerator-count", "ephemeral-storage"];
    (0..entry_count)
        .map(|i| (names[i % names.len()], Quantity::from_milli(i as i128 * 250)))
        .collect()
}

fn bench_from_resource_list(c: &mut Criterion) {
    for entry_count in [3, 100, 10_000] {
        let list = create_list(entry_count);
        c.bench_with_input(
            BenchmarkId::new("aggregate resource list", entry_count),
            &list,
            |b, list| {
                b.iter(|| ResourceQuantity::from_resource_list(black_box(list)));
            },
        );
    }
}

fn bench_parse_list(c: &mut Criterion) {
    c.bench_function("parse resource list", |b| {
        b.iter(|| {
            black_box("cpu=1500m,memory=2Gi,accelerator-count=1")
                .parse::<ResourceList>()
                .unwrap()
        });
    });
}

fn bench_reserve_release(c: &mut Criterion) {
    let request = ResourceQuantity::new(250.0, 512.0 * 1024.0 * 1024.0, 0.0);
    c.bench_function("reserve and release", |b| {
        b.iter(|| {
            let mut free = ResourceQuantity::new(64_000.0, 256.0 * 1024.0 * 1024.0 * 1024.0, 8.0);
            while request.less_equal(&free) && free.can_subtract(&request) {
                free.sub(black_box(&request));
            }
            free.add(&request);
            free
        });
    });
}

pub fn benchmark(c: &mut Criterion) {
    bench_from_resource_list(c);
    bench_parse_list(c);
    bench_reserve_release(c);
}
