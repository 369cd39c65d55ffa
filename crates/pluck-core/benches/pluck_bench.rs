//! Benchmarks for path traversal.
//!
//! Run with: cargo bench -p pluck-core --bench pluck_bench

use criterion::{Criterion, criterion_group, criterion_main};
use pluck_core::{PluckPath, Value, pluck, pluck_path};
use std::hint::black_box;

fn wide_array(len: usize) -> Value {
    Value::array((0..len).map(|i| {
        Value::object([
            ("id", Value::from(i as u64)),
            ("meta", Value::object([("label", format!("item-{i}"))])),
        ])
    }))
}

fn deep_object(depth: usize) -> (Value, PluckPath) {
    let mut value = Value::from("leaf");
    let mut path = PluckPath::new();
    for i in 0..depth {
        value = Value::object([(format!("k{i}"), value)]);
        path.push(format!("k{}", depth - 1 - i));
    }
    (value, path)
}

fn bench_pluck(c: &mut Criterion) {
    let mut group = c.benchmark_group("pluck");

    let (deep, deep_path) = deep_object(32);
    group.bench_function("deep_object_32", |b| {
        b.iter(|| pluck(black_box(&deep), black_box(deep_path.as_slice())))
    });

    let wide = wide_array(1_000);
    let index_path = pluck_path![500, "meta", "label"];
    group.bench_function("array_index_1k", |b| {
        b.iter(|| pluck(black_box(&wide), black_box(index_path.as_slice())))
    });

    let map_path = pluck_path!["meta", "label"];
    group.bench_function("array_map_over_1k", |b| {
        b.iter(|| pluck(black_box(&wide), black_box(map_path.as_slice())))
    });

    group.finish();
}

criterion_group!(benches, bench_pluck);
criterion_main!(benches);
