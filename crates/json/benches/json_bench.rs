//! Benchmarks for basalt-json using criterion.

use basalt_json::{compare_raw, JsonValue};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn document(fields: usize) -> String {
    let body: Vec<String> = (0..fields)
        .map(|i| format!(r#""field_{i:04}":{{"id":{i},"score":{}.5,"tags":["a","b","c"]}}"#, i * 3))
        .collect();
    format!("{{{}}}", body.join(","))
}

fn parse_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [10, 100, 1000].iter() {
        let text = document(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(JsonValue::parse(text).unwrap()));
        });
    }

    group.finish();
}

fn compare_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");

    for size in [10, 100, 1000].iter() {
        let left = JsonValue::parse(document(*size)).unwrap();
        let right = left.clone();
        group.bench_with_input(BenchmarkId::new("value", size), size, |b, _| {
            b.iter(|| black_box(left.compare(&right)));
        });
        group.bench_with_input(BenchmarkId::new("raw", size), size, |b, _| {
            b.iter(|| black_box(compare_raw(left.as_bytes(), right.as_bytes()).unwrap()));
        });
    }

    group.finish();
}

fn field_lookup_benchmark(c: &mut Criterion) {
    let doc = JsonValue::parse(document(1000)).unwrap();

    c.bench_function("field_lookup_1000", |b| {
        b.iter(|| {
            for i in (0..1000).step_by(10) {
                black_box(doc.view().get(&format!("field_{i:04}")));
            }
        });
    });
}

fn hash_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");

    for size in [10, 100, 1000].iter() {
        let doc = JsonValue::parse(document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(doc.hash64()));
        });
    }

    group.finish();
}

fn format_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");

    for size in [10, 100, 1000].iter() {
        let doc = JsonValue::parse(document(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(doc.to_json_string().unwrap()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    parse_benchmark,
    compare_benchmark,
    field_lookup_benchmark,
    hash_benchmark,
    format_benchmark
);
criterion_main!(benches);
