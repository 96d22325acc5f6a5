// tamarin-parser - Parser throughput benchmark
// Copyright (c) 2025 Tom Waddington. MIT licensed.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use tamarin_parser::parse;

pub fn criterion_benchmark(c: &mut Criterion) {
    let input = "
    let people = [{\"name\": \"Alice\", \"age\": 24}, {\"name\": \"Anna\", \"age\": 28}];
    let getName = fn(person) { person[\"name\"]; };
    let map = fn(arr, f) {
        let iter = fn(arr, accumulated) {
            if (len(arr) == 0) {
                accumulated
            } else {
                iter(rest(arr), push(accumulated, f(first(arr))));
            }
        };
        iter(arr, []);
    };
    let reduce = fn(arr, initial, f) {
        let iter = fn(arr, result) {
            if (len(arr) == 0) {
                result
            } else {
                iter(rest(arr), f(result, first(arr)));
            }
        };
        iter(arr, initial);
    };
    map(people, getName);
    reduce([1, 2, 3, 4, 5], 0, fn(a, b) { a + b });
    ";
    c.bench_function("parser", |b| {
        b.iter(|| assert!(parse(black_box(input)).is_ok()))
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(1000);
    targets = criterion_benchmark
}
criterion_main!(benches);
