// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping Latency Benchmark
//!
//! Measures `Mapper::map()` latency for:
//! - Flat structs (field copy only)
//! - Nested structs with references and sequences
//! - Custom transforms (typed shortcut)
//! - Sequences of increasing length

#![allow(clippy::uninlined_format_args)]
#![allow(clippy::cast_possible_truncation)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dtomap::{Mappable, Mapper};
use std::hint::black_box as bb;

#[derive(Mappable, Default, Clone)]
#[mapper(namespace = "bench::db")]
struct Flat {
    pub id: u64,
    pub name: String,
    pub score: i32,
    pub active: bool,
}

#[derive(Mappable, Default)]
#[mapper(namespace = "bench::api")]
struct FlatDto {
    pub id: u64,
    pub name: String,
    pub score: i64,
    pub active: bool,
}

#[derive(Mappable, Default, Clone)]
#[mapper(namespace = "bench::db")]
struct Nested {
    pub id: u64,
    pub owner: Option<Flat>,
    pub items: Vec<Flat>,
}

#[derive(Mappable, Default)]
#[mapper(namespace = "bench::api")]
struct NestedDto {
    pub id: u64,
    pub owner: Option<FlatDto>,
    pub items: Vec<FlatDto>,
}

#[derive(Mappable, Default, Clone)]
#[mapper(namespace = "bench::db")]
struct Tagged {
    pub label: String,
}

#[derive(Mappable, Default)]
#[mapper(namespace = "bench::api")]
struct TaggedDto {
    pub label: String,
}

fn flat(i: u64) -> Flat {
    Flat {
        id: i,
        name: format!("item-{}", i),
        score: fastrand::i32(..),
        active: fastrand::bool(),
    }
}

fn mapper() -> Mapper {
    let mapper = Mapper::new();
    mapper
        .create_map::<Flat, FlatDto>()
        .expect("flat registration");
    mapper
        .create_map::<Nested, NestedDto>()
        .expect("nested registration");
    mapper
        .create_custom_map::<Tagged, TaggedDto, _>(|t| TaggedDto {
            label: t.label.to_uppercase(),
        })
        .expect("custom registration");
    mapper
}

/// Single-object latency
fn bench_single(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_single");
    let mapper = mapper();

    let src = flat(7);
    group.bench_function("flat", |b| {
        b.iter(|| bb(mapper.map::<Flat, FlatDto>(bb(&src)).expect("map")));
    });

    let nested = Nested {
        id: 1,
        owner: Some(flat(0)),
        items: (0..8).map(flat).collect(),
    };
    group.bench_function("nested_8", |b| {
        b.iter(|| bb(mapper.map::<Nested, NestedDto>(bb(&nested)).expect("map")));
    });

    let tagged = Tagged {
        label: "hello".into(),
    };
    group.bench_function("custom", |b| {
        b.iter(|| bb(mapper.map::<Tagged, TaggedDto>(bb(&tagged)).expect("map")));
    });

    group.finish();
}

/// Sequence mapping throughput
fn bench_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_sequence");
    let mapper = mapper();

    for len in [16usize, 256, 4096] {
        let src: Vec<Flat> = (0..len as u64).map(flat).collect();
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &src, |b, src| {
            b.iter(|| bb(mapper.map::<Vec<Flat>, Vec<FlatDto>>(bb(src)).expect("map")));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single, bench_sequence);
criterion_main!(benches);
