// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolver Benchmark
//!
//! Measures type resolution over a synthetic metadata table:
//! - cold resolution of every id (fresh cache each iteration)
//! - warm lookups served from the memo cache
//! - diamond-shaped graphs where naive recursion is exponential

#![allow(clippy::cast_possible_truncation)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scalemeta::portable::{Field, PortableRegistry, PortableTable, PortableType, TypeDefVariant};
use scalemeta::types::{KnownTypes, PrimitiveKind};
use scalemeta::ResolverConfig;
use std::sync::Arc;

/// Primitives, then layers of composites each referencing the previous layer twice.
fn diamond_table(layers: u32) -> PortableTable {
    let mut types = vec![PortableType::new(0, TypeDefVariant::Primitive(PrimitiveKind::U64))];
    for id in 1..=layers {
        types.push(PortableType::new(
            id,
            TypeDefVariant::Composite {
                fields: vec![Field::named("left", id - 1), Field::named("right", id - 1)],
            },
        ));
    }
    PortableTable::new(types).unwrap()
}

fn runtime_like_table(count: u32) -> PortableTable {
    let mut types = vec![
        PortableType::new(0, TypeDefVariant::Primitive(PrimitiveKind::U8)),
        PortableType::new(1, TypeDefVariant::Sequence { element: 0 }),
    ];
    for id in 2..count {
        let def = match id % 4 {
            0 => TypeDefVariant::Sequence { element: id - 1 },
            1 => TypeDefVariant::Tuple(vec![id - 1, id - 2]),
            2 => TypeDefVariant::Compact { inner: 0 },
            _ => TypeDefVariant::Composite {
                fields: vec![Field::unnamed(id - 1)],
            },
        };
        let ty = PortableType::new(id, def);
        types.push(if id % 4 == 3 {
            ty.with_path(["pallet", "types", "Wrapper"])
        } else {
            ty
        });
    }
    PortableTable::new(types).unwrap()
}

fn bench_cold(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_all_cold");
    for count in [64u32, 512, 2048] {
        let table = runtime_like_table(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &table, |b, table| {
            b.iter(|| {
                let registry = PortableRegistry::new(table.clone(), Arc::new(KnownTypes::new()));
                black_box(registry.resolve_all().unwrap())
            });
        });
    }
    group.finish();
}

fn bench_warm(c: &mut Criterion) {
    let registry = PortableRegistry::new(runtime_like_table(2048), Arc::new(KnownTypes::new()));
    registry.resolve_all().unwrap();

    c.bench_function("get_type_def_warm", |b| {
        let mut id = 0u32;
        b.iter(|| {
            id = (id + 1) % 2048;
            black_box(registry.get_type_def(id).unwrap())
        });
    });
}

fn bench_diamond(c: &mut Criterion) {
    // 2^12 paths without memoization.
    let table = diamond_table(12);
    c.bench_function("diamond_12_layers", |b| {
        b.iter(|| {
            let registry = PortableRegistry::new(table.clone(), Arc::new(KnownTypes::new()))
                .with_config(ResolverConfig::default().with_max_name_len(usize::MAX));
            black_box(registry.type_name(12).unwrap())
        });
    });
}

criterion_group!(benches, bench_cold, bench_warm, bench_diamond);
criterion_main!(benches);
