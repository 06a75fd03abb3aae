//! Benchmarks for token encoding and panel synchronisation
//!
//! Measures the base32 codec on its own and the full encode/apply cycle of
//! the classic panel.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use tokenflags::prelude::*;

fn bench_base32(c: &mut Criterion) {
    let mut group = c.benchmark_group("base32");

    for size in [1usize, 15, 64] {
        let bytes: Vec<u8> = (0..size).map(|i| (i * 37) as u8).collect();
        let token = Base32::encode(&bytes);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("encode", size), &bytes, |b, bytes| {
            b.iter(|| black_box(Base32::encode(black_box(bytes))))
        });
        group.bench_with_input(BenchmarkId::new("decode", size), &token, |b, token| {
            b.iter(|| black_box(Base32::decode(black_box(token.as_str()))))
        });
        group.bench_with_input(BenchmarkId::new("check", size), &token, |b, token| {
            b.iter(|| black_box(Base32::check(black_box(token.as_str()), size)))
        });
    }

    group.finish();
}

fn bench_panel(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel");

    group.bench_function("build_classic", |b| {
        b.iter(|| black_box(preset::classic()))
    });

    let mut panel = match preset::classic() {
        Ok(panel) => panel,
        Err(e) => panic!("classic panel failed to build: {}", e),
    };

    group.bench_function("encode_classic", |b| {
        b.iter(|| black_box(panel.encode()))
    });

    group.bench_function("apply_classic", |b| {
        b.iter(|| panel.apply(black_box(DEFAULT_TOKEN)))
    });

    group.bench_function("toggle_and_encode", |b| {
        b.iter(|| {
            let _ = panel.activate("fast-text");
            black_box(panel.encode())
        })
    });

    group.finish();
}

criterion_group!(benches, bench_base32, bench_panel);
criterion_main!(benches);
