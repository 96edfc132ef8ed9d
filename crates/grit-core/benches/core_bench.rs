//! Criterion benchmarks for grit-core primitives
//!
//! Run with: cargo bench -p grit-core
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use grit_core::{F32x4, LANES, ParamSmoother, fast_tanh};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 256, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.8
        })
        .collect()
}

fn bench_smoother(c: &mut Criterion) {
    let mut group = c.benchmark_group("ParamSmoother");

    group.bench_function("bypassed", |b| {
        let mut s = ParamSmoother::with_time(21.33, SAMPLE_RATE);
        s.set_target(0.5);
        b.iter(|| black_box(s.value()));
    });

    group.bench_function("ramping", |b| {
        let mut s = ParamSmoother::with_time(21.33, SAMPLE_RATE);
        s.set_target(0.0);
        b.iter(|| {
            s.set_target(black_box(1.0));
            black_box(s.value())
        });
    });

    group.finish();
}

fn bench_vector_ops(c: &mut Criterion) {
    let mut group = c.benchmark_group("F32x4");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut output = vec![0.0; block_size];

        group.bench_with_input(
            BenchmarkId::new("clamp_mix", block_size),
            &block_size,
            |b, _| {
                b.iter(|| {
                    for (x, y) in input.chunks_exact(LANES).zip(output.chunks_exact_mut(LANES)) {
                        let x = F32x4::from_slice(x);
                        let wet = (x * 4.0).clamp_unit();
                        wet.mix(x, black_box(0.7)).write_to(y);
                    }
                    black_box(&output);
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("fast_tanh", block_size),
            &block_size,
            |b, _| {
                b.iter(|| {
                    for &x in &input {
                        black_box(fast_tanh(black_box(x * 3.0)));
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_smoother, bench_vector_ops);
criterion_main!(benches);
