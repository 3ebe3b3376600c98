//! Criterion benchmarks for the reverb engine
//!
//! Run with: cargo bench -p sala-reverb
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sala_core::{AudioBlock, Effect, ProcessSpec};
use sala_reverb::{Reverb, ReverbBridge, ReverbParams};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("Reverb");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process_stereo", block_size),
            &block_size,
            |b, _| {
                let mut reverb = Reverb::new();
                reverb.prepare(&ProcessSpec::new(f64::from(SAMPLE_RATE), block_size as u32, 2));
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    reverb.process_stereo(black_box(&mut left), black_box(&mut right));
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("process_mono", block_size),
            &block_size,
            |b, _| {
                let mut reverb = Reverb::new();
                reverb.prepare(&ProcessSpec::new(f64::from(SAMPLE_RATE), block_size as u32, 1));
                let mut mono = input.clone();
                b.iter(|| {
                    mono.copy_from_slice(&input);
                    reverb.process_mono(black_box(&mut mono));
                });
            },
        );
    }

    group.finish();
}

fn bench_bridge(c: &mut Criterion) {
    let mut group = c.benchmark_group("ReverbBridge");
    let params = ReverbParams::default();

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);

        group.bench_with_input(
            BenchmarkId::new("process", block_size),
            &block_size,
            |b, _| {
                let mut bridge = ReverbBridge::new(&params);
                bridge.prepare(&ProcessSpec::new(f64::from(SAMPLE_RATE), block_size as u32, 2));
                let mut left = input.clone();
                let mut right = input.clone();
                b.iter(|| {
                    left.copy_from_slice(&input);
                    right.copy_from_slice(&input);
                    let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
                    bridge.process(black_box(&mut AudioBlock::new(&mut channels)));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_engine, bench_bridge);
criterion_main!(benches);
