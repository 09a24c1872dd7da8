//! Benchmarks for the shared output bus (chorus, reverb, limiter).

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use glissando::synth::MixBus;

use crate::BLOCK_SIZES;

pub fn bench_bus(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/bus");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.05).sin() * 0.8).collect();
        let mut buffer = input.clone();
        let mut bus = MixBus::new(48_000.0);

        group.bench_with_input(BenchmarkId::new("mix_bus", size), &size, |b, _| {
            b.iter(|| {
                buffer.copy_from_slice(&input);
                bus.process(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
