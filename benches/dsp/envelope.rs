//! Benchmarks for the ADSR envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use glissando::dsp::envelope::{Envelope, EnvelopeShape};

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        let mut env = Envelope::new(EnvelopeShape::adsr(0.8, 3.0, 0.1, 1.0));
        env.note_on();
        group.bench_with_input(BenchmarkId::new("pad_attack", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), 48_000.0))
        });

        let mut env = Envelope::new(EnvelopeShape::adsr(0.001, 0.001, 0.5, 10.0));
        env.note_on();
        env.render(&mut buffer, 48_000.0);
        env.note_off(48_000.0);
        group.bench_with_input(BenchmarkId::new("long_release", size), &size, |b, _| {
            b.iter(|| env.render(black_box(&mut buffer), 48_000.0))
        });
    }

    group.finish();
}
