//! Benchmarks for the state-variable filter with a moving cutoff.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use glissando::dsp::filter::{FilterType, SVFilter};

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let mut buffer = input.clone();

        for (name, kind) in [
            ("lowpass", FilterType::LowPass),
            ("highpass", FilterType::HighPass),
            ("bandpass", FilterType::BandPass),
        ] {
            let mut filter = SVFilter::new(kind).with_resonance(0.875);
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    for (i, (out, &x)) in buffer.iter_mut().zip(input.iter()).enumerate() {
                        let cutoff = 200.0 + i as f32 * 4.0;
                        *out = filter.process(black_box(x), cutoff, 48_000.0);
                    }
                })
            });
        }
    }

    group.finish();
}
