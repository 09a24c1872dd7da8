//! Benchmarks for note-line construction: segmenting a stroke and
//! rasterising its ribbon.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use glissando::{
    line::NoteLine,
    mapping::CoordinateMapper,
    path::{segment_path, Point},
    synth::SynthAllocator,
    transport::{LoopScheduler, Scheduler},
    voices::VoiceKind,
    SketchConfig,
};

/// A wavy left-to-right stroke with a point every 5 px
fn stroke(points: usize) -> Vec<Point> {
    (0..points)
        .map(|i| {
            let x = 20.0 + i as f32 * 5.0;
            Point::new(x, 400.0 + (x * 0.02).sin() * 150.0)
        })
        .collect()
}

pub fn bench_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/lines");
    let config = SketchConfig::default();
    let mapper = CoordinateMapper::new(&config);

    for &points in &[16usize, 64, 200] {
        let path = stroke(points);

        group.bench_with_input(BenchmarkId::new("segment", points), &points, |b, _| {
            b.iter(|| segment_path(black_box(&path), &mapper))
        });

        group.bench_with_input(BenchmarkId::new("construct", points), &points, |b, _| {
            let mut allocator = SynthAllocator::new();
            let mut scheduler = LoopScheduler::new(config.loop_duration as f64);
            b.iter(|| {
                let line = NoteLine::new(
                    black_box(&path),
                    VoiceKind::Pad,
                    &config,
                    0.0,
                    &mut allocator,
                    &mut scheduler,
                );
                if let Ok(line) = line {
                    scheduler.cancel(line.part());
                }
            })
        });
    }

    group.finish();
}
