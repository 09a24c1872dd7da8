//! Benchmarks for a playing scene: transport, every live line, and the bus.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use glissando::{path::Point, scene::Scene, synth::SynthAllocator, voices::VoiceKind, SketchConfig};

use crate::BLOCK_SIZES;

fn busy_scene(lines: usize) -> Scene {
    let mut scene = Scene::new(SketchConfig::default(), SynthAllocator::new(), 48_000.0);
    scene.toggle_transport();

    for i in 0..lines {
        let kind = VoiceKind::ALL[i % VoiceKind::ALL.len()];
        let y = 100.0 + (i * 37 % 600) as f32;
        let stroke = [
            Point::new(i as f32 * 40.0, y),
            Point::new(i as f32 * 40.0 + 200.0, y - 80.0),
            Point::new(i as f32 * 40.0 + 500.0, y + 40.0),
        ];
        let _ = scene.add_stroke_with(&stroke, kind, 0.0);
    }
    scene
}

pub fn bench_scene(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/scene");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for &lines in &[1usize, 8, 24] {
            let mut scene = busy_scene(lines);
            group.bench_with_input(
                BenchmarkId::new(format!("{lines}_lines"), size),
                &size,
                |b, _| b.iter(|| scene.render_audio(black_box(&mut buffer))),
            );
        }
    }

    group.finish();
}
