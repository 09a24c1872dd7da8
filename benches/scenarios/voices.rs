//! Benchmarks for each built-in voice, mid-glide.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use glissando::{
    synth::{Voice, VoiceFactory},
    voices::VoiceKind,
};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        for kind in VoiceKind::ALL {
            let mut voice = kind.profile().create_voice();
            voice.trigger_onset(110.0);
            voice.ramp_frequency_to(880.0, 4.0);

            group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, _| {
                b.iter(|| voice.render_block(black_box(&mut buffer), 48_000.0))
            });
        }
    }

    group.finish();
}
