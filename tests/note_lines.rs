use std::sync::{Arc, Mutex};

use glissando::{
    color::Rgba,
    dsp::EnvelopeShape,
    path::Point,
    scene::Scene,
    synth::{SynthAllocator, Voice, VoiceAllocator},
    visual::RenderSurface,
    voices::VoiceKind,
    NoteLineError, SketchConfig,
};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Onset(f32),
    Glide(f32, f32),
    Release,
    Dispose,
}

type Log = Arc<Mutex<Vec<Call>>>;

struct RecordingVoice {
    log: Log,
}

impl Voice for RecordingVoice {
    fn trigger_onset(&mut self, frequency: f32) {
        self.log.lock().unwrap().push(Call::Onset(frequency));
    }

    fn trigger_release(&mut self) {
        self.log.lock().unwrap().push(Call::Release);
    }

    fn ramp_frequency_to(&mut self, frequency: f32, duration: f32) {
        self.log.lock().unwrap().push(Call::Glide(frequency, duration));
    }

    fn envelope(&self) -> EnvelopeShape {
        EnvelopeShape::adsr(0.5, 0.5, 0.5, 2.0)
    }

    fn render_block(&mut self, out: &mut [f32], _sample_rate: f32) {
        out.fill(0.0);
    }

    fn dispose(&mut self) {
        self.log.lock().unwrap().push(Call::Dispose);
    }
}

struct RecordingAllocator {
    log: Log,
}

impl VoiceAllocator for RecordingAllocator {
    fn allocate(&mut self, _kind: VoiceKind) -> Result<Box<dyn Voice>, NoteLineError> {
        Ok(Box::new(RecordingVoice {
            log: Arc::clone(&self.log),
        }))
    }
}

/// Fails every other allocation
struct FlakyAllocator {
    calls: usize,
}

impl VoiceAllocator for FlakyAllocator {
    fn allocate(&mut self, kind: VoiceKind) -> Result<Box<dyn Voice>, NoteLineError> {
        self.calls += 1;
        if self.calls % 2 == 0 {
            return Err(NoteLineError::VoiceAllocationFailure("no voices left".into()));
        }
        SynthAllocator::new().allocate(kind)
    }
}

#[derive(Default)]
struct RecordingSurface {
    frames: Vec<(f32, usize)>,
}

impl RenderSurface for RecordingSurface {
    fn set_global_alpha(&mut self, alpha: f32) {
        if alpha < 1.0 || self.frames.is_empty() {
            self.frames.push((alpha, 0));
        }
    }

    fn fill_rect(&mut self, _center: Point, _width: f32, height: f32, color: Rgba) {
        assert!(height >= 0.0 && height <= 30.0);
        assert!((0.0..=1.0).contains(&color.a));
        if let Some(frame) = self.frames.last_mut() {
            frame.1 += 1;
        }
    }
}

fn triangle() -> Vec<Point> {
    vec![Point::new(100.0, 600.0), Point::new(400.0, 200.0), Point::new(700.0, 600.0)]
}

fn recording_scene() -> (Scene<RecordingAllocator>, Log) {
    let log = Log::default();
    let allocator = RecordingAllocator { log: Arc::clone(&log) };
    (Scene::new(SketchConfig::default(), allocator, 48_000.0), log)
}

#[test]
fn line_lives_for_six_loops() {
    let (mut scene, log) = recording_scene();
    scene.add_stroke(&triangle(), 1_000.0).unwrap();

    let mut surface = RecordingSurface::default();
    scene.draw_frame(1_000.0, &mut surface);
    scene.draw_frame(25_000.0, &mut surface);
    scene.draw_frame(48_999.0, &mut surface);
    assert_eq!(scene.lines().len(), 1);

    let alphas: Vec<f32> = surface.frames.iter().map(|f| f.0).collect();
    assert_eq!(alphas[0], 1.0);
    assert_eq!(alphas[1], 0.5);
    assert!(alphas[2] > 0.0 && alphas[2] < 0.001);
    assert!(surface.frames.iter().all(|f| f.1 > 0));

    let before = surface.frames.len();
    scene.draw_frame(49_000.0, &mut surface);
    assert_eq!(surface.frames.len(), before);
    assert!(scene.lines().is_empty());
    assert_eq!(scene.scheduler().part_count(), 0);

    let disposals = log.lock().unwrap().iter().filter(|c| **c == Call::Dispose).count();
    assert_eq!(disposals, 1);
}

#[test]
fn two_points_never_make_a_line() {
    let (mut scene, _) = recording_scene();
    let result = scene.add_stroke(&triangle()[..2], 0.0);
    assert_eq!(result, Err(NoteLineError::InvalidPath { points: 2, required: 3 }));
    assert!(scene.lines().is_empty());

    scene.add_stroke(&triangle(), 0.0).unwrap();
    assert_eq!(scene.lines().len(), 1);
}

#[test]
fn loop_replays_onset_glides_and_release() {
    let (mut scene, log) = recording_scene();
    scene.toggle_transport();
    scene.add_stroke(&triangle(), 0.0).unwrap();

    // 2 s release at 150 px/s puts the tail at x = 1000 (6.67 s)
    let tail = scene.lines()[0].path()[3];
    assert_eq!(tail, Point::new(1000.0, 600.0));

    let mut block = vec![0.0f32; 4_800];
    for _ in 0..80 {
        scene.render_audio(&mut block);
    }

    let calls = log.lock().unwrap().clone();
    let onsets = calls.iter().filter(|c| matches!(c, Call::Onset(_))).count();
    let glides = calls.iter().filter(|c| matches!(c, Call::Glide(..))).count();
    let releases = calls.iter().filter(|c| **c == Call::Release).count();
    assert_eq!((onsets, glides, releases), (1, 2, 1));

    // y = 600 is one octave above the 55 Hz floor. The first vertex gates on
    // instead of gliding, so the climb to the peak is never heard as a glide.
    assert_eq!(
        calls[..4],
        [
            Call::Onset(110.0),
            Call::Glide(110.0, 2.0),
            Call::Glide(110.0, 2.0),
            Call::Release,
        ]
    );

    // Second loop starts the same way
    for _ in 0..10 {
        scene.render_audio(&mut block);
    }
    assert_eq!(log.lock().unwrap()[4], calls[0]);
}

#[test]
fn failed_allocation_only_affects_that_stroke() {
    let mut scene = Scene::new(SketchConfig::default(), FlakyAllocator { calls: 0 }, 48_000.0);

    scene.add_stroke(&triangle(), 0.0).unwrap();
    let failed = scene.add_stroke(&triangle(), 0.0);
    assert!(matches!(failed, Err(NoteLineError::VoiceAllocationFailure(_))));
    scene.add_stroke(&triangle(), 0.0).unwrap();

    assert_eq!(scene.lines().len(), 2);
    assert_eq!(scene.scheduler().part_count(), 2);
}

#[test]
fn drawing_through_the_session() {
    let mut scene = Scene::new(SketchConfig::default(), SynthAllocator::new(), 48_000.0);
    scene.select_voice(VoiceKind::Membrane);

    scene.begin_stroke();
    for i in 0..20 {
        scene.extend_stroke(100.0 + i as f32 * 10.0, 300.0 + i as f32, true);
    }
    assert!(scene.session().is_drawing());

    // Snap held: every captured point sits on the first snapped row
    let ys: Vec<f32> = scene.session().stroke().iter().map(|p| p.y).collect();
    assert!(ys.windows(2).all(|w| w[0] == w[1]));

    assert_eq!(scene.finish_stroke(0.0), Ok(true));
    assert_eq!(scene.lines()[0].kind(), VoiceKind::Membrane);

    scene.begin_stroke();
    scene.extend_stroke(10.0, 10.0, false);
    scene.cancel_stroke();
    assert_eq!(scene.finish_stroke(0.0), Ok(false));
    assert_eq!(scene.lines().len(), 1);
}

#[test]
fn busy_scene_output_stays_bounded() {
    let mut scene = Scene::new(SketchConfig::default(), SynthAllocator::new(), 48_000.0);
    scene.toggle_transport();
    for (i, kind) in VoiceKind::ALL.into_iter().enumerate() {
        let offset = i as f32 * 60.0;
        let stroke = [
            Point::new(offset, 500.0 - offset),
            Point::new(offset + 150.0, 300.0),
            Point::new(offset + 400.0, 450.0),
        ];
        scene.add_stroke_with(&stroke, kind, 0.0).unwrap();
    }

    let mut block = vec![0.0f32; 2_048];
    let mut peak = 0.0f32;
    for _ in 0..100 {
        scene.render_audio(&mut block);
        peak = block.iter().fold(peak, |acc, s| acc.max(s.abs()));
        assert!(block.iter().all(|s| s.is_finite()));
    }
    assert!(peak > 0.0);
    assert!(peak <= 1.0);
}
