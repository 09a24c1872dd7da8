/*
Note Lines
==========

A note line is one finished stroke, alive for `lifetime_loops` loops:

  construction     allocate voice ─→ gain ramp ─→ tail point ─→ segment
                   ─→ visual profile ─→ schedule looped part

  every loop       the transport replays the part through `apply`:
                   first vertex gates the voice on, every later vertex
                   glides toward its successor, the tail releases it

  every frame      `draw` fades the ribbon by 1 - progress

  progress ≥ 1     destroy: cancel the part, dispose the voice, go inert

Two clocks drive a line. Audio gain decays with rendered samples; the
ribbon fade and destruction follow the frame clock the caller passes in.

Construction either succeeds completely or leaves nothing behind: if the
part cannot be scheduled the freshly allocated voice is disposed before
the error is returned.
*/

use crate::{
    config::SketchConfig,
    error::NoteLineError,
    mapping::CoordinateMapper,
    path::{normalized, segment_path, GlideInstruction, Point},
    synth::{GainNode, Voice, VoiceAllocator},
    transport::{PartHandle, Scheduler},
    visual::{RenderSurface, VisualProfile, WeightCalculator},
    voices::VoiceKind,
};

pub struct NoteLine {
    kind: VoiceKind,
    /// Drawn points sorted by x, plus the release tail
    path: Vec<Point>,
    instructions: Vec<GlideInstruction>,
    profile: VisualProfile,
    voice: Box<dyn Voice>,
    gain: GainNode,
    part: PartHandle,
    created_at_ms: f64,
    lifetime_secs: f64,
    active: bool,
}

impl NoteLine {
    /// Build a note line from a finished stroke and start it looping.
    ///
    /// `created_at_ms` is on the same clock later passed to [`draw`](Self::draw).
    /// Points left of the canvas (x < 0) map to negative loop times, which the
    /// scheduler refuses with [`NoteLineError::SchedulingConflict`]; the voice
    /// is disposed before the error is returned.
    pub fn new(
        stroke: &[Point],
        kind: VoiceKind,
        config: &SketchConfig,
        created_at_ms: f64,
        allocator: &mut dyn VoiceAllocator,
        scheduler: &mut dyn Scheduler,
    ) -> Result<Self, NoteLineError> {
        if stroke.len() < config.min_stroke_points {
            return Err(NoteLineError::InvalidPath {
                points: stroke.len(),
                required: config.min_stroke_points,
            });
        }

        let mapper = CoordinateMapper::new(config);
        let mut voice = allocator.allocate(kind)?;
        let lifetime_secs = config.lifetime_secs();

        let mut gain = GainNode::new(1.0);
        gain.ramp_level_to(0.0, lifetime_secs as f32);

        let envelope = voice.envelope();
        let mut path = normalized(stroke);
        let (Some(&first), Some(&last)) = (path.first(), path.last()) else {
            voice.dispose();
            return Err(NoteLineError::InvalidPath {
                points: 0,
                required: config.min_stroke_points,
            });
        };
        let start_x = first.x;
        path.push(Point::new(
            last.x + mapper.seconds_to_x_width(envelope.release),
            last.y,
        ));

        let instructions = segment_path(&path, &mapper);
        let weights = WeightCalculator::new(&envelope, &mapper, start_x, last.x, config.max_weight);
        let profile = VisualProfile::build(&path, &weights, kind.color());

        let part = match scheduler.schedule_looped(instructions.clone()) {
            Ok(part) => part,
            Err(err) => {
                voice.dispose();
                return Err(err);
            }
        };

        log::debug!(
            "note line {:?} created: {} {} points, {:.2}s..{:.2}s",
            part,
            kind.name(),
            path.len(),
            mapper.x_to_seconds(start_x),
            mapper.x_to_seconds(last.x),
        );

        Ok(Self {
            kind,
            path,
            instructions,
            profile,
            voice,
            gain,
            part,
            created_at_ms,
            lifetime_secs,
            active: true,
        })
    }

    /// React to one scheduled instruction.
    ///
    /// Onset and glide are exclusive; release is independent of both.
    pub fn apply(&mut self, instruction: &GlideInstruction) {
        if !self.active {
            return;
        }

        if instruction.is_first {
            self.voice.trigger_onset(instruction.frequency);
        } else if let Some(glide) = instruction.glide {
            self.voice.ramp_frequency_to(glide.next_frequency, glide.duration);
        }

        if instruction.is_last {
            self.voice.trigger_release();
        }
    }

    /// Fraction of the lifetime elapsed at `now_ms`
    pub fn life_progress(&self, now_ms: f64) -> f64 {
        (now_ms - self.created_at_ms) / (self.lifetime_secs * 1000.0)
    }

    /// Per-frame update: fade the ribbon, or destroy the line once its
    /// lifetime is over. Nothing is drawn on the frame that destroys it.
    pub fn draw(
        &mut self,
        now_ms: f64,
        surface: &mut dyn RenderSurface,
        scheduler: &mut dyn Scheduler,
    ) {
        if !self.active {
            return;
        }

        let progress = self.life_progress(now_ms);
        if progress >= 1.0 {
            self.destroy(scheduler);
            return;
        }

        self.profile.render(surface, (1.0 - progress) as f32);
    }

    /// Stop playback and release the voice. Only the first call does anything.
    pub fn destroy(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if !self.active {
            return false;
        }

        if !scheduler.cancel(self.part) {
            log::warn!("note line {:?} had no scheduled part to cancel", self.part);
        }
        self.voice.dispose();
        self.active = false;
        log::debug!("note line {:?} destroyed", self.part);
        true
    }

    /// Add this line's audio for the next block into `out`.
    ///
    /// `scratch` is working space and must be at least as long as `out`.
    pub fn render_audio(&mut self, out: &mut [f32], scratch: &mut [f32], sample_rate: f32) {
        if !self.active {
            return;
        }

        let len = out.len().min(scratch.len());
        if !self.voice.is_active() {
            self.gain.skip(len, sample_rate);
            return;
        }

        let block = &mut scratch[..len];
        self.voice.render_block(block, sample_rate);
        self.gain.process(block, sample_rate);

        for (o, s) in out.iter_mut().zip(block.iter()) {
            *o += *s;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn part(&self) -> PartHandle {
        self.part
    }

    pub fn kind(&self) -> VoiceKind {
        self.kind
    }

    /// Sorted drawn points plus the release tail.
    pub fn path(&self) -> &[Point] {
        &self.path
    }

    pub fn instructions(&self) -> &[GlideInstruction] {
        &self.instructions
    }

    pub fn profile(&self) -> &VisualProfile {
        &self.profile
    }

    pub fn created_at_ms(&self) -> f64 {
        self.created_at_ms
    }

    /// Current output gain level
    pub fn gain(&self) -> f32 {
        self.gain.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Rgba,
        dsp::EnvelopeShape,
        synth::SynthAllocator,
        transport::LoopScheduler,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Calls {
        onsets: Vec<f32>,
        glides: Vec<(f32, f32)>,
        releases: usize,
        disposals: usize,
    }

    /// Voice double that only records what it is asked to do
    struct Recorder {
        calls: Arc<Mutex<Calls>>,
        envelope: EnvelopeShape,
    }

    impl Voice for Recorder {
        fn trigger_onset(&mut self, frequency: f32) {
            self.calls.lock().unwrap().onsets.push(frequency);
        }

        fn trigger_release(&mut self) {
            self.calls.lock().unwrap().releases += 1;
        }

        fn ramp_frequency_to(&mut self, frequency: f32, duration: f32) {
            self.calls.lock().unwrap().glides.push((frequency, duration));
        }

        fn envelope(&self) -> EnvelopeShape {
            self.envelope
        }

        fn render_block(&mut self, out: &mut [f32], _sample_rate: f32) {
            out.fill(0.5);
        }

        fn dispose(&mut self) {
            self.calls.lock().unwrap().disposals += 1;
        }
    }

    struct RecordingAllocator {
        calls: Arc<Mutex<Calls>>,
    }

    impl VoiceAllocator for RecordingAllocator {
        fn allocate(&mut self, _kind: VoiceKind) -> Result<Box<dyn Voice>, NoteLineError> {
            Ok(Box::new(Recorder {
                calls: Arc::clone(&self.calls),
                envelope: EnvelopeShape::adsr(0.1, 0.1, 0.5, 1.0),
            }))
        }
    }

    #[derive(Default)]
    struct Canvas {
        alpha: Vec<f32>,
        fills: usize,
    }

    impl RenderSurface for Canvas {
        fn set_global_alpha(&mut self, alpha: f32) {
            self.alpha.push(alpha);
        }

        fn fill_rect(&mut self, _center: Point, _width: f32, _height: f32, _color: Rgba) {
            self.fills += 1;
        }
    }

    /// Scheduler that refuses everything
    struct Full;

    impl Scheduler for Full {
        fn schedule_looped(&mut self, _: Vec<GlideInstruction>) -> Result<PartHandle, NoteLineError> {
            Err(NoteLineError::SchedulingConflict("full".into()))
        }

        fn cancel(&mut self, _: PartHandle) -> bool {
            false
        }
    }

    fn stroke() -> Vec<Point> {
        vec![Point::new(300.0, 400.0), Point::new(150.0, 400.0), Point::new(600.0, 200.0)]
    }

    fn build(
        scheduler: &mut LoopScheduler,
    ) -> (NoteLine, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut allocator = RecordingAllocator { calls: Arc::clone(&calls) };
        let line = NoteLine::new(
            &stroke(),
            VoiceKind::Keys,
            &SketchConfig::default(),
            1_000.0,
            &mut allocator,
            scheduler,
        )
        .unwrap();
        (line, calls)
    }

    #[test]
    fn appends_release_tail_after_sorting() {
        let mut scheduler = LoopScheduler::new(8.0);
        let (line, _) = build(&mut scheduler);

        // 1 s release at 150 px/s
        let xs: Vec<f32> = line.path().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![150.0, 300.0, 600.0, 750.0]);
        assert_eq!(line.path()[3].y, 200.0);

        assert_eq!(line.instructions().len(), 4);
        assert!(line.instructions()[0].is_first);
        assert!(line.instructions()[3].is_last);
        assert!(scheduler.is_scheduled(line.part()));
    }

    #[test]
    fn rejects_short_strokes_before_allocating() {
        let mut scheduler = LoopScheduler::new(8.0);
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut allocator = RecordingAllocator { calls: Arc::clone(&calls) };

        let result = NoteLine::new(
            &stroke()[..2],
            VoiceKind::Pad,
            &SketchConfig::default(),
            0.0,
            &mut allocator,
            &mut scheduler,
        );
        assert!(matches!(
            result,
            Err(NoteLineError::InvalidPath { points: 2, required: 3 })
        ));
        assert_eq!(scheduler.part_count(), 0);
    }

    #[test]
    fn failed_scheduling_disposes_the_voice() {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut allocator = RecordingAllocator { calls: Arc::clone(&calls) };

        let result = NoteLine::new(
            &stroke(),
            VoiceKind::Pad,
            &SketchConfig::default(),
            0.0,
            &mut allocator,
            &mut Full,
        );
        assert!(matches!(result, Err(NoteLineError::SchedulingConflict(_))));
        assert_eq!(calls.lock().unwrap().disposals, 1);
    }

    #[test]
    fn instructions_drive_the_voice() {
        let mut scheduler = LoopScheduler::new(8.0);
        let (mut line, calls) = build(&mut scheduler);
        scheduler.transport_mut().play();

        let mut fired = Vec::new();
        scheduler.advance(8.0, |_, _, ins| fired.push(*ins));
        for ins in &fired {
            line.apply(ins);
        }

        let calls = calls.lock().unwrap();
        assert_eq!(calls.onsets.len(), 1);
        // Two glides (the first vertex onsets instead), tail releases
        assert_eq!(calls.glides.len(), 2);
        assert_eq!(calls.releases, 1);
    }

    #[test]
    fn fades_then_destroys_once() {
        let mut scheduler = LoopScheduler::new(8.0);
        let (mut line, calls) = build(&mut scheduler);
        let mut canvas = Canvas::default();

        // 48 s lifetime, created at 1 s
        line.draw(13_000.0, &mut canvas, &mut scheduler);
        assert_eq!(canvas.alpha[0], 0.75);
        assert_eq!(canvas.fills, line.profile().rects().len());

        let fills = canvas.fills;
        line.draw(49_000.0, &mut canvas, &mut scheduler);
        assert_eq!(canvas.fills, fills);
        assert!(!line.is_active());
        assert!(!scheduler.is_scheduled(line.part()));

        line.draw(50_000.0, &mut canvas, &mut scheduler);
        assert!(!line.destroy(&mut scheduler));
        assert_eq!(calls.lock().unwrap().disposals, 1);
    }

    #[test]
    fn audio_is_scaled_by_the_line_gain() {
        let mut scheduler = LoopScheduler::new(8.0);
        let (mut line, _) = build(&mut scheduler);

        let mut out = vec![0.25; 64];
        let mut scratch = vec![0.0; 64];
        line.render_audio(&mut out, &mut scratch, 48_000.0);

        assert!(out[0] > 0.74 && out[0] <= 0.75);
        assert!(line.gain() < 1.0);

        line.destroy(&mut scheduler);
        let mut silent = vec![0.0; 64];
        line.render_audio(&mut silent, &mut scratch, 48_000.0);
        assert!(silent.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn idle_voice_is_skipped_but_still_fades() {
        let mut scheduler = LoopScheduler::new(8.0);
        let mut line = NoteLine::new(
            &stroke(),
            VoiceKind::Keys,
            &SketchConfig::default(),
            0.0,
            &mut SynthAllocator::new(),
            &mut scheduler,
        )
        .unwrap();

        // Nothing has gated the voice on yet
        let mut out = vec![0.25; 64];
        let mut scratch = vec![0.0; 64];
        line.render_audio(&mut out, &mut scratch, 48_000.0);
        assert!(out.iter().all(|&s| s == 0.25));
        assert!(line.gain() < 1.0);
    }

    #[test]
    fn negative_times_are_refused() {
        let mut scheduler = LoopScheduler::new(8.0);
        let calls = Arc::new(Mutex::new(Calls::default()));
        let mut allocator = RecordingAllocator { calls: Arc::clone(&calls) };

        let stroke = [Point::new(-20.0, 400.0), Point::new(50.0, 300.0), Point::new(90.0, 300.0)];
        let result = NoteLine::new(
            &stroke,
            VoiceKind::Keys,
            &SketchConfig::default(),
            0.0,
            &mut allocator,
            &mut scheduler,
        );
        assert!(matches!(result, Err(NoteLineError::SchedulingConflict(_))));
        assert_eq!(calls.lock().unwrap().disposals, 1);
        assert_eq!(scheduler.part_count(), 0);
    }

    #[test]
    fn real_voices_build_too() {
        let mut scheduler = LoopScheduler::new(8.0);
        let mut allocator = SynthAllocator::new();
        for kind in VoiceKind::ALL {
            let line = NoteLine::new(
                &stroke(),
                kind,
                &SketchConfig::default(),
                0.0,
                &mut allocator,
                &mut scheduler,
            )
            .unwrap();
            assert_eq!(line.kind(), kind);
            assert!(!line.profile().is_empty());
        }
        assert_eq!(scheduler.part_count(), 5);
    }
}
