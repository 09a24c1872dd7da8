//! The live sketch: every note line, the transport that loops them, the
//! stroke being drawn, and the bus they all play through.
//!
//! Two callers drive a scene. The frame loop calls [`Scene::draw_frame`];
//! the audio callback calls [`Scene::render_audio`]. Either may run first
//! and neither blocks.
//!
//! # Example
//!
//! ```
//! use glissando::{path::Point, scene::Scene, synth::SynthAllocator, SketchConfig};
//!
//! let mut scene = Scene::new(SketchConfig::default(), SynthAllocator::new(), 48_000.0);
//! scene.toggle_transport();
//!
//! let stroke = [Point::new(100.0, 400.0), Point::new(200.0, 300.0), Point::new(300.0, 350.0)];
//! scene.add_stroke(&stroke, 0.0).unwrap();
//!
//! let mut block = [0.0_f32; 512];
//! scene.render_audio(&mut block);
//! assert_eq!(scene.lines().len(), 1);
//! ```

use crate::{
    config::SketchConfig,
    error::NoteLineError,
    input::SessionState,
    line::NoteLine,
    mapping::CoordinateMapper,
    path::Point,
    synth::{MixBus, SynthAllocator, VoiceAllocator},
    transport::{LoopScheduler, Scheduler, Transport},
    visual::RenderSurface,
    voices::VoiceKind,
};

/// Samples between transport updates. Instructions land on these boundaries.
const CONTROL_BLOCK: usize = 64;

pub struct Scene<A: VoiceAllocator = SynthAllocator> {
    config: SketchConfig,
    mapper: CoordinateMapper,
    scheduler: LoopScheduler,
    allocator: A,
    bus: MixBus,
    lines: Vec<NoteLine>,
    session: SessionState,
    scratch: Vec<f32>,
}

impl<A: VoiceAllocator> Scene<A> {
    pub fn new(config: SketchConfig, allocator: A, sample_rate: f32) -> Self {
        Self {
            mapper: CoordinateMapper::new(&config),
            scheduler: LoopScheduler::new(config.loop_duration as f64),
            allocator,
            bus: MixBus::new(sample_rate),
            lines: Vec::new(),
            session: SessionState::new(&config),
            scratch: vec![0.0; CONTROL_BLOCK],
            config,
        }
    }

    /// Turn a finished stroke into a note line drawn with the selected voice.
    pub fn add_stroke(&mut self, stroke: &[Point], now_ms: f64) -> Result<(), NoteLineError> {
        let kind = self.session.selected_voice();
        self.add_stroke_with(stroke, kind, now_ms)
    }

    /// Like [`add_stroke`](Self::add_stroke) with an explicit voice.
    ///
    /// On failure nothing is added and no other line is touched.
    pub fn add_stroke_with(
        &mut self,
        stroke: &[Point],
        kind: VoiceKind,
        now_ms: f64,
    ) -> Result<(), NoteLineError> {
        let result = NoteLine::new(
            stroke,
            kind,
            &self.config,
            now_ms,
            &mut self.allocator,
            &mut self.scheduler,
        );

        match result {
            Ok(line) => {
                self.lines.push(line);
                Ok(())
            }
            Err(err) => {
                match &err {
                    NoteLineError::InvalidPath { .. } => log::debug!("stroke ignored: {err}"),
                    _ => log::warn!("note line not created: {err}"),
                }
                Err(err)
            }
        }
    }

    /// Pointer pressed on the canvas.
    pub fn begin_stroke(&mut self) {
        self.session.begin_stroke();
    }

    /// Pointer dragged. Applies snapping, then captures the point if it is
    /// far enough from the last one.
    pub fn extend_stroke(&mut self, x: f32, y: f32, snap: bool) -> bool {
        let point = self.session.pointer(x, y, snap, &self.mapper);
        self.session.add_point(point)
    }

    /// Pointer released. Returns whether a note line was created; strokes
    /// that are too short are dropped quietly.
    pub fn finish_stroke(&mut self, now_ms: f64) -> Result<bool, NoteLineError> {
        let Some(stroke) = self.session.end_stroke() else {
            return Ok(false);
        };

        match self.add_stroke(&stroke, now_ms) {
            Ok(()) => Ok(true),
            Err(NoteLineError::InvalidPath { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub fn cancel_stroke(&mut self) {
        self.session.cancel();
    }

    pub fn select_voice(&mut self, kind: VoiceKind) {
        self.session.select_voice(kind);
    }

    pub fn toggle_transport(&mut self) {
        self.scheduler.transport_mut().toggle();
    }

    /// Draw every live line, oldest first, then drop the ones that expired.
    pub fn draw_frame(&mut self, now_ms: f64, surface: &mut dyn RenderSurface) {
        for line in &mut self.lines {
            line.draw(now_ms, surface, &mut self.scheduler);
        }

        let before = self.lines.len();
        self.lines.retain(NoteLine::is_active);
        let purged = before - self.lines.len();
        if purged > 0 {
            log::debug!("purged {purged} expired note lines, {} live", self.lines.len());
        }
    }

    /// Render the next mono block: advance the transport, let every line
    /// react to its instructions, mix, and run the bus. Overwrites `out`.
    pub fn render_audio(&mut self, out: &mut [f32]) {
        let sample_rate = self.bus.sample_rate();

        for chunk in out.chunks_mut(CONTROL_BLOCK) {
            chunk.fill(0.0);

            let lines = &mut self.lines;
            self.scheduler.advance(chunk.len() as f64 / sample_rate as f64, |part, _, instruction| {
                if let Some(line) = lines.iter_mut().find(|l| l.part() == part) {
                    line.apply(instruction);
                }
            });

            for line in &mut self.lines {
                line.render_audio(chunk, &mut self.scratch, sample_rate);
            }
            self.bus.process(chunk);
        }
    }

    /// Destroy every line now.
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.destroy(&mut self.scheduler);
        }
        self.lines.clear();
    }

    pub fn lines(&self) -> &[NoteLine] {
        &self.lines
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn transport(&self) -> &Transport {
        self.scheduler.transport()
    }

    pub fn scheduler(&self) -> &LoopScheduler {
        &self.scheduler
    }

    pub fn mapper(&self) -> &CoordinateMapper {
        &self.mapper
    }

    pub fn config(&self) -> &SketchConfig {
        &self.config
    }
}
