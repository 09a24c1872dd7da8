use crate::dsp::{
    envelope::{Envelope, EnvelopeShape},
    filter::SVFilter,
    limiter::db_to_gain,
    oscillator::{Oscillator, Waveform},
    ramp::Ramp,
};

/// A sound-generating unit with a pitch and an ADSR envelope.
///
/// This is the whole surface a note line needs from the synthesis side:
/// gate it on at a pitch, glide it, gate it off, and read its envelope to
/// lay the ribbon out.
pub trait Voice: Send {
    /// Gate on at `frequency`.
    fn trigger_onset(&mut self, frequency: f32);

    /// Gate off; the envelope releases from wherever it is.
    fn trigger_release(&mut self);

    /// Glide the pitch to `frequency` over `duration` seconds.
    fn ramp_frequency_to(&mut self, frequency: f32, duration: f32);

    /// The amplitude envelope this voice was built with.
    fn envelope(&self) -> EnvelopeShape;

    /// Render the next block (overwrites `out`).
    fn render_block(&mut self, out: &mut [f32], sample_rate: f32);

    /// Still producing sound? Idle voices are not rendered.
    fn is_active(&self) -> bool {
        true
    }

    /// Silence the voice for good. Further calls are no-ops.
    fn dispose(&mut self);
}

impl Voice for Box<dyn Voice> {
    fn trigger_onset(&mut self, frequency: f32) {
        (**self).trigger_onset(frequency)
    }

    fn trigger_release(&mut self) {
        (**self).trigger_release()
    }

    fn ramp_frequency_to(&mut self, frequency: f32, duration: f32) {
        (**self).ramp_frequency_to(frequency, duration)
    }

    fn envelope(&self) -> EnvelopeShape {
        (**self).envelope()
    }

    fn render_block(&mut self, out: &mut [f32], sample_rate: f32) {
        (**self).render_block(out, sample_rate)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }

    fn dispose(&mut self) {
        (**self).dispose()
    }
}

/// Envelope-swept low-pass: cutoff = base × 2^(octaves × env)
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPatch {
    pub base_frequency: f32,
    pub octaves: f32,
    pub resonance: f32,
    pub envelope: EnvelopeShape,
}

/// Two-operator FM: a modulator at carrier × harmonicity, depth scaled by
/// the modulation index and its own envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct FmPatch {
    pub harmonicity: f32,
    pub modulation_index: f32,
    pub modulator: Waveform,
    pub envelope: EnvelopeShape,
}

/// Drum-style pitch drop at onset: starts `ratio` × the note and falls
/// exponentially to the note over `decay` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchSweep {
    pub ratio: f32,
    pub decay: f32,
}

/// Everything needed to build a [`SynthVoice`].
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub volume_db: f32,
    pub waveform: Waveform,
    pub envelope: EnvelopeShape,
    /// Glide time (seconds) when a new onset arrives while still sounding
    pub portamento: f32,
    pub filter: Option<FilterPatch>,
    pub fm: Option<FmPatch>,
    pub pitch_sweep: Option<PitchSweep>,
}

impl Patch {
    pub fn new(waveform: Waveform, envelope: EnvelopeShape) -> Self {
        Self {
            volume_db: 0.0,
            waveform,
            envelope,
            portamento: 0.0,
            filter: None,
            fm: None,
            pitch_sweep: None,
        }
    }

    pub fn volume(mut self, db: f32) -> Self {
        self.volume_db = db;
        self
    }

    pub fn portamento(mut self, seconds: f32) -> Self {
        self.portamento = seconds.max(0.0);
        self
    }

    pub fn filter(mut self, filter: FilterPatch) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn fm(mut self, fm: FmPatch) -> Self {
        self.fm = Some(fm);
        self
    }

    pub fn pitch_sweep(mut self, sweep: PitchSweep) -> Self {
        self.pitch_sweep = Some(sweep);
        self
    }
}

struct FilterStage {
    filter: SVFilter,
    envelope: Envelope,
    base_frequency: f32,
    octaves: f32,
}

struct FmStage {
    modulator: Oscillator,
    envelope: Envelope,
    harmonicity: f32,
    modulation_index: f32,
}

/// Monophonic voice built from a [`Patch`].
///
/// Signal path:
///
/// ```text
/// [FM modulator] ─→ [Oscillator] ─→ [Low-pass (env swept)] ─→ × amp env × volume
/// ```
pub struct SynthVoice {
    oscillator: Oscillator,
    amp_envelope: Envelope,
    filter: Option<FilterStage>,
    fm: Option<FmStage>,
    sweep: Option<PitchSweep>,
    sweep_elapsed: f32,
    frequency: Ramp,
    portamento: f32,
    volume: f32,
    sample_rate: f32,
    disposed: bool,
}

impl SynthVoice {
    pub fn new(patch: Patch) -> Self {
        let filter = patch.filter.map(|f| FilterStage {
            filter: SVFilter::lowpass().with_resonance(f.resonance),
            envelope: Envelope::new(f.envelope),
            base_frequency: f.base_frequency,
            octaves: f.octaves,
        });
        let fm = patch.fm.map(|fm| FmStage {
            modulator: Oscillator::new(fm.modulator),
            envelope: Envelope::new(fm.envelope),
            harmonicity: fm.harmonicity,
            modulation_index: fm.modulation_index,
        });

        Self {
            oscillator: Oscillator::new(patch.waveform),
            amp_envelope: Envelope::new(patch.envelope),
            filter,
            fm,
            sweep: patch.pitch_sweep,
            sweep_elapsed: 0.0,
            frequency: Ramp::exponential(440.0),
            portamento: patch.portamento,
            volume: db_to_gain(patch.volume_db),
            sample_rate: 48_000.0,
            disposed: false,
        }
    }

    /// Current (possibly gliding) pitch in Hz
    pub fn frequency(&self) -> f32 {
        self.frequency.value()
    }

    fn sweep_ratio(&self) -> f32 {
        match self.sweep {
            Some(sweep) if self.sweep_elapsed < sweep.decay => {
                let remaining = 1.0 - self.sweep_elapsed / sweep.decay;
                sweep.ratio.max(1.0).powf(remaining)
            }
            _ => 1.0,
        }
    }
}

impl Voice for SynthVoice {
    fn trigger_onset(&mut self, frequency: f32) {
        if self.disposed {
            return;
        }

        if self.portamento > 0.0 && self.amp_envelope.is_active() {
            self.frequency.ramp_to(frequency, self.portamento);
        } else {
            self.frequency.set(frequency);
        }
        self.sweep_elapsed = 0.0;

        self.amp_envelope.note_on();
        if let Some(stage) = &mut self.filter {
            stage.envelope.note_on();
        }
        if let Some(stage) = &mut self.fm {
            stage.envelope.note_on();
        }
    }

    fn trigger_release(&mut self) {
        let sample_rate = self.sample_rate;
        self.amp_envelope.note_off(sample_rate);
        if let Some(stage) = &mut self.filter {
            stage.envelope.note_off(sample_rate);
        }
        if let Some(stage) = &mut self.fm {
            stage.envelope.note_off(sample_rate);
        }
    }

    fn ramp_frequency_to(&mut self, frequency: f32, duration: f32) {
        if !self.disposed {
            self.frequency.ramp_to(frequency, duration);
        }
    }

    fn envelope(&self) -> EnvelopeShape {
        self.amp_envelope.shape()
    }

    fn render_block(&mut self, out: &mut [f32], sample_rate: f32) {
        self.sample_rate = sample_rate;
        if self.disposed || !self.amp_envelope.is_active() {
            out.fill(0.0);
            return;
        }

        let dt = 1.0 / sample_rate;
        for sample in out.iter_mut() {
            let base = self.frequency.advance(dt) * self.sweep_ratio();
            self.sweep_elapsed += dt;

            let frequency = match &mut self.fm {
                Some(stage) => {
                    let mod_freq = base * stage.harmonicity;
                    let depth = stage.envelope.next_sample(sample_rate);
                    let modulation = stage.modulator.next_sample(mod_freq, sample_rate) * depth;
                    base + modulation * mod_freq * stage.modulation_index
                }
                None => base,
            };

            let mut value = self.oscillator.next_sample(frequency, sample_rate);

            if let Some(stage) = &mut self.filter {
                let sweep = stage.envelope.next_sample(sample_rate);
                let cutoff = stage.base_frequency * 2.0_f32.powf(stage.octaves * sweep);
                value = stage.filter.process(value, cutoff, sample_rate);
            }

            *sample = value * self.amp_envelope.next_sample(sample_rate) * self.volume;
        }
    }

    fn is_active(&self) -> bool {
        !self.disposed && self.amp_envelope.is_active()
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.amp_envelope.reset();
        if let Some(stage) = &mut self.filter {
            stage.envelope.reset();
            stage.filter.reset();
        }
        if let Some(stage) = &mut self.fm {
            stage.envelope.reset();
        }
    }
}
