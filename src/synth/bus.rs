use crate::dsp::{chorus::Chorus, limiter::Limiter, reverb::SchroederReverb};

/// Shared output bus every note line feeds.
///
/// ```text
/// lines ─→ (+) ─→ × 0.5 ─→ [Chorus] ─→ [Reverb 5s, 40% wet] ─→ [Limiter -1dB] ─→ out
/// ```
///
/// Created once at startup and kept for the whole session.
pub struct MixBus {
    level: f32,
    chorus: Chorus,
    reverb: SchroederReverb,
    limiter: Limiter,
    sample_rate: f32,
}

impl MixBus {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            level: 0.5,
            chorus: Chorus::default(),
            reverb: SchroederReverb::new(sample_rate, 5.0, 0.4),
            limiter: Limiter::new(-1.0),
            sample_rate,
        }
    }

    /// Run the summed line output through the bus in place.
    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            let s = *sample * self.level;
            let s = self.chorus.process(s, self.sample_rate);
            let s = self.reverb.process(s);
            *sample = self.limiter.process(s, self.sample_rate);
        }
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }
}
