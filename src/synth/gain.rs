use crate::dsp::ramp::Ramp;

/// Per-line output gain with a linear level ramp.
///
/// Every note line owns one, routed into the shared [`MixBus`](super::bus::MixBus).
pub struct GainNode {
    level: Ramp,
}

impl GainNode {
    pub fn new(level: f32) -> Self {
        Self {
            level: Ramp::linear(level),
        }
    }

    /// Ramp from the current level to `target` over `duration` seconds.
    pub fn ramp_level_to(&mut self, target: f32, duration: f32) {
        self.level.ramp_to(target, duration);
    }

    /// Apply the (moving) gain to a block in place.
    pub fn process(&mut self, buffer: &mut [f32], sample_rate: f32) {
        let dt = 1.0 / sample_rate;
        for sample in buffer.iter_mut() {
            *sample *= self.level.advance(dt);
        }
    }

    /// Move the ramp on by `frames` samples without touching any audio.
    pub fn skip(&mut self, frames: usize, sample_rate: f32) {
        self.level.advance(frames as f32 / sample_rate);
    }

    pub fn level(&self) -> f32 {
        self.level.value()
    }
}

impl Default for GainNode {
    fn default() -> Self {
        Self::new(1.0)
    }
}
