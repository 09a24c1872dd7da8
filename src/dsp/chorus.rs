use std::f32::consts::TAU;

use crate::dsp::delay::DelayLine;

/*
Chorus
======

Mixes the dry signal with a copy read from a short delay whose length is
swept by a sine LFO. The moving delay detunes the copy slightly, so one
voice sounds like several.

  Rate        LFO speed in Hz (0.5 - 1.5 classic)
  Depth       delay sweep in ms around the base delay
  Base delay  centre delay (~20ms); shorter combs, longer slaps back
  Mix         dry/wet blend
*/

pub struct Chorus {
    delay_line: DelayLine,
    lfo_phase: f32,
    rate: f32,
    depth_ms: f32,
    base_delay_ms: f32,
    mix: f32,
}

impl Chorus {
    pub fn new(rate: f32, depth_ms: f32, mix: f32) -> Self {
        Self {
            delay_line: DelayLine::new(),
            lfo_phase: 0.0,
            rate: rate.clamp(0.1, 10.0),
            depth_ms: depth_ms.clamp(0.0, 10.0),
            base_delay_ms: 20.0,
            mix: mix.clamp(0.0, 1.0),
        }
    }

    pub fn process(&mut self, sample: f32, sample_rate: f32) -> f32 {
        let delay_ms = self.base_delay_ms + self.lfo_phase.sin() * self.depth_ms;
        let delayed = self
            .delay_line
            .read_interpolated(delay_ms * sample_rate / 1000.0);
        self.delay_line.write(sample);

        self.lfo_phase += TAU * self.rate / sample_rate;
        if self.lfo_phase >= TAU {
            self.lfo_phase -= TAU;
        }

        sample * (1.0 - self.mix) + delayed * self.mix
    }

    pub fn reset(&mut self) {
        self.delay_line.reset();
        self.lfo_phase = 0.0;
    }
}

impl Default for Chorus {
    fn default() -> Self {
        Self::new(1.5, 3.5, 0.5)
    }
}
