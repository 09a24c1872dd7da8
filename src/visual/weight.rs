/*
Envelope → Ribbon Weight
========================

A note line's ribbon is the amplitude envelope drawn along x. Each envelope
stage is converted to a pixel span with `seconds_to_x_width`, and laid out
from the first drawn point (start_x). Release is laid out from the last
drawn point (end_x), into the tail the note line appends.

  weight
   max ┤    ╱╲
       │   ╱  ╲
   S·m ┤  ╱    ╲______________
       │ ╱                    ╲
     0 ┼╱──────────────────────╲────→ x
       start_x                end_x  end_x + release
       │attack│decay│ sustain │release│

Alpha follows the attack ramp up, stays at 1 through decay and sustain, and
fades with the release.

The release always starts from sustain × max, even when the stroke is so
short that its end falls inside the attack or decay span. The ribbon can
then jump at end_x; that approximation is kept as is.
*/

use crate::{dsp::EnvelopeShape, mapping::CoordinateMapper};

/// Stroke weight and opacity sampled at one x position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointAttrs {
    /// Ribbon thickness in pixels (0..max)
    pub weight: f32,
    /// Opacity (0..1)
    pub alpha: f32,
}

/// Samples a note line's envelope at any x along its path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightCalculator {
    start_x: f32,
    end_x: f32,
    attack_width: f32,
    decay_width: f32,
    release_width: f32,
    sustain: f32,
    max_size: f32,
}

impl WeightCalculator {
    /// `start_x`/`end_x` are the first and last drawn x positions, before any
    /// release tail is appended.
    pub fn new(
        envelope: &EnvelopeShape,
        mapper: &CoordinateMapper,
        start_x: f32,
        end_x: f32,
        max_size: f32,
    ) -> Self {
        Self {
            start_x,
            end_x,
            attack_width: mapper.seconds_to_x_width(envelope.attack),
            decay_width: mapper.seconds_to_x_width(envelope.decay),
            release_width: mapper.seconds_to_x_width(envelope.release),
            sustain: envelope.sustain,
            max_size,
        }
    }

    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    pub fn end_x(&self) -> f32 {
        self.end_x
    }

    pub fn attack_width(&self) -> f32 {
        self.attack_width
    }

    pub fn release_width(&self) -> f32 {
        self.release_width
    }

    pub fn point_attrs(&self, x: f32) -> PointAttrs {
        let local_x = x - self.start_x;
        let sustain_size = self.max_size * self.sustain;

        let (weight, alpha) = if x > self.end_x {
            let fade = 1.0 - (x - self.end_x) / self.release_width;
            (fade * sustain_size, fade)
        } else if local_x < self.attack_width {
            let rise = local_x / self.attack_width;
            (rise * self.max_size, rise)
        } else if local_x < self.attack_width + self.decay_width {
            let along = (local_x - self.attack_width) / self.decay_width;
            ((1.0 - along) * (self.max_size - sustain_size) + sustain_size, 1.0)
        } else {
            (sustain_size, 1.0)
        };

        PointAttrs {
            weight: weight.clamp(0.0, self.max_size),
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}
