use crate::MIN_TIME;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
ADSR Envelope
=============

Every voice carries one of these. The same four numbers drive two things:

  1. the amplitude of the voice (this module, sample by sample), and
  2. the width and opacity of the drawn ribbon (visual::weight), where each
     stage's duration is laid out on the canvas as a pixel span.

Vocabulary
----------

  shape       The immutable ADSR description: attack/decay/release in
              seconds, sustain as a 0..1 ratio of the peak.

  level       Current output value (0.0 to 1.0), multiplied into the signal.

  stage       Idle, Attack, Decay, Sustain or Release.


The Shape: Linear Ramps
-----------------------

  Level
    1.0 ┐     ╱╲
        │    ╱  ╲___________
    S   │   ╱               ╲
        │  ╱                 ╲
    0.0 └─╱───────────────────╲──→ Time
        Attack Decay  Sustain  Release

Linear ramps keep the audio envelope and the drawn ribbon in agreement: the
ribbon is a straight-line taper over exactly the same spans.


Retriggering
------------

A note line loops, so its voice is retriggered every cycle, sometimes while
the previous release is still ringing. Attack starts from the CURRENT level
rather than snapping to zero, which avoids a click at the loop seam.

note_off releases from ANY stage, starting at the current level.
*/

/// Immutable ADSR description of a voice.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeShape {
    /// Seconds to ramp 0 → 1
    pub attack: f32,
    /// Seconds to ramp 1 → sustain
    pub decay: f32,
    /// Level held while the gate is high (0.0 - 1.0)
    pub sustain: f32,
    /// Seconds to ramp current → 0
    pub release: f32,
}

impl EnvelopeShape {
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Self {
        Self {
            attack: attack.max(0.0),
            decay: decay.max(0.0),
            sustain: sustain.clamp(0.0, 1.0),
            release: release.max(0.0),
        }
    }
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self::adsr(0.01, 0.1, 0.7, 0.3)
    }
}

/// The current stage of the envelope state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Idle,    // Gate low, level = 0
    Attack,  // Ramping up to 1.0
    Decay,   // Ramping down to sustain
    Sustain, // Holding while gate is high
    Release, // Ramping down to 0
}

pub struct Envelope {
    shape: EnvelopeShape,

    stage: EnvelopeStage,
    level: f32,

    // Release is interpolated from a snapshot so it always lands on 0.0
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Envelope {
    pub fn new(shape: EnvelopeShape) -> Self {
        Self {
            shape,
            stage: EnvelopeStage::Idle,
            level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    pub fn shape(&self) -> EnvelopeShape {
        self.shape
    }

    /// Gate high: (re)start the attack from the current level.
    pub fn note_on(&mut self) {
        self.stage = EnvelopeStage::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Gate low: start the release from the current level.
    pub fn note_off(&mut self, sample_rate: f32) {
        if self.stage == EnvelopeStage::Idle {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = if self.shape.release <= MIN_TIME {
            1
        } else {
            (self.shape.release * sample_rate).round().max(1.0) as u32
        };
        self.release_elapsed_samples = 0;
        self.stage = EnvelopeStage::Release;
    }

    /// Advance one sample and return the new level.
    pub fn next_sample(&mut self, sample_rate: f32) -> f32 {
        match self.stage {
            EnvelopeStage::Idle => {
                self.level = 0.0;
            }

            EnvelopeStage::Attack => {
                let increment = 1.0 / (self.shape.attack.max(MIN_TIME) * sample_rate);
                self.level += increment;

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = EnvelopeStage::Decay;
                }
            }

            EnvelopeStage::Decay => {
                let target = self.shape.sustain;
                let decrement = (1.0 - target) / (self.shape.decay.max(MIN_TIME) * sample_rate);
                self.level -= decrement;

                if self.level <= target {
                    self.level = target;
                    self.stage = EnvelopeStage::Sustain;
                }
            }

            EnvelopeStage::Sustain => {
                self.level = self.shape.sustain;
            }

            EnvelopeStage::Release => {
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = EnvelopeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
        self.level
    }

    /// Render a block of envelope values into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], sample_rate: f32) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(sample_rate);
        }
    }

    /// True while the envelope produces output (not idle).
    pub fn is_active(&self) -> bool {
        self.stage != EnvelopeStage::Idle
    }

    /// Drop straight to idle.
    pub fn reset(&mut self) {
        self.stage = EnvelopeStage::Idle;
        self.level = 0.0;
        self.release_start_level = 0.0;
        self.release_elapsed_samples = 0;
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }
}
