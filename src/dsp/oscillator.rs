use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/*
Oscillator
==========

A phase accumulator: phase runs 0 → 1 once per cycle, and the waveform
maps phase to a sample.

  Sine       pure tone, fundamental only
  Triangle   soft, odd harmonics falling off as 1/n²
  Sawtooth   bright, every harmonic falling off as 1/n
  Square     hollow, odd harmonics only
  Partials   additive: a list of harmonic amplitudes, [1st, 2nd, 3rd, ...]
             normalised so the peak stays within ±1

Frequency is supplied per sample so pitch glides are continuous.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Waveform {
    Sine,
    Triangle,
    Sawtooth,
    Square,
    Partials(Vec<f32>),
}

pub struct Oscillator {
    waveform: Waveform,
    phase: f32,
    partials_norm: f32,
}

impl Oscillator {
    pub fn new(waveform: Waveform) -> Self {
        let partials_norm = match &waveform {
            Waveform::Partials(amps) => {
                let total: f32 = amps.iter().map(|a| a.abs()).sum();
                if total > 0.0 { 1.0 / total } else { 0.0 }
            }
            _ => 1.0,
        };

        Self {
            waveform,
            phase: 0.0,
            partials_norm,
        }
    }

    pub fn sine() -> Self {
        Self::new(Waveform::Sine)
    }

    pub fn sawtooth() -> Self {
        Self::new(Waveform::Sawtooth)
    }

    /// Produce one sample at `frequency` and advance the phase.
    #[inline]
    pub fn next_sample(&mut self, frequency: f32, sample_rate: f32) -> f32 {
        let p = self.phase;
        let sample = match &self.waveform {
            Waveform::Sine => (TAU * p).sin(),
            Waveform::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Waveform::Sawtooth => 2.0 * p - 1.0,
            Waveform::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Partials(amps) => {
                let sum: f32 = amps
                    .iter()
                    .enumerate()
                    .map(|(k, amp)| amp * (TAU * p * (k + 1) as f32).sin())
                    .sum();
                sum * self.partials_norm
            }
        };

        self.phase += frequency / sample_rate;
        self.phase -= self.phase.floor();
        sample
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
