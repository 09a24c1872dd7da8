//! Pad voice - slow, sustained, atmospheric.
//!
//! A sawtooth through a resonant low-pass whose cutoff blooms open with its
//! own slow envelope. The long attack means a pad line fades in across a
//! large stretch of the canvas, and its ribbon swells accordingly.

use crate::{
    dsp::{envelope::EnvelopeShape, oscillator::Waveform},
    synth::voice::{FilterPatch, Patch},
};

use super::resonance_from_q;

pub fn pad() -> Patch {
    Patch::new(Waveform::Sawtooth, EnvelopeShape::adsr(0.8, 3.0, 0.1, 1.0))
        .volume(-10.0)
        .filter(FilterPatch {
            base_frequency: 200.0,
            octaves: 3.0,
            resonance: resonance_from_q(4.0),
            envelope: EnvelopeShape::adsr(1.0, 1.4, 0.4, 3.0),
        })
}
