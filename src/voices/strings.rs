//! Strings voice - two-operator FM.
//!
//! A triangle carrier modulated by a square at a slightly detuned third
//! harmonic (3.01). The modulation envelope fades faster than the carrier,
//! so the tone starts bright and mellows while it sustains.

use crate::{
    dsp::{envelope::EnvelopeShape, oscillator::Waveform},
    synth::voice::{FmPatch, Patch},
};

pub fn strings() -> Patch {
    Patch::new(Waveform::Triangle, EnvelopeShape::adsr(0.3, 1.0, 0.5, 1.2)).fm(FmPatch {
        harmonicity: 3.01,
        modulation_index: 14.0,
        modulator: Waveform::Square,
        envelope: EnvelopeShape::adsr(0.5, 0.5, 0.2, 0.1),
    })
}
