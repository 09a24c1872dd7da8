//! Bass voice.
//!
//! An additive tone (strong 1st and 3rd partials) through a snappy filter
//! envelope, with a short portamento so retriggers slide rather than jump.

use crate::{
    dsp::{envelope::EnvelopeShape, oscillator::Waveform},
    synth::voice::{FilterPatch, Patch},
};

use super::resonance_from_q;

pub fn bass() -> Patch {
    Patch::new(
        Waveform::Partials(vec![2.0, 1.0, 3.0, 2.0, 0.4]),
        EnvelopeShape::adsr(0.04, 0.06, 0.4, 1.0),
    )
    .volume(-6.0)
    .portamento(0.08)
    .filter(FilterPatch {
        base_frequency: 50.0,
        octaves: 3.4,
        resonance: resonance_from_q(4.0),
        envelope: EnvelopeShape::adsr(0.01, 0.1, 0.6, 1.5),
    })
}
