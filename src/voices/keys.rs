//! Keys voice - quick attack, short bright decay, low sustain.

use crate::{
    dsp::{envelope::EnvelopeShape, oscillator::Waveform},
    synth::voice::Patch,
};

pub fn keys() -> Patch {
    Patch::new(
        Waveform::Partials(vec![2.0, 1.0, 2.0, 2.0]),
        EnvelopeShape::adsr(0.05, 0.3, 0.2, 1.0),
    )
    .volume(-10.0)
}
