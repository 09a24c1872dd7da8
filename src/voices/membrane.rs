//! Membrane voice.
//!
//! A sine whose pitch starts ten times above the note and drops onto it in
//! 50ms, the classic drum-membrane thump. Near-zero sustain, so the ribbon
//! thins to a hairline after the decay.

use crate::{
    dsp::{envelope::EnvelopeShape, oscillator::Waveform},
    synth::voice::{Patch, PitchSweep},
};

pub fn membrane() -> Patch {
    Patch::new(Waveform::Sine, EnvelopeShape::adsr(0.4, 3.0, 0.01, 0.5))
        .volume(-12.0)
        .pitch_sweep(PitchSweep {
            ratio: 10.0,
            decay: 0.05,
        })
}
