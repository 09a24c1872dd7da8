//! The five drawable voice types.
//!
//! Each profile pairs a display colour with a patch. The patch's amplitude
//! envelope is what shapes both the sound and the ribbon drawn for it.
//!
//! # Example
//!
//! ```
//! use glissando::voices::VoiceKind;
//!
//! let pad = VoiceKind::Pad.profile();
//! assert_eq!(pad.envelope().release, 1.0);
//! assert_eq!(VoiceKind::from_key('5'), Some(VoiceKind::Bass));
//! ```

mod bass;
mod keys;
mod membrane;
mod pad;
mod strings;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{color::Hsl, dsp::envelope::EnvelopeShape, synth::voice::Patch};

pub use bass::bass;
pub use keys::keys;
pub use membrane::membrane;
pub use pad::pad;
pub use strings::strings;

/// Q of the resonant low-pass used by the subtractive voices.
pub(crate) fn resonance_from_q(q: f32) -> f32 {
    1.0 - 1.0 / (2.0 * q)
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VoiceKind {
    #[default]
    Pad,
    Membrane,
    Strings,
    Keys,
    Bass,
}

impl VoiceKind {
    /// In selection-key order (1..5)
    pub const ALL: [VoiceKind; 5] = [
        VoiceKind::Pad,
        VoiceKind::Membrane,
        VoiceKind::Strings,
        VoiceKind::Keys,
        VoiceKind::Bass,
    ];

    /// Number key that selects this voice
    pub fn from_key(key: char) -> Option<Self> {
        let index = key.to_digit(10)?.checked_sub(1)? as usize;
        Self::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            VoiceKind::Pad => "PAD",
            VoiceKind::Membrane => "MEMBRANE",
            VoiceKind::Strings => "STRINGS",
            VoiceKind::Keys => "KEYS",
            VoiceKind::Bass => "BASS",
        }
    }

    pub fn color(&self) -> Hsl {
        match self {
            VoiceKind::Pad => Hsl::new(100.0, 40.0, 70.0),
            VoiceKind::Membrane => Hsl::new(300.0, 40.0, 70.0),
            VoiceKind::Strings => Hsl::new(10.0, 40.0, 70.0),
            VoiceKind::Keys => Hsl::new(150.0, 40.0, 70.0),
            VoiceKind::Bass => Hsl::new(50.0, 40.0, 70.0),
        }
    }

    pub fn profile(&self) -> VoiceProfile {
        let patch = match self {
            VoiceKind::Pad => pad(),
            VoiceKind::Membrane => membrane(),
            VoiceKind::Strings => strings(),
            VoiceKind::Keys => keys(),
            VoiceKind::Bass => bass(),
        };
        VoiceProfile {
            kind: *self,
            color: self.color(),
            patch,
        }
    }
}

/// Immutable description of a drawable synth type.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceProfile {
    pub kind: VoiceKind,
    pub color: Hsl,
    pub patch: Patch,
}

impl VoiceProfile {
    pub fn envelope(&self) -> EnvelopeShape {
        self.patch.envelope
    }
}
