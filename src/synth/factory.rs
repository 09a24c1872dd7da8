use crate::{
    error::NoteLineError,
    synth::voice::{SynthVoice, Voice},
    voices::{VoiceKind, VoiceProfile},
};

/// Factory for creating voices with a specific patch/sound design.
///
/// A profile configures the sound once; every note line drawn with that
/// profile gets its own fresh voice from here.
pub trait VoiceFactory: Send {
    type Voice: Voice;

    fn create_voice(&self) -> Self::Voice;
}

impl VoiceFactory for VoiceProfile {
    type Voice = SynthVoice;

    fn create_voice(&self) -> Self::Voice {
        SynthVoice::new(self.patch.clone())
    }
}

/// Hands out a live voice for a profile key, or says why it cannot.
///
/// This is the seam where synthesis resources are acquired; a failure here
/// aborts the note line being built and nothing else.
pub trait VoiceAllocator: Send {
    fn allocate(&mut self, kind: VoiceKind) -> Result<Box<dyn Voice>, NoteLineError>;
}

/// Allocator backed by the built-in [`SynthVoice`] profiles.
#[derive(Debug, Default)]
pub struct SynthAllocator;

impl SynthAllocator {
    pub fn new() -> Self {
        Self
    }
}

impl VoiceAllocator for SynthAllocator {
    fn allocate(&mut self, kind: VoiceKind) -> Result<Box<dyn Voice>, NoteLineError> {
        Ok(Box::new(kind.profile().create_voice()))
    }
}
