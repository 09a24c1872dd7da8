// Purpose: the synthesis seams a note line talks to
// Voices, per-line gain, and the shared output bus

pub mod bus;
pub mod factory;
pub mod gain;
pub mod voice;

pub use bus::MixBus;
pub use factory::{SynthAllocator, VoiceAllocator, VoiceFactory};
pub use gain::GainNode;
pub use voice::{Patch, SynthVoice, Voice};
