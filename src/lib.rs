pub mod color;
pub mod config;
pub mod dsp;
pub mod error;
pub mod input;
pub mod line; // One drawn stroke's audio + visual lifecycle
pub mod mapping; // Canvas <-> pitch/time
pub mod path;
pub mod scene; // Live note lines, per-frame and per-block drivers
pub mod synth; // Voice, gain and bus seams
pub mod transport;
pub mod visual;
pub mod voices;

pub use config::SketchConfig;
pub use error::NoteLineError;

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
