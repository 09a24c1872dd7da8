//! Low-level DSP primitives used by the built-in voices and the mix bus.
//!
//! These components are realtime-safe once constructed: nothing here
//! allocates while rendering.

/// Modulated-delay thickener for the mix bus.
pub mod chorus;
/// Circular delay line with fractional reads.
pub mod delay;
/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// State-variable filter.
pub mod filter;
/// Peak limiter guarding the output.
pub mod limiter;
/// Phase-accumulator oscillator.
pub mod oscillator;
/// Linear and exponential parameter ramps.
pub mod ramp;
/// Schroeder room reverb.
pub mod reverb;

pub use envelope::{EnvelopeShape, EnvelopeStage};
