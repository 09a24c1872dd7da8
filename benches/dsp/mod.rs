//! Benchmarks for low-level DSP primitives.

mod bus;
mod envelope;
mod filter;

pub use bus::bench_bus;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
