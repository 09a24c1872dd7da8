//! Real-world scenario benchmarks: the five voices, building note lines,
//! and rendering a scene full of them.

mod lines;
mod scene;
mod voices;

pub use lines::bench_lines;
pub use scene::bench_scene;
pub use voices::bench_voices;
