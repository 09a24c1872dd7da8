//! Drawn side of a note line: envelope-shaped ribbon weights, the
//! precomputed ribbon itself, and the surface it is painted onto.

/// Rasterised ribbon, built once per note line.
pub mod profile;
/// Where the ribbon gets painted.
pub mod surface;
/// Envelope stage → stroke weight and opacity.
pub mod weight;

pub use profile::{RibbonRect, VisualProfile};
pub use surface::RenderSurface;
pub use weight::{PointAttrs, WeightCalculator};
