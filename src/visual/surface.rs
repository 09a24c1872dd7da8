use crate::{color::Rgba, path::Point};

/// Something a note line can paint its ribbon onto.
///
/// Rectangles are centred on `center`. The global alpha multiplies every
/// fill's own alpha until it is set again.
pub trait RenderSurface {
    fn set_global_alpha(&mut self, alpha: f32);

    fn fill_rect(&mut self, center: Point, width: f32, height: f32, color: Rgba);
}
