use crate::{
    color::{Hsl, Rgba},
    path::Point,
    visual::{surface::RenderSurface, weight::WeightCalculator},
};

/// One 1-pixel-wide slice of a ribbon, centred on the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RibbonRect {
    pub center: Point,
    pub width: f32,
    /// Full thickness, taken straight from the sampled weight
    pub height: f32,
    pub color: Rgba,
}

/// Precomputed ribbon for a whole path.
///
/// Every segment is walked in roughly 1-pixel steps along its length; each
/// step samples the weight calculator at its x and becomes one slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisualProfile {
    rects: Vec<RibbonRect>,
}

impl VisualProfile {
    pub fn build(path: &[Point], weights: &WeightCalculator, color: Hsl) -> Self {
        let mut rects = Vec::new();

        for pair in path.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let dist = from.distance(&to);
            let steps = dist.ceil() as usize;

            for i in 0..steps {
                let center = from.lerp(&to, i as f32 / dist);
                let attrs = weights.point_attrs(center.x);
                rects.push(RibbonRect {
                    center,
                    width: 1.0,
                    height: attrs.weight,
                    color: color.with_alpha(attrs.alpha),
                });
            }
        }

        Self { rects }
    }

    pub fn rects(&self) -> &[RibbonRect] {
        &self.rects
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    /// Paint every slice at `global_alpha` opacity.
    pub fn render<S: RenderSurface + ?Sized>(&self, surface: &mut S, global_alpha: f32) {
        surface.set_global_alpha(global_alpha);
        for rect in &self.rects {
            surface.fill_rect(rect.center, rect.width, rect.height, rect.color);
        }
        surface.set_global_alpha(1.0);
    }
}
