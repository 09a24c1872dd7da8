#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hue/saturation/lightness triple.
///
/// Hue in degrees (0-360), saturation and lightness in percent (0-100).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// Fixed-width colour with straight (non-premultiplied) alpha.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity, 0.0 - 1.0
    pub a: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Convert to RGB with the given opacity.
    pub fn with_alpha(&self, alpha: f32) -> Rgba {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let m = l - chroma / 2.0;

        Rgba {
            r: to_byte(r + m),
            g: to_byte(g + m),
            b: to_byte(b + m),
            a: alpha.clamp(0.0, 1.0),
        }
    }
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply the opacity (e.g. by a global alpha).
    pub fn fade(&self, factor: f32) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..*self
        }
    }

    /// Composite this colour over an opaque background.
    pub fn over(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let blend = |fg: u8, bg: u8| {
            to_byte((fg as f32 * self.a + bg as f32 * (1.0 - self.a)) / 255.0)
        };
        (
            blend(self.r, background.0),
            blend(self.g, background.1),
            blend(self.b, background.2),
        )
    }
}

fn to_byte(unit: f32) -> u8 {
    (unit.clamp(0.0, 1.0) * 255.0).round() as u8
}
