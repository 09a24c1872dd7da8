#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sketch-wide settings shared by the mapper, the note lines and the scene.
///
/// Built with the same fluent style as the runtime builders:
///
/// ```
/// use glissando::SketchConfig;
///
/// let config = SketchConfig::default().canvas(600.0, 400.0).loop_duration(4.0);
/// assert_eq!(config.lifetime_secs(), 24.0);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchConfig {
    /// Canvas width in pixels
    pub width: f32,
    /// Canvas height in pixels
    pub height: f32,
    /// Length of one transport loop in seconds
    pub loop_duration: f32,
    /// Frequency at the bottom edge of the canvas (Hz)
    pub lowest_freq: f32,
    /// Number of semitones spanned by the canvas height
    pub notes: u32,
    /// How many loops a note line lives before it is destroyed
    pub lifetime_loops: u32,
    /// Full ribbon weight at envelope peak (pixels)
    pub max_weight: f32,
    /// Minimum distance between two captured stroke points (pixels)
    pub min_point_distance: f32,
    /// Strokes shorter than this never become note lines
    pub min_stroke_points: usize,
}

impl SketchConfig {
    pub fn new() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            loop_duration: 8.0,
            lowest_freq: 55.0,
            notes: 12 * 4,
            lifetime_loops: 6,
            max_weight: 30.0,
            min_point_distance: 4.0,
            min_stroke_points: 3,
        }
    }

    /// Set the canvas size in pixels
    pub fn canvas(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the loop duration in seconds
    pub fn loop_duration(mut self, seconds: f32) -> Self {
        self.loop_duration = seconds;
        self
    }

    /// Set the frequency of the bottom canvas edge
    pub fn lowest_freq(mut self, hz: f32) -> Self {
        self.lowest_freq = hz;
        self
    }

    /// Set how many semitones the canvas spans
    pub fn notes(mut self, notes: u32) -> Self {
        self.notes = notes;
        self
    }

    /// Set how many loops a note line survives
    pub fn lifetime_loops(mut self, loops: u32) -> Self {
        self.lifetime_loops = loops;
        self
    }

    /// Set the minimum spacing between captured points
    pub fn min_point_distance(mut self, pixels: f32) -> Self {
        self.min_point_distance = pixels;
        self
    }

    /// Total lifetime of a note line in seconds
    pub fn lifetime_secs(&self) -> f64 {
        self.lifetime_loops as f64 * self.loop_duration as f64
    }
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_sketch() {
        let config = SketchConfig::default();
        assert_eq!(config.notes, 48);
        assert_eq!(config.loop_duration, 8.0);
        assert_eq!(config.lowest_freq, 55.0);
        assert_eq!(config.lifetime_secs(), 48.0);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = SketchConfig::new()
            .canvas(20.0, 20.0)
            .notes(24)
            .lifetime_loops(2)
            .min_point_distance(1.0);

        assert_eq!(config.width, 20.0);
        assert_eq!(config.height, 20.0);
        assert_eq!(config.notes, 24);
        assert_eq!(config.lifetime_secs(), 16.0);
        assert_eq!(config.min_point_distance, 1.0);
    }
}
