/*
Canvas Mapping
==============

The canvas is a piano roll laid on its side:

    y = 0       ┬  lowest_freq × 2^(notes/12)   (highest pitch)
                │
                │  pitch rises exponentially toward the top,
                │  one semitone per height/notes pixels
                │
    y = height  ┴  lowest_freq                  (lowest pitch)

                x = 0 ──────────────────────→ x = width
                t = 0 ──────────────────────→ t = loop_duration

Frequency from a (fractional) note index uses equal temperament:

    f = lowest_freq × 2^(note / 12)

None of the functions clamp. Extending a path past the right edge (for a
release tail) simply maps to times past the loop end.
*/

use crate::config::SketchConfig;

/// Pure conversions between canvas pixels and pitch/loop time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    width: f32,
    height: f32,
    loop_duration: f32,
    lowest_freq: f32,
    notes: f32,
}

impl CoordinateMapper {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            loop_duration: config.loop_duration,
            lowest_freq: config.lowest_freq,
            notes: config.notes as f32,
        }
    }

    /// Pitch for a canvas row; top of the canvas is the highest pitch.
    pub fn y_to_frequency(&self, y: f32) -> f32 {
        let inverted_y = self.height - y;
        let note = (inverted_y / self.height) * self.notes;
        self.lowest_freq * 2.0_f32.powf(note / 12.0)
    }

    /// Loop-relative time for a canvas column.
    pub fn x_to_seconds(&self, x: f32) -> f32 {
        (x / self.width) * self.loop_duration
    }

    /// Pixel span covered by a duration. Used to lay envelope stages out on the canvas.
    pub fn seconds_to_x_width(&self, seconds: f32) -> f32 {
        (seconds / self.loop_duration) * self.width
    }

    /// Height of one semitone row in pixels.
    pub fn row_height(&self) -> f32 {
        self.height / self.notes
    }

    /// Snap a y position to the nearest semitone row.
    pub fn snap_y(&self, y: f32) -> f32 {
        let grid = self.row_height();
        (y / grid).round() * grid
    }

    /// Centre line of semitone row `index`, counted up from the bottom edge.
    pub fn note_row_y(&self, index: u32) -> f32 {
        self.height - (index as f32 / self.notes) * self.height
    }

    /// Number of semitone rows on the canvas.
    pub fn notes(&self) -> u32 {
        self.notes as u32
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn loop_duration(&self) -> f32 {
        self.loop_duration
    }
}
