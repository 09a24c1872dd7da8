//! Drawn paths and the segmenter that turns them into timed pitch glides.
//!
//! A path is read left to right no matter which way it was drawn: points are
//! stable-sorted by x before anything else looks at them. Points sharing an x
//! keep their capture order.

use crate::mapping::CoordinateMapper;

/// A point in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation toward `other` (`t` in 0..1)
    pub fn lerp(&self, other: &Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Outgoing pitch movement of a glide instruction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glide {
    /// Frequency to arrive at (Hz)
    pub next_frequency: f32,
    /// Time to get there (seconds)
    pub duration: f32,
}

/// One timed event of a note line's playback.
///
/// `is_first` starts the voice, `is_last` releases it, and every instruction
/// except the last carries the glide toward the next vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlideInstruction {
    /// Loop-relative time in seconds
    pub time: f32,
    /// Pitch at this vertex (Hz)
    pub frequency: f32,
    pub is_first: bool,
    pub is_last: bool,
    pub glide: Option<Glide>,
}

/// Stable sort by x; ties keep their original relative order.
pub fn sort_by_x(points: &mut [Point]) {
    points.sort_by(|a, b| a.x.total_cmp(&b.x));
}

/// Sorted copy of a path
pub fn normalized(points: &[Point]) -> Vec<Point> {
    let mut sorted = points.to_vec();
    sort_by_x(&mut sorted);
    sorted
}

/// Convert a path into one glide instruction per vertex.
///
/// The path is sorted by x first, so the output is always ordered by time.
/// Nothing is dropped or merged: `n` points give `n` instructions.
pub fn segment_path(points: &[Point], mapper: &CoordinateMapper) -> Vec<GlideInstruction> {
    let sorted = normalized(points);
    let last_index = sorted.len().saturating_sub(1);

    sorted
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let time = mapper.x_to_seconds(point.x);
            let frequency = mapper.y_to_frequency(point.y);

            if i == last_index {
                return GlideInstruction {
                    time,
                    frequency,
                    is_first: false,
                    is_last: true,
                    glide: None,
                };
            }

            let next = sorted[i + 1];
            GlideInstruction {
                time,
                frequency,
                is_first: i == 0,
                is_last: false,
                glide: Some(Glide {
                    next_frequency: mapper.y_to_frequency(next.y),
                    duration: mapper.x_to_seconds(next.x - point.x),
                }),
            }
        })
        .collect()
}
