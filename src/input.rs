//! Stroke capture and voice selection.
//!
//! Everything the pointer and keyboard change between frames lives in one
//! [`SessionState`]; the scene owns it and the front-end feeds it events.

use crate::{config::SketchConfig, mapping::CoordinateMapper, path::Point, voices::VoiceKind};

#[derive(Debug, Clone)]
pub struct SessionState {
    drawing: bool,
    stroke: Vec<Point>,
    selected: VoiceKind,
    locked_y: Option<f32>,
    min_point_distance: f32,
}

impl SessionState {
    pub fn new(config: &SketchConfig) -> Self {
        Self {
            drawing: false,
            stroke: Vec::new(),
            selected: VoiceKind::default(),
            locked_y: None,
            min_point_distance: config.min_point_distance,
        }
    }

    /// Where the pointer actually lands, after grid snapping.
    ///
    /// With `snap` held the y position is rounded to the nearest semitone
    /// row. During a stroke the first snapped row sticks until snap is let
    /// go, so a held note stays flat.
    pub fn pointer(&mut self, x: f32, y: f32, snap: bool, mapper: &CoordinateMapper) -> Point {
        if !snap {
            self.locked_y = None;
            return Point::new(x, y);
        }

        if self.drawing {
            if let Some(locked) = self.locked_y {
                return Point::new(x, locked);
            }
        }

        let snapped = mapper.snap_y(y);
        self.locked_y = Some(snapped);
        Point::new(x, snapped)
    }

    /// Pointer pressed: start a new, empty stroke.
    pub fn begin_stroke(&mut self) {
        self.drawing = true;
        self.stroke.clear();
    }

    /// Pointer dragged to `point`. Returns whether it was captured.
    ///
    /// The first point is always kept; after that a point must be more than
    /// the minimum spacing away from the last captured one.
    pub fn add_point(&mut self, point: Point) -> bool {
        if !self.drawing {
            return false;
        }

        let far_enough = match self.stroke.last() {
            None => true,
            Some(last) => last.distance(&point) > self.min_point_distance,
        };
        if far_enough {
            self.stroke.push(point);
        }
        far_enough
    }

    /// Pointer released: hand over the captured points and reset.
    ///
    /// Returns `None` if no stroke was in progress.
    pub fn end_stroke(&mut self) -> Option<Vec<Point>> {
        if !self.drawing {
            return None;
        }
        self.drawing = false;
        Some(std::mem::take(&mut self.stroke))
    }

    /// Drop the stroke in progress.
    pub fn cancel(&mut self) {
        self.drawing = false;
        self.stroke.clear();
    }

    pub fn select_voice(&mut self, kind: VoiceKind) {
        self.selected = kind;
    }

    pub fn selected_voice(&self) -> VoiceKind {
        self.selected
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Points captured so far in the current stroke
    pub fn stroke(&self) -> &[Point] {
        &self.stroke
    }
}
