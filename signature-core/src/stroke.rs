//! Pointer state for free-hand strokes.

use serde::{Deserialize, Serialize};

use crate::Point;

/// Transient pointer state of a capture surface.
///
/// The last point only exists while the pointer is down, so a release or
/// leave always starts the next press as a fresh, disconnected stroke.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum StrokeState {
    /// Pointer is up; moves are ignored.
    #[default]
    Idle,
    /// Pointer is down; the next move connects from `last`.
    Drawing {
        /// Most recent contact point.
        last: Point,
    },
}

impl StrokeState {
    /// Whether the pointer is currently pressed.
    #[must_use]
    pub fn is_pointer_down(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// The last contact point, if the pointer is down.
    #[must_use]
    pub fn last_point(&self) -> Option<Point> {
        match self {
            Self::Idle => None,
            Self::Drawing { last } => Some(*last),
        }
    }

    /// Record a press at `point`. A press produces no segment.
    pub fn press(&mut self, point: Point) {
        *self = Self::Drawing { last: point };
    }

    /// Advance to `point`, returning the segment to draw if the pointer is down.
    pub fn advance(&mut self, point: Point) -> Option<(Point, Point)> {
        match self {
            Self::Idle => None,
            Self::Drawing { last } => {
                let from = *last;
                *last = point;
                Some((from, point))
            }
        }
    }

    /// Release the pointer, discarding the last point.
    pub fn release(&mut self) {
        *self = Self::Idle;
    }

    /// Rescale the last point after the surface changed size.
    pub fn rescale(&mut self, sx: f32, sy: f32) {
        if let Self::Drawing { last } = self {
            *last = last.scaled(sx, sy);
        }
    }
}
