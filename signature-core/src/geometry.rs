//! Points, pixel sizes and container layout boxes.

use serde::{Deserialize, Serialize};

/// A point in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X position in pixels from the surface's left edge.
    pub x: f32,
    /// Y position in pixels from the surface's top edge.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale both coordinates independently.
    #[must_use]
    pub fn scaled(self, sx: f32, sy: f32) -> Self {
        Self::new(self.x * sx, self.y * sy)
    }
}

/// Integer pixel dimensions of a raster surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl SurfaceSize {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Per-axis factors mapping coordinates of `self` onto `target`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn scale_to(self, target: SurfaceSize) -> (f32, f32) {
        (
            target.width as f32 / self.width.max(1) as f32,
            target.height as f32 / self.height.max(1) as f32,
        )
    }
}

impl std::fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// The on-screen box of a container element, relative to the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutBox {
    /// Left edge offset from the window origin.
    pub left: f32,
    /// Top edge offset from the window origin.
    pub top: f32,
    /// Rendered width.
    pub width: f32,
    /// Rendered height.
    pub height: f32,
}

impl LayoutBox {
    /// Create a layout box at the given offset.
    #[must_use]
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a layout box anchored at the window origin.
    #[must_use]
    pub const fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Translate window coordinates into coordinates local to this box.
    #[must_use]
    pub fn to_local(&self, page_x: f32, page_y: f32) -> Point {
        Point::new(page_x - self.left, page_y - self.top)
    }

    /// Whether the box is under one pixel on either axis, as for a hidden element.
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        !(self.width >= 1.0 && self.height >= 1.0)
    }

    /// Pixel dimensions for a raster filling this box.
    ///
    /// Fractional sizes truncate the way a canvas width assignment does;
    /// degenerate or non-finite boxes clamp to a single pixel.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn surface_size(&self) -> SurfaceSize {
        let clamp = |v: f32| {
            if v.is_finite() && v >= 1.0 {
                v.min(u32::MAX as f32) as u32
            } else {
                1
            }
        };
        SurfaceSize::new(clamp(self.width), clamp(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_local_subtracts_offset() {
        let layout = LayoutBox::new(30.0, 120.0, 400.0, 250.0);
        assert_eq!(layout.to_local(40.0, 130.0), Point::new(10.0, 10.0));
    }

    #[test]
    fn surface_size_truncates_fractional_box() {
        let layout = LayoutBox::sized(400.7, 250.2);
        assert_eq!(layout.surface_size(), SurfaceSize::new(400, 250));
    }

    #[test]
    fn surface_size_clamps_degenerate_box() {
        assert_eq!(
            LayoutBox::sized(0.0, -5.0).surface_size(),
            SurfaceSize::new(1, 1)
        );
        assert_eq!(
            LayoutBox::sized(f32::NAN, f32::INFINITY).surface_size(),
            SurfaceSize::new(1, 1)
        );
    }

    #[test]
    fn scale_to_reports_per_axis_factors() {
        let (sx, sy) = SurfaceSize::new(400, 250).scale_to(SurfaceSize::new(200, 500));
        assert!((sx - 0.5).abs() < f32::EPSILON);
        assert!((sy - 2.0).abs() < f32::EPSILON);
    }
}
