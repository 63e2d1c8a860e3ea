//! The pixel-buffer seam behind a capture surface.

use crate::config::{Rgba, StrokeStyle};
use crate::error::CaptureResult;
use crate::{Point, Snapshot, SurfaceSize};

/// Where restored content is drawn on a resized buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Stretch the snapshot to fill the whole buffer.
    Scaled,
    /// Draw the snapshot at its own size from the top-left corner.
    Anchored,
}

/// A raster buffer a capture surface draws into.
///
/// The surface owns its raster exclusively; implementations never need to
/// guard against concurrent access.
pub trait Raster {
    /// Current buffer dimensions.
    fn size(&self) -> SurfaceSize;

    /// Replace the buffer with a blank one of `size`, filled with `background`.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be allocated at that size.
    fn reset(&mut self, size: SurfaceSize, background: Rgba) -> CaptureResult<()>;

    /// Draw one straight segment with the given pen.
    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle);

    /// Fill the whole buffer with `background`, keeping its size.
    fn clear(&mut self, background: Rgba);

    /// Encode the current content.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    fn snapshot(&self) -> CaptureResult<Snapshot>;

    /// Draw previously captured content back onto the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be decoded.
    fn restore(&mut self, snapshot: &Snapshot, placement: Placement) -> CaptureResult<()>;

    /// Whether every pixel equals `background`.
    fn is_blank(&self, background: Rgba) -> bool;
}
