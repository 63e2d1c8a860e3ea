//! The signature capture surface.

use crate::config::{ResizePolicy, SurfaceConfig};
use crate::container::Container;
use crate::error::CaptureResult;
use crate::event::{InputSource, SurfaceEvent};
use crate::raster::{Placement, Raster};
use crate::stroke::StrokeState;
use crate::{Point, Snapshot, SurfaceSize};

/// A free-hand drawing surface bound to a container.
///
/// Owns the raster buffer and the pointer state. Every mutation goes through
/// `&mut self`; [`CaptureSurface::export_snapshot`] only reads.
#[derive(Debug)]
pub struct CaptureSurface<C, R> {
    container: C,
    raster: R,
    config: SurfaceConfig,
    size: SurfaceSize,
    stroke: StrokeState,
    segments_drawn: u64,
    /// Content as last drawn, reused by consecutive preserving resizes.
    resize_source: Option<Snapshot>,
}

impl<C: Container, R: Raster> CaptureSurface<C, R> {
    /// Bind a surface to `container`, sizing `raster` from its layout box.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the raster cannot
    /// be allocated at the container's size.
    pub fn initialize(container: C, mut raster: R, config: SurfaceConfig) -> CaptureResult<Self> {
        config.validate()?;
        let size = container.layout_box().surface_size();
        raster.reset(size, config.background)?;

        tracing::debug!(container = container.id(), %size, "Capture surface initialized");

        Ok(Self {
            container,
            raster,
            config,
            size,
            stroke: StrokeState::Idle,
            segments_drawn: 0,
            resize_source: None,
        })
    }

    /// Re-read the container's box and start over with a blank buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if the raster cannot be allocated at the new size.
    pub fn reinitialize(&mut self) -> CaptureResult<()> {
        let size = self.container.layout_box().surface_size();
        self.raster.reset(size, self.config.background)?;
        self.size = size;
        self.stroke = StrokeState::Idle;
        self.segments_drawn = 0;
        self.resize_source = None;
        tracing::debug!(container = self.container.id(), %size, "Capture surface reinitialized");
        Ok(())
    }

    /// Press at surface-local `(x, y)`. Records a contact point, draws nothing.
    pub fn on_pointer_down(&mut self, x: f32, y: f32) {
        self.stroke.press(Point::new(x, y));
    }

    /// Move to surface-local `(x, y)`, extending the stroke if pressed.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let Some((from, to)) = self.stroke.advance(Point::new(x, y)) else {
            return;
        };
        if from == to {
            return;
        }
        self.raster.draw_segment(from, to, &self.config.stroke);
        self.segments_drawn += 1;
        self.resize_source = None;
        tracing::trace!(
            "Segment ({}, {}) -> ({}, {})",
            from.x,
            from.y,
            to.x,
            to.y
        );
    }

    /// Release the pointer; the next press starts a new stroke.
    pub fn on_pointer_up(&mut self) {
        self.stroke.release();
    }

    /// The pointer left the surface. Same transition as a release.
    pub fn on_pointer_leave(&mut self) {
        self.stroke.release();
    }

    /// Resize the buffer to the container's current box.
    ///
    /// Content is kept, stretched, or dropped according to the configured
    /// [`ResizePolicy`].
    ///
    /// # Errors
    ///
    /// Returns an error if the previous content cannot be captured or redrawn,
    /// or the raster cannot be allocated at the new size.
    pub fn on_resize(&mut self) -> CaptureResult<()> {
        let old = self.size;
        let layout = self.container.layout_box();
        let new = layout.surface_size();
        let policy = self.config.resize_policy;

        match policy {
            ResizePolicy::Discard => {
                self.resize_source = None;
                self.raster.reset(new, self.config.background)?;
                self.size = new;
            }
            ResizePolicy::Scale | ResizePolicy::Anchor if old == new => return Ok(()),
            ResizePolicy::Scale | ResizePolicy::Anchor if layout.is_collapsed() => {
                tracing::debug!(%old, ?policy, "Container collapsed, keeping buffer");
                return Ok(());
            }
            ResizePolicy::Scale | ResizePolicy::Anchor => {
                // Always resample the content as last drawn, not an earlier resample
                let source = match self.resize_source.take() {
                    Some(source) => source,
                    None => self.raster.snapshot()?,
                };
                self.raster.reset(new, self.config.background)?;
                self.size = new;
                let placement = if policy == ResizePolicy::Scale {
                    let (sx, sy) = old.scale_to(new);
                    self.stroke.rescale(sx, sy);
                    Placement::Scaled
                } else {
                    Placement::Anchored
                };
                self.raster.restore(&source, placement)?;
                self.resize_source = Some(source);
            }
        }

        tracing::debug!(%old, %new, ?policy, "Capture surface resized");
        Ok(())
    }

    /// Encode the current content. Does not change the surface.
    ///
    /// # Errors
    ///
    /// Returns an error if the raster cannot be encoded.
    pub fn export_snapshot(&self) -> CaptureResult<Snapshot> {
        self.raster.snapshot()
    }

    /// Blank the buffer. Pointer state is untouched.
    pub fn clear(&mut self) {
        self.raster.clear(self.config.background);
        self.resize_source = None;
        tracing::debug!(container = self.container.id(), "Capture surface cleared");
    }

    /// Dispatch one host event, translating window coordinates to local ones.
    ///
    /// # Errors
    ///
    /// Returns an error only for resize events that fail.
    pub fn handle_event(&mut self, event: &SurfaceEvent) -> CaptureResult<()> {
        match *event {
            SurfaceEvent::PointerDown { x, y } => {
                let local = self.container.layout_box().to_local(x, y);
                self.on_pointer_down(local.x, local.y);
            }
            SurfaceEvent::PointerMove { x, y } => {
                let local = self.container.layout_box().to_local(x, y);
                self.on_pointer_move(local.x, local.y);
            }
            SurfaceEvent::PointerUp => self.on_pointer_up(),
            SurfaceEvent::PointerLeave => self.on_pointer_leave(),
            SurfaceEvent::Resize => self.on_resize()?,
            SurfaceEvent::Clear => self.clear(),
        }
        Ok(())
    }

    /// Drain `source` through [`CaptureSurface::handle_event`].
    ///
    /// # Errors
    ///
    /// Stops at and returns the first failing event's error.
    pub fn pump<S: InputSource + ?Sized>(&mut self, source: &mut S) -> CaptureResult<usize> {
        let mut handled = 0;
        while let Some(event) = source.next_event() {
            self.handle_event(&event)?;
            handled += 1;
        }
        Ok(handled)
    }

    /// Whether nothing is drawn.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.raster.is_blank(self.config.background)
    }

    /// Current pixel dimensions.
    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Current pointer state.
    #[must_use]
    pub fn stroke_state(&self) -> StrokeState {
        self.stroke
    }

    /// Segments drawn since initialization.
    #[must_use]
    pub fn segments_drawn(&self) -> u64 {
        self.segments_drawn
    }

    /// The surface configuration.
    #[must_use]
    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The bound container.
    #[must_use]
    pub fn container(&self) -> &C {
        &self.container
    }

    /// Read access to the raster, e.g. for blitting to a display.
    #[must_use]
    pub fn raster(&self) -> &R {
        &self.raster
    }
}
