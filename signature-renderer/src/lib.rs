//! # Signature Renderer
//!
//! Pixel backend for signature capture surfaces.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │        signature_core::Raster trait         │
//! ├──────────────────────┬──────────────────────┤
//! │ PixmapRaster         │ SnapshotExporter     │
//! │ (tiny-skia, PNG)     │ (PNG / JPEG export)  │
//! └──────────────────────┴──────────────────────┘
//! ```
//!
//! ```no_run
//! use signature_core::{CaptureSurface, FixedContainer, SurfaceConfig};
//! use signature_renderer::PixmapRaster;
//!
//! let container = FixedContainer::sized("signature", 400.0, 250.0);
//! let mut surface =
//!     CaptureSurface::initialize(container, PixmapRaster::default(), SurfaceConfig::default())?;
//! surface.on_pointer_down(10.0, 10.0);
//! surface.on_pointer_move(50.0, 10.0);
//! surface.on_pointer_up();
//! let data_uri = surface.export_snapshot()?.to_data_uri();
//! # Ok::<(), signature_core::CaptureError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod export;
pub mod pixmap;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, ExportFormat, SnapshotExporter};
pub use pixmap::PixmapRaster;

use signature_core::{CaptureResult, CaptureSurface, Container, SurfaceConfig};

/// A capture surface drawing into a [`PixmapRaster`].
pub type PixmapSurface<C> = CaptureSurface<C, PixmapRaster>;

/// Initialize a pixmap-backed surface on `container`.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the container's size
/// cannot be allocated.
pub fn pixmap_surface<C: Container>(
    container: C,
    config: SurfaceConfig,
) -> CaptureResult<PixmapSurface<C>> {
    CaptureSurface::initialize(container, PixmapRaster::default(), config)
}
