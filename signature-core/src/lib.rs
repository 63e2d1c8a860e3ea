//! # Signature Core
//!
//! Free-hand signature capture, independent of any display.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              CaptureSurface                 │
//! ├─────────────────────────────────────────────┤
//! │  Container        │  InputSource            │
//! │  - layout box     │  - pointer events       │
//! │  - resize source  │  - resize / clear       │
//! ├─────────────────────────────────────────────┤
//! │  StrokeState      │  Raster                 │
//! │  - idle/drawing   │  - segments, clear      │
//! │  - last point     │  - snapshot / restore   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The host binds a surface to a container, feeds it pointer events and
//! reads a [`Snapshot`] back as a PNG data URI when the form is saved.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod container;
pub mod error;
pub mod event;
pub mod geometry;
pub mod raster;
pub mod snapshot;
pub mod stroke;
pub mod submission;
pub mod surface;

pub use config::{LineCap, LineJoin, ResizePolicy, Rgba, StrokeStyle, SurfaceConfig};
pub use container::{Container, FixedContainer};
pub use error::{CaptureError, CaptureResult};
pub use event::{InputSource, ScriptedInput, SurfaceEvent};
pub use geometry::{LayoutBox, Point, SurfaceSize};
pub use raster::{Placement, Raster};
pub use snapshot::{ImageFormat, Snapshot};
pub use stroke::StrokeState;
pub use submission::SignaturePayload;
pub use surface::CaptureSurface;

/// Signature core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
