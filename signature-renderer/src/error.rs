//! Renderer error types.

use signature_core::CaptureError;
use thiserror::Error;

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while rasterizing or encoding.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Pixel buffer could not be allocated.
    #[error("Surface error: {0}")]
    Surface(String),

    /// Pixel data could not be encoded.
    #[error("Encoding failed: {0}")]
    Encode(String),

    /// Encoded image could not be decoded.
    #[error("Decoding failed: {0}")]
    Decode(String),

    /// Export to a download format failed.
    #[error("Export failed: {0}")]
    Export(String),
}

impl From<RenderError> for CaptureError {
    fn from(err: RenderError) -> Self {
        CaptureError::Raster(err.to_string())
    }
}
