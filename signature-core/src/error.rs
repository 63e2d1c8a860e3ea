//! Error types for signature capture operations.

use thiserror::Error;

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Errors that can occur while capturing or encoding a signature.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Surface configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Surface dimensions the raster cannot represent.
    #[error("Invalid surface dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// The raster buffer failed to perform an operation.
    #[error("Raster error: {0}")]
    Raster(String),

    /// A snapshot string is not a usable data URI.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// Image bytes could not be encoded or decoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Config or trace serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
