//! Encoded surface snapshots and data URI conversion.
//!
//! A [`Snapshot`] is the only thing a capture surface hands to the outside
//! world: encoded image bytes plus the pixel dimensions they describe. Hosts
//! embed it in a form field as `data:image/png;base64,...`.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, CaptureResult};
use crate::SurfaceSize;

/// Encodings a snapshot may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG with alpha support.
    Png,
    /// JPEG (no alpha).
    Jpeg,
    /// Unknown/other format.
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            _ => Self::Unknown,
        }
    }

    /// Detect format from MIME type.
    #[must_use]
    pub fn from_mime(mime: &str) -> Self {
        match mime.trim().to_lowercase().as_str() {
            "image/png" => Self::Png,
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            _ => Self::Unknown,
        }
    }

    /// Detect format from magic bytes.
    #[must_use]
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.starts_with(&PNG_SIGNATURE) {
            return Self::Png;
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }
        Self::Unknown
    }

    /// MIME type used in data URIs.
    #[must_use]
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Unknown => "application/octet-stream",
        }
    }

    /// Conventional file extension.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Unknown => "bin",
        }
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// Encoded image content of a surface at one moment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    format: ImageFormat,
    size: SurfaceSize,
    bytes: Vec<u8>,
}

impl Snapshot {
    /// Wrap already-encoded image bytes.
    #[must_use]
    pub fn new(format: ImageFormat, size: SurfaceSize, bytes: Vec<u8>) -> Self {
        Self {
            format,
            size,
            bytes,
        }
    }

    /// Encoding of the bytes.
    #[must_use]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Pixel dimensions the image describes.
    #[must_use]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Encoded image bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Render as a base64 data URI, e.g. `data:image/png;base64,iVBOR...`.
    #[must_use]
    pub fn to_data_uri(&self) -> String {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&self.bytes);
        format!("data:{};base64,{encoded}", self.format.mime())
    }

    /// Parse a data URI produced by a browser canvas or [`Snapshot::to_data_uri`].
    ///
    /// Both base64 and percent-encoded payloads are accepted. Dimensions are
    /// read from the PNG header; other formats report `0x0`.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InvalidDataUri`] if the URI is malformed or its
    /// payload cannot be decoded.
    pub fn from_data_uri(uri: &str) -> CaptureResult<Self> {
        let rest = uri
            .trim()
            .strip_prefix("data:")
            .ok_or_else(|| CaptureError::InvalidDataUri("missing data: scheme".to_string()))?;

        let (metadata, payload) = rest
            .split_once(',')
            .ok_or_else(|| CaptureError::InvalidDataUri("missing comma".to_string()))?;

        let mut params = metadata.split(';');
        let mime = params.next().unwrap_or_default();
        let is_base64 = params.any(|p| p.eq_ignore_ascii_case("base64"));

        let bytes = if is_base64 {
            base64::engine::general_purpose::STANDARD
                .decode(payload.trim())
                .map_err(|e| CaptureError::InvalidDataUri(format!("bad base64: {e}")))?
        } else {
            percent_decode(payload)?
        };

        let declared = ImageFormat::from_mime(mime);
        let format = match declared {
            ImageFormat::Unknown => ImageFormat::from_magic_bytes(&bytes),
            known => known,
        };
        let size = png_dimensions(&bytes).unwrap_or(SurfaceSize::new(0, 0));

        Ok(Self::new(format, size, bytes))
    }
}

/// Read width and height from a PNG's IHDR chunk.
#[must_use]
pub fn png_dimensions(bytes: &[u8]) -> Option<SurfaceSize> {
    // signature(8) + length(4) + "IHDR"(4) + width(4) + height(4)
    if bytes.len() < 24 || !bytes.starts_with(&PNG_SIGNATURE) || &bytes[12..16] != b"IHDR" {
        return None;
    }
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    Some(SurfaceSize::new(width, height))
}

fn percent_decode(input: &str) -> CaptureResult<Vec<u8>> {
    let bytes = input.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes
                .get(i + 1..i + 3)
                .and_then(|h| std::str::from_utf8(h).ok())
                .and_then(|h| u8::from_str_radix(h, 16).ok())
                .ok_or_else(|| CaptureError::InvalidDataUri("invalid URL encoding".to_string()))?;
            result.push(hex);
            i += 3;
        } else {
            result.push(bytes[i]);
            i += 1;
        }
    }

    Ok(result)
}
