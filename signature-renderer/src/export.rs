//! Snapshot export to download formats.
//!
//! Browsers offer the PNG snapshot as-is; JPEG output has no alpha channel,
//! so transparent pixels are flattened onto the configured background.

use std::path::Path;

use signature_core::{ImageFormat, Snapshot};

use crate::error::{RenderError, RenderResult};

/// Export output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image, identical to the snapshot bytes.
    #[default]
    Png,
    /// JPEG image flattened onto the export background.
    Jpeg,
}

impl ExportFormat {
    /// Pick a format from a file path's extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ImageFormat::from_extension(ext) {
            ImageFormat::Png => Some(Self::Png),
            ImageFormat::Jpeg => Some(Self::Jpeg),
            ImageFormat::Unknown => None,
        }
    }

    /// The matching snapshot encoding.
    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
        }
    }
}

/// Configuration for snapshot export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output format.
    pub format: ExportFormat,
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
    /// Background color as RGBA bytes, used when flattening.
    pub background: [u8; 4],
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            jpeg_quality: 85,
            background: [255, 255, 255, 255],
        }
    }
}

/// Exports a [`Snapshot`] to a download format.
pub struct SnapshotExporter {
    config: ExportConfig,
}

impl SnapshotExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// The export configuration.
    #[must_use]
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Export a snapshot in the configured format.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot is not a PNG or cannot be re-encoded.
    pub fn export(&self, snapshot: &Snapshot) -> RenderResult<Vec<u8>> {
        if snapshot.format() != ImageFormat::Png {
            return Err(RenderError::Export(format!(
                "expected a PNG snapshot, got {:?}",
                snapshot.format()
            )));
        }

        match self.config.format {
            ExportFormat::Png => Ok(snapshot.as_bytes().to_vec()),
            ExportFormat::Jpeg => self.render_to_jpeg(snapshot),
        }
    }

    /// Export a snapshot and wrap it as a data URI.
    ///
    /// # Errors
    ///
    /// Returns an error if the export fails.
    pub fn export_data_uri(&self, snapshot: &Snapshot) -> RenderResult<String> {
        let bytes = self.export(snapshot)?;
        let exported = Snapshot::new(self.config.format.image_format(), snapshot.size(), bytes);
        Ok(exported.to_data_uri())
    }

    #[cfg(feature = "jpeg")]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render_to_jpeg(&self, snapshot: &Snapshot) -> RenderResult<Vec<u8>> {
        use image::ImageEncoder;

        let decoded =
            image::load_from_memory_with_format(snapshot.as_bytes(), image::ImageFormat::Png)
                .map_err(|e| RenderError::Decode(format!("Failed to decode PNG snapshot: {e}")))?
                .to_rgba8();
        let (width, height) = decoded.dimensions();

        let bg = &self.config.background;
        let mut rgb_data = Vec::with_capacity(width as usize * height as usize * 3);
        for pixel in decoded.as_raw().chunks_exact(4) {
            let alpha = f32::from(pixel[3]) / 255.0;
            let inv = 1.0 - alpha;
            rgb_data.push((f32::from(pixel[0]).mul_add(alpha, f32::from(bg[0]) * inv)) as u8);
            rgb_data.push((f32::from(pixel[1]).mul_add(alpha, f32::from(bg[1]) * inv)) as u8);
            rgb_data.push((f32::from(pixel[2]).mul_add(alpha, f32::from(bg[2]) * inv)) as u8);
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality);
        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8.into())
            .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;

        Ok(buf.into_inner())
    }

    #[cfg(not(feature = "jpeg"))]
    #[allow(clippy::unused_self)]
    fn render_to_jpeg(&self, _snapshot: &Snapshot) -> RenderResult<Vec<u8>> {
        Err(RenderError::Export(
            "JPEG export requires the `jpeg` feature".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PixmapRaster;
    use signature_core::{Point, Raster, StrokeStyle, SurfaceSize};

    fn drawn_snapshot() -> Snapshot {
        let mut raster = PixmapRaster::new(SurfaceSize::new(40, 20)).expect("raster");
        raster.draw_segment(
            Point::new(5.0, 10.0),
            Point::new(35.0, 10.0),
            &StrokeStyle::default(),
        );
        raster.snapshot().expect("snapshot")
    }

    #[test]
    fn png_export_is_snapshot_bytes() {
        let snapshot = drawn_snapshot();
        let png = SnapshotExporter::with_defaults()
            .export(&snapshot)
            .expect("png");
        assert_eq!(png, snapshot.as_bytes());
    }

    #[cfg(feature = "jpeg")]
    #[test]
    fn jpeg_export_produces_valid_bytes() {
        let exporter = SnapshotExporter::new(ExportConfig {
            format: ExportFormat::Jpeg,
            ..Default::default()
        });
        let jpeg = exporter.export(&drawn_snapshot()).expect("jpeg");
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[cfg(feature = "jpeg")]
    #[test]
    fn jpeg_data_uri_has_jpeg_mime() {
        let exporter = SnapshotExporter::new(ExportConfig {
            format: ExportFormat::Jpeg,
            ..Default::default()
        });
        let uri = exporter.export_data_uri(&drawn_snapshot()).expect("uri");
        assert!(uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn rejects_non_png_snapshot() {
        let snapshot = Snapshot::new(ImageFormat::Jpeg, SurfaceSize::new(1, 1), vec![0xFF, 0xD8]);
        let result = SnapshotExporter::with_defaults().export(&snapshot);
        assert!(matches!(result, Err(RenderError::Export(_))));
    }

    #[test]
    fn format_from_path() {
        assert_eq!(
            ExportFormat::from_path(Path::new("out/signature.PNG")),
            Some(ExportFormat::Png)
        );
        assert_eq!(
            ExportFormat::from_path(Path::new("signature.jpeg")),
            Some(ExportFormat::Jpeg)
        );
        assert_eq!(ExportFormat::from_path(Path::new("signature.gif")), None);
        assert_eq!(ExportFormat::from_path(Path::new("signature")), None);
    }
}
