//! CPU raster buffer backed by a tiny-skia [`Pixmap`].

use signature_core::{
    CaptureError, CaptureResult, ImageFormat, LineCap, LineJoin, Placement, Point, Raster, Rgba,
    Snapshot, StrokeStyle, SurfaceSize,
};
use tiny_skia::{
    Color, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Stroke,
    Transform,
};

use crate::error::{RenderError, RenderResult};

/// A raster buffer for a capture surface.
#[derive(Debug, Clone)]
pub struct PixmapRaster {
    pixmap: Pixmap,
}

impl PixmapRaster {
    /// Create a blank, transparent buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the buffer is too large.
    pub fn new(size: SurfaceSize) -> RenderResult<Self> {
        Ok(Self {
            pixmap: allocate(size)?,
        })
    }

    /// The underlying pixmap.
    #[must_use]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha color at `(x, y)`, or `None` outside the buffer.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.pixmap.pixel(x, y).map(straight)
    }

    /// The whole buffer as straight-alpha RGBA bytes, row-major.
    ///
    /// Suitable for browser `ImageData`, which does not take premultiplied data.
    #[must_use]
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| straight(*p))
            .collect()
    }

    /// Encode the buffer as PNG.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
    }
}

impl Default for PixmapRaster {
    fn default() -> Self {
        Self {
            pixmap: Pixmap::new(1, 1).unwrap_or_else(|| unreachable!("1x1 pixmap is valid")),
        }
    }
}

impl Raster for PixmapRaster {
    fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.pixmap.width(), self.pixmap.height())
    }

    fn reset(&mut self, size: SurfaceSize, background: Rgba) -> CaptureResult<()> {
        let mut pixmap = allocate(size).map_err(|_| CaptureError::InvalidDimensions {
            width: size.width,
            height: size.height,
        })?;
        pixmap.fill(color(background));
        self.pixmap = pixmap;
        tracing::trace!("Pixmap reset to {size}");
        Ok(())
    }

    fn draw_segment(&mut self, from: Point, to: Point, style: &StrokeStyle) {
        let mut builder = PathBuilder::new();
        builder.move_to(from.x, from.y);
        builder.line_to(to.x, to.y);
        let Some(path) = builder.finish() else {
            tracing::trace!("Skipping degenerate segment");
            return;
        };

        let mut paint = Paint::default();
        let [r, g, b, a] = style.color;
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = style.anti_alias;

        let stroke = Stroke {
            width: style.width,
            line_cap: line_cap(style.line_cap),
            line_join: line_join(style.line_join),
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }

    fn clear(&mut self, background: Rgba) {
        self.pixmap.fill(color(background));
    }

    fn snapshot(&self) -> CaptureResult<Snapshot> {
        let bytes = self.encode_png()?;
        Ok(Snapshot::new(ImageFormat::Png, self.size(), bytes))
    }

    #[allow(clippy::cast_precision_loss)]
    fn restore(&mut self, snapshot: &Snapshot, placement: Placement) -> CaptureResult<()> {
        let previous = Pixmap::decode_png(snapshot.as_bytes())
            .map_err(|e| RenderError::Decode(format!("PNG decoding failed: {e}")))?;

        let (transform, quality) = match placement {
            Placement::Scaled
                if previous.width() == self.pixmap.width()
                    && previous.height() == self.pixmap.height() =>
            {
                (Transform::identity(), FilterQuality::Nearest)
            }
            Placement::Scaled => {
                let sx = self.pixmap.width() as f32 / previous.width() as f32;
                let sy = self.pixmap.height() as f32 / previous.height() as f32;
                (Transform::from_scale(sx, sy), FilterQuality::Bilinear)
            }
            Placement::Anchored => (Transform::identity(), FilterQuality::Nearest),
        };

        let paint = PixmapPaint {
            quality,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, previous.as_ref(), &paint, transform, None);
        Ok(())
    }

    fn is_blank(&self, background: Rgba) -> bool {
        let expected = color(background).premultiply().to_color_u8();
        self.pixmap.pixels().iter().all(|p| *p == expected)
    }
}

fn allocate(size: SurfaceSize) -> RenderResult<Pixmap> {
    Pixmap::new(size.width, size.height)
        .ok_or_else(|| RenderError::Surface(format!("cannot allocate a {size} pixmap")))
}

fn color([r, g, b, a]: Rgba) -> Color {
    Color::from_rgba8(r, g, b, a)
}

fn straight(pixel: PremultipliedColorU8) -> Rgba {
    let c = pixel.demultiply();
    [c.red(), c.green(), c.blue(), c.alpha()]
}

fn line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

fn line_join(join: LineJoin) -> tiny_skia::LineJoin {
    match join {
        LineJoin::Miter => tiny_skia::LineJoin::Miter,
        LineJoin::Round => tiny_skia::LineJoin::Round,
        LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRANSPARENT: Rgba = [0, 0, 0, 0];
    const WHITE: Rgba = [255, 255, 255, 255];

    fn raster(width: u32, height: u32, background: Rgba) -> PixmapRaster {
        let mut raster = PixmapRaster::default();
        raster
            .reset(SurfaceSize::new(width, height), background)
            .expect("reset");
        raster
    }

    #[test]
    fn reset_fills_background() {
        let raster = raster(4, 3, WHITE);
        assert_eq!(raster.size(), SurfaceSize::new(4, 3));
        assert_eq!(raster.pixel(3, 2), Some(WHITE));
        assert!(raster.is_blank(WHITE));
        assert!(!raster.is_blank(TRANSPARENT));
    }

    #[test]
    fn reset_rejects_zero_size() {
        let mut raster = PixmapRaster::default();
        let err = raster
            .reset(SurfaceSize::new(0, 10), TRANSPARENT)
            .unwrap_err();
        assert!(matches!(
            err,
            CaptureError::InvalidDimensions {
                width: 0,
                height: 10
            }
        ));
    }

    #[test]
    fn segment_marks_pixels_along_line() {
        let mut raster = raster(20, 20, TRANSPARENT);
        raster.draw_segment(
            Point::new(2.0, 10.0),
            Point::new(18.0, 10.0),
            &StrokeStyle::default(),
        );

        let on_line = raster.pixel(10, 10).expect("in bounds");
        assert_eq!(on_line[3], 255);
        assert_eq!(&on_line[..3], &[0, 0, 0]);
        assert_eq!(raster.pixel(10, 2), Some(TRANSPARENT));
        assert!(!raster.is_blank(TRANSPARENT));
    }

    #[test]
    fn clear_restores_background() {
        let mut raster = raster(10, 10, WHITE);
        raster.draw_segment(
            Point::new(0.0, 5.0),
            Point::new(10.0, 5.0),
            &StrokeStyle::default(),
        );
        raster.clear(WHITE);
        assert!(raster.is_blank(WHITE));
    }

    #[test]
    fn snapshot_is_png_of_buffer_size() {
        let raster = raster(7, 5, TRANSPARENT);
        let snapshot = raster.snapshot().expect("snapshot");
        assert_eq!(snapshot.format(), ImageFormat::Png);
        assert_eq!(snapshot.size(), SurfaceSize::new(7, 5));
        assert_eq!(&snapshot.as_bytes()[0..4], &[137, 80, 78, 71]);
        assert_eq!(
            signature_core::snapshot::png_dimensions(snapshot.as_bytes()),
            Some(SurfaceSize::new(7, 5))
        );
    }

    #[test]
    fn anchored_restore_keeps_pixel_positions() {
        let mut source = raster(10, 10, TRANSPARENT);
        source.draw_segment(
            Point::new(0.0, 5.0),
            Point::new(10.0, 5.0),
            &StrokeStyle::default(),
        );
        let snapshot = source.snapshot().expect("snapshot");

        let mut target = raster(20, 20, TRANSPARENT);
        target
            .restore(&snapshot, Placement::Anchored)
            .expect("restore");
        assert_eq!(target.pixel(5, 5).map(|p| p[3]), Some(255));
        assert_eq!(target.pixel(15, 5), Some(TRANSPARENT));
    }

    #[test]
    fn scaled_restore_stretches_content() {
        let mut source = raster(10, 10, TRANSPARENT);
        source.draw_segment(
            Point::new(0.0, 5.0),
            Point::new(10.0, 5.0),
            &StrokeStyle::default(),
        );
        let snapshot = source.snapshot().expect("snapshot");

        let mut target = raster(20, 20, TRANSPARENT);
        target
            .restore(&snapshot, Placement::Scaled)
            .expect("restore");
        assert!(target.pixel(15, 10).map_or(0, |p| p[3]) > 0);
        assert_eq!(target.pixel(10, 1), Some(TRANSPARENT));
    }

    #[test]
    fn scaled_restore_at_same_size_is_exact() {
        let mut source = raster(12, 8, TRANSPARENT);
        source.draw_segment(
            Point::new(1.0, 1.5),
            Point::new(10.0, 6.5),
            &StrokeStyle::default(),
        );
        let snapshot = source.snapshot().expect("snapshot");

        let mut target = raster(12, 8, TRANSPARENT);
        target
            .restore(&snapshot, Placement::Scaled)
            .expect("restore");
        let decoded = Pixmap::decode_png(snapshot.as_bytes()).expect("decode");
        assert_eq!(target.pixmap().data(), decoded.data());
    }

    #[test]
    fn restore_rejects_non_png() {
        let mut target = raster(4, 4, TRANSPARENT);
        let bogus = Snapshot::new(ImageFormat::Png, SurfaceSize::new(4, 4), vec![1, 2, 3]);
        assert!(matches!(
            target.restore(&bogus, Placement::Scaled),
            Err(CaptureError::Raster(_))
        ));
    }

    #[test]
    fn to_rgba_is_straight_alpha() {
        let raster = raster(2, 1, [255, 0, 0, 128]);
        let rgba = raster.to_rgba();
        assert_eq!(rgba.len(), 8);
        assert_eq!(rgba[3], 128);
        assert!(rgba[0] >= 254);
    }
}
