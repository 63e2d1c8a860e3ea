//! Surface configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, CaptureResult};

/// RGBA color as straight (non-premultiplied) bytes.
pub type Rgba = [u8; 4];

/// How segment corners are joined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineJoin {
    /// Sharp corners.
    Miter,
    /// Rounded corners.
    #[default]
    Round,
    /// Flattened corners.
    Bevel,
}

/// How segment ends are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    /// Ends flush with the endpoint.
    Butt,
    /// Rounded ends, so consecutive segments meet without gaps.
    #[default]
    Round,
    /// Ends extended by half the stroke width.
    Square,
}

/// Pen used for every segment of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeStyle {
    /// Line width in pixels.
    pub width: f32,
    /// Ink color.
    pub color: Rgba,
    /// Corner join.
    pub line_join: LineJoin,
    /// End cap.
    pub line_cap: LineCap,
    /// Enable anti-aliasing.
    pub anti_alias: bool,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: [0, 0, 0, 255],
            line_join: LineJoin::Round,
            line_cap: LineCap::Round,
            anti_alias: true,
        }
    }
}

/// What happens to drawn content when the container changes size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizePolicy {
    /// Redraw previous content stretched to the new dimensions.
    #[default]
    Scale,
    /// Redraw previous content unscaled at the top-left, clipping overflow.
    Anchor,
    /// Drop previous content; the surface is blank after every resize.
    Discard,
}

impl std::str::FromStr for ResizePolicy {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "scale" => Ok(Self::Scale),
            "anchor" => Ok(Self::Anchor),
            "discard" => Ok(Self::Discard),
            other => Err(CaptureError::InvalidConfig(format!(
                "unknown resize policy '{other}' (expected scale, anchor or discard)"
            ))),
        }
    }
}

/// Configuration for a capture surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Pen for free-hand strokes.
    pub stroke: StrokeStyle,
    /// Fill used for a blank surface. Transparent by default, like a fresh canvas.
    pub background: Rgba,
    /// Content handling on resize.
    pub resize_policy: ResizePolicy,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle::default(),
            background: [0, 0, 0, 0],
            resize_policy: ResizePolicy::Scale,
        }
    }
}

impl SurfaceConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the result fails validation.
    pub fn from_json_str(json: &str) -> CaptureResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be rendered.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::InvalidConfig`] for a non-finite or non-positive stroke width.
    pub fn validate(&self) -> CaptureResult<()> {
        let width = self.stroke.width;
        if !width.is_finite() || width <= 0.0 {
            return Err(CaptureError::InvalidConfig(format!(
                "stroke width must be a positive number, got {width}"
            )));
        }
        Ok(())
    }

    /// Builder-style override of the resize policy.
    #[must_use]
    pub fn with_resize_policy(mut self, policy: ResizePolicy) -> Self {
        self.resize_policy = policy;
        self
    }
}
