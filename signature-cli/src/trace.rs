//! Recorded pointer traces and their replay.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use signature_core::{FixedContainer, LayoutBox, Snapshot, SurfaceEvent, SurfaceSize};
use signature_renderer::{pixmap_surface, SnapshotExporter};
use thiserror::Error;

use crate::ReplayConfig;

/// Errors from loading or replaying a trace.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Trace file could not be read.
    #[error("Failed to read trace {path}: {source}")]
    Read {
        /// Trace path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Trace JSON is malformed.
    #[error("Invalid trace: {0}")]
    Parse(#[from] serde_json::Error),

    /// The surface rejected an event or configuration.
    #[error("Capture failed at step {step}: {source}")]
    Capture {
        /// Zero-based index of the failing step (0 for initialization).
        step: usize,
        /// Underlying capture error.
        source: signature_core::CaptureError,
    },

    /// Snapshot could not be exported or written.
    #[error("Output failed: {0}")]
    Output(String),
}

/// One recorded step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceStep {
    /// Host input delivered to the surface.
    Event(SurfaceEvent),
    /// Container relayout, followed by a resize event.
    Layout(LayoutChange),
}

/// A change of the container's box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutChange {
    /// New box for the container.
    Layout {
        /// Left offset in the window.
        #[serde(default)]
        left: f32,
        /// Top offset in the window.
        #[serde(default)]
        top: f32,
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
}

/// A recorded capture session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Initial container box; the configured default size when absent.
    #[serde(default)]
    pub container: Option<LayoutBox>,
    /// Steps in delivery order.
    pub steps: Vec<TraceStep>,
}

impl Trace {
    /// Load a trace from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Parse a trace from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a trace.
    pub fn from_json_str(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of replaying a trace.
#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    /// Final surface content.
    pub snapshot: Snapshot,
    /// Final surface dimensions.
    pub size: SurfaceSize,
    /// Steps applied.
    pub steps: usize,
    /// Segments drawn.
    pub segments: u64,
    /// Whether the final surface is blank.
    pub blank: bool,
}

/// Replay `trace` onto a fresh pixmap surface.
///
/// # Errors
///
/// Returns an error if the surface cannot be initialized or a step fails.
pub fn replay(trace: &Trace, config: &ReplayConfig) -> Result<ReplayOutcome, ReplayError> {
    let (width, height) = config.default_size;
    let layout = trace
        .container
        .unwrap_or_else(|| LayoutBox::sized(width, height));
    let container = FixedContainer::new("signature", layout);
    let handle = container.clone();

    let mut surface = pixmap_surface(container, config.surface.clone())
        .map_err(|source| ReplayError::Capture { step: 0, source })?;

    for (step, item) in trace.steps.iter().enumerate() {
        let result = match *item {
            TraceStep::Event(event) => surface.handle_event(&event),
            TraceStep::Layout(LayoutChange::Layout {
                left,
                top,
                width,
                height,
            }) => {
                handle.set_layout(LayoutBox::new(left, top, width, height));
                surface.handle_event(&SurfaceEvent::Resize)
            }
        };
        result.map_err(|source| ReplayError::Capture { step, source })?;
    }

    let snapshot = surface
        .export_snapshot()
        .map_err(|source| ReplayError::Capture {
            step: trace.steps.len(),
            source,
        })?;

    tracing::info!(
        steps = trace.steps.len(),
        segments = surface.segments_drawn(),
        size = %surface.size(),
        policy = ?surface.config().resize_policy,
        "Trace replayed"
    );

    Ok(ReplayOutcome {
        snapshot,
        size: surface.size(),
        steps: trace.steps.len(),
        segments: surface.segments_drawn(),
        blank: surface.is_blank(),
    })
}

/// Export `snapshot` with `exporter` and write it to `path`.
///
/// # Errors
///
/// Returns an error if export or the file write fails.
pub fn write_output(
    snapshot: &Snapshot,
    exporter: &SnapshotExporter,
    path: &Path,
) -> Result<usize, ReplayError> {
    let bytes = exporter
        .export(snapshot)
        .map_err(|e| ReplayError::Output(e.to_string()))?;
    std::fs::write(path, &bytes)
        .map_err(|e| ReplayError::Output(format!("{}: {e}", path.display())))?;
    tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use signature_core::{ImageFormat, ResizePolicy};
    use signature_renderer::{ExportConfig, ExportFormat};

    const L_SHAPE: &str = r#"{
        "container": {"left": 0, "top": 0, "width": 400, "height": 250},
        "steps": [
            {"type": "pointer_down", "x": 10, "y": 10},
            {"type": "pointer_move", "x": 50, "y": 10},
            {"type": "pointer_move", "x": 50, "y": 60},
            {"type": "pointer_up"}
        ]
    }"#;

    #[test]
    fn parses_events_and_layout_steps() {
        let trace = Trace::from_json_str(
            r#"{"steps":[{"type":"pointer_leave"},{"type":"layout","width":10,"height":20},{"type":"resize"}]}"#,
        )
        .expect("trace");

        assert_eq!(trace.container, None);
        assert_eq!(
            trace.steps,
            vec![
                TraceStep::Event(SurfaceEvent::PointerLeave),
                TraceStep::Layout(LayoutChange::Layout {
                    left: 0.0,
                    top: 0.0,
                    width: 10.0,
                    height: 20.0
                }),
                TraceStep::Event(SurfaceEvent::Resize),
            ]
        );
    }

    #[test]
    fn rejects_unknown_step() {
        assert!(Trace::from_json_str(r#"{"steps":[{"type":"pinch"}]}"#).is_err());
    }

    #[test]
    fn replays_l_shape() {
        let trace = Trace::from_json_str(L_SHAPE).expect("trace");
        let outcome = replay(&trace, &ReplayConfig::new("unused.json")).expect("replay");

        assert_eq!(outcome.steps, 4);
        assert_eq!(outcome.segments, 2);
        assert_eq!(outcome.size, SurfaceSize::new(400, 250));
        assert!(!outcome.blank);
        assert_eq!(outcome.snapshot.format(), ImageFormat::Png);
    }

    #[test]
    fn missing_container_uses_default_size() {
        let trace = Trace::from_json_str(r#"{"steps":[]}"#).expect("trace");
        let mut config = ReplayConfig::new("unused.json");
        config.default_size = (120.0, 40.0);

        let outcome = replay(&trace, &config).expect("replay");
        assert_eq!(outcome.size, SurfaceSize::new(120, 40));
        assert!(outcome.blank);
    }

    #[test]
    fn layout_step_resizes_under_policy() {
        let trace = Trace::from_json_str(
            r#"{"container":{"left":0,"top":0,"width":100,"height":100},"steps":[
                {"type":"pointer_down","x":10,"y":10},
                {"type":"pointer_move","x":90,"y":10},
                {"type":"pointer_up"},
                {"type":"layout","width":200,"height":50}
            ]}"#,
        )
        .expect("trace");

        let mut config = ReplayConfig::new("unused.json");
        let kept = replay(&trace, &config).expect("replay");
        assert_eq!(kept.size, SurfaceSize::new(200, 50));
        assert!(!kept.blank);

        config.surface.resize_policy = ResizePolicy::Discard;
        let dropped = replay(&trace, &config).expect("replay");
        assert!(dropped.blank);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Trace::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ReplayError::Read { .. }));
    }

    #[test]
    fn writes_png_and_jpeg_outputs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let trace = Trace::from_json_str(L_SHAPE).expect("trace");
        let outcome = replay(&trace, &ReplayConfig::new("unused.json")).expect("replay");

        let png_path = dir.path().join("signature.png");
        let written = write_output(
            &outcome.snapshot,
            &SnapshotExporter::with_defaults(),
            &png_path,
        )
        .expect("write png");
        let png = std::fs::read(&png_path).expect("read png");
        assert_eq!(png.len(), written);
        assert_eq!(png, outcome.snapshot.as_bytes());

        let jpg_path = dir.path().join("signature.jpg");
        let jpeg_exporter = SnapshotExporter::new(ExportConfig {
            format: ExportFormat::Jpeg,
            ..ExportConfig::default()
        });
        write_output(&outcome.snapshot, &jpeg_exporter, &jpg_path).expect("write jpeg");
        let jpg = std::fs::read(&jpg_path).expect("read jpeg");
        assert_eq!(&jpg[..2], &[0xFF, 0xD8]);
    }
}
