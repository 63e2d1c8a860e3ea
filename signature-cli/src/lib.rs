//! # Signature CLI
//!
//! Replays a recorded pointer trace onto a signature capture surface and
//! writes the resulting snapshot, the way a browser "download" control saves
//! the drawing.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p signature-cli -- trace.json --output signature.png
//! ```
//!
//! ## Printing the form field value:
//!
//! ```bash
//! cargo run -p signature-cli -- trace.json --data-uri
//! ```
//!
//! ## Architecture
//!
//! - `CliArgs` - Command-line arguments parsed with clap
//! - `ReplayConfig` - Surface, container and export settings resolved from the arguments
//! - `Trace` - Recorded container layout plus pointer/layout steps
//! - `replay` - Drives a `PixmapSurface` from a trace

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]

mod trace;

pub use trace::{
    replay, write_output, LayoutChange, ReplayError, ReplayOutcome, Trace, TraceStep,
};

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use signature_core::{ResizePolicy, SurfaceConfig};
use signature_renderer::{ExportConfig, ExportFormat};

/// Command-line arguments for signature-cli.
#[derive(Debug, Clone, Parser)]
#[command(name = "signature-cli")]
#[command(about = "Replay a pointer trace onto a signature surface")]
#[command(version)]
pub struct CliArgs {
    /// JSON trace of pointer and layout events
    pub trace: PathBuf,

    /// Surface configuration JSON file
    #[arg(long, env = "SIGNATURE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the configured resize policy (scale, anchor, discard)
    #[arg(long)]
    pub resize_policy: Option<ResizePolicy>,

    /// Container width when the trace does not record one
    #[arg(long, default_value = "400")]
    pub width: f32,

    /// Container height when the trace does not record one
    #[arg(long, default_value = "250")]
    pub height: f32,

    /// Write the snapshot to this file (format from extension: .png, .jpg)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Print the snapshot as a data URI on stdout
    #[arg(long)]
    pub data_uri: bool,

    /// JPEG quality 1-100
    #[arg(long, default_value = "85", value_parser = clap::value_parser!(u8).range(1..=100))]
    pub jpeg_quality: u8,
}

/// Replay configuration.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Trace file to replay.
    pub trace: PathBuf,
    /// Surface configuration.
    pub surface: SurfaceConfig,
    /// Container size used when the trace has none.
    pub default_size: (f32, f32),
    /// Output file, if any.
    pub output: Option<PathBuf>,
    /// Export settings for the output file.
    pub export: ExportConfig,
    /// Whether to print the data URI.
    pub print_data_uri: bool,
}

impl ReplayConfig {
    /// Create a replay configuration with default values.
    #[must_use]
    pub fn new(trace: impl Into<PathBuf>) -> Self {
        Self {
            trace: trace.into(),
            surface: SurfaceConfig::default(),
            default_size: (400.0, 250.0),
            output: None,
            export: ExportConfig::default(),
            print_data_uri: false,
        }
    }
}

impl TryFrom<CliArgs> for ReplayConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> anyhow::Result<Self> {
        let mut surface = match &args.config {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                SurfaceConfig::from_json_str(&json)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SurfaceConfig::default(),
        };
        if let Some(policy) = args.resize_policy {
            surface.resize_policy = policy;
        }

        let format = match &args.output {
            Some(path) => ExportFormat::from_path(path).with_context(|| {
                format!("unsupported output extension: {}", path.display())
            })?,
            None => ExportFormat::Png,
        };

        Ok(Self {
            trace: args.trace,
            surface,
            default_size: (args.width, args.height),
            // Nothing else to do, so fall back to printing.
            print_data_uri: args.data_uri || args.output.is_none(),
            output: args.output,
            export: ExportConfig {
                format,
                jpeg_quality: args.jpeg_quality,
                ..ExportConfig::default()
            },
        })
    }
}
