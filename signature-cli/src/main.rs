//! # Signature CLI
//!
//! Replays a pointer trace and writes the captured signature.

use clap::Parser;
use signature_cli::{replay, write_output, CliArgs, ReplayConfig, Trace};
use signature_renderer::SnapshotExporter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "signature_cli=info,signature_core=info,signature_renderer=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let args = CliArgs::parse();
    let config = ReplayConfig::try_from(args)?;

    tracing::info!(
        "Replaying {} with resize policy {:?}",
        config.trace.display(),
        config.surface.resize_policy
    );

    let trace = Trace::load(&config.trace)?;
    let outcome = replay(&trace, &config)?;

    if outcome.blank {
        tracing::warn!("Signature is blank");
    }

    if let Some(ref path) = config.output {
        let exporter = SnapshotExporter::new(config.export.clone());
        let written = write_output(&outcome.snapshot, &exporter, path)?;
        tracing::info!("Saved {} ({} bytes, {})", path.display(), written, outcome.size);
    }

    if config.print_data_uri {
        println!("{}", outcome.snapshot.to_data_uri());
    }

    Ok(())
}
