//! Roster CLI binary.

use anyhow::Result;
use roster::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the roster CLI.
///
/// Runs on tokio's current_thread runtime; every command is a short sequence
/// of file reads and writes.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // RUST_LOG overrides, e.g. RUST_LOG=roster=debug,roster_jsonl=trace
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roster=info,roster_jsonl=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting roster CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Roster CLI completed successfully");
    Ok(())
}
