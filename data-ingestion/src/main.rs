use anyhow::Result;
use common::{MacroIndicators, Thresholds};
use data_ingestion::{LiveSnapshotSource, SnapshotSource, SourceConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// One-shot acquisition: fetch every feed once and print the snapshot
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging on stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    info!("🚀 Acquiring liquidity snapshot");

    let source = LiveSnapshotSource::new(
        &SourceConfig::default(),
        Thresholds::default(),
        MacroIndicators::default(),
    )?;

    let snapshot = source.fetch_snapshot().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
