use anyhow::{Context, Result};
use chrono::Utc;
use common::{Calendar, MacroIndicators, Thresholds};
use data_ingestion::FallbackSnapshotSource;
use monitoring::{render, DashboardView, RefreshLoop};
use signal_generation::SignalEngine;
use std::sync::Arc;
use std::time::Duration;

/// Render the dashboard from the fallback table, no network needed
#[tokio::main]
async fn main() -> Result<()> {
    let source = Arc::new(FallbackSnapshotSource::new(
        Thresholds::default(),
        MacroIndicators::default(),
    ));
    let (mut refresh_loop, _handle) =
        RefreshLoop::new(source, SignalEngine::new(), Duration::from_secs(300));

    let state = refresh_loop
        .refresh_once()
        .await
        .context("refresh published nothing")?;
    let view = DashboardView::build(&state, &Calendar::default(), Utc::now());

    println!("{}", render(&view));
    Ok(())
}
