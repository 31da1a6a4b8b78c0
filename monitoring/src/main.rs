use anyhow::{Context, Result};
use data_ingestion::{FallbackSnapshotSource, LiveSnapshotSource, SnapshotSource};
use monitoring::{load_or_default, log_updates, router, AppState, RefreshLoop, DEFAULT_CONFIG_PATH};
use signal_generation::SignalEngine;
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path =
        std::env::var("LIQUIDITY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = load_or_default(&config_path)?;
    config.validate()?;

    info!("🚀 Starting macro liquidity monitor");

    let source: Arc<dyn SnapshotSource> = if config.refresh.offline {
        warn!("Offline mode: serving fallback values only");
        Arc::new(FallbackSnapshotSource::new(
            config.thresholds.clone(),
            config.macro_indicators.clone(),
        ))
    } else {
        Arc::new(LiveSnapshotSource::new(
            &config.sources,
            config.thresholds.clone(),
            config.macro_indicators.clone(),
        )?)
    };

    let (refresh_loop, handle) = RefreshLoop::new(
        source,
        SignalEngine::new(),
        Duration::from_secs(config.refresh.interval_secs),
    );

    let calendar = Arc::new(config.calendar.clone());
    if config.refresh.console_report {
        tokio::spawn(log_updates(handle.clone(), calendar.clone()));
    }

    let app = router(AppState { handle, calendar });
    let listener = TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!("📊 Dashboard API listening on {}", config.server.bind_addr);

    tokio::select! {
        _ = refresh_loop.run() => {
            warn!("Refresh loop exited");
        }
        served = axum::serve(listener, app).into_future() => {
            served.context("Server error")?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
        }
    }

    Ok(())
}
