//! HTTP API over the latest published dashboard state

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use common::{Calendar, MarketSnapshot};
use signal_generation::SignalReport;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::refresh::RefreshHandle;
use crate::state::DashboardState;
use crate::view::DashboardView;

#[derive(Clone)]
pub struct AppState {
    pub handle: RefreshHandle,
    pub calendar: Arc<Calendar>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/liquidity", get(get_liquidity))
        .route("/api/signal", get(get_signal))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/refresh", post(post_refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "ok"
}

fn latest(state: &AppState) -> Result<Arc<DashboardState>, StatusCode> {
    // nothing to serve until the first refresh lands
    state.handle.latest().ok_or(StatusCode::SERVICE_UNAVAILABLE)
}

async fn get_liquidity(State(state): State<AppState>) -> Result<Json<MarketSnapshot>, StatusCode> {
    Ok(Json(latest(&state)?.snapshot.clone()))
}

async fn get_signal(State(state): State<AppState>) -> Result<Json<SignalReport>, StatusCode> {
    Ok(Json(latest(&state)?.report.clone()))
}

async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardView>, StatusCode> {
    let current = latest(&state)?;
    Ok(Json(DashboardView::build(&current, &state.calendar, Utc::now())))
}

async fn post_refresh(State(state): State<AppState>) -> StatusCode {
    if state.handle.request_refresh() {
        info!("Manual refresh requested");
        StatusCode::ACCEPTED
    } else {
        warn!("Manual refresh requested but the refresh loop is not running");
        StatusCode::SERVICE_UNAVAILABLE
    }
}
