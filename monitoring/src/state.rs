use chrono::{DateTime, Utc};
use common::MarketSnapshot;
use serde::Serialize;
use signal_generation::SignalReport;
use uuid::Uuid;

/// One published refresh: the snapshot and what the engine made of it.
/// Replaced wholesale on the next refresh, never mutated.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub refresh_id: Uuid,
    /// Acquisition order; higher is newer
    pub sequence: u64,
    pub refreshed_at: DateTime<Utc>,
    pub snapshot: MarketSnapshot,
    pub report: SignalReport,
}
