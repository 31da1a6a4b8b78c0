//! Plain-text rendering of the dashboard for the console.

use chrono::Utc;
use common::{Calendar, Decimal};
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use tracing::{info, warn};

use crate::refresh::RefreshHandle;
use crate::view::{DashboardView, Gauge};

pub fn render(view: &DashboardView) -> String {
    let signal = &view.signal;
    let mut lines = vec![
        format!("=== MACRO LIQUIDITY: {} ===", signal.label),
        signal.recommendation.clone(),
        signal.rationale.clone(),
        format!(
            "Signals: {} bullish / {} caution / {} bearish",
            signal.counts.bullish, signal.counts.caution, signal.counts.bearish
        ),
        String::new(),
        format!("Net liquidity: {}", view.liquidity.formula),
        String::new(),
        "Checklist:".to_string(),
    ];

    lines.extend(view.checklist.iter().map(|row| {
        let mark = if row.passed { "x" } else { " " };
        format!(
            "  [{}] {:<32} {:>10}  ({})",
            mark, row.label, row.value, row.threshold
        )
    }));

    lines.push(String::new());
    lines.push("Metrics:".to_string());
    lines.extend(view.cards.iter().map(|card| {
        let line = format!(
            "  {:<18} {:>10}  {:<8}",
            card.title,
            card.value,
            card.status.label()
        );
        match &card.detail {
            Some(detail) => format!("{} {}", line, detail),
            None => line,
        }
    }));

    let carry = &view.carry_trade;
    lines.push(String::new());
    lines.push("Japan carry trade:".to_string());
    lines.push(format!(
        "  BOJ rate {}%  JGB 10Y {}%  spread {}pp",
        carry.boj_rate, carry.jgb10y, carry.yield_spread
    ));
    if let Some(warning) = &carry.warning {
        lines.push(format!("  ! {}", warning));
    }

    lines.push(String::new());
    lines.push("Gauges:".to_string());
    lines.extend(view.gauges.iter().map(|g| format!("  {}", gauge_line(g))));

    lines.push(String::new());
    lines.push("Countdowns:".to_string());
    lines.extend(view.countdowns.iter().map(|c| {
        format!("  {:<16} {}  ({} days)", c.label, c.date, c.days)
    }));

    if !view.fallback_fields.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Fallback values in use: {}",
            view.fallback_fields.join(", ")
        ));
    }
    lines.push(format!("Last update: {}", view.last_update.to_rfc3339()));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn gauge_line(gauge: &Gauge) -> String {
    const WIDTH: usize = 20;
    let filled = (gauge.percentage * Decimal::from(WIDTH) / Decimal::ONE_HUNDRED)
        .round()
        .to_usize()
        .unwrap_or(0)
        .min(WIDTH);
    let flag = if gauge.breached { " !" } else { "" };

    format!(
        "{:<16} [{}{}] {}{} (threshold {}{}){}",
        gauge.label,
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        gauge.value,
        gauge.unit,
        gauge.threshold,
        gauge.unit,
        flag
    )
}

/// Log a rendered report after every published refresh
pub async fn log_updates(handle: RefreshHandle, calendar: Arc<Calendar>) {
    let mut updates = handle.subscribe();

    while updates.changed().await.is_ok() {
        let latest = updates.borrow_and_update().clone();
        let Some(state) = latest else {
            continue;
        };

        if !state.snapshot.fallback_fields.is_empty() {
            warn!(
                "Refresh {} used fallback values for: {}",
                state.refresh_id,
                state.snapshot.fallback_fields.join(", ")
            );
        }

        let view = DashboardView::build(&state, &calendar, Utc::now());
        info!("\n{}", render(&view));
    }

    info!("Refresh loop closed, console report stopped");
}
