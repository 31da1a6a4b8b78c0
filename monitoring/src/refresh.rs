//! Periodic acquire-then-evaluate loop.
//!
//! Scheduled refreshes are single-flight: a tick that arrives while an
//! acquisition is still running is skipped. A manual refresh supersedes
//! whatever is in flight. Every acquisition carries a sequence number and a
//! result older than what is already published is dropped, so the newest
//! completed acquisition always wins.

use chrono::Utc;
use common::MarketSnapshot;
use data_ingestion::SnapshotSource;
use signal_generation::SignalEngine;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::state::DashboardState;

pub type LatestState = Option<Arc<DashboardState>>;

/// Client side of the refresh loop: read the latest state, ask for a refresh
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    trigger: mpsc::Sender<()>,
    state: watch::Receiver<LatestState>,
}

impl RefreshHandle {
    /// Ask for an out-of-schedule refresh. Returns false once the loop is gone.
    pub fn request_refresh(&self) -> bool {
        match self.trigger.try_send(()) {
            Ok(()) => true,
            // a request is already queued, it will pick up this one too
            Err(TrySendError::Full(())) => true,
            Err(TrySendError::Closed(())) => false,
        }
    }

    pub fn latest(&self) -> LatestState {
        self.state.borrow().clone()
    }

    /// Wait for the next publication
    pub async fn wait_for_update(&mut self) -> LatestState {
        self.state.changed().await.ok()?;
        self.state.borrow_and_update().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LatestState> {
        self.state.clone()
    }
}

pub struct RefreshLoop {
    source: Arc<dyn SnapshotSource>,
    engine: SignalEngine,
    interval: Duration,
    trigger_rx: mpsc::Receiver<()>,
    state_tx: watch::Sender<LatestState>,
    next_sequence: u64,
    /// Results below this sequence were superseded by a manual refresh
    accept_from: u64,
    published: Option<u64>,
}

impl RefreshLoop {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        engine: SignalEngine,
        interval: Duration,
    ) -> (Self, RefreshHandle) {
        let (trigger_tx, trigger_rx) = mpsc::channel(1);
        let (state_tx, state_rx) = watch::channel(None);

        let refresh_loop = Self {
            source,
            engine,
            interval,
            trigger_rx,
            state_tx,
            next_sequence: 0,
            accept_from: 0,
            published: None,
        };
        let handle = RefreshHandle {
            trigger: trigger_tx,
            state: state_rx,
        };

        (refresh_loop, handle)
    }

    /// Acquire, evaluate and publish once, inline
    pub async fn refresh_once(&mut self) -> LatestState {
        let sequence = self.allocate_sequence();
        let snapshot = self.source.fetch_snapshot().await;
        self.publish(sequence, snapshot);
        self.state_tx.borrow().clone()
    }

    /// Run until the task is dropped. The first tick fires immediately, which
    /// gives the initial load.
    pub async fn run(mut self) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut in_flight: JoinSet<(u64, MarketSnapshot)> = JoinSet::new();
        let mut triggers_open = true;

        info!("Refresh loop started, interval {}s", self.interval.as_secs());

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if in_flight.is_empty() {
                        self.launch(&mut in_flight);
                    } else {
                        debug!("Acquisition still in flight, skipping scheduled refresh");
                    }
                }
                trigger = self.trigger_rx.recv(), if triggers_open => match trigger {
                    Some(()) => {
                        if !in_flight.is_empty() {
                            info!("Manual refresh supersedes {} in-flight acquisition(s)", in_flight.len());
                            in_flight.abort_all();
                        }
                        let sequence = self.launch(&mut in_flight);
                        self.accept_from = sequence;
                    }
                    None => {
                        debug!("All refresh handles dropped, manual refresh disabled");
                        triggers_open = false;
                    }
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => match joined {
                    Ok((sequence, snapshot)) => {
                        self.publish(sequence, snapshot);
                    }
                    Err(e) if e.is_cancelled() => debug!("Superseded acquisition cancelled"),
                    Err(e) => error!("Acquisition task failed: {}", e),
                },
            }
        }
    }

    fn allocate_sequence(&mut self) -> u64 {
        self.next_sequence += 1;
        self.next_sequence
    }

    fn launch(&mut self, in_flight: &mut JoinSet<(u64, MarketSnapshot)>) -> u64 {
        let sequence = self.allocate_sequence();
        let source = Arc::clone(&self.source);

        debug!("Starting acquisition #{}", sequence);
        in_flight.spawn(async move { (sequence, source.fetch_snapshot().await) });
        sequence
    }

    /// Evaluate and publish unless a newer result is already out
    fn publish(&mut self, sequence: u64, snapshot: MarketSnapshot) -> bool {
        if sequence < self.accept_from || self.published.is_some_and(|p| sequence <= p) {
            debug!("Discarding stale acquisition #{}", sequence);
            return false;
        }

        let report = self.engine.evaluate(&snapshot);
        info!(
            "Refresh #{} published: {} (bullish={}, caution={}, bearish={}, fallbacks={})",
            sequence,
            report.overall.posture,
            report.overall.counts.bullish,
            report.overall.counts.caution,
            report.overall.counts.bearish,
            snapshot.fallback_fields.len()
        );

        let state = DashboardState {
            refresh_id: Uuid::new_v4(),
            sequence,
            refreshed_at: Utc::now(),
            snapshot,
            report,
        };

        self.published = Some(sequence);
        self.state_tx.send_replace(Some(Arc::new(state)));
        true
    }
}
