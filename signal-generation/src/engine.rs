//! Signal engine: snapshot in, report out.
//!
//! Stateless and free of I/O, so one engine can be shared across tasks and
//! called for every refresh without coordination.

use chrono::{DateTime, Utc};
use common::MarketSnapshot;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregator::{aggregate, OverallSignal, SignalCounts};
use crate::classifier::classify;
use crate::derived::DerivedQuantities;
use crate::signals::Classifications;

/// Everything the presentation layer needs from one evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalReport {
    pub classifications: Classifications,
    pub overall: OverallSignal,
    pub derived: DerivedQuantities,
    /// Acquisition time of the snapshot this report was computed from
    pub as_of: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SignalEngine;

impl SignalEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate(&self, snapshot: &MarketSnapshot) -> SignalReport {
        let classifications = classify(snapshot);
        let counts = SignalCounts::tally(&classifications.checklist);
        let overall = aggregate(counts);
        let derived = DerivedQuantities::from_snapshot(snapshot);

        debug!(
            "Evaluated snapshot from {}: {} (bullish={}, caution={}, bearish={})",
            snapshot.last_update, overall.posture, counts.bullish, counts.caution, counts.bearish
        );

        SignalReport {
            classifications,
            overall,
            derived,
            as_of: snapshot.last_update,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::Posture;
    use crate::test_support::scenario_a;
    use rust_decimal_macros::dec;

    #[test]
    fn test_scenario_a_is_caution() {
        let report = SignalEngine::new().evaluate(&scenario_a());

        assert_eq!(report.overall.counts.bullish, 6);
        assert_eq!(report.overall.counts.caution, 1);
        assert_eq!(report.overall.counts.bearish, 0);
        assert_eq!(report.overall.posture, Posture::Caution);
    }

    #[test]
    fn test_scenario_b_is_risk_off() {
        let mut snapshot = scenario_a();
        snapshot.usdjpy = dec!(140);
        snapshot.dxy = dec!(110);

        let report = SignalEngine::new().evaluate(&snapshot);
        assert_eq!(report.overall.counts.bearish, 2);
        assert_eq!(report.overall.posture, Posture::RiskOff);
    }

    #[test]
    fn test_scenario_c_is_risk_on() {
        let mut snapshot = scenario_a();
        snapshot.tga = dec!(0.6);

        let report = SignalEngine::new().evaluate(&snapshot);
        assert_eq!(report.overall.counts.bullish, 7);
        assert_eq!(report.overall.posture, Posture::RiskOn);
    }

    #[test]
    fn test_scenario_d_net_liquidity() {
        let report = SignalEngine::new().evaluate(&scenario_a());
        assert_eq!(report.derived.net_liquidity, dec!(5.606));
    }

    #[test]
    fn test_manufacturing_does_not_move_posture() {
        let mut snapshot = scenario_a();
        snapshot.tga = dec!(0.6);
        snapshot.ism_manufacturing = dec!(40);

        let report = SignalEngine::new().evaluate(&snapshot);
        assert_eq!(report.overall.posture, Posture::RiskOn);
        assert_eq!(report.overall.counts.total(), 7);
    }

    #[test]
    fn test_repeated_evaluation_is_identical() {
        let engine = SignalEngine::new();
        let snapshot = scenario_a();
        assert_eq!(engine.evaluate(&snapshot), engine.evaluate(&snapshot));
    }

    #[test]
    fn test_report_serializes_posture_tag() {
        let report = SignalEngine::new().evaluate(&scenario_a());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["overall"]["posture"], "CAUTION");
        assert_eq!(json["classifications"]["checklist"][0]["status"], "caution");
        assert!(json["derived"]["netLiquidity"].is_number());
    }
}
