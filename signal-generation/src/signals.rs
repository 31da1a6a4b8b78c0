use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a single monitored metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricStatus {
    Bullish,
    Caution,
    Bearish,
    Neutral,
}

impl MetricStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MetricStatus::Bullish => "BULLISH",
            MetricStatus::Caution => "CAUTION",
            MetricStatus::Bearish => "BEARISH",
            MetricStatus::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Aggregate market posture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Posture {
    RiskOn,
    Caution,
    RiskOff,
    Neutral,
}

impl Posture {
    pub fn label(&self) -> &'static str {
        match self {
            Posture::RiskOn => "RISK ON",
            Posture::Caution => "CAUTION",
            Posture::RiskOff => "RISK OFF",
            Posture::Neutral => "NEUTRAL",
        }
    }
}

impl fmt::Display for Posture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Metrics the classifier knows how to rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricId {
    Tga,
    Rrp,
    Vix,
    UsdJpy,
    Dxy,
    Wti,
    BankReserves,
    Manufacturing,
    Inflation,
    TreasuryYield,
}

impl MetricId {
    /// The positioning checklist; only these feed the overall posture
    pub const CHECKLIST: [MetricId; 7] = [
        MetricId::Tga,
        MetricId::Rrp,
        MetricId::Vix,
        MetricId::UsdJpy,
        MetricId::Dxy,
        MetricId::Wti,
        MetricId::BankReserves,
    ];

    /// Rated for display only
    pub const INFORMATIONAL: [MetricId; 3] = [
        MetricId::Manufacturing,
        MetricId::Inflation,
        MetricId::TreasuryYield,
    ];

    pub fn is_checklist(&self) -> bool {
        Self::CHECKLIST.contains(self)
    }

    pub fn name(&self) -> &'static str {
        match self {
            MetricId::Tga => "TGA",
            MetricId::Rrp => "RRP",
            MetricId::Vix => "VIX",
            MetricId::UsdJpy => "USD/JPY",
            MetricId::Dxy => "DXY",
            MetricId::Wti => "WTI",
            MetricId::BankReserves => "Bank Reserves",
            MetricId::Manufacturing => "ISM Manufacturing",
            MetricId::Inflation => "CPI YoY",
            MetricId::TreasuryYield => "US 10Y Yield",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricClassification {
    pub metric: MetricId,
    pub status: MetricStatus,
}

/// Every classification produced for one snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classifications {
    pub checklist: Vec<MetricClassification>,
    pub informational: Vec<MetricClassification>,
}

impl Classifications {
    pub fn status_of(&self, metric: MetricId) -> Option<MetricStatus> {
        self.checklist
            .iter()
            .chain(self.informational.iter())
            .find(|c| c.metric == metric)
            .map(|c| c.status)
    }
}
