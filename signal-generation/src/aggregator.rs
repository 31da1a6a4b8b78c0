//! Reduces checklist classifications to one overall posture.

use serde::{Deserialize, Serialize};

use crate::signals::{MetricClassification, MetricStatus, Posture};

/// How many checklist metrics landed in each bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounts {
    pub bullish: usize,
    pub caution: usize,
    pub bearish: usize,
    pub neutral: usize,
}

impl SignalCounts {
    pub fn tally<'a, I>(classifications: I) -> Self
    where
        I: IntoIterator<Item = &'a MetricClassification>,
    {
        classifications
            .into_iter()
            .fold(Self::default(), |mut counts, c| {
                match c.status {
                    MetricStatus::Bullish => counts.bullish += 1,
                    MetricStatus::Caution => counts.caution += 1,
                    MetricStatus::Bearish => counts.bearish += 1,
                    MetricStatus::Neutral => counts.neutral += 1,
                }
                counts
            })
    }

    pub fn total(&self) -> usize {
        self.bullish + self.caution + self.bearish + self.neutral
    }
}

/// Aggregate posture with the advice shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallSignal {
    pub posture: Posture,
    pub recommendation: String,
    pub rationale: String,
    pub counts: SignalCounts,
}

/// First matching rule wins; bearish dominance is checked before anything else.
pub fn aggregate(counts: SignalCounts) -> OverallSignal {
    let (posture, recommendation, rationale) = if counts.bearish >= 2 {
        (
            Posture::RiskOff,
            "Reduce exposure, add hedges",
            format!(
                "{} bearish signals active. Favor companies with positive free cash flow and keep liquidity.",
                counts.bearish
            ),
        )
    } else if counts.bullish >= 5 && counts.bearish == 0 {
        (
            Posture::RiskOn,
            "Maintain or increase exposure",
            format!(
                "{} bullish signals. Conditions favor risk assets and long positions.",
                counts.bullish
            ),
        )
    } else if counts.caution >= 2 || (counts.bullish >= 3 && counts.caution >= 1) {
        (
            Posture::Caution,
            "Neutral stance, no aggressive additions",
            "Mixed signals. Monitor developments before moving significant capital.".to_string(),
        )
    } else {
        (
            Posture::Neutral,
            "Maintain baseline strategy",
            "No clear directional signal. Stick to the established plan.".to_string(),
        )
    };

    OverallSignal {
        posture,
        recommendation: recommendation.to_string(),
        rationale,
        counts,
    }
}
