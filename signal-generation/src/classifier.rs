//! Per-metric classification rules.
//!
//! Each rule is independent of the others and total over its inputs. The
//! comparison operators are part of the contract: a value sitting exactly on
//! a threshold resolves to the side named by the operator below.

use common::{Decimal, MarketSnapshot};
use rust_decimal_macros::dec;

use crate::signals::{Classifications, MetricClassification, MetricId, MetricStatus};

/// RRP balance below which the facility counts as drained (trillions)
pub const RRP_DRAINED_LEVEL: Decimal = dec!(0.1);

/// Normal VIX band, inclusive on both ends
pub const VIX_CALM_FLOOR: Decimal = dec!(15);
pub const VIX_CALM_CEILING: Decimal = dec!(25);

/// Above this the volatility spike is read as capitulation
pub const VIX_CAPITULATION_LEVEL: Decimal = dec!(40);

/// ISM prints above this are expansion
pub const ISM_EXPANSION_LEVEL: Decimal = dec!(50);

/// ISM level consistent with positive GDP growth
pub const ISM_GDP_POSITIVE_LEVEL: Decimal = dec!(42.3);

pub const CPI_COMFORT_LEVEL: Decimal = dec!(2.5);
pub const CPI_ALERT_LEVEL: Decimal = dec!(3.5);

pub const US10Y_ALERT_LEVEL: Decimal = dec!(5);

pub fn classify_tga(tga: Decimal, stress_threshold: Decimal) -> MetricStatus {
    if tga < stress_threshold {
        MetricStatus::Bullish
    } else {
        MetricStatus::Caution
    }
}

pub fn classify_rrp(rrp: Decimal) -> MetricStatus {
    if rrp < RRP_DRAINED_LEVEL {
        MetricStatus::Bullish
    } else {
        MetricStatus::Caution
    }
}

/// Calm band and capitulation are bullish, complacency and stress are caution
pub fn classify_vix(vix: Decimal) -> MetricStatus {
    if vix >= VIX_CALM_FLOOR && vix <= VIX_CALM_CEILING {
        MetricStatus::Bullish
    } else if vix < VIX_CALM_FLOOR {
        MetricStatus::Caution
    } else if vix > VIX_CAPITULATION_LEVEL {
        MetricStatus::Bullish
    } else {
        MetricStatus::Caution
    }
}

pub fn classify_usdjpy(usdjpy: Decimal, danger_threshold: Decimal) -> MetricStatus {
    if usdjpy > danger_threshold {
        MetricStatus::Bullish
    } else {
        MetricStatus::Bearish
    }
}

pub fn classify_dxy(dxy: Decimal, alert_threshold: Decimal) -> MetricStatus {
    if dxy < alert_threshold {
        MetricStatus::Bullish
    } else {
        MetricStatus::Bearish
    }
}

pub fn classify_wti(wti: Decimal, alert_threshold: Decimal) -> MetricStatus {
    if wti < alert_threshold {
        MetricStatus::Bullish
    } else {
        MetricStatus::Bearish
    }
}

pub fn classify_bank_reserves(reserves: Decimal, abundance_threshold: Decimal) -> MetricStatus {
    if reserves > abundance_threshold {
        MetricStatus::Bullish
    } else {
        MetricStatus::Caution
    }
}

pub fn classify_manufacturing(ism: Decimal) -> MetricStatus {
    if ism > ISM_EXPANSION_LEVEL {
        MetricStatus::Bullish
    } else if ism > ISM_GDP_POSITIVE_LEVEL {
        MetricStatus::Neutral
    } else {
        MetricStatus::Bearish
    }
}

pub fn classify_inflation(cpi_yoy: Decimal) -> MetricStatus {
    if cpi_yoy < CPI_COMFORT_LEVEL {
        MetricStatus::Bullish
    } else if cpi_yoy < CPI_ALERT_LEVEL {
        MetricStatus::Neutral
    } else {
        MetricStatus::Bearish
    }
}

pub fn classify_treasury_yield(us10y: Decimal) -> MetricStatus {
    if us10y > US10Y_ALERT_LEVEL {
        MetricStatus::Bearish
    } else {
        MetricStatus::Neutral
    }
}

/// Rate one metric against the snapshot it belongs to
pub fn classify_metric(metric: MetricId, snapshot: &MarketSnapshot) -> MetricStatus {
    match metric {
        MetricId::Tga => classify_tga(snapshot.tga, snapshot.tga_stress_threshold),
        MetricId::Rrp => classify_rrp(snapshot.rrp),
        MetricId::Vix => classify_vix(snapshot.vix),
        MetricId::UsdJpy => classify_usdjpy(snapshot.usdjpy, snapshot.usjpy_danger_threshold),
        MetricId::Dxy => classify_dxy(snapshot.dxy, snapshot.dxy_alert_threshold),
        MetricId::Wti => classify_wti(snapshot.wti, snapshot.wti_alert_threshold),
        MetricId::BankReserves => {
            classify_bank_reserves(snapshot.bank_reserves, snapshot.reserve_abundance_threshold)
        }
        MetricId::Manufacturing => classify_manufacturing(snapshot.ism_manufacturing),
        MetricId::Inflation => classify_inflation(snapshot.cpi_yoy),
        MetricId::TreasuryYield => classify_treasury_yield(snapshot.us10y),
    }
}

pub fn classify(snapshot: &MarketSnapshot) -> Classifications {
    let rate = |metric: MetricId| MetricClassification {
        metric,
        status: classify_metric(metric, snapshot),
    };

    Classifications {
        checklist: MetricId::CHECKLIST.iter().copied().map(rate).collect(),
        informational: MetricId::INFORMATIONAL.iter().copied().map(rate).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::scenario_a;
    use proptest::prelude::*;

    #[test]
    fn test_boundaries_resolve_to_listed_side() {
        assert_eq!(classify_tga(dec!(0.65), dec!(0.65)), MetricStatus::Caution);
        assert_eq!(classify_vix(dec!(15)), MetricStatus::Bullish);
        assert_eq!(classify_vix(dec!(25)), MetricStatus::Bullish);
        assert_eq!(classify_vix(dec!(40)), MetricStatus::Caution);
        assert_eq!(classify_usdjpy(dec!(145), dec!(145)), MetricStatus::Bearish);
        assert_eq!(classify_dxy(dec!(105), dec!(105)), MetricStatus::Bearish);
        assert_eq!(classify_wti(dec!(80), dec!(80)), MetricStatus::Bearish);
        assert_eq!(classify_bank_reserves(dec!(2.5), dec!(2.5)), MetricStatus::Caution);
        assert_eq!(classify_rrp(dec!(0.1)), MetricStatus::Caution);
    }

    #[test]
    fn test_vix_regimes() {
        assert_eq!(classify_vix(dec!(12.1)), MetricStatus::Caution);
        assert_eq!(classify_vix(dec!(16.4)), MetricStatus::Bullish);
        assert_eq!(classify_vix(dec!(25.01)), MetricStatus::Caution);
        assert_eq!(classify_vix(dec!(40.01)), MetricStatus::Bullish);
        assert_eq!(classify_vix(dec!(82)), MetricStatus::Bullish);
    }

    #[test]
    fn test_manufacturing_bands() {
        assert_eq!(classify_manufacturing(dec!(52.6)), MetricStatus::Bullish);
        assert_eq!(classify_manufacturing(dec!(50)), MetricStatus::Neutral);
        assert_eq!(classify_manufacturing(dec!(48.2)), MetricStatus::Neutral);
        assert_eq!(classify_manufacturing(dec!(42.3)), MetricStatus::Bearish);
    }

    #[test]
    fn test_informational_rules() {
        assert_eq!(classify_inflation(dec!(2.4)), MetricStatus::Bullish);
        assert_eq!(classify_inflation(dec!(2.7)), MetricStatus::Neutral);
        assert_eq!(classify_inflation(dec!(3.5)), MetricStatus::Bearish);
        assert_eq!(classify_treasury_yield(dec!(4.54)), MetricStatus::Neutral);
        assert_eq!(classify_treasury_yield(dec!(5.01)), MetricStatus::Bearish);
    }

    #[test]
    fn test_scenario_a_checklist() {
        let classifications = classify(&scenario_a());
        let statuses: Vec<MetricStatus> =
            classifications.checklist.iter().map(|c| c.status).collect();

        assert_eq!(
            statuses,
            vec![
                MetricStatus::Caution,
                MetricStatus::Bullish,
                MetricStatus::Bullish,
                MetricStatus::Bullish,
                MetricStatus::Bullish,
                MetricStatus::Bullish,
                MetricStatus::Bullish,
            ]
        );
        assert_eq!(classifications.informational.len(), 3);
        assert_eq!(
            classifications.status_of(MetricId::Manufacturing),
            Some(MetricStatus::Bullish)
        );
    }

    fn decimal() -> impl Strategy<Value = Decimal> {
        (-1_000_000i64..1_000_000i64, 0u32..4).prop_map(|(mantissa, scale)| {
            Decimal::new(mantissa, scale)
        })
    }

    proptest! {
        #[test]
        fn prop_checklist_never_neutral(
            (tga, rrp, vix, usdjpy, dxy, wti, reserves) in (
                decimal(), decimal(), decimal(), decimal(), decimal(), decimal(), decimal()
            ),
            (tga_stress, usdjpy_danger, dxy_alert, wti_alert, reserve_abundance) in (
                decimal(), decimal(), decimal(), decimal(), decimal()
            ),
        ) {
            let mut snapshot = scenario_a();
            snapshot.tga = tga;
            snapshot.rrp = rrp;
            snapshot.vix = vix;
            snapshot.usdjpy = usdjpy;
            snapshot.dxy = dxy;
            snapshot.wti = wti;
            snapshot.bank_reserves = reserves;
            snapshot.tga_stress_threshold = tga_stress;
            snapshot.usjpy_danger_threshold = usdjpy_danger;
            snapshot.dxy_alert_threshold = dxy_alert;
            snapshot.wti_alert_threshold = wti_alert;
            snapshot.reserve_abundance_threshold = reserve_abundance;

            let classifications = classify(&snapshot);
            prop_assert_eq!(classifications.checklist.len(), 7);
            for c in &classifications.checklist {
                prop_assert_ne!(c.status, MetricStatus::Neutral);
            }
        }

        #[test]
        fn prop_usdjpy_strictly_above_threshold(value in decimal(), threshold in decimal()) {
            let status = classify_usdjpy(value, threshold);
            prop_assert_eq!(status == MetricStatus::Bullish, value > threshold);
        }
    }
}
