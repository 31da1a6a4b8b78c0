//! Presentation model: what the dashboard shows, already formatted.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use common::{Calendar, Decimal, MarketSnapshot};
use rust_decimal_macros::dec;
use serde::Serialize;
use signal_generation::classifier::{
    ISM_EXPANSION_LEVEL, ISM_GDP_POSITIVE_LEVEL, VIX_CALM_CEILING, VIX_CALM_FLOOR,
    VIX_CAPITULATION_LEVEL,
};
use signal_generation::{
    DerivedQuantities, MetricClassification, MetricId, MetricStatus, Posture, SignalCounts,
    HEALTHY_CARRY_SPREAD,
};

use crate::state::DashboardState;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub refresh_id: String,
    pub last_update: DateTime<Utc>,
    pub fallback_fields: Vec<String>,
    pub signal: SignalBlock,
    pub liquidity: LiquidityFormula,
    pub carry_trade: CarryTrade,
    pub cards: Vec<MetricCard>,
    pub checklist: Vec<ChecklistRow>,
    pub gauges: Vec<Gauge>,
    pub countdowns: Vec<Countdown>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalBlock {
    pub posture: Posture,
    pub label: String,
    pub recommendation: String,
    pub rationale: String,
    pub counts: SignalCounts,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityFormula {
    pub fed_balance: Decimal,
    pub tga: Decimal,
    pub rrp: Decimal,
    pub net_liquidity: Decimal,
    pub formula: String,
}

/// Japan carry-trade panel
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarryTrade {
    pub usdjpy: Decimal,
    pub danger_threshold: Decimal,
    pub boj_rate: Decimal,
    pub jgb10y: Decimal,
    pub yield_spread: Decimal,
    /// USD/JPY at or below the danger threshold
    pub unwind_risk: bool,
    pub warning: Option<String>,
}

impl CarryTrade {
    pub fn from_snapshot(s: &MarketSnapshot, derived: &DerivedQuantities) -> Self {
        let unwind_risk = s.usdjpy <= s.usjpy_danger_threshold;
        let warning = unwind_risk.then(|| {
            format!(
                "USD/JPY at ¥{} (threshold ¥{}): risk of a violent carry-trade unwind, as in August 2024",
                fixed(s.usdjpy, 1),
                s.usjpy_danger_threshold
            )
        });

        Self {
            usdjpy: s.usdjpy,
            danger_threshold: s.usjpy_danger_threshold,
            boj_rate: s.boj_rate,
            jgb10y: s.jgb10y,
            yield_spread: derived.yield_spread,
            unwind_risk,
            warning,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard {
    pub title: String,
    pub value: String,
    pub subtitle: String,
    pub status: MetricStatus,
    pub threshold: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistRow {
    pub id: String,
    pub label: String,
    pub status: MetricStatus,
    pub passed: bool,
    pub value: String,
    pub threshold: String,
    pub detail: String,
}

/// Horizontal bar with a threshold marker
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gauge {
    pub label: String,
    pub value: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub threshold: Decimal,
    pub above_is_bad: bool,
    pub unit: String,
    /// Fill, clamped to 0..=100
    pub percentage: Decimal,
    /// Marker position, not clamped
    pub threshold_percentage: Decimal,
    pub breached: bool,
}

impl Gauge {
    pub fn new(
        label: &str,
        value: Decimal,
        (min, max): (Decimal, Decimal),
        threshold: Decimal,
        above_is_bad: bool,
        unit: &str,
    ) -> Self {
        let breached = if above_is_bad {
            value > threshold
        } else {
            value < threshold
        };

        Self {
            label: label.to_string(),
            value,
            min,
            max,
            threshold,
            above_is_bad,
            unit: unit.to_string(),
            percentage: position(value, min, max).clamp(Decimal::ZERO, dec!(100)),
            threshold_percentage: position(threshold, min, max),
            breached,
        }
    }
}

fn position(value: Decimal, min: Decimal, max: Decimal) -> Decimal {
    ((value - min) * dec!(100))
        .checked_div(max - min)
        .unwrap_or(Decimal::ZERO)
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub label: String,
    pub date: NaiveDate,
    pub days: i64,
}

/// Whole days until midnight UTC of `date`, rounded up; negative once past
pub fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let target = date.and_time(NaiveTime::MIN).and_utc();
    let seconds = (target - now).num_seconds();
    let days = seconds.div_euclid(SECONDS_PER_DAY);
    if seconds.rem_euclid(SECONDS_PER_DAY) > 0 {
        days + 1
    } else {
        days
    }
}

/// Round then pad to `dp` places
fn fixed(value: Decimal, dp: u32) -> String {
    format!("{:.*}", dp as usize, value.round_dp(dp))
}

fn billions(trillions: Decimal, dp: u32) -> String {
    fixed(trillions * dec!(1000), dp)
}

pub fn vix_regime(vix: Decimal) -> &'static str {
    if vix < VIX_CALM_FLOOR {
        "Complacency"
    } else if vix > VIX_CAPITULATION_LEVEL {
        "Capitulation"
    } else if vix > VIX_CALM_CEILING {
        "Elevated"
    } else {
        "Normal"
    }
}

impl DashboardView {
    pub fn build(state: &DashboardState, calendar: &Calendar, now: DateTime<Utc>) -> Self {
        let snapshot = &state.snapshot;
        let report = &state.report;
        let status = |metric| {
            report
                .classifications
                .status_of(metric)
                .unwrap_or(MetricStatus::Neutral)
        };

        let mut checklist: Vec<ChecklistRow> = report
            .classifications
            .checklist
            .iter()
            .filter_map(|c| checklist_row(c, snapshot))
            .collect();
        checklist.push(carry_spread_row(&report.derived));

        Self {
            refresh_id: state.refresh_id.to_string(),
            last_update: snapshot.last_update,
            fallback_fields: snapshot.fallback_fields.clone(),
            signal: SignalBlock {
                posture: report.overall.posture,
                label: report.overall.posture.label().to_string(),
                recommendation: report.overall.recommendation.clone(),
                rationale: report.overall.rationale.clone(),
                counts: report.overall.counts,
            },
            liquidity: LiquidityFormula {
                fed_balance: snapshot.fed_balance,
                tga: snapshot.tga,
                rrp: snapshot.rrp,
                net_liquidity: report.derived.net_liquidity,
                formula: format!(
                    "${}T - ${}T - ${}T = ${}T",
                    snapshot.fed_balance,
                    snapshot.tga,
                    snapshot.rrp,
                    fixed(report.derived.net_liquidity, 2)
                ),
            },
            carry_trade: CarryTrade::from_snapshot(snapshot, &report.derived),
            cards: metric_cards(snapshot, status),
            checklist,
            gauges: gauges(snapshot),
            countdowns: countdowns(calendar, now),
        }
    }
}

/// Row for a checklist metric; informational metrics have no row
fn checklist_row(classification: &MetricClassification, s: &MarketSnapshot) -> Option<ChecklistRow> {
    let status = classification.status;
    let passed = status == MetricStatus::Bullish;

    let (id, label, passed, value, threshold, detail) = match classification.metric {
        MetricId::Tga => (
            "tga",
            "TGA below stress level",
            passed,
            format!("${}B", billions(s.tga, 0)),
            format!("<${}B", billions(s.tga_stress_threshold, 0)),
            "Treasury General Account",
        ),
        MetricId::Rrp => (
            "rrp",
            "RRP drained",
            passed,
            format!("${}B", billions(s.rrp, 1)),
            "<$100B".to_string(),
            "Reverse Repo Facility",
        ),
        MetricId::Vix => (
            "vix",
            "VIX in normal range",
            // capitulation rates bullish but is not a normal range
            s.vix >= VIX_CALM_FLOOR && s.vix <= VIX_CALM_CEILING,
            fixed(s.vix, 1),
            format!("{}-{}", VIX_CALM_FLOOR, VIX_CALM_CEILING),
            "Volatility index",
        ),
        MetricId::UsdJpy => (
            "usdjpy",
            "Yen stable (carry trade safe)",
            passed,
            format!("¥{}", fixed(s.usdjpy, 1)),
            format!(">¥{}", s.usjpy_danger_threshold),
            "USD/JPY exchange rate",
        ),
        MetricId::Dxy => (
            "dxy",
            "Dollar not too strong",
            passed,
            fixed(s.dxy, 2),
            format!("<{}", s.dxy_alert_threshold),
            "Dollar Index",
        ),
        MetricId::Wti => (
            "wti",
            "Oil under control",
            passed,
            format!("${}", fixed(s.wti, 2)),
            format!("<${}", s.wti_alert_threshold),
            "WTI crude oil",
        ),
        MetricId::BankReserves => (
            "reserves",
            "Bank reserves abundant",
            passed,
            format!("${}T", fixed(s.bank_reserves, 2)),
            format!(">${}T", s.reserve_abundance_threshold),
            "Bank reserves",
        ),
        MetricId::Manufacturing | MetricId::Inflation | MetricId::TreasuryYield => return None,
    };

    Some(ChecklistRow {
        id: id.to_string(),
        label: label.to_string(),
        status,
        passed,
        value,
        threshold,
        detail: detail.to_string(),
    })
}

fn carry_spread_row(derived: &DerivedQuantities) -> ChecklistRow {
    let passed = derived.healthy_carry_spread;
    ChecklistRow {
        id: "yield_spread".to_string(),
        label: "Healthy carry spread".to_string(),
        status: if passed {
            MetricStatus::Bullish
        } else {
            MetricStatus::Neutral
        },
        passed,
        value: format!("{}pp", fixed(derived.yield_spread, 2)),
        threshold: format!(">{}pp", HEALTHY_CARRY_SPREAD),
        detail: "US 10Y minus JGB 10Y".to_string(),
    }
}

fn metric_cards(s: &MarketSnapshot, status: impl Fn(MetricId) -> MetricStatus) -> Vec<MetricCard> {
    vec![
        MetricCard {
            title: "TGA".to_string(),
            value: format!("${}B", billions(s.tga, 0)),
            subtitle: "Treasury General Account".to_string(),
            status: status(MetricId::Tga),
            threshold: Some(format!("< ${}B", billions(s.tga_stress_threshold, 0))),
            detail: Some("High = drains liquidity".to_string()),
        },
        MetricCard {
            title: "DXY".to_string(),
            value: fixed(s.dxy, 2),
            subtitle: "Dollar Index".to_string(),
            status: status(MetricId::Dxy),
            threshold: Some(format!("< {}", s.dxy_alert_threshold)),
            detail: Some("High = pressure on risk assets".to_string()),
        },
        MetricCard {
            title: "WTI".to_string(),
            value: format!("${}", fixed(s.wti, 2)),
            subtitle: "Crude Oil".to_string(),
            status: status(MetricId::Wti),
            threshold: Some(format!("< ${}", s.wti_alert_threshold)),
            detail: Some("High = inflation pressure".to_string()),
        },
        MetricCard {
            title: "VIX".to_string(),
            value: fixed(s.vix, 1),
            subtitle: "Volatility Index".to_string(),
            status: status(MetricId::Vix),
            threshold: Some(format!("{}-{} normal", VIX_CALM_FLOOR, VIX_CALM_CEILING)),
            detail: Some(vix_regime(s.vix).to_string()),
        },
        MetricCard {
            title: "ISM Manufacturing".to_string(),
            value: s.ism_manufacturing.to_string(),
            subtitle: if s.ism_manufacturing > ISM_EXPANSION_LEVEL {
                "Expansion".to_string()
            } else {
                "Contraction".to_string()
            },
            status: status(MetricId::Manufacturing),
            threshold: None,
            detail: Some(format!(">{} = positive GDP", ISM_GDP_POSITIVE_LEVEL)),
        },
        MetricCard {
            title: "CPI YoY".to_string(),
            value: format!("{}%", s.cpi_yoy),
            subtitle: format!("Core: {}%", s.core_cpi_yoy),
            status: status(MetricId::Inflation),
            threshold: None,
            detail: None,
        },
        MetricCard {
            title: "US 10Y Yield".to_string(),
            value: format!("{}%", s.us10y),
            subtitle: "10-year Treasury".to_string(),
            status: status(MetricId::TreasuryYield),
            threshold: None,
            detail: None,
        },
        MetricCard {
            title: "GDP Growth".to_string(),
            value: format!("{}%", s.gdp_growth),
            subtitle: "Annualized".to_string(),
            status: if s.gdp_growth > Decimal::ZERO {
                MetricStatus::Bullish
            } else {
                MetricStatus::Bearish
            },
            threshold: None,
            detail: Some(format!("Target {}%", s.gdp_growth_target)),
        },
        MetricCard {
            title: "BTC".to_string(),
            value: format!("${}", fixed(s.btc_price, 0)),
            subtitle: "Bitcoin".to_string(),
            status: MetricStatus::Neutral,
            threshold: None,
            detail: None,
        },
    ]
}

fn gauges(s: &MarketSnapshot) -> Vec<Gauge> {
    vec![
        Gauge::new(
            "USD/JPY",
            s.usdjpy,
            (dec!(130), dec!(165)),
            s.usjpy_danger_threshold,
            false,
            "",
        ),
        Gauge::new(
            "Deficit/GDP",
            s.deficit_to_gdp,
            (dec!(0), dec!(10)),
            dec!(3),
            true,
            "%",
        ),
        Gauge::new(
            "GDP Growth",
            s.gdp_growth,
            (dec!(0), dec!(6)),
            s.gdp_growth_target,
            false,
            "%",
        ),
        Gauge::new(
            "Oil Production",
            s.oil_production_mbpd,
            (dec!(10), dec!(18)),
            dec!(16),
            false,
            "M bpd",
        ),
    ]
}

fn countdowns(calendar: &Calendar, now: DateTime<Utc>) -> Vec<Countdown> {
    [
        ("Debt Ceiling", calendar.next_debt_ceiling_deadline),
        ("Fed Chair Term", calendar.fed_chair_term_expiry),
        ("Midterms", calendar.midterm_election),
    ]
    .into_iter()
    .map(|(label, date)| Countdown {
        label: label.to_string(),
        date,
        days: days_until(date, now),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use common::{MacroIndicators, Thresholds};
    use data_ingestion::sources::fallback_values;
    use signal_generation::SignalEngine;
    use uuid::Uuid;

    fn state() -> DashboardState {
        let snapshot = MarketSnapshot::assemble(
            fallback_values(),
            vec!["vix".to_string()],
            &Thresholds::default(),
            &MacroIndicators::default(),
            Utc.with_ymd_and_hms(2026, 2, 2, 12, 0, 0).unwrap(),
        );
        let report = SignalEngine::new().evaluate(&snapshot);
        DashboardState {
            refresh_id: Uuid::new_v4(),
            sequence: 1,
            refreshed_at: snapshot.last_update,
            snapshot,
            report,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 2, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_checklist_rows() {
        let view = DashboardView::build(&state(), &Calendar::default(), now());
        assert_eq!(view.checklist.len(), 8);

        let tga = &view.checklist[0];
        assert_eq!(tga.id, "tga");
        assert!(!tga.passed);
        assert_eq!(tga.status, MetricStatus::Caution);
        assert_eq!(tga.value, "$968B");
        assert_eq!(tga.threshold, "<$650B");

        let rrp = &view.checklist[1];
        assert_eq!(rrp.value, "$6.0B");
        assert!(rrp.passed);

        let spread = view.checklist.last().unwrap();
        assert_eq!(spread.id, "yield_spread");
        assert_eq!(spread.value, "3.49pp");
        assert!(spread.passed);
    }

    #[test]
    fn test_vix_capitulation_rates_bullish_but_fails_range_check() {
        let mut state = state();
        state.snapshot.vix = dec!(45);
        state.report = SignalEngine::new().evaluate(&state.snapshot);

        let view = DashboardView::build(&state, &Calendar::default(), now());
        let vix = view.checklist.iter().find(|r| r.id == "vix").unwrap();
        assert_eq!(vix.status, MetricStatus::Bullish);
        assert!(!vix.passed);

        let card = view.cards.iter().find(|c| c.title == "VIX").unwrap();
        assert_eq!(card.detail.as_deref(), Some("Capitulation"));
    }

    #[test]
    fn test_signal_and_formula() {
        let view = DashboardView::build(&state(), &Calendar::default(), now());
        assert_eq!(view.signal.label, "CAUTION");
        assert_eq!(view.liquidity.net_liquidity, dec!(5.606));
        assert_eq!(view.liquidity.formula, "$6.58T - $0.968T - $0.006T = $5.61T");
        assert_eq!(view.fallback_fields, vec!["vix".to_string()]);
    }

    #[test]
    fn test_informational_metrics_have_no_checklist_row() {
        let state = state();
        for metric in MetricId::INFORMATIONAL {
            let classification = MetricClassification {
                metric,
                status: MetricStatus::Bullish,
            };
            assert!(checklist_row(&classification, &state.snapshot).is_none());
        }
        for metric in MetricId::CHECKLIST {
            let classification = MetricClassification {
                metric,
                status: MetricStatus::Bullish,
            };
            assert!(checklist_row(&classification, &state.snapshot).is_some());
        }
    }

    #[test]
    fn test_carry_trade_panel() {
        let view = DashboardView::build(&state(), &Calendar::default(), now());
        let carry = &view.carry_trade;
        assert_eq!(carry.boj_rate, dec!(0.5));
        assert_eq!(carry.jgb10y, dec!(1.05));
        assert_eq!(carry.yield_spread, dec!(3.49));
        assert!(!carry.unwind_risk);
        assert!(carry.warning.is_none());
    }

    #[test]
    fn test_unwind_warning_fires_at_danger_threshold() {
        let mut state = state();
        state.snapshot.usdjpy = dec!(145);
        state.report = SignalEngine::new().evaluate(&state.snapshot);

        let view = DashboardView::build(&state, &Calendar::default(), now());
        assert!(view.carry_trade.unwind_risk);
        let warning = view.carry_trade.warning.as_deref().unwrap();
        assert!(warning.contains("¥145.0"));

        state.snapshot.usdjpy = dec!(145.01);
        let view = DashboardView::build(&state, &Calendar::default(), now());
        assert!(!view.carry_trade.unwind_risk);
    }

    #[test]
    fn test_gdp_card() {
        let view = DashboardView::build(&state(), &Calendar::default(), now());
        let gdp = view.cards.iter().find(|c| c.title == "GDP Growth").unwrap();
        assert_eq!(gdp.value, "2.3%");
        assert_eq!(gdp.status, MetricStatus::Bullish);
        assert_eq!(gdp.detail.as_deref(), Some("Target 3.0%"));
    }

    #[test]
    fn test_gauges() {
        let usdjpy = Gauge::new("USD/JPY", dec!(155.2), (dec!(130), dec!(165)), dec!(145), false, "");
        assert!(!usdjpy.breached);
        assert_eq!(usdjpy.percentage.round_dp(2), dec!(72.00));

        let deficit = Gauge::new("Deficit/GDP", dec!(12), (dec!(0), dec!(10)), dec!(3), true, "%");
        assert!(deficit.breached);
        assert_eq!(deficit.percentage, dec!(100));
        assert_eq!(deficit.threshold_percentage, dec!(30));

        let oil = Gauge::new("Oil", dec!(9), (dec!(10), dec!(18)), dec!(16), false, "M bpd");
        assert!(oil.breached);
        assert_eq!(oil.percentage, Decimal::ZERO);

        let flat = Gauge::new("Flat", dec!(1), (dec!(1), dec!(1)), dec!(1), true, "");
        assert_eq!(flat.percentage, Decimal::ZERO);
        assert!(!flat.breached);
    }

    #[test]
    fn test_days_until() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 5).unwrap();
        assert_eq!(days_until(date, now()), 3);
        assert_eq!(
            days_until(date, Utc.with_ymd_and_hms(2026, 2, 5, 0, 0, 0).unwrap()),
            0
        );
        assert_eq!(
            days_until(date, Utc.with_ymd_and_hms(2026, 2, 6, 12, 0, 0).unwrap()),
            -1
        );
    }

    #[test]
    fn test_countdowns_follow_calendar() {
        let view = DashboardView::build(&state(), &Calendar::default(), now());
        let midterms = view.countdowns.iter().find(|c| c.label == "Midterms").unwrap();
        assert_eq!(midterms.date, NaiveDate::from_ymd_opt(2026, 11, 3).unwrap());
        assert_eq!(midterms.days, 274);
    }
}
