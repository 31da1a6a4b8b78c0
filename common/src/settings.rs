//! Static inputs: policy thresholds, slow-moving macro indicators and the
//! event calendar. None of these are fetched; they come from configuration.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Policy thresholds the classifier compares live values against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// TGA balance above which the Treasury is draining liquidity (trillions)
    #[serde(default = "default_tga_stress")]
    pub tga_stress_threshold: Decimal,

    /// Bank reserves above which reserves count as abundant (trillions)
    #[serde(default = "default_reserve_abundance")]
    pub reserve_abundance_threshold: Decimal,

    /// USD/JPY level below which the yen carry trade is at risk of unwinding
    #[serde(default = "default_usdjpy_danger")]
    pub usjpy_danger_threshold: Decimal,

    /// Dollar index level that pressures risk assets
    #[serde(default = "default_dxy_alert")]
    pub dxy_alert_threshold: Decimal,

    /// WTI price that feeds through to inflation (USD/bbl)
    #[serde(default = "default_wti_alert")]
    pub wti_alert_threshold: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            tga_stress_threshold: default_tga_stress(),
            reserve_abundance_threshold: default_reserve_abundance(),
            usjpy_danger_threshold: default_usdjpy_danger(),
            dxy_alert_threshold: default_dxy_alert(),
            wti_alert_threshold: default_wti_alert(),
        }
    }
}

fn default_tga_stress() -> Decimal {
    dec!(0.65)
}

fn default_reserve_abundance() -> Decimal {
    dec!(2.5)
}

fn default_usdjpy_danger() -> Decimal {
    dec!(145)
}

fn default_dxy_alert() -> Decimal {
    dec!(105)
}

fn default_wti_alert() -> Decimal {
    dec!(80)
}

/// Macro indicators published monthly or quarterly, maintained by hand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroIndicators {
    pub ism_manufacturing: Decimal,
    pub cpi_yoy: Decimal,
    pub core_cpi_yoy: Decimal,
    pub gdp_growth: Decimal,
    pub gdp_growth_target: Decimal,
    pub deficit_to_gdp: Decimal,
    pub oil_production_mbpd: Decimal,
    pub boj_rate: Decimal,
    pub jgb10y: Decimal,
    pub foreign_treasury_holdings: Decimal,
    pub vix_term_structure: VixTermStructure,
    /// Perpetual funding rate (percent per 8h)
    pub btc_funding_rate: Decimal,
    /// Billions USD
    pub btc_open_interest: Decimal,
    /// Billions USD
    pub btc_market_cap: Decimal,
}

/// Shape of the VIX futures curve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VixTermStructure {
    #[default]
    Contango,
    Backwardation,
}

impl Default for MacroIndicators {
    fn default() -> Self {
        Self {
            ism_manufacturing: dec!(52.6),
            cpi_yoy: dec!(2.7),
            core_cpi_yoy: dec!(2.6),
            gdp_growth: dec!(2.3),
            gdp_growth_target: dec!(3.0),
            deficit_to_gdp: dec!(5.2),
            oil_production_mbpd: dec!(13.3),
            boj_rate: dec!(0.5),
            jgb10y: dec!(1.05),
            foreign_treasury_holdings: dec!(8.67),
            vix_term_structure: VixTermStructure::Contango,
            btc_funding_rate: dec!(0.008),
            btc_open_interest: dec!(45.2),
            btc_market_cap: dec!(1850),
        }
    }
}

/// Dates the dashboard counts down to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calendar {
    pub next_debt_ceiling_deadline: NaiveDate,
    pub fed_chair_term_expiry: NaiveDate,
    pub midterm_election: NaiveDate,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            next_debt_ceiling_deadline: ymd(2026, 6, 30),
            fed_chair_term_expiry: ymd(2026, 5, 15),
            midterm_election: ymd(2026, 11, 3),
        }
    }
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.tga_stress_threshold, dec!(0.65));
        assert_eq!(thresholds.usjpy_danger_threshold, dec!(145));
    }

    #[test]
    fn test_partial_thresholds_from_toml() {
        let thresholds: Thresholds = toml::from_str("dxy_alert_threshold = 103.5").unwrap();
        assert_eq!(thresholds.dxy_alert_threshold, dec!(103.5));
        assert_eq!(thresholds.wti_alert_threshold, dec!(80));
    }

    #[test]
    fn test_macro_indicators_from_toml() {
        let indicators: MacroIndicators =
            toml::from_str("vix_term_structure = \"backwardation\"\nbtc_funding_rate = 0.01").unwrap();
        assert_eq!(indicators.vix_term_structure, VixTermStructure::Backwardation);
        assert_eq!(indicators.btc_funding_rate, dec!(0.01));
        assert_eq!(indicators.btc_market_cap, dec!(1850));
    }

    #[test]
    fn test_calendar_defaults() {
        let calendar = Calendar::default();
        assert_eq!(calendar.midterm_election.to_string(), "2026-11-03");
    }
}
