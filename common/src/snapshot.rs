use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::settings::{MacroIndicators, Thresholds, VixTermStructure};

/// Values that vary on every acquisition, already normalised to the units the
/// snapshot uses (trillions USD for the balance sheet, quote units otherwise)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveValues {
    pub fed_balance: Decimal,
    pub tga: Decimal,
    pub rrp: Decimal,
    pub bank_reserves: Decimal,
    pub vix: Decimal,
    pub dxy: Decimal,
    pub wti: Decimal,
    pub usdjpy: Decimal,
    pub us10y: Decimal,
    pub gold: Decimal,
    pub btc_price: Decimal,
}

/// Complete, immutable input to one signal evaluation.
///
/// Serialises to the flat camelCase document served on `/api/liquidity`.
/// A snapshot is never partially filled: whatever could not be fetched was
/// replaced by its fallback and named in `fallback_fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    // Fed / Treasury (trillions USD)
    pub fed_balance: Decimal,
    pub tga: Decimal,
    pub rrp: Decimal,
    pub bank_reserves: Decimal,

    // Thresholds (static)
    pub tga_stress_threshold: Decimal,
    pub reserve_abundance_threshold: Decimal,
    pub usjpy_danger_threshold: Decimal,
    pub dxy_alert_threshold: Decimal,
    pub wti_alert_threshold: Decimal,

    // Markets
    pub vix: Decimal,
    pub dxy: Decimal,
    pub wti: Decimal,
    pub usdjpy: Decimal,
    pub us10y: Decimal,
    pub gold: Decimal,
    pub btc_price: Decimal,
    pub vix_term_structure: VixTermStructure,

    // Crypto derivatives (billions USD, funding in percent)
    pub btc_funding_rate: Decimal,
    pub btc_open_interest: Decimal,
    pub btc_market_cap: Decimal,

    // Japan
    pub boj_rate: Decimal,
    pub jgb10y: Decimal,

    // Macro
    pub ism_manufacturing: Decimal,
    #[serde(rename = "cpiYoY")]
    pub cpi_yoy: Decimal,
    #[serde(rename = "coreCpiYoY")]
    pub core_cpi_yoy: Decimal,
    pub gdp_growth: Decimal,
    pub gdp_growth_target: Decimal,
    pub deficit_to_gdp: Decimal,
    pub oil_production_mbpd: Decimal,
    pub foreign_treasury_holdings: Decimal,

    #[serde(default)]
    pub fallback_fields: Vec<String>,
    pub last_update: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Combine one acquisition's live values with the static configuration
    pub fn assemble(
        live: LiveValues,
        fallback_fields: Vec<String>,
        thresholds: &Thresholds,
        indicators: &MacroIndicators,
        last_update: DateTime<Utc>,
    ) -> Self {
        Self {
            fed_balance: live.fed_balance,
            tga: live.tga,
            rrp: live.rrp,
            bank_reserves: live.bank_reserves,

            tga_stress_threshold: thresholds.tga_stress_threshold,
            reserve_abundance_threshold: thresholds.reserve_abundance_threshold,
            usjpy_danger_threshold: thresholds.usjpy_danger_threshold,
            dxy_alert_threshold: thresholds.dxy_alert_threshold,
            wti_alert_threshold: thresholds.wti_alert_threshold,

            vix: live.vix,
            dxy: live.dxy,
            wti: live.wti,
            usdjpy: live.usdjpy,
            us10y: live.us10y,
            gold: live.gold,
            btc_price: live.btc_price,
            vix_term_structure: indicators.vix_term_structure,

            btc_funding_rate: indicators.btc_funding_rate,
            btc_open_interest: indicators.btc_open_interest,
            btc_market_cap: indicators.btc_market_cap,

            boj_rate: indicators.boj_rate,
            jgb10y: indicators.jgb10y,

            ism_manufacturing: indicators.ism_manufacturing,
            cpi_yoy: indicators.cpi_yoy,
            core_cpi_yoy: indicators.core_cpi_yoy,
            gdp_growth: indicators.gdp_growth,
            gdp_growth_target: indicators.gdp_growth_target,
            deficit_to_gdp: indicators.deficit_to_gdp,
            oil_production_mbpd: indicators.oil_production_mbpd,
            foreign_treasury_holdings: indicators.foreign_treasury_holdings,

            fallback_fields,
            last_update,
        }
    }

    /// Thresholds this snapshot was assembled with
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            tga_stress_threshold: self.tga_stress_threshold,
            reserve_abundance_threshold: self.reserve_abundance_threshold,
            usjpy_danger_threshold: self.usjpy_danger_threshold,
            dxy_alert_threshold: self.dxy_alert_threshold,
            wti_alert_threshold: self.wti_alert_threshold,
        }
    }

    /// True when every live field came from its source rather than a fallback
    pub fn is_fully_live(&self) -> bool {
        self.fallback_fields.is_empty()
    }
}
