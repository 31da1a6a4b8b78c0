//! Dashboard configuration

use anyhow::{bail, Context, Result};
use common::{Calendar, MacroIndicators, Thresholds};
use data_ingestion::SourceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "liquidity.toml";

/// Everything the monitor reads at startup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub refresh: RefreshConfig,

    #[serde(default)]
    pub sources: SourceConfig,

    /// Policy thresholds; static, never derived from data
    #[serde(default)]
    pub thresholds: Thresholds,

    #[serde(default)]
    pub macro_indicators: MacroIndicators,

    #[serde(default)]
    pub calendar: Calendar,
}

impl DashboardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.refresh.interval_secs == 0 {
            bail!("refresh.interval_secs must be greater than zero");
        }
        if self.sources.request_timeout_secs == 0 {
            bail!("sources.request_timeout_secs must be greater than zero");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Seconds between scheduled acquisitions
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Log a text rendering of the dashboard after every refresh
    #[serde(default = "default_console_report")]
    pub console_report: bool,

    /// Serve the fallback table instead of calling the feeds
    #[serde(default)]
    pub offline: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            console_report: default_console_report(),
            offline: false,
        }
    }
}

fn default_interval_secs() -> u64 {
    300
}

fn default_console_report() -> bool {
    true
}

/// Load configuration from TOML file
pub fn load_config(path: impl AsRef<Path>) -> Result<DashboardConfig> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: DashboardConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Like [`load_config`], but a missing file means defaults
pub fn load_or_default(path: impl AsRef<Path>) -> Result<DashboardConfig> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("Config {} not found, using defaults", path.display());
        return Ok(DashboardConfig::default());
    }
    load_config(path)
}

/// Save configuration to TOML file
pub fn save_config(config: &DashboardConfig, path: impl AsRef<Path>) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Create a default configuration file template
pub fn create_config_template(path: impl AsRef<Path>) -> Result<()> {
    let template = r#"# Liquidity Monitor Configuration

[server]
# Address the dashboard API listens on
bind_addr = "127.0.0.1:3000"

[refresh]
# Seconds between scheduled acquisitions
interval_secs = 300

# Log a text dashboard after every refresh
console_report = true

# Serve fallback values instead of calling the feeds
offline = false

[sources]
yahoo_quote_url = "https://query1.finance.yahoo.com/v7/finance/quote"
fred_observations_url = "https://api.stlouisfed.org/fred/series/observations"
coingecko_price_url = "https://api.coingecko.com/api/v3/simple/price"

# Environment variable holding the FRED API key
fred_api_key_env = "FRED_API_KEY"

# Per-request timeout (seconds)
request_timeout_secs = 10

[thresholds]
# TGA above this drains liquidity (trillions USD)
tga_stress_threshold = 0.65

# Bank reserves above this are abundant (trillions USD)
reserve_abundance_threshold = 2.5

# USD/JPY below this risks a carry-trade unwind
usjpy_danger_threshold = 145.0

# Dollar index above this pressures risk assets
dxy_alert_threshold = 105.0

# WTI above this feeds inflation (USD/bbl)
wti_alert_threshold = 80.0

[macro_indicators]
ism_manufacturing = 52.6
cpi_yoy = 2.7
core_cpi_yoy = 2.6
gdp_growth = 2.3
gdp_growth_target = 3.0
deficit_to_gdp = 5.2
oil_production_mbpd = 13.3
boj_rate = 0.5
jgb10y = 1.05
foreign_treasury_holdings = 8.67
vix_term_structure = "contango"
btc_funding_rate = 0.008
btc_open_interest = 45.2
btc_market_cap = 1850.0

[calendar]
next_debt_ceiling_deadline = "2026-06-30"
fed_chair_term_expiry = "2026-05-15"
midterm_election = "2026-11-03"
"#;

    std::fs::write(path, template)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("liquidity-{}-{}.toml", name, uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.refresh.interval_secs, 300);
        assert_eq!(config.thresholds.wti_alert_threshold, dec!(80));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_template_matches_defaults() {
        let path = temp_path("template");
        create_config_template(&path).unwrap();

        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, DashboardConfig::default());
    }

    #[test]
    fn test_config_round_trip() {
        let path = temp_path("roundtrip");
        let mut config = DashboardConfig::default();
        config.refresh.interval_secs = 120;
        config.thresholds.dxy_alert_threshold = dec!(103.5);

        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.refresh.interval_secs, 120);
        assert_eq!(loaded.thresholds.dxy_alert_threshold, dec!(103.5));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: DashboardConfig = toml::from_str("[refresh]\noffline = true\n").unwrap();
        assert!(config.refresh.offline);
        assert_eq!(config.refresh.interval_secs, 300);
        assert_eq!(config.server.bind_addr, "127.0.0.1:3000");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut config = DashboardConfig::default();
        config.refresh.interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = load_or_default(temp_path("missing")).unwrap();
        assert_eq!(config, DashboardConfig::default());
    }
}
