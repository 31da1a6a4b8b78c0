//! Snapshot acquisition.
//!
//! Fetching never fails from the caller's point of view: a feed that errors
//! contributes no readings, and [`resolve`] substitutes fallbacks for whatever
//! is missing. The resulting snapshot names the fields that fell back.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use common::{MacroIndicators, MarketSnapshot, Thresholds};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::SourceConfig;
use crate::connectors::{CoinGeckoConnector, ConnectorError, FredConnector, YahooConnector};
use crate::sources::{fallback_values, keys_for, resolve, Feed, FeedReadings, SOURCE_TABLE};

/// Produces complete snapshots. Implementations must not fail; missing data
/// is replaced by fallbacks before the snapshot is returned.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self) -> MarketSnapshot;
}

/// Live acquisition from Yahoo Finance, FRED and CoinGecko
pub struct LiveSnapshotSource {
    yahoo: YahooConnector,
    fred: FredConnector,
    coingecko: CoinGeckoConnector,
    thresholds: Thresholds,
    indicators: MacroIndicators,
}

impl LiveSnapshotSource {
    pub fn new(
        config: &SourceConfig,
        thresholds: Thresholds,
        indicators: MacroIndicators,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        let fred_api_key = std::env::var(&config.fred_api_key_env).ok();
        let fred = FredConnector::new(
            client.clone(),
            &config.fred_observations_url,
            fred_api_key,
            &config.fred_api_key_env,
        );
        if !fred.has_api_key() {
            warn!(
                "{} is not set, balance-sheet fields will use fallback values",
                config.fred_api_key_env
            );
        }

        Ok(Self {
            yahoo: YahooConnector::new(client.clone(), &config.yahoo_quote_url),
            fred,
            coingecko: CoinGeckoConnector::new(client, &config.coingecko_price_url),
            thresholds,
            indicators,
        })
    }

    /// Query all feeds concurrently
    pub async fn fetch_readings(&self) -> FeedReadings {
        let yahoo_symbols = keys_for(Feed::Yahoo);
        let fred_series = keys_for(Feed::Fred);
        let coin_ids = keys_for(Feed::CoinGecko);

        let (yahoo, fred, coingecko) = tokio::join!(
            self.yahoo.fetch_quotes(&yahoo_symbols),
            self.fred.fetch_latest(&fred_series),
            self.coingecko.fetch_prices(&coin_ids, "usd"),
        );

        FeedReadings {
            yahoo: or_empty("Yahoo Finance", yahoo),
            fred: or_empty("FRED", fred),
            coingecko: or_empty("CoinGecko", coingecko),
        }
    }
}

fn or_empty(feed: &str, result: Result<HashMap<String, f64>, ConnectorError>) -> HashMap<String, f64> {
    result.unwrap_or_else(|e| {
        warn!("{} unavailable, using fallbacks: {}", feed, e);
        HashMap::new()
    })
}

#[async_trait]
impl SnapshotSource for LiveSnapshotSource {
    async fn fetch_snapshot(&self) -> MarketSnapshot {
        let readings = self.fetch_readings().await;
        let (live, fell_back) = resolve(&readings);

        if fell_back.is_empty() {
            info!("✅ Snapshot acquired, all {} live fields fresh", SOURCE_TABLE.len());
        } else {
            warn!(
                "Snapshot acquired with {} fallback field(s): {}",
                fell_back.len(),
                fell_back.join(", ")
            );
        }

        MarketSnapshot::assemble(live, fell_back, &self.thresholds, &self.indicators, Utc::now())
    }
}

/// Offline source serving the fallback table, for running without network
/// access
#[derive(Debug, Clone, Default)]
pub struct FallbackSnapshotSource {
    thresholds: Thresholds,
    indicators: MacroIndicators,
}

impl FallbackSnapshotSource {
    pub fn new(thresholds: Thresholds, indicators: MacroIndicators) -> Self {
        Self {
            thresholds,
            indicators,
        }
    }
}

#[async_trait]
impl SnapshotSource for FallbackSnapshotSource {
    async fn fetch_snapshot(&self) -> MarketSnapshot {
        let fell_back = SOURCE_TABLE
            .iter()
            .map(|s| s.field.name().to_string())
            .collect();

        MarketSnapshot::assemble(
            fallback_values(),
            fell_back,
            &self.thresholds,
            &self.indicators,
            Utc::now(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// Points every feed at a closed local port
    fn unreachable_config() -> SourceConfig {
        SourceConfig {
            yahoo_quote_url: "http://127.0.0.1:9/v7/finance/quote".to_string(),
            fred_observations_url: "http://127.0.0.1:9/fred/series/observations".to_string(),
            coingecko_price_url: "http://127.0.0.1:9/api/v3/simple/price".to_string(),
            fred_api_key_env: "LIQUIDITY_TEST_UNSET_FRED_KEY".to_string(),
            request_timeout_secs: 2,
        }
    }

    #[tokio::test]
    async fn test_unreachable_feeds_degrade_to_fallbacks() {
        let source = LiveSnapshotSource::new(
            &unreachable_config(),
            Thresholds::default(),
            MacroIndicators::default(),
        )
        .unwrap();

        let snapshot = source.fetch_snapshot().await;
        assert_eq!(snapshot.fallback_fields.len(), SOURCE_TABLE.len());
        assert_eq!(snapshot.fed_balance, dec!(6.58));
        assert_eq!(snapshot.vix, dec!(16.4));
        assert_eq!(snapshot.tga_stress_threshold, dec!(0.65));
    }

    #[tokio::test]
    async fn test_fallback_source() {
        let source = FallbackSnapshotSource::default();
        let snapshot = source.fetch_snapshot().await;

        assert_eq!(snapshot.usdjpy, dec!(155.2));
        assert_eq!(snapshot.ism_manufacturing, dec!(52.6));
        assert!(!snapshot.is_fully_live());
    }
}
