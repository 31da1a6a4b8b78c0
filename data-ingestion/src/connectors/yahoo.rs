use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info};

use super::ConnectorError;

const FEED: &str = "Yahoo Finance";

/// Yahoo rejects requests without a browser-like user agent
const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Market quotes from the Yahoo Finance v7 quote endpoint
#[derive(Debug, Clone)]
pub struct YahooConnector {
    client: Client,
    quote_url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: Option<QuoteResponse>,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    symbol: String,
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

impl YahooConnector {
    pub fn new(client: Client, quote_url: impl Into<String>) -> Self {
        Self {
            client,
            quote_url: quote_url.into(),
        }
    }

    /// Latest regular-market price per symbol; symbols without a price are omitted
    pub async fn fetch_quotes(&self, symbols: &[&str]) -> Result<HashMap<String, f64>, ConnectorError> {
        debug!("Fetching {} quotes from {}", symbols.len(), FEED);

        let response = self
            .client
            .get(&self.quote_url)
            .query(&[("symbols", symbols.join(","))])
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ConnectorError::Status {
                feed: FEED,
                status: response.status(),
            });
        }

        let envelope: QuoteEnvelope = response.json().await?;
        let quotes = extract_quotes(envelope);

        info!("Fetched {}/{} quotes from {}", quotes.len(), symbols.len(), FEED);
        Ok(quotes)
    }
}

pub(crate) fn extract_quotes(envelope: QuoteEnvelope) -> HashMap<String, f64> {
    envelope
        .quote_response
        .map(|r| r.result)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|q| q.regular_market_price.map(|price| (q.symbol, price)))
        .collect()
}
