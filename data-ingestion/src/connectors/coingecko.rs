use reqwest::Client;
use std::collections::HashMap;
use tracing::info;

use super::ConnectorError;

const FEED: &str = "CoinGecko";

/// Spot crypto prices from the CoinGecko simple-price endpoint
#[derive(Debug, Clone)]
pub struct CoinGeckoConnector {
    client: Client,
    price_url: String,
}

/// `{"bitcoin": {"usd": 97000.0}}`
pub(crate) type SimplePriceResponse = HashMap<String, HashMap<String, f64>>;

impl CoinGeckoConnector {
    pub fn new(client: Client, price_url: impl Into<String>) -> Self {
        Self {
            client,
            price_url: price_url.into(),
        }
    }

    /// Price of each coin id quoted in `vs_currency`
    pub async fn fetch_prices(
        &self,
        ids: &[&str],
        vs_currency: &str,
    ) -> Result<HashMap<String, f64>, ConnectorError> {
        let response = self
            .client
            .get(&self.price_url)
            .query(&[("ids", ids.join(",")), ("vs_currencies", vs_currency.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ConnectorError::Status {
                feed: FEED,
                status: response.status(),
            });
        }

        let body: SimplePriceResponse = response.json().await?;
        let prices = extract_prices(body, vs_currency);

        info!("Fetched {}/{} prices from {}", prices.len(), ids.len(), FEED);
        Ok(prices)
    }
}

pub(crate) fn extract_prices(body: SimplePriceResponse, vs_currency: &str) -> HashMap<String, f64> {
    body.into_iter()
        .filter_map(|(id, mut quotes)| quotes.remove(vs_currency).map(|price| (id, price)))
        .collect()
}
