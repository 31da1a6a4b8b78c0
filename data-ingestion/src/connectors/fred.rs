use futures_util::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::ConnectorError;

const FEED: &str = "FRED";

/// Federal Reserve balance-sheet series from the St. Louis Fed API.
///
/// Each series is a separate request; they run concurrently and a failing
/// series only drops its own value.
#[derive(Debug, Clone)]
pub struct FredConnector {
    client: Client,
    observations_url: String,
    api_key: Option<String>,
    api_key_env: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ObservationsResponse {
    #[serde(default)]
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    value: String,
}

impl FredConnector {
    pub fn new(
        client: Client,
        observations_url: impl Into<String>,
        api_key: Option<String>,
        api_key_env: impl Into<String>,
    ) -> Self {
        Self {
            client,
            observations_url: observations_url.into(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_key_env: api_key_env.into(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Latest observation of every series that answered with a number
    pub async fn fetch_latest(&self, series: &[&str]) -> Result<HashMap<String, f64>, ConnectorError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ConnectorError::MissingApiKey(self.api_key_env.clone()))?;

        let results = join_all(series.iter().map(|id| self.fetch_series(id, api_key))).await;

        let mut values = HashMap::new();
        for (id, result) in series.iter().zip(results) {
            match result {
                Ok(Some(value)) => {
                    values.insert(id.to_string(), value);
                }
                Ok(None) => debug!("{} series {} has no usable observation", FEED, id),
                Err(e) => warn!("{} series {} failed: {}", FEED, id, e),
            }
        }

        info!("Fetched {}/{} series from {}", values.len(), series.len(), FEED);
        Ok(values)
    }

    async fn fetch_series(&self, series_id: &str, api_key: &str) -> Result<Option<f64>, ConnectorError> {
        let response = self
            .client
            .get(&self.observations_url)
            .query(&[
                ("series_id", series_id),
                ("sort_order", "desc"),
                ("limit", "1"),
                ("api_key", api_key),
                ("file_type", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ConnectorError::Status {
                feed: FEED,
                status: response.status(),
            });
        }

        let body: ObservationsResponse = response.json().await?;
        Ok(latest_value(&body))
    }
}

/// FRED reports a missing observation as "."
pub(crate) fn latest_value(response: &ObservationsResponse) -> Option<f64> {
    response
        .observations
        .first()
        .and_then(|o| o.value.trim().parse::<f64>().ok())
}
