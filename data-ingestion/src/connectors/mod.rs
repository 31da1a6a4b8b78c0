pub mod coingecko;
pub mod fred;
pub mod yahoo;

pub use coingecko::CoinGeckoConnector;
pub use fred::FredConnector;
pub use yahoo::YahooConnector;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of one HTTP feed. Acquisition turns these into fallbacks, they
/// never reach the signal engine.
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{feed} API error: {status}")]
    Status { feed: &'static str, status: StatusCode },

    #[error("no API key configured, set {0}")]
    MissingApiKey(String),
}
