use serde::{Deserialize, Serialize};

/// Endpoints and client settings for the HTTP feeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_yahoo_quote_url")]
    pub yahoo_quote_url: String,

    #[serde(default = "default_fred_observations_url")]
    pub fred_observations_url: String,

    #[serde(default = "default_coingecko_price_url")]
    pub coingecko_price_url: String,

    /// Environment variable holding the FRED API key
    #[serde(default = "default_fred_api_key_env")]
    pub fred_api_key_env: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            yahoo_quote_url: default_yahoo_quote_url(),
            fred_observations_url: default_fred_observations_url(),
            coingecko_price_url: default_coingecko_price_url(),
            fred_api_key_env: default_fred_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_yahoo_quote_url() -> String {
    "https://query1.finance.yahoo.com/v7/finance/quote".to_string()
}

fn default_fred_observations_url() -> String {
    "https://api.stlouisfed.org/fred/series/observations".to_string()
}

fn default_coingecko_price_url() -> String {
    "https://api.coingecko.com/api/v3/simple/price".to_string()
}

fn default_fred_api_key_env() -> String {
    "FRED_API_KEY".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}
