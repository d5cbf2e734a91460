use serde::{Deserialize, Serialize};

/// A single quote as returned by the provider's batch quote endpoint.
///
/// Every field except the symbol is optional: indices, futures and delisted
/// tickers routinely omit market cap, volume or names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuote {
    pub symbol: String,

    #[serde(default)]
    pub long_name: Option<String>,

    #[serde(default)]
    pub short_name: Option<String>,

    /// Instrument type (EQUITY, INDEX, FUTURE, ETF, ...)
    #[serde(default)]
    pub quote_type: Option<String>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub regular_market_price: Option<f64>,

    #[serde(default)]
    pub regular_market_previous_close: Option<f64>,

    #[serde(default)]
    pub regular_market_change: Option<f64>,

    #[serde(default)]
    pub regular_market_change_percent: Option<f64>,

    #[serde(default)]
    pub regular_market_volume: Option<u64>,

    #[serde(default)]
    pub market_cap: Option<f64>,

    /// Unix timestamp (seconds) of the last regular-market trade
    #[serde(default)]
    pub regular_market_time: Option<i64>,
}

impl RawQuote {
    /// Create a quote carrying only a symbol and a price.
    pub fn new(symbol: &str, price: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            regular_market_price: Some(price),
            ..Default::default()
        }
    }
}
