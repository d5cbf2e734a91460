use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical OHLCV bar as returned by the provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    /// Start of the bar
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    /// Close adjusted for splits and dividends
    pub adj_close: f64,
}
