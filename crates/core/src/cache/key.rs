use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// Deterministic cache key derived from an operation and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Key for a batch quote lookup.
    ///
    /// Symbols are joined in the order given, so `A,B` and `B,A` are distinct
    /// entries. With `normalize` set they are sorted and de-duplicated first.
    pub fn quotes(symbols: &[String], normalize: bool) -> Self {
        let joined = if normalize {
            let mut sorted: Vec<&str> = symbols.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            sorted.dedup();
            sorted.join("_")
        } else {
            symbols.join("_")
        };
        CacheKey(format!("quotes_{}", joined))
    }

    pub fn historical(
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> Self {
        CacheKey(format!(
            "historical_{}_{}_{}_{}",
            symbol,
            iso_millis(start),
            iso_millis(end),
            interval
        ))
    }

    pub fn details(symbol: &str) -> Self {
        CacheKey(format!("details_{}", symbol))
    }

    pub fn trends() -> Self {
        CacheKey("market_trends".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `2024-01-01T00:00:00.000Z`
fn iso_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
