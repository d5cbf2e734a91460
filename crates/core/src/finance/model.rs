//! Normalized records served by the finance endpoints.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use finproxy_market_data::{RawBar, RawQuote};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current quote for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub symbol: String,
    /// Long name when the provider has one, short name otherwise
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub previous_close: Option<Decimal>,
    pub change: Option<Decimal>,
    pub change_percent: Option<Decimal>,
    pub volume: Option<u64>,
    pub market_cap: Option<Decimal>,
    pub currency: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl From<RawQuote> for QuoteRecord {
    fn from(raw: RawQuote) -> Self {
        Self {
            name: raw.long_name.or(raw.short_name),
            price: to_decimal(raw.regular_market_price),
            previous_close: to_decimal(raw.regular_market_previous_close),
            change: to_decimal(raw.regular_market_change),
            change_percent: to_decimal(raw.regular_market_change_percent),
            volume: raw.regular_market_volume,
            market_cap: to_decimal(raw.market_cap),
            currency: raw.currency,
            timestamp: raw
                .regular_market_time
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
            symbol: raw.symbol,
        }
    }
}

/// One day (or interval) of price history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalBar {
    /// Calendar date of the bar in UTC, no time component
    pub date: NaiveDate,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    pub volume: u64,
    pub adj_close: Option<Decimal>,
}

impl From<RawBar> for HistoricalBar {
    fn from(raw: RawBar) -> Self {
        Self {
            date: raw.timestamp.date_naive(),
            open: Decimal::from_f64(raw.open),
            high: Decimal::from_f64(raw.high),
            low: Decimal::from_f64(raw.low),
            close: Decimal::from_f64(raw.close),
            volume: raw.volume,
            adj_close: Decimal::from_f64(raw.adj_close),
        }
    }
}

/// Provider summary modules, passed through unshaped.
pub type AssetDetails = serde_json::Value;

/// Snapshot of one market index or benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendRecord {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub change: Option<Decimal>,
    pub change_percent: Option<Decimal>,
    #[serde(rename = "type")]
    pub quote_type: Option<String>,
}

impl From<RawQuote> for TrendRecord {
    fn from(raw: RawQuote) -> Self {
        Self {
            name: raw.short_name,
            price: to_decimal(raw.regular_market_price),
            change: to_decimal(raw.regular_market_change),
            change_percent: to_decimal(raw.regular_market_change_percent),
            quote_type: raw.quote_type,
            symbol: raw.symbol,
        }
    }
}

/// Quote, history and details of one symbol in a single record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullInfo {
    pub symbol: String,
    /// First quote returned by the provider, if any
    pub quote: Option<QuoteRecord>,
    pub historical: Vec<HistoricalBar>,
    pub details: AssetDetails,
}

/// A curated cross-listed equity with its live quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalEquity {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    /// `None` when the provider left the symbol out of its answer
    pub quote: Option<QuoteRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorGroup {
    pub sector: String,
    pub equities: Vec<RegionalEquity>,
}

fn to_decimal(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn raw_quote() -> RawQuote {
        RawQuote {
            symbol: "PBR".to_string(),
            long_name: Some("Petróleo Brasileiro S.A. - Petrobras".to_string()),
            short_name: Some("Petrobras".to_string()),
            quote_type: Some("EQUITY".to_string()),
            currency: Some("USD".to_string()),
            regular_market_price: Some(14.52),
            regular_market_previous_close: Some(14.31),
            regular_market_change: Some(0.21),
            regular_market_change_percent: Some(1.4675),
            regular_market_volume: Some(18_233_400),
            market_cap: Some(93_562_445_824.0),
            regular_market_time: Some(1_704_067_200),
        }
    }

    #[test]
    fn test_quote_record_prefers_long_name() {
        let record = QuoteRecord::from(raw_quote());
        assert_eq!(record.symbol, "PBR");
        assert_eq!(
            record.name.as_deref(),
            Some("Petróleo Brasileiro S.A. - Petrobras")
        );
        assert_eq!(record.price, Some(dec!(14.52)));
        assert_eq!(record.previous_close, Some(dec!(14.31)));
        assert_eq!(record.volume, Some(18_233_400));
        assert_eq!(record.market_cap, Some(dec!(93562445824)));
        assert_eq!(
            record.timestamp,
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_quote_record_falls_back_to_short_name() {
        let raw = RawQuote {
            long_name: None,
            ..raw_quote()
        };
        let record = QuoteRecord::from(raw);
        assert_eq!(record.name.as_deref(), Some("Petrobras"));
    }

    #[test]
    fn test_trend_record_uses_short_name_and_type() {
        let record = TrendRecord::from(raw_quote());
        assert_eq!(record.name.as_deref(), Some("Petrobras"));
        assert_eq!(record.quote_type.as_deref(), Some("EQUITY"));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "EQUITY");
        assert!(json.get("changePercent").is_some());
    }

    #[test]
    fn test_historical_bar_keeps_calendar_date_only() {
        let raw = RawBar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap(),
            open: 14.1,
            high: 14.6,
            low: 13.9,
            close: 14.5,
            volume: 1_200_000,
            adj_close: 14.2,
        };
        let bar = HistoricalBar::from(raw);
        assert_eq!(bar.date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bar.adj_close, Some(dec!(14.2)));

        let json = serde_json::to_value(&bar).unwrap();
        assert_eq!(json["date"], "2024-01-02");
        assert!(json.get("adjClose").is_some());
    }
}
