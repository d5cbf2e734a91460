//! Yahoo Finance provider.
//!
//! This provider uses the Yahoo Finance API for:
//! - Batch quotes (v7 quote endpoint, one request for many symbols)
//! - Historical bars (chart endpoint through `yahoo_finance_api`)
//! - Asset details (v10 quoteSummary endpoint, arbitrary modules)

mod models;

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header;
use serde::de::DeserializeOwned;
use time::OffsetDateTime;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::ProviderError;
use crate::models::{RawBar, RawQuote};
use crate::provider::FinanceProvider;

use models::{YahooQuoteResponse, YahooQuoteSummaryResponse};

const PROVIDER_ID: &str = "YAHOO";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
const QUOTE_URL: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
const QUOTE_SUMMARY_URL: &str = "https://query1.finance.yahoo.com/v10/finance/quoteSummary";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance provider.
///
/// Holds one HTTP client and the authentication crumb for its own lifetime;
/// two providers never share credentials.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
    client: reqwest::Client,
    crumb: RwLock<Option<CrumbData>>,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub async fn new() -> Result<Self, ProviderError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            ProviderError::provider(
                PROVIDER_ID,
                format!("Failed to initialize Yahoo connector: {}", e),
            )
        })?;
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            connector,
            client,
            crumb: RwLock::new(None),
        })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, ProviderError> {
        if let Ok(guard) = self.crumb.read() {
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }

        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, ProviderError> {
        // Step 1: Get cookie from fc.yahoo.com
        let response = self
            .client
            .get("https://fc.yahoo.com")
            .send()
            .await
            .map_err(|e| ProviderError::provider(PROVIDER_ID, format!("Failed to get cookie: {}", e)))?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| ProviderError::provider(PROVIDER_ID, "Failed to parse Yahoo cookie"))?;

        // Step 2: Get crumb using cookie
        let crumb = self
            .client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| ProviderError::provider(PROVIDER_ID, format!("Failed to get crumb: {}", e)))?
            .text()
            .await
            .map_err(|e| ProviderError::provider(PROVIDER_ID, format!("Failed to read crumb: {}", e)))?;

        let crumb_data = CrumbData { cookie, crumb };

        if let Ok(mut guard) = self.crumb.write() {
            *guard = Some(crumb_data.clone());
        }

        Ok(crumb_data)
    }

    /// Clear the cached crumb (used when authentication fails)
    fn clear_crumb(&self) {
        if let Ok(mut guard) = self.crumb.write() {
            *guard = None;
        }
    }

    /// GET an authenticated Yahoo endpoint and decode its JSON body.
    ///
    /// `url` must already carry its query string; the crumb is appended.
    async fn get_authenticated<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<T, ProviderError> {
        let crumb = self.ensure_crumb().await?;
        let url = format!("{}&crumb={}", url, encode(&crumb.crumb));

        let response = self
            .client
            .get(&url)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| ProviderError::provider(PROVIDER_ID, format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(ProviderError::provider(
                PROVIDER_ID,
                "Yahoo authentication expired",
            ));
        }

        // quoteSummary answers 404 with a JSON error body worth decoding
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::provider(
                PROVIDER_ID,
                format!("{} request returned HTTP {}", what, status),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            ProviderError::provider(
                PROVIDER_ID,
                format!("Failed to parse {} response: {}", what, e),
            )
        })
    }

    // ========================================================================
    // Conversions
    // ========================================================================

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(dt.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// Convert a Yahoo chart quote to a raw bar.
    fn yahoo_quote_to_bar(yahoo_quote: &yahoo::Quote) -> Option<RawBar> {
        let timestamp = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()?;

        Some(RawBar {
            timestamp,
            open: yahoo_quote.open,
            high: yahoo_quote.high,
            low: yahoo_quote.low,
            close: yahoo_quote.close,
            volume: yahoo_quote.volume,
            adj_close: yahoo_quote.adjclose,
        })
    }
}

// ============================================================================
// FinanceProvider Implementation
// ============================================================================

#[async_trait]
impl FinanceProvider for YahooProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn quotes(&self, symbols: &[String]) -> Result<Vec<RawQuote>, ProviderError> {
        if symbols.is_empty() {
            return Ok(vec![]);
        }

        debug!("Fetching quotes for {:?} from Yahoo", symbols);

        let url = format!("{}?symbols={}", QUOTE_URL, encode(&symbols.join(",")));
        let data: YahooQuoteResponse = self.get_authenticated(&url, "Quote").await?;

        if let Some(error) = data.quote_response.error {
            return Err(ProviderError::provider(
                PROVIDER_ID,
                format!("{}: {}", error.code, error.description),
            ));
        }

        Ok(data.quote_response.result)
    }

    async fn historical(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> Result<Vec<RawBar>, ProviderError> {
        debug!(
            "Fetching {} history for {} from {} to {} from Yahoo",
            interval,
            symbol,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d")
        );

        let response = self
            .connector
            .get_quote_history_interval(
                symbol,
                Self::chrono_to_offset_datetime(start),
                Self::chrono_to_offset_datetime(end),
                interval,
            )
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    ProviderError::SymbolNotFound(symbol.to_string())
                } else {
                    ProviderError::provider(PROVIDER_ID, e.to_string())
                }
            })?;

        match response.quotes() {
            Ok(yahoo_quotes) => Ok(yahoo_quotes
                .iter()
                .filter_map(|q| {
                    let bar = Self::yahoo_quote_to_bar(q);
                    if bar.is_none() {
                        warn!("Skipping bar with invalid timestamp {}", q.timestamp);
                    }
                    bar
                })
                .collect()),
            Err(yahoo::YahooError::NoQuotes) => {
                warn!(
                    "No historical quotes returned for '{}' between {} and {}",
                    symbol,
                    start.format("%Y-%m-%d"),
                    end.format("%Y-%m-%d")
                );
                Ok(vec![])
            }
            Err(e) => Err(ProviderError::provider(PROVIDER_ID, e.to_string())),
        }
    }

    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[&str],
    ) -> Result<serde_json::Value, ProviderError> {
        debug!("Fetching quoteSummary {:?} for {} from Yahoo", modules, symbol);

        let url = format!(
            "{}/{}?modules={}",
            QUOTE_SUMMARY_URL,
            encode(symbol),
            encode(&modules.join(","))
        );
        let data: YahooQuoteSummaryResponse = self.get_authenticated(&url, "quoteSummary").await?;

        if let Some(error) = data.quote_summary.error {
            if error.code.eq_ignore_ascii_case("Not Found") {
                return Err(ProviderError::SymbolNotFound(symbol.to_string()));
            }
            return Err(ProviderError::provider(
                PROVIDER_ID,
                format!("{}: {}", error.code, error.description),
            ));
        }

        data.quote_summary
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::SymbolNotFound(symbol.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chrono_to_offset_datetime() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 12, 30, 0).unwrap();
        let converted = YahooProvider::chrono_to_offset_datetime(dt);
        assert_eq!(converted.unix_timestamp(), dt.timestamp());
    }

    #[tokio::test]
    async fn test_empty_symbol_batch_skips_network() {
        let provider = YahooProvider::new().await.unwrap();
        let quotes = provider.quotes(&[]).await.unwrap();
        assert!(quotes.is_empty());
        assert_eq!(provider.id(), "YAHOO");
    }
}
