//! Finance provider trait definitions.
//!
//! This module defines the `FinanceProvider` trait that the upstream adapter
//! implements and that tests replace with in-memory mocks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::ProviderError;
use crate::models::{RawBar, RawQuote};

/// Trait for upstream financial data providers.
///
/// Implementations only fetch and decode; they never cache. Caching, key
/// derivation and normalization live in the core crate.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use finproxy_market_data::{FinanceProvider, ProviderError, RawBar, RawQuote};
///
/// struct StaticProvider;
///
/// #[async_trait]
/// impl FinanceProvider for StaticProvider {
///     fn id(&self) -> &'static str {
///         "STATIC"
///     }
///
///     async fn quotes(&self, symbols: &[String]) -> Result<Vec<RawQuote>, ProviderError> {
///         Ok(symbols.iter().map(|s| RawQuote::new(s, 1.0)).collect())
///     }
///
///     // ... implement historical and quote_summary
/// }
/// ```
#[async_trait]
pub trait FinanceProvider: Send + Sync {
    /// Unique identifier for this provider, used for logging.
    fn id(&self) -> &'static str;

    /// Fetch current quotes for a batch of symbols.
    ///
    /// The returned order follows the provider response, which is not
    /// guaranteed to match the order of `symbols`. Unknown symbols are
    /// usually omitted rather than reported as errors.
    async fn quotes(&self, symbols: &[String]) -> Result<Vec<RawQuote>, ProviderError>;

    /// Fetch historical bars for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The ticker to fetch
    /// * `start` - Start of the date range (inclusive)
    /// * `end` - End of the date range
    /// * `interval` - Bar size understood by the provider (e.g. `1d`, `1wk`, `1mo`)
    ///
    /// Bars are ordered by timestamp ascending.
    async fn historical(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        interval: &str,
    ) -> Result<Vec<RawBar>, ProviderError>;

    /// Fetch the requested summary modules for a symbol.
    ///
    /// Returns the provider's result object unshaped, keyed by module name.
    async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[&str],
    ) -> Result<serde_json::Value, ProviderError>;
}
