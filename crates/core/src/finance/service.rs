//! Fetch-or-serve finance service.
//!
//! Every single operation follows the same path: derive a [`CacheKey`], return
//! the cached value while it is fresh, otherwise call the provider, normalize
//! the answer, store it and return it. Failures are never stored.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, error};

use finproxy_market_data::{FinanceProvider, ProviderError};

use super::model::{
    AssetDetails, FullInfo, HistoricalBar, QuoteRecord, RegionalEquity, SectorGroup, TrendRecord,
};
use crate::cache::{CacheConfig, CacheKey, CacheStore, Clock, SystemClock};
use crate::constants::{
    BRAZILIAN_ADRS, DEFAULT_HISTORY_DAYS, DEFAULT_INTERVAL, DEFAULT_PROVIDER_TIMEOUT_MS,
    DETAIL_MODULES, MARKET_INDICES, PETROBRAS_SYMBOL, VALE_SYMBOL, VIX_SYMBOL,
};
use crate::errors::{FinanceError, Operation, Result};

/// Finance service settings.
#[derive(Debug, Clone)]
pub struct FinanceServiceConfig {
    pub cache: CacheConfig,
    /// Upper bound for a single provider call
    pub provider_timeout: Duration,
    /// Sort and de-duplicate symbols before building quote cache keys
    pub normalize_symbol_keys: bool,
}

impl Default for FinanceServiceConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
            normalize_symbol_keys: false,
        }
    }
}

/// Everything the cache holds, one variant per cached operation.
#[derive(Debug, Clone)]
pub enum CachedPayload {
    Quotes(Vec<QuoteRecord>),
    Historical(Vec<HistoricalBar>),
    Details(AssetDetails),
    Trends(Vec<TrendRecord>),
}

/// Conversion between an operation's result and its cache payload.
trait Cacheable: Sized {
    fn into_payload(self) -> CachedPayload;
    fn from_payload(payload: CachedPayload) -> Option<Self>;
}

impl Cacheable for Vec<QuoteRecord> {
    fn into_payload(self) -> CachedPayload {
        CachedPayload::Quotes(self)
    }

    fn from_payload(payload: CachedPayload) -> Option<Self> {
        match payload {
            CachedPayload::Quotes(quotes) => Some(quotes),
            _ => None,
        }
    }
}

impl Cacheable for Vec<HistoricalBar> {
    fn into_payload(self) -> CachedPayload {
        CachedPayload::Historical(self)
    }

    fn from_payload(payload: CachedPayload) -> Option<Self> {
        match payload {
            CachedPayload::Historical(bars) => Some(bars),
            _ => None,
        }
    }
}

impl Cacheable for AssetDetails {
    fn into_payload(self) -> CachedPayload {
        CachedPayload::Details(self)
    }

    fn from_payload(payload: CachedPayload) -> Option<Self> {
        match payload {
            CachedPayload::Details(details) => Some(details),
            _ => None,
        }
    }
}

impl Cacheable for Vec<TrendRecord> {
    fn into_payload(self) -> CachedPayload {
        CachedPayload::Trends(self)
    }

    fn from_payload(payload: CachedPayload) -> Option<Self> {
        match payload {
            CachedPayload::Trends(trends) => Some(trends),
            _ => None,
        }
    }
}

/// Finance operations exposed to the HTTP surface.
#[async_trait]
pub trait FinanceServiceTrait: Send + Sync {
    /// Current quotes, in provider response order.
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<QuoteRecord>>;

    /// Price history. `start` defaults to 30 days before now, `end` to now.
    async fn get_historical(
        &self,
        symbol: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        interval: &str,
    ) -> Result<Vec<HistoricalBar>>;

    /// Profile, summary, financial data, recommendation trend and earnings.
    async fn get_details(&self, symbol: &str) -> Result<AssetDetails>;

    /// Snapshot of the fixed market index set.
    async fn get_market_trends(&self) -> Result<Vec<TrendRecord>>;

    /// Quote, default history and details fetched concurrently.
    async fn get_full_info(&self, symbol: &str) -> Result<FullInfo>;

    /// Curated regional equities grouped by sector, each with its quote.
    async fn get_regional_equities(&self) -> Result<Vec<SectorGroup>>;

    async fn get_primary_oil(&self) -> Result<FullInfo> {
        self.get_full_info(PETROBRAS_SYMBOL).await
    }

    async fn get_primary_mining(&self) -> Result<FullInfo> {
        self.get_full_info(VALE_SYMBOL).await
    }

    async fn get_volatility_index(&self) -> Result<FullInfo> {
        self.get_full_info(VIX_SYMBOL).await
    }

    /// Current instant as seen by the service.
    fn now(&self) -> DateTime<Utc>;
}

/// Caching finance service over a [`FinanceProvider`].
pub struct FinanceService {
    provider: Arc<dyn FinanceProvider>,
    cache: CacheStore<CachedPayload>,
    clock: Arc<dyn Clock>,
    provider_timeout: Duration,
    normalize_symbol_keys: bool,
}

impl FinanceService {
    pub fn new(provider: Arc<dyn FinanceProvider>, config: FinanceServiceConfig) -> Self {
        Self::with_clock(provider, config, Arc::new(SystemClock))
    }

    /// Build a service whose cache and default dates follow `clock`.
    pub fn with_clock(
        provider: Arc<dyn FinanceProvider>,
        config: FinanceServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            cache: CacheStore::with_clock(config.cache, clock.clone()),
            provider,
            clock,
            provider_timeout: config.provider_timeout,
            normalize_symbol_keys: config.normalize_symbol_keys,
        }
    }

    pub fn cache(&self) -> &CacheStore<CachedPayload> {
        &self.cache
    }

    /// Serve `key` from cache or run `fetch` and cache its result.
    async fn fetch_or_serve<T, F>(&self, operation: Operation, key: CacheKey, fetch: F) -> Result<T>
    where
        T: Cacheable + Clone + Send,
        F: Future<Output = std::result::Result<T, ProviderError>> + Send,
    {
        if let Some(hit) = self.cache.get(&key).and_then(T::from_payload) {
            debug!("Cache hit for {}", key);
            return Ok(hit);
        }

        debug!("Cache miss for {}, fetching from {}", key, self.provider.id());
        let value = self.call_provider(operation, fetch).await?;
        self.cache.set(key, value.clone().into_payload());
        Ok(value)
    }

    /// Run a provider call under the configured timeout.
    async fn call_provider<T, F>(&self, operation: Operation, fetch: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, ProviderError>> + Send,
    {
        match tokio::time::timeout(self.provider_timeout, fetch).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                error!("Failed to fetch {}: {}", operation, e);
                Err(FinanceError::upstream(operation, e))
            }
            Err(_) => {
                let timeout_ms = self.provider_timeout.as_millis() as u64;
                error!("Timed out fetching {} after {} ms", operation, timeout_ms);
                Err(FinanceError::Timeout {
                    operation,
                    timeout_ms,
                })
            }
        }
    }
}

#[async_trait]
impl FinanceServiceTrait for FinanceService {
    async fn get_quotes(&self, symbols: &[String]) -> Result<Vec<QuoteRecord>> {
        let key = CacheKey::quotes(symbols, self.normalize_symbol_keys);
        self.fetch_or_serve(Operation::Quotes, key, async {
            let quotes = self.provider.quotes(symbols).await?;
            Ok::<_, ProviderError>(quotes.into_iter().map(QuoteRecord::from).collect())
        })
        .await
    }

    async fn get_historical(
        &self,
        symbol: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        interval: &str,
    ) -> Result<Vec<HistoricalBar>> {
        let now = self.clock.now();
        let start = start.unwrap_or_else(|| now - chrono::Duration::days(DEFAULT_HISTORY_DAYS));
        let end = end.unwrap_or(now);

        let key = CacheKey::historical(symbol, start, end, interval);
        self.fetch_or_serve(Operation::Historical, key, async {
            let bars = self
                .provider
                .historical(symbol, start, end, interval)
                .await?;
            Ok::<_, ProviderError>(bars.into_iter().map(HistoricalBar::from).collect())
        })
        .await
    }

    async fn get_details(&self, symbol: &str) -> Result<AssetDetails> {
        let key = CacheKey::details(symbol);
        self.fetch_or_serve(
            Operation::Details,
            key,
            self.provider.quote_summary(symbol, &DETAIL_MODULES),
        )
        .await
    }

    async fn get_market_trends(&self) -> Result<Vec<TrendRecord>> {
        let indices: Vec<String> = MARKET_INDICES.iter().map(|s| s.to_string()).collect();
        self.fetch_or_serve(Operation::Trends, CacheKey::trends(), async {
            let quotes = self.provider.quotes(&indices).await?;
            Ok::<_, ProviderError>(quotes.into_iter().map(TrendRecord::from).collect())
        })
        .await
    }

    async fn get_full_info(&self, symbol: &str) -> Result<FullInfo> {
        let symbols = vec![symbol.to_string()];
        let (quotes, historical, details) = tokio::try_join!(
            self.get_quotes(&symbols),
            self.get_historical(symbol, None, None, DEFAULT_INTERVAL),
            self.get_details(symbol),
        )
        .map_err(|e| {
            error!("Failed to fetch full info for {}: {}", symbol, e);
            e.within(Operation::FullInfo)
        })?;

        Ok(FullInfo {
            symbol: symbol.to_string(),
            quote: quotes.into_iter().next(),
            historical,
            details,
        })
    }

    async fn get_regional_equities(&self) -> Result<Vec<SectorGroup>> {
        let symbols: Vec<String> = BRAZILIAN_ADRS
            .iter()
            .map(|listing| listing.symbol.to_string())
            .collect();
        let mut quotes: HashMap<String, QuoteRecord> = self
            .get_quotes(&symbols)
            .await?
            .into_iter()
            .map(|quote| (quote.symbol.clone(), quote))
            .collect();

        let mut groups: Vec<SectorGroup> = Vec::new();
        for listing in BRAZILIAN_ADRS.iter() {
            let equity = RegionalEquity {
                symbol: listing.symbol.to_string(),
                name: listing.name.to_string(),
                sector: listing.sector.to_string(),
                quote: quotes.remove(listing.symbol),
            };
            match groups.iter_mut().find(|g| g.sector == listing.sector) {
                Some(group) => group.equities.push(equity),
                None => groups.push(SectorGroup {
                    sector: listing.sector.to_string(),
                    equities: vec![equity],
                }),
            }
        }

        Ok(groups)
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }
}
