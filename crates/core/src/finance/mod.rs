//! Finance data module.
//!
//! - [`model`] - Normalized records returned to callers
//! - [`period`] - `period` query parsing into date ranges
//! - [`service`] - Fetch-or-serve orchestration over the cache and provider
//!
//! ```text
//! HTTP handler → FinanceService → CacheStore (hit) ─────────────┐
//!                      │                                       ▼
//!                      └─(miss)→ FinanceProvider → normalize → CacheStore → caller
//! ```

pub mod model;
pub mod period;
pub mod service;


pub use model::{
    AssetDetails, FullInfo, HistoricalBar, QuoteRecord, RegionalEquity, SectorGroup, TrendRecord,
};
pub use period::{period_to_days, period_to_range, DateRange};
pub use service::{CachedPayload, FinanceService, FinanceServiceConfig, FinanceServiceTrait};
