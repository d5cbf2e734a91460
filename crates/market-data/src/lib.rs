//! Finproxy Market Data Crate
//!
//! This crate is the provider adapter of the finproxy service. It performs the
//! outbound calls to the upstream financial data service and hands back the
//! raw records that the core crate normalizes and caches.
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  FinanceService  | --> | FinanceProvider  |  (trait, mockable)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |  YahooProvider   |  (v7 quote, chart, quoteSummary)
//!                          +------------------+
//!                                  |
//!                                  v
//!                     +--------------------------+
//!                     | RawQuote / RawBar / JSON |  (provider-shaped data)
//!                     +--------------------------+
//! ```
//!
//! # Core Types
//!
//! - [`FinanceProvider`] - Async trait every upstream adapter implements
//! - [`RawQuote`] - A quote record as returned by the provider
//! - [`RawBar`] - One historical OHLCV bar as returned by the provider
//! - [`ProviderError`] - Failures raised by the adapter

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::ProviderError;
pub use models::{RawBar, RawQuote};
pub use provider::yahoo::YahooProvider;
pub use provider::FinanceProvider;
