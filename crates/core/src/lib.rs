//! Finproxy Core - cache store and fetch-or-serve orchestration.
//!
//! This crate sits between the HTTP surface and the provider adapter. It owns
//! the time-based response cache and the [`finance::FinanceService`] that
//! decides, per operation, whether to answer from cache or go upstream.

pub mod cache;
pub mod constants;
pub mod errors;
pub mod finance;

// Re-export error types
pub use errors::FinanceError;
pub use errors::Result;
