//! Finance provider abstraction and implementations.
//!
//! This module contains:
//! - The `FinanceProvider` trait the core service depends on
//! - The Yahoo Finance implementation used in production

mod traits;

pub mod yahoo;

pub use traits::FinanceProvider;
