//! Response cache
//!
//! Provides a process-local, TTL-based store keyed by [`CacheKey`]. Time is
//! read through a [`Clock`] so tests can move it explicitly.

pub mod clock;
pub mod key;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::CacheKey;
pub use store::{CacheConfig, CacheStore};
