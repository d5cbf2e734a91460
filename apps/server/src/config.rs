use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use finproxy_core::cache::CacheConfig;
use finproxy_core::constants::{DEFAULT_CACHE_TTL_MS, DEFAULT_PROVIDER_TIMEOUT_MS};
use finproxy_core::finance::FinanceServiceConfig;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_max_entries: Option<usize>,
    pub normalize_symbol_keys: bool,
    pub provider_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors_allow: vec!["*".to_string()],
            request_timeout: Duration::from_millis(30_000),
            cache_ttl: Duration::from_millis(DEFAULT_CACHE_TTL_MS),
            cache_max_entries: None,
            normalize_symbol_keys: false,
            provider_timeout: Duration::from_millis(DEFAULT_PROVIDER_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let port: u16 = env_or("PORT", 3000)?;
        let cors_allow = std::env::var("FP_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout_ms: u64 = env_or("FP_REQUEST_TIMEOUT_MS", 30_000)?;
        let cache_ttl = cache_ttl(env_or("FP_CACHE_TTL_MS", DEFAULT_CACHE_TTL_MS)?)?;
        let cache_max_entries = match std::env::var("FP_CACHE_MAX_ENTRIES") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<usize>()
                    .with_context(|| format!("Invalid FP_CACHE_MAX_ENTRIES: {}", raw))?,
            ),
            _ => defaults.cache_max_entries,
        };
        let normalize_symbol_keys = env_or("FP_NORMALIZE_SYMBOL_KEYS", false)?;
        let provider_timeout_ms: u64 =
            env_or("FP_PROVIDER_TIMEOUT_MS", DEFAULT_PROVIDER_TIMEOUT_MS)?;

        Ok(Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            cors_allow,
            request_timeout: Duration::from_millis(request_timeout_ms),
            cache_ttl,
            cache_max_entries,
            normalize_symbol_keys,
            provider_timeout: Duration::from_millis(provider_timeout_ms),
        })
    }

    /// Settings handed to the finance service.
    pub fn finance_config(&self) -> FinanceServiceConfig {
        FinanceServiceConfig {
            cache: CacheConfig {
                ttl: self.cache_ttl,
                max_entries: self.cache_max_entries,
            },
            provider_timeout: self.provider_timeout,
            normalize_symbol_keys: self.normalize_symbol_keys,
        }
    }
}

/// Cache TTL from milliseconds, limited to what a signed millisecond count holds.
fn cache_ttl(ms: u64) -> anyhow::Result<Duration> {
    i64::try_from(ms)
        .map(|_| Duration::from_millis(ms))
        .with_context(|| format!("FP_CACHE_TTL_MS out of range: {}", ms))
}

fn env_or<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", name, raw)),
        _ => Ok(default),
    }
}
