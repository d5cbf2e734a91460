use std::sync::Arc;

use crate::config::Config;
use finproxy_core::finance::{FinanceService, FinanceServiceTrait};
use finproxy_market_data::{FinanceProvider, YahooProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub finance_service: Arc<dyn FinanceServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let provider = Arc::new(YahooProvider::new().await?);
    tracing::info!(
        "Cache TTL {} ms, provider timeout {} ms",
        config.cache_ttl.as_millis(),
        config.provider_timeout.as_millis()
    );
    Ok(build_state_with_provider(config, provider))
}

/// Wire the finance service over an arbitrary provider.
pub fn build_state_with_provider(
    config: &Config,
    provider: Arc<dyn FinanceProvider>,
) -> Arc<AppState> {
    let finance_service = Arc::new(FinanceService::new(provider, config.finance_config()));
    Arc::new(AppState { finance_service })
}
