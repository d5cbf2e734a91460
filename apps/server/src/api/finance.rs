use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use finproxy_core::constants::{DEFAULT_INTERVAL, DEFAULT_PERIOD};
use finproxy_core::finance::{
    period_to_range, AssetDetails, FullInfo, HistoricalBar, QuoteRecord, SectorGroup, TrendRecord,
};

#[derive(serde::Deserialize)]
struct HistoricalQuery {
    period: Option<String>,
    interval: Option<String>,
}

/// Comma-separated symbol list, empty segments dropped.
fn split_symbols(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

async fn get_quotes(
    Path(symbols): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<QuoteRecord>>> {
    let symbols = split_symbols(&symbols);
    let quotes = state.finance_service.get_quotes(&symbols).await?;
    Ok(Json(quotes))
}

async fn get_historical(
    Path(symbol): Path<String>,
    Query(query): Query<HistoricalQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HistoricalBar>>> {
    let period = query.period.as_deref().unwrap_or(DEFAULT_PERIOD);
    let interval = query.interval.as_deref().unwrap_or(DEFAULT_INTERVAL);
    let range = period_to_range(period, state.finance_service.now())?;
    let bars = state
        .finance_service
        .get_historical(&symbol, Some(range.start), Some(range.end), interval)
        .await?;
    Ok(Json(bars))
}

async fn get_details(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<AssetDetails>> {
    let details = state.finance_service.get_details(&symbol).await?;
    Ok(Json(details))
}

async fn get_trends(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TrendRecord>>> {
    let trends = state.finance_service.get_market_trends().await?;
    Ok(Json(trends))
}

async fn get_full_info(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<FullInfo>> {
    let info = state.finance_service.get_full_info(&symbol).await?;
    Ok(Json(info))
}

async fn get_petrobras(State(state): State<Arc<AppState>>) -> ApiResult<Json<FullInfo>> {
    Ok(Json(state.finance_service.get_primary_oil().await?))
}

async fn get_minerio(State(state): State<Arc<AppState>>) -> ApiResult<Json<FullInfo>> {
    Ok(Json(state.finance_service.get_primary_mining().await?))
}

async fn get_vix(State(state): State<Arc<AppState>>) -> ApiResult<Json<FullInfo>> {
    Ok(Json(state.finance_service.get_volatility_index().await?))
}

async fn get_brazilian_adrs(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<SectorGroup>>> {
    let groups = state.finance_service.get_regional_equities().await?;
    Ok(Json(groups))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotes/{symbols}", get(get_quotes))
        .route("/historical/{symbol}", get(get_historical))
        .route("/details/{symbol}", get(get_details))
        .route("/trends", get(get_trends))
        .route("/full/{symbol}", get(get_full_info))
        .route("/petrobras", get(get_petrobras))
        .route("/minerio", get(get_minerio))
        .route("/vix", get(get_vix))
        .route("/adrs/brasil", get(get_brazilian_adrs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_symbols() {
        assert_eq!(split_symbols("PBR,VALE,^VIX"), vec!["PBR", "VALE", "^VIX"]);
        assert_eq!(split_symbols("PBR,,VALE "), vec!["PBR", "VALE"]);
        assert!(split_symbols("").is_empty());
    }
}
