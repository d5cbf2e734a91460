use std::{sync::Arc, time::Duration};

use crate::{config::Config, error::ApiError, main_lib::AppState};
use axum::{
    extract::{Request, State},
    http::HeaderValue,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

mod finance;
mod health;

/// Service banner with the available endpoints.
async fn index() -> Json<Value> {
    Json(json!({
        "message": "Financial market data API",
        "endpoints": {
            "quotes": "/api/finance/quotes/{symbols}",
            "historical": "/api/finance/historical/{symbol}?period=30d&interval=1d",
            "details": "/api/finance/details/{symbol}",
            "trends": "/api/finance/trends",
            "full": "/api/finance/full/{symbol}",
            "petrobras": "/api/finance/petrobras",
            "minerio": "/api/finance/minerio",
            "vix": "/api/finance/vix",
            "adrs": "/api/finance/adrs/brasil",
            "health": "/api/healthz",
        }
    }))
}

/// Caps the time spent on one request; overruns get the error envelope.
async fn request_timeout(
    State(timeout): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(timeout, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError::RequestTimeout {
            timeout_ms: timeout.as_millis() as u64,
        }
        .into_response(),
    }
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .merge(health::router())
        .nest("/finance", finance::router());

    Router::new()
        .route("/", get(index))
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(middleware::from_fn_with_state(
            config.request_timeout,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
