use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finproxy_core::errors::FinanceError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Finance(#[from] FinanceError),
    #[error("Request timed out after {timeout_ms} ms")]
    RequestTimeout { timeout_ms: u64 },
}

#[derive(Serialize)]
struct ErrorBody {
    error: bool,
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self {
            ApiError::Finance(e) => e.code(),
            ApiError::RequestTimeout { .. } => "REQUEST_TIMEOUT",
        };
        tracing::error!(code, "{}", self);

        // Every failure is reported as a server error, including bad periods
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = Json(ErrorBody {
            error: true,
            code,
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
