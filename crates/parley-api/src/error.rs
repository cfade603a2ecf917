use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use parley::{ExchangeError, StoreError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    InvalidPayload(String),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "InvalidRequest",
            ApiError::InvalidPayload(_) => "InvalidPayload",
            ApiError::Store(_) => "InternalError",
        }
    }
}

impl From<ExchangeError> for ApiError {
    fn from(err: ExchangeError) -> Self {
        match err {
            ExchangeError::InvalidRequest(msg) => ApiError::InvalidRequest(msg),
            ExchangeError::InvalidPayload(msg) => ApiError::InvalidPayload(msg),
            ExchangeError::Store(e) => ApiError::Store(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(_) | ApiError::InvalidPayload(_) => {
                tracing::debug!(code = self.code(), "Rejected request: {}", self);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Store(ref e) => {
                tracing::error!("Storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
