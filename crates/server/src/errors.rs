use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use thiserror::Error;
use tracing::error;

use crate::metrics::STORAGE_FLUSH_FAILURES;

/// Error returned by every handler.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("storage unavailable")]
    StorageUnavailable,
    #[error("internal error")]
    Internal,
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::BadRequest(msg),
            ServiceError::Model(e) => ApiError::BadRequest(e.to_string()),
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Storage(e) => {
                STORAGE_FLUSH_FAILURES.inc();
                error!(error = %e, "storage unavailable");
                ApiError::StorageUnavailable
            }
            ServiceError::Hash(msg) => {
                error!(error = %msg, "password hashing failed");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => return StatusCode::NOT_FOUND.into_response(),
            ApiError::StorageUnavailable => (StatusCode::SERVICE_UNAVAILABLE, "Storage unavailable".to_string()),
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string()),
        };
        (status, Json(serde_json::json!({"error": msg}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage failed to open: {0}")]
    Storage(#[from] service::storage::StorageError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
