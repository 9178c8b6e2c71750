//! API Errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use date_validator::ValidationError;
use serde::Serialize;
use storage::StorageError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors a route handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    /// Rejected path parameter
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Dataset query failed
    #[error("Internal server error")]
    Storage(#[from] StorageError),
}

impl ApiError {
    /// Get HTTP status code for this error.
    ///
    /// Invalid input answers 404 rather than 400 for compatibility with
    /// existing clients of this API.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(e) => warn!("Rejected request: {}", e),
            ApiError::Storage(e) => error!("Query failed: {}", e),
        }

        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Fatal errors while bringing the service up
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid log level `{0}`")]
    LogLevel(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("Lookback of {lookback_days} days from {reference_date} is not a representable date")]
    Cutoff {
        reference_date: date_validator::IsoDate,
        lookback_days: u32,
    },

    #[error("Invalid rate limit: period {per_second}s, burst {burst_size}")]
    RateLimit { per_second: u64, burst_size: u32 },

    #[error("Failed to open dataset: {0}")]
    Storage(#[from] StorageError),

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = ApiError::from(ValidationError::InvalidFormat {
            input: "2017-13-40".to_string(),
        });
        assert_eq!(invalid.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(invalid.to_string(), "Date format should be YYYY-MM-DD");

        let failed = ApiError::from(StorageError::EmptyDataset);
        assert_eq!(failed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failed.to_string(), "Internal server error");
    }
}
