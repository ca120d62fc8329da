use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::controller::{RefreshError, REFRESH_FAILED_MESSAGE};

/// API error types that can be returned from handlers
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream failure: {0}")]
    UpstreamFailure(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Error response that gets serialized to JSON
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::UpstreamFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::Conflict(_) => "Conflict",
            ApiError::UpstreamFailure(_) => "UpstreamFailure",
            ApiError::InternalError(_) => "InternalError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_type = self.error_type();

        // Causes are logged; clients only get the generic text.
        let message = match &self {
            ApiError::UpstreamFailure(_) => {
                tracing::warn!(error = %self, "upstream model failure");
                REFRESH_FAILED_MESSAGE.to_string()
            }
            ApiError::InternalError(_) => {
                tracing::error!(error = %self, "internal error");
                REFRESH_FAILED_MESSAGE.to_string()
            }
            ApiError::Conflict(msg) => {
                tracing::debug!(error = %self, "client conflict");
                msg.clone()
            }
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<RefreshError> for ApiError {
    fn from(error: RefreshError) -> Self {
        match error {
            RefreshError::Superseded => {
                ApiError::Conflict("refresh superseded by a newer request".to_string())
            }
            RefreshError::Insight(e) => ApiError::UpstreamFailure(e.to_string()),
            RefreshError::Task(e) => ApiError::InternalError(e.to_string()),
        }
    }
}
