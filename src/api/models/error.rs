// API Error Models

use crate::api::models::response::Envelope;
use crate::error::DeadlineError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// API Error Types
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream failure: {0}")]
    BadGateway(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Convert to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::BadGateway(_) => "BAD_GATEWAY",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DeadlineError> for ApiError {
    fn from(err: DeadlineError) -> Self {
        let message = err.to_string();

        match err {
            DeadlineError::InvalidInput { .. } => ApiError::BadRequest(message),
            DeadlineError::HostNotFound { .. } => ApiError::NotFound(message),
            DeadlineError::HostAlreadyRegistered { .. } => ApiError::Conflict(message),
            DeadlineError::Connect { .. }
            | DeadlineError::TlsHandshake { .. }
            | DeadlineError::NoCertificate { .. }
            | DeadlineError::CertificateParse { .. }
            | DeadlineError::Delivery(_)
            | DeadlineError::BatchFailed { .. } => ApiError::BadGateway(message),
            DeadlineError::RegistryRead(_)
            | DeadlineError::RegistryWrite(_)
            | DeadlineError::Configuration { .. }
            | DeadlineError::Io { .. }
            | DeadlineError::Serialization(_) => ApiError::Internal(message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{} ({})", self, self.error_code());
        } else {
            tracing::debug!("{} ({})", self, self.error_code());
        }

        (status, Json(Envelope::<()>::failure(self.to_string()))).into_response()
    }
}
