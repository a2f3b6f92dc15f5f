//! HTTP error mapping
//!
//! Every non-2xx response carries a JSON body of `{"error": "<message>"}`,
//! which is exactly what the dashboard extracts and displays.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use sharkmail_core::error::{CoreError, ProviderError};

/// API-level error: a status code plus the user-facing message.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    #[must_use]
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.status, self.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(json!({ "error": self.message }))
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        if e.is_expected() {
            tracing::warn!("{e}");
        } else {
            tracing::error!("{e}");
        }

        let status = match &e {
            CoreError::DomainNotFound(_) => StatusCode::NOT_FOUND,
            CoreError::DomainExists(_) => StatusCode::CONFLICT,
            CoreError::ValidationError(_) | CoreError::PreconditionFailed(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            // Upstream failures are surfaced verbatim; the user retries by
            // re-triggering the action
            CoreError::Provider(provider_error) => match provider_error {
                ProviderError::DomainNotFound { .. } => StatusCode::NOT_FOUND,
                ProviderError::InvalidParameter { .. } => StatusCode::UNPROCESSABLE_ENTITY,
                _ => StatusCode::BAD_GATEWAY,
            },
            CoreError::SerializationError(_) | CoreError::StorageError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self::new(status, e.to_string())
    }
}

/// Result alias for handler functions.
pub type ApiResult<T> = Result<T, ApiError>;
