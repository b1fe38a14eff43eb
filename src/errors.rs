//! Centralized error handling.
//!
//! Every failure a handler can produce is translated, at the point it
//! occurs, into exactly one of four classes. Each class carries the
//! underlying cause (logged, never serialized) and a public-safe message
//! (serialized as `{"message": ...}`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Underlying cause of a structured error, kept for logging only.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed input, validation failure, wrong credentials, failed self-access check
    #[error("{message}")]
    BadRequest {
        message: String,
        #[source]
        cause: Cause,
    },

    /// No matching resource
    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        cause: Cause,
    },

    /// Missing or insufficient authentication
    #[error("{message}")]
    Unauthorized {
        message: String,
        #[source]
        cause: Cause,
    },

    /// Store, verification or token-issuance failure
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        cause: Cause,
    },
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    message: &'a str,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        AppError::NotFound {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        AppError::Unauthorized {
            message: message.into(),
            cause: cause.into(),
        }
    }

    pub fn internal(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        AppError::Internal {
            message: message.into(),
            cause: cause.into(),
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Public-safe message sent to the client
    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest { message, .. }
            | AppError::NotFound { message, .. }
            | AppError::Unauthorized { message, .. }
            | AppError::Internal { message, .. } => message,
        }
    }

    /// Underlying cause, for logs
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        match self {
            AppError::BadRequest { cause, .. }
            | AppError::NotFound { cause, .. }
            | AppError::Unauthorized { cause, .. }
            | AppError::Internal { cause, .. } => cause.as_ref(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            AppError::Internal { .. } => tracing::error!(
                status = status.as_u16(),
                cause = %self.cause(),
                "{}",
                self.message()
            ),
            _ => tracing::debug!(
                status = status.as_u16(),
                cause = %self.cause(),
                "{}",
                self.message()
            ),
        }

        let body = ErrorResponse {
            message: self.message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;
