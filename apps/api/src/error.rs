//! # API Error Handling
//!
//! Maps domain and database errors onto HTTP responses.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │   ValidationError / DbError                                 │
//! │        │                                                    │
//! │        ▼ From<...>                                          │
//! │   ApiError { code, message }                                │
//! │        │                                                    │
//! │        ▼ IntoResponse                                       │
//! │   (StatusCode, Json<Envelope>)                              │
//! │                                                             │
//! │   NotFound           → 404                                  │
//! │   ValidationError    → 400                                  │
//! │   Unauthorized       → 401                                  │
//! │   InsufficientStock  → 409                                  │
//! │   Conflict           → 409                                  │
//! │   DatabaseError      → 500                                  │
//! │   Internal           → 500                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use bookery_core::ValidationError;
use bookery_db::DbError;

use crate::envelope::Envelope;

/// Stable error codes clients can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    Unauthorized,
    InsufficientStock,
    Conflict,
    DatabaseError,
    Internal,
}

impl ErrorCode {
    fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::InsufficientStock | ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::DatabaseError | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// API error with a machine-readable code and a human-readable message.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let code = match &err {
            DbError::NotFound { .. } => ErrorCode::NotFound,
            DbError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            DbError::InvalidQuantity { .. } => ErrorCode::ValidationError,
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ErrorCode::Conflict
            }
            _ => ErrorCode::DatabaseError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();
        // 5xx detail stays in the logs, not the response body
        let message = if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "Request failed");
            "Internal server error".to_string()
        } else {
            self.message
        };

        (status, Json(Envelope::<()>::error(message))).into_response()
    }
}

/// Result alias for handler functions.
pub type ApiResult<T> = Result<T, ApiError>;
