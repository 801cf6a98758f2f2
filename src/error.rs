//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the request path returns [`AppError`]. Handlers
//! propagate it with `?` and axum renders it through [`IntoResponse`]:
//!
//! | Variant      | Status | `code`             |
//! |--------------|--------|--------------------|
//! | `Validation` | 400    | `validation_error` |
//! | `NotFound`   | 404    | `not_found`        |
//! | `Conflict`   | 409    | `conflict`         |
//! | `Internal`   | 500    | `internal_error`   |
//!
//! Internal errors are logged server-side and rendered with a generic message
//! and empty details so storage internals never reach the client.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Message returned to clients for every internal failure.
const INTERNAL_MESSAGE: &str = "Internal server error";

/// Error envelope written to the response body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed input. Rejected before any storage access.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown short identifier.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Uniqueness clash reported by storage.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Storage failure or any other unexpected condition.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error renders with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing description of the error.
    ///
    /// Internal errors are reduced to a generic message.
    pub fn to_error_info(&self) -> ErrorInfo {
        match self {
            AppError::Validation { message, details } => ErrorInfo {
                code: "validation_error",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::NotFound { message, details } => ErrorInfo {
                code: "not_found",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Conflict { message, details } => ErrorInfo {
                code: "conflict",
                message: message.clone(),
                details: details.clone(),
            },
            AppError::Internal { .. } => ErrorInfo {
                code: "internal_error",
                message: INTERNAL_MESSAGE.to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal { message, details } = &self {
            tracing::error!(%details, "{}", message);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Request validation failed", details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(
            "Invalid query string",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

/// Maps a SQLx error onto the application taxonomy.
///
/// Unique violations become [`AppError::Conflict`] (the shortening service
/// retries on them), foreign-key violations become [`AppError::Validation`],
/// everything else is [`AppError::Internal`].
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.is_unique_violation() {
            return AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        if db.is_foreign_key_violation() {
            return AppError::bad_request(
                "Referenced record does not exist",
                json!({ "constraint": db.constraint() }),
            );
        }
    }

    AppError::internal("Database error", json!({ "reason": e.to_string() }))
}
