use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

use crate::domain::store::StoreError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application error taxonomy.
///
/// Each variant maps to a stable machine-readable code and an HTTP status:
///
/// | Variant            | Code                  | Status |
/// |--------------------|-----------------------|--------|
/// | `Validation`       | `invalid_input`       | 400    |
/// | `InUse`            | `short_in_use`        | 403    |
/// | `NotFound`         | `not_found`           | 404    |
/// | `DisallowedDomain` | `disallowed_domain`   | 503    |
/// | `RateLimited`      | `rate_limit_exceeded` | 503    |
/// | `Storage`          | `storage_unavailable` | 500    |
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    DisallowedDomain { message: String, details: Value },
    RateLimited { message: String, reset_in_minutes: u64 },
    InUse { message: String, details: Value },
    NotFound { message: String, details: Value },
    Storage { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn disallowed_domain(message: impl Into<String>, details: Value) -> Self {
        Self::DisallowedDomain {
            message: message.into(),
            details,
        }
    }
    pub fn rate_limited(reset_in_minutes: u64) -> Self {
        Self::RateLimited {
            message: "Rate limit exceeded".to_string(),
            reset_in_minutes,
        }
    }
    pub fn in_use(message: impl Into<String>, details: Value) -> Self {
        Self::InUse {
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
    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message, .. }
            | Self::DisallowedDomain { message, .. }
            | Self::RateLimited { message, .. }
            | Self::InUse { message, .. }
            | Self::NotFound { message, .. }
            | Self::Storage { message, .. } => f.write_str(message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_input", message, details)
            }
            AppError::DisallowedDomain { message, details } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "disallowed_domain",
                message,
                details,
            ),
            AppError::RateLimited {
                message,
                reset_in_minutes,
            } => (
                StatusCode::SERVICE_UNAVAILABLE,
                "rate_limit_exceeded",
                message,
                json!({ "rate_limit_reset": reset_in_minutes }),
            ),
            AppError::InUse { message, details } => {
                (StatusCode::FORBIDDEN, "short_in_use", message, details)
            }
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Storage { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_unavailable",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::storage("Unable to reach the store", json!({ "cause": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Request validation failed",
            serde_json::to_value(&e).unwrap_or_default(),
        )
    }
}
