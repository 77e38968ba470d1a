use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

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

/// Body returned on a failed password submission.
///
/// `requires_password` stays `true` so the client keeps showing the
/// password form instead of treating the failure as terminal.
#[derive(Serialize)]
struct UnauthorizedBody {
    success: bool,
    error: String,
    #[serde(rename = "requiresPassword")]
    requires_password: bool,
}

/// Application error taxonomy surfaced to visitors.
///
/// Unknown codes, self-references and detected cycles all map to `NotFound`
/// so the response never leaks link-graph structure. Stored-data corruption
/// maps to `Internal` and is logged for operators, never attributed to the
/// visitor.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    /// Record exists but its expiry has passed; cleanup runs in background.
    Gone { message: String, details: Value },
    /// Password submitted and rejected. An expected outcome, not a fault.
    Unauthorized { message: String },
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
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message, .. } => write!(f, "Validation error: {}", message),
            Self::NotFound { message, .. } => write!(f, "Not found: {}", message),
            Self::Gone { message, .. } => write!(f, "Gone: {}", message),
            Self::Unauthorized { message } => write!(f, "Unauthorized: {}", message),
            Self::Internal { message, .. } => write!(f, "Internal error: {}", message),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Gone { message, details } => (StatusCode::GONE, "gone", message, details),
            AppError::Unauthorized { message } => {
                let body = UnauthorizedBody {
                    success: false,
                    error: message,
                    requires_password: true,
                };
                return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
            }
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
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

pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    tracing::error!("Database error: {}", e);
    AppError::internal("Database error", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = AppError::not_found("nope", json!({})).into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let gone = AppError::gone("expired", json!({})).into_response();
        assert_eq!(gone.status(), StatusCode::GONE);

        let unauthorized = AppError::unauthorized("Invalid password").into_response();
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let internal = AppError::internal("boom", json!({})).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
