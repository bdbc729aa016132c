//! HTTP error taxonomy and response rendering.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Errors surfaced by handlers, rendered as a structured JSON body.
///
/// Every response carries `code`, `message`, `details`, a fresh `trace_id`,
/// and a `timestamp`, so client reports can be correlated with server logs.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        details: Vec<Value>,
    },

    #[error("conflict: {message}")]
    Conflict {
        message: String,
        details: Vec<Value>,
    },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn validation(details: Vec<Value>, message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(details: Vec<Value>, message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Conflict { .. } => "conflict",
            Self::NotFound { .. } => "not_found",
            Self::BadRequest { .. } => "bad_request",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let trace_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc().to_string();

        tracing::error!(
            trace_id = %trace_id,
            code,
            status = status.as_u16(),
            "request failed"
        );

        let (message, details) = match self {
            Self::Validation { message, details } | Self::Conflict { message, details } => {
                (message, details)
            }
            Self::NotFound { message } | Self::BadRequest { message } => (message, Vec::new()),
            Self::Internal(source) => {
                // Release builds keep internal causes out of the body.
                let message = if cfg!(debug_assertions) {
                    source.to_string()
                } else {
                    "an internal server error occurred".to_string()
                };
                (message, Vec::new())
            }
        };

        let body = json!({
            "error": {
                "code": code,
                "message": message,
                "details": details,
                "trace_id": trace_id.to_string(),
                "timestamp": timestamp,
            }
        });

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_variant() {
        assert_eq!(
            AppError::conflict(vec![], "dup").status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::not_found("gone").status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::bad_request("nope").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::validation(vec![], "bad").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn conflict_keeps_its_details() {
        let details = vec![json!({"field": "id", "value": 1})];
        match AppError::conflict(details.clone(), "already shelved") {
            AppError::Conflict {
                message,
                details: carried,
            } => {
                assert_eq!(message, "already shelved");
                assert_eq!(carried, details);
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn responses_render_with_the_mapped_status() {
        let response = AppError::not_found("no such book").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = AppError::conflict(vec![], "already shelved").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::Internal(anyhow::anyhow!("provider down")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
