//! Error types for the sheet server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Server error types
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Render failed: {0}")]
    Render(String),

    #[error("Render timeout after {0}ms")]
    Timeout(u64),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    success: bool,
    error: String,
    code: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ServerError::Render(msg) => (StatusCode::BAD_REQUEST, "RENDER_ERROR", msg.clone()),
            ServerError::Timeout(ms) => (
                StatusCode::REQUEST_TIMEOUT,
                "TIMEOUT",
                format!("Render timeout after {}ms", ms),
            ),
            ServerError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sheet_engine::EngineError> for ServerError {
    fn from(err: sheet_engine::EngineError) -> Self {
        use sheet_engine::EngineError;
        match err {
            EngineError::Timeout(ms) => ServerError::Timeout(ms),
            // The layout engine's own message, verbatim.
            compile @ EngineError::Compile(_) => ServerError::Render(compile.to_string()),
            other => ServerError::Internal(other.to_string()),
        }
    }
}
