//! Error types for the web application.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pagecrop_core::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("no active session")]
    SessionNotFound,

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("processing error: {0}")]
    Core(#[from] CoreError),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::SessionNotFound => (StatusCode::NOT_FOUND, "No active session".to_string()),
            AppError::FileNotFound(name) => {
                (StatusCode::NOT_FOUND, format!("File not found: {name}"))
            }
            AppError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Core(e) => {
                tracing::error!("Processing error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Processing error".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
