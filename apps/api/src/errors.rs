use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The taxonomy mirrors the pipeline's propagation policy: quality-degrading
/// failures (model output, job lookups) are absorbed upstream and never reach
/// this type; only durability and input-validity failures surface here.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown stage: {0}")]
    InvalidStage(String),

    #[error("Extraction error: {0}")]
    Extraction(String),

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidStage(stage) => (
                StatusCode::BAD_REQUEST,
                "INVALID_STAGE",
                format!("'{stage}' is not a known pipeline stage"),
            ),
            AppError::Extraction(msg) => {
                tracing::warn!("Resume extraction failed: {msg}");
                (
                    StatusCode::BAD_REQUEST,
                    "EXTRACTION_FAILED",
                    "Could not read the uploaded file".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Record store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PERSISTENCE_ERROR",
                    "Could not update this record".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
