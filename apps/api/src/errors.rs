use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::inference::classifier::ClassifierError;

/// Request-boundary error type.
/// Every variant renders as HTTP 500 with `{"error": "<message>"}`; bad input
/// and internal faults share one shape.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Model not loaded")]
    ModelNotLoaded,

    #[error("Model results not available")]
    MetricsUnavailable,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Classifier(#[from] ClassifierError),

    #[error("{0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::ModelNotLoaded | AppError::MetricsUnavailable => {
                tracing::warn!("Request rejected: {self}");
            }
            AppError::InvalidRequest(msg) => tracing::error!("Invalid request: {msg}"),
            AppError::Classifier(e) => tracing::error!("Classifier error: {e}"),
            AppError::Internal(e) => tracing::error!("Internal error: {e:?}"),
        }

        let body = Json(json!({ "error": self.to_string() }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
