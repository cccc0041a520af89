//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use leafscan::LeafScanError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("File too large")]
    PayloadTooLarge,

    #[error("Endpoint not found")]
    NotFound,

    #[error("Model not loaded")]
    ModelUnavailable,

    #[error("Error processing image")]
    ImageProcessing,

    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<LeafScanError> for ApiError {
    fn from(err: LeafScanError) -> Self {
        match err {
            LeafScanError::ImageDecode(_) => ApiError::ImageProcessing,
            other => ApiError::Prediction(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "File too large. Maximum size is 10MB".to_string(),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Endpoint not found".to_string()),
            ApiError::ModelUnavailable => {
                tracing::error!("Prediction requested but no model is loaded");
                (StatusCode::INTERNAL_SERVER_ERROR, "Model not loaded".to_string())
            }
            ApiError::ImageProcessing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing image".to_string(),
            ),
            ApiError::Prediction(msg) => {
                tracing::error!(detail = %msg, "Prediction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Prediction failed: {}", msg),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!(detail = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
