//! Prediction endpoint
//!
//! POST /predict accepts a multipart upload (field "file"), runs the image
//! through the loaded classifier, and returns the predicted class joined
//! with its disease metadata and derived health status.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use leafscan::{calculate_health_status, HealthStatus};

use crate::error::{ApiError, Result};
use crate::state::SharedState;

/// Accepted upload file extensions
const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Response body for a successful prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    pub predicted_class: String,
    pub confidence: f32,
    pub disease_name: String,
    pub description: String,
    pub health_status: HealthStatus,
    pub causes: Vec<String>,
    pub prevention: Vec<String>,
    pub treatment: Vec<String>,
}

/// POST /predict - classify an uploaded leaf image
pub async fn predict(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>> {
    let predictor = state.predictor.as_ref().ok_or(ApiError::ModelUnavailable)?;

    // Find the "file" field in the multipart form
    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(map_multipart_error)? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(map_multipart_error)?;
            upload = Some((filename, data));
            break;
        }
    }

    let (filename, data) =
        upload.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    if filename.is_empty() {
        return Err(ApiError::BadRequest("Empty filename".to_string()));
    }

    if !extension_allowed(&filename) {
        return Err(ApiError::BadRequest(
            "Invalid file type. Use JPG, PNG, or GIF".to_string(),
        ));
    }

    info!("Processing image: {}", filename);

    let prediction = predictor.predict_bytes(&data)?;
    info!(
        "Prediction: {} ({:.2}%) in {:.2} ms",
        prediction.predicted_class,
        prediction.confidence * 100.0,
        prediction.inference_time_ms
    );

    let disease = state.diseases.lookup(&prediction.predicted_class);
    let health_status =
        calculate_health_status(&prediction.predicted_class, prediction.confidence);

    Ok(Json(PredictResponse {
        success: true,
        predicted_class: prediction.predicted_class,
        confidence: prediction.confidence,
        disease_name: disease.disease_name,
        description: disease.description,
        health_status,
        causes: disease.causes,
        prevention: disease.prevention,
        treatment: disease.treatment,
    }))
}

/// Check the upload's file extension against the allow-list
fn extension_allowed(filename: &str) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.iter().any(|&allowed| allowed == ext)
        }
        None => false,
    }
}

/// Map multipart read errors; the transport body limit surfaces here as 413
fn map_multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge
    } else {
        ApiError::BadRequest(format!("Malformed upload: {}", err.body_text()))
    }
}
