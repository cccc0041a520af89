//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;

use leafscan::NUM_CLASSES;

use crate::state::SharedState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub disease_database_loaded: bool,
    pub total_classes: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.model_loaded(),
        disease_database_loaded: !state.diseases.is_empty(),
        total_classes: NUM_CLASSES,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
