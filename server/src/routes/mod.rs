//! HTTP route handlers

pub mod health;
pub mod home;
pub mod predict;

use crate::error::ApiError;

/// Fallback handler for unknown routes
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
