//! Leafscan inference server
//!
//! HTTP API for leaf disease classification. Serves an upload page, a
//! prediction endpoint, and a health check against a model and disease
//! database loaded once at startup.

pub mod error;
pub mod routes;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::SharedState;

/// Maximum accepted upload size (10 MB), enforced at the transport boundary
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Build the application router
pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::home::index))
        .route("/predict", post(routes::predict::predict))
        .route("/health", get(routes::health::health_check))
        .fallback(routes::not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
