//! Application state for the leafscan server
//!
//! The model and disease lookup table are populated once at startup and
//! never mutated afterwards, so the whole state is shared read-only across
//! concurrently handled requests.

use std::sync::Arc;
use std::time::Instant;

use leafscan::backend::DefaultBackend;
use leafscan::{DiseaseDatabase, Predictor};

/// Shared application state
pub struct AppState {
    /// Loaded model, if loading succeeded at startup
    pub predictor: Option<Predictor<DefaultBackend>>,
    /// Disease metadata lookup table (possibly empty on load failure)
    pub diseases: DiseaseDatabase,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    pub fn new(predictor: Option<Predictor<DefaultBackend>>, diseases: DiseaseDatabase) -> Self {
        Self {
            predictor,
            diseases,
            started_at: Instant::now(),
        }
    }

    /// Whether the model was loaded successfully
    pub fn model_loaded(&self) -> bool {
        self.predictor.is_some()
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
