//! # leafscan
//!
//! Leaf disease classification core: a Burn-based CNN classifier with the
//! preprocessing, class table, and disease metadata lookup needed to serve
//! predictions over HTTP.
//!
//! ## Modules
//!
//! - `classes`: the 38-class table, index-aligned with the model output
//! - `preprocess`: uploaded bytes -> `[1, 3, 224, 224]` batch in [0, 1]
//! - `model`: transfer-learning classifier architecture (Burn)
//! - `inference`: `Predictor` wrapping a loaded model
//! - `health`: four-tier health status derived from label + confidence
//! - `database`: static class-label -> disease metadata lookup
//!
//! The HTTP service lives in the `leafscan-server` crate; the offline model
//! builder is the `create_model` binary.

pub mod backend;
pub mod classes;
pub mod database;
pub mod error;
pub mod health;
pub mod inference;
pub mod model;
pub mod preprocess;

// Re-export commonly used items for convenience
pub use classes::{class_name, class_index, CLASS_NAMES, NUM_CLASSES};
pub use database::{DiseaseDatabase, DiseaseRecord};
pub use error::{LeafScanError, Result};
pub use health::{calculate_health_status, HealthStatus};
pub use inference::{Prediction, Predictor};
pub use model::{LeafClassifier, LeafClassifierConfig};
pub use preprocess::IMAGE_SIZE;

/// Default path of the serialized model (Burn appends `.mpk`)
pub const DEFAULT_MODEL_PATH: &str = "model/leaf_disease_model";

/// Default path of the disease lookup table
pub const DEFAULT_DATABASE_PATH: &str = "diseases.json";

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
