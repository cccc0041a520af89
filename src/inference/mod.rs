//! Inference module for model prediction
//!
//! Loads a serialized classifier once and answers single-image predictions
//! against it. The loaded model is read-only and safe to share across
//! concurrently handled requests.

pub mod predictor;

pub use predictor::{Prediction, Predictor};
