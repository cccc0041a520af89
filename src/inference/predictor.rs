//! Inference predictor
//!
//! Wraps a loaded `LeafClassifier` as an opaque image -> probability-vector
//! function. The model is deserialized once at startup and reused read-only
//! for every request.

use std::path::Path;
use std::time::{Duration, Instant};

use burn::{module::Module, record::CompactRecorder, tensor::backend::Backend};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classes::{class_name, NUM_CLASSES};
use crate::error::{LeafScanError, Result};
use crate::model::{LeafClassifier, LeafClassifierConfig};
use crate::preprocess;

/// Result of a single prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted class index (argmax of the probability vector)
    pub predicted_idx: usize,

    /// Predicted class label
    pub predicted_class: String,

    /// Probability of the predicted class
    pub confidence: f32,

    /// Full probability distribution over all classes
    pub probabilities: Vec<f32>,

    /// Top-5 predictions with their probabilities
    pub top_k: Vec<(usize, String, f32)>,

    /// Inference time in milliseconds
    pub inference_time_ms: f64,
}

impl Prediction {
    fn new(probabilities: Vec<f32>, inference_time: Duration) -> Self {
        let (predicted_idx, &confidence) = probabilities
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap_or((0, &0.0));

        let predicted_class = class_name(predicted_idx).unwrap_or("Unknown").to_string();

        let mut indexed: Vec<(usize, f32)> = probabilities.iter().copied().enumerate().collect();
        indexed.sort_by(|a, b| b.1.total_cmp(&a.1));

        let top_k = indexed
            .iter()
            .take(5)
            .map(|&(idx, prob)| {
                let name = class_name(idx).unwrap_or("Unknown").to_string();
                (idx, name, prob)
            })
            .collect();

        Self {
            predicted_idx,
            predicted_class,
            confidence,
            probabilities,
            top_k,
            inference_time_ms: inference_time.as_secs_f64() * 1000.0,
        }
    }
}

/// Predictor holding a loaded model for repeated inference
pub struct Predictor<B: Backend> {
    model: LeafClassifier<B>,
    device: B::Device,
}

impl<B: Backend> Predictor<B> {
    /// Load a serialized model from disk.
    ///
    /// `path` is the record path without the `.mpk` extension Burn appends.
    pub fn load(path: &Path, device: &B::Device) -> Result<Self> {
        let config = LeafClassifierConfig::new();
        config.validate()?;

        let recorder = CompactRecorder::new();
        let model = LeafClassifier::new(&config, device)
            .load_file(path, &recorder, device)
            .map_err(|e| {
                LeafScanError::Model(format!("Failed to load model from {:?}: {:?}", path, e))
            })?;

        info!("Model loaded from {:?}", path);
        Self::from_model(model, device.clone())
    }

    /// Wrap an already constructed model.
    ///
    /// Validates the output-layer width against the fixed class table; a
    /// mismatch is a configuration error, not a per-request error.
    pub fn from_model(model: LeafClassifier<B>, device: B::Device) -> Result<Self> {
        if model.num_classes() != NUM_CLASSES {
            return Err(LeafScanError::Config(format!(
                "Model output width {} does not match the {} known classes",
                model.num_classes(),
                NUM_CLASSES
            )));
        }
        Ok(Self { model, device })
    }

    /// Predict on a decoded image
    pub fn predict_image(&self, image: &DynamicImage) -> Result<Prediction> {
        let batch = preprocess::to_batch::<B>(image, &self.device);

        let start = Instant::now();
        let output = self.model.forward_softmax(batch);
        let inference_time = start.elapsed();

        let probabilities: Vec<f32> = output
            .into_data()
            .to_vec()
            .map_err(|e| LeafScanError::Inference(format!("Failed to read output: {:?}", e)))?;

        if probabilities.len() != NUM_CLASSES {
            return Err(LeafScanError::Inference(format!(
                "Expected {} probabilities, got {}",
                NUM_CLASSES,
                probabilities.len()
            )));
        }

        Ok(Prediction::new(probabilities, inference_time))
    }

    /// Predict on raw image bytes (decode + preprocess + forward)
    pub fn predict_bytes(&self, bytes: &[u8]) -> Result<Prediction> {
        let image = preprocess::decode_image(bytes)?;
        self.predict_image(&image)
    }
}
