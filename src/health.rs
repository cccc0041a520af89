//! Health status classification
//!
//! Derives a four-valued health tier from the predicted class label and the
//! model's confidence. The thresholds are inclusive lower bounds and feed
//! directly into downstream UI language, so they must not be retuned without
//! a matching UI change.

use serde::{Deserialize, Serialize};

/// Health tier derived from a prediction
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HealthStatus {
    #[serde(rename = "Healthy")]
    Healthy,
    #[serde(rename = "Mild Disease")]
    MildDisease,
    #[serde(rename = "Critical")]
    Critical,
    #[serde(rename = "Needs Further Analysis")]
    NeedsFurtherAnalysis,
}

impl HealthStatus {
    /// The exact display string for this tier
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::MildDisease => "Mild Disease",
            HealthStatus::Critical => "Critical",
            HealthStatus::NeedsFurtherAnalysis => "Needs Further Analysis",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Determine the health status for a predicted class and confidence.
///
/// A label containing "healthy" (case-insensitive) is Healthy at
/// confidence >= 0.85, otherwise Mild Disease. A disease label is Critical
/// at confidence >= 0.75, Mild Disease at >= 0.50, and Needs Further
/// Analysis below that.
pub fn calculate_health_status(predicted_class: &str, confidence: f32) -> HealthStatus {
    if predicted_class.to_lowercase().contains("healthy") {
        if confidence >= 0.85 {
            HealthStatus::Healthy
        } else {
            HealthStatus::MildDisease
        }
    } else if confidence >= 0.75 {
        HealthStatus::Critical
    } else if confidence >= 0.50 {
        HealthStatus::MildDisease
    } else {
        HealthStatus::NeedsFurtherAnalysis
    }
}
