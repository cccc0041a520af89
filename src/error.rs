//! Error Handling Module
//!
//! Defines custom error types for the leafscan library.
//! Uses thiserror for ergonomic error definitions.

use thiserror::Error;

/// Main error type for leafscan operations
#[derive(Error, Debug)]
pub enum LeafScanError {
    /// Uploaded or on-disk bytes could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    /// Error with model operations (construction, serialization, loading)
    #[error("Model error: {0}")]
    Model(String),

    /// Error during inference
    #[error("Inference error: {0}")]
    Inference(String),

    /// Error loading or querying the disease database
    #[error("Disease database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience Result type for leafscan operations
pub type Result<T> = std::result::Result<T, LeafScanError>;
