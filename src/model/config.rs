//! Model configuration

use burn::config::Config;

use crate::classes::NUM_CLASSES;

/// Configuration for the LeafClassifier model
///
/// Defaults describe the serialized production model: 224x224 RGB input,
/// a convolutional feature extractor, and a two-block dense head ending in
/// a 38-way output layer.
#[derive(Config, Debug)]
pub struct LeafClassifierConfig {
    /// Number of output classes
    #[config(default = "38")]
    pub num_classes: usize,

    /// Input image size (assumes square images)
    #[config(default = "224")]
    pub input_size: usize,

    /// Number of input channels (3 for RGB)
    #[config(default = "3")]
    pub in_channels: usize,

    /// Base number of convolutional filters in the feature extractor
    #[config(default = "32")]
    pub base_filters: usize,

    /// Dropout rate after the first dense block
    #[config(default = "0.5")]
    pub head_dropout: f64,

    /// Dropout rate after the second dense block
    #[config(default = "0.3")]
    pub classifier_dropout: f64,
}

impl LeafClassifierConfig {
    /// Validate the configuration against the fixed class table.
    ///
    /// The class table is index-aligned with the output layer, so a width
    /// mismatch is a configuration error, never a per-request one.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.num_classes != NUM_CLASSES {
            return Err(crate::error::LeafScanError::Config(format!(
                "Model output width {} does not match the {} known classes",
                self.num_classes, NUM_CLASSES
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LeafClassifierConfig::new();
        assert_eq!(config.num_classes, 38);
        assert_eq!(config.input_size, 224);
        assert_eq!(config.in_channels, 3);
        assert!((config.head_dropout - 0.5).abs() < f64::EPSILON);
        assert!((config.classifier_dropout - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(LeafClassifierConfig::new().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_width_mismatch() {
        let config = LeafClassifierConfig::new().with_num_classes(10);
        assert!(config.validate().is_err());
    }
}
