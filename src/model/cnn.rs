//! CNN architecture for leaf disease classification
//!
//! A transfer-learning style classifier built with the Burn framework: a
//! convolutional feature extractor (no classification top) with a dense
//! head stacked on top. The head is the only part intended to be trained;
//! the extractor is initialized from pretrained weights by the model
//! builder and treated as frozen.

use burn::{
    module::Module,
    nn::{
        conv::{Conv2d, Conv2dConfig},
        pool::{AdaptiveAvgPool2d, AdaptiveAvgPool2dConfig, MaxPool2d, MaxPool2dConfig},
        BatchNorm, BatchNormConfig, Dropout, DropoutConfig, Linear, LinearConfig, PaddingConfig2d,
        Relu,
    },
    tensor::{backend::Backend, Tensor},
};

use super::config::LeafClassifierConfig;

/// A CNN block with Conv2d, BatchNorm, ReLU, and optional MaxPool
#[derive(Module, Debug)]
pub struct ConvBlock<B: Backend> {
    pub conv: Conv2d<B>,
    pub bn: BatchNorm<B, 2>,
    pub relu: Relu,
    pub pool: Option<MaxPool2d>,
}

impl<B: Backend> ConvBlock<B> {
    /// Create a new convolutional block
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        kernel_size: usize,
        with_pool: bool,
        device: &B::Device,
    ) -> Self {
        let conv = Conv2dConfig::new([in_channels, out_channels], [kernel_size, kernel_size])
            .with_padding(PaddingConfig2d::Same)
            .init(device);

        let bn = BatchNormConfig::new(out_channels).init(device);

        let pool = if with_pool {
            Some(MaxPool2dConfig::new([2, 2]).with_strides([2, 2]).init())
        } else {
            None
        };

        Self {
            conv,
            bn,
            relu: Relu::new(),
            pool,
        }
    }

    /// Forward pass through the block
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv.forward(x);
        let x = self.bn.forward(x);
        let x = self.relu.forward(x);

        match &self.pool {
            Some(pool) => pool.forward(x),
            None => x,
        }
    }
}

/// Convolutional feature extractor (no classification top)
///
/// Takes [B, 3, 224, 224] input and produces a [B, base*8, 14, 14] feature
/// map. Stands in for the pretrained backbone of the transfer-learning
/// recipe; its weights come from a pretrained record when available.
#[derive(Module, Debug)]
pub struct LeafFeatureExtractor<B: Backend> {
    pub conv1: ConvBlock<B>,
    pub conv2: ConvBlock<B>,
    pub conv3: ConvBlock<B>,
    pub conv4: ConvBlock<B>,
}

impl<B: Backend> LeafFeatureExtractor<B> {
    /// Create a new feature extractor from configuration
    pub fn new(config: &LeafClassifierConfig, device: &B::Device) -> Self {
        let base = config.base_filters;

        // Channel progression: 3 -> 32 -> 64 -> 128 -> 256
        let conv1 = ConvBlock::new(config.in_channels, base, 3, true, device); // 224 -> 112
        let conv2 = ConvBlock::new(base, base * 2, 3, true, device); // 112 -> 56
        let conv3 = ConvBlock::new(base * 2, base * 4, 3, true, device); // 56 -> 28
        let conv4 = ConvBlock::new(base * 4, base * 8, 3, true, device); // 28 -> 14

        Self {
            conv1,
            conv2,
            conv3,
            conv4,
        }
    }

    /// Forward pass producing the feature map
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        let x = self.conv1.forward(x);
        let x = self.conv2.forward(x);
        let x = self.conv3.forward(x);
        self.conv4.forward(x)
    }

    /// Number of output channels of the final block
    pub fn out_channels(config: &LeafClassifierConfig) -> usize {
        config.base_filters * 8
    }
}

/// Leaf disease classifier
///
/// Architecture:
/// - Feature extractor (frozen pretrained backbone)
/// - Global average pooling
/// - Dense(256) + ReLU + Dropout(0.5)
/// - Dense(128) + ReLU + Dropout(0.3)
/// - Linear output layer, one unit per class (softmax at inference)
#[derive(Module, Debug)]
pub struct LeafClassifier<B: Backend> {
    pub features: LeafFeatureExtractor<B>,

    pub global_pool: AdaptiveAvgPool2d,

    pub fc1: Linear<B>,
    pub dropout1: Dropout,
    pub fc2: Linear<B>,
    pub dropout2: Dropout,
    pub output: Linear<B>,

    num_classes: usize,
}

impl<B: Backend> LeafClassifier<B> {
    /// Create a new classifier from configuration
    pub fn new(config: &LeafClassifierConfig, device: &B::Device) -> Self {
        let features = LeafFeatureExtractor::new(config, device);
        Self::with_features(features, config, device)
    }

    /// Create a classifier on top of an existing (e.g. pretrained) extractor
    pub fn with_features(
        features: LeafFeatureExtractor<B>,
        config: &LeafClassifierConfig,
        device: &B::Device,
    ) -> Self {
        let feature_channels = LeafFeatureExtractor::<B>::out_channels(config);

        let global_pool = AdaptiveAvgPool2dConfig::new([1, 1]).init();

        let fc1 = LinearConfig::new(feature_channels, 256).init(device);
        let dropout1 = DropoutConfig::new(config.head_dropout).init();
        let fc2 = LinearConfig::new(256, 128).init(device);
        let dropout2 = DropoutConfig::new(config.classifier_dropout).init();
        let output = LinearConfig::new(128, config.num_classes).init(device);

        Self {
            features,
            global_pool,
            fc1,
            dropout1,
            fc2,
            dropout2,
            output,
            num_classes: config.num_classes,
        }
    }

    /// Forward pass through the network
    ///
    /// # Arguments
    /// * `x` - Input tensor of shape [batch_size, 3, height, width]
    ///
    /// # Returns
    /// * Logits tensor of shape [batch_size, num_classes]
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let x = self.features.forward(x);

        // Global pooling: [B, C, H, W] -> [B, C, 1, 1]
        let x = self.global_pool.forward(x);

        // Flatten: [B, C, 1, 1] -> [B, C]
        let [batch_size, channels, _, _] = x.dims();
        let x = x.reshape([batch_size, channels]);

        // Dense head
        let x = self.fc1.forward(x);
        let x = Relu::new().forward(x);
        let x = self.dropout1.forward(x);
        let x = self.fc2.forward(x);
        let x = Relu::new().forward(x);
        let x = self.dropout2.forward(x);

        self.output.forward(x)
    }

    /// Forward pass with softmax for inference
    pub fn forward_softmax(&self, x: Tensor<B, 4>) -> Tensor<B, 2> {
        let logits = self.forward(x);
        burn::tensor::activation::softmax(logits, 1)
    }

    /// Get the number of output classes
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }
}
