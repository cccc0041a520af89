//! Model builder
//!
//! Offline, run-once tool that assembles the leaf disease classifier and
//! serializes it to disk for the inference service. Stacks the dense head
//! (256 and 128 units with dropout 0.5/0.3, 38-way output) on top of the
//! convolutional feature extractor, optionally initializing the extractor
//! from a pretrained record.

use std::path::PathBuf;

use anyhow::Context;
use burn::{module::Module, record::CompactRecorder};
use chrono::Utc;
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use leafscan::backend::{backend_name, default_device, DefaultBackend};
use leafscan::model::{LeafClassifier, LeafClassifierConfig, LeafFeatureExtractor};

/// Build and serialize the leaf disease classification model
#[derive(Parser, Debug)]
#[command(name = "create_model")]
#[command(version)]
#[command(about = "Assemble the transfer-learning classifier and save it to disk")]
struct Cli {
    /// Output path for the model record (Burn appends .mpk)
    #[arg(short, long, default_value = leafscan::DEFAULT_MODEL_PATH)]
    output: PathBuf,

    /// Pretrained feature-extractor record to initialize the backbone from
    #[arg(long)]
    pretrained: Option<PathBuf>,
}

/// Metadata sidecar written next to the model record
#[derive(Debug, Serialize)]
struct ModelMetadata {
    architecture: String,
    num_classes: usize,
    input_size: usize,
    num_parameters: usize,
    pretrained_backbone: bool,
    created_at: String,
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let config = LeafClassifierConfig::new();
    config
        .validate()
        .context("Model configuration is inconsistent with the class table")?;

    info!("Building leaf disease classifier");
    info!("  Backend: {}", backend_name());
    info!("  Input: {0}x{0}x{1}", config.input_size, config.in_channels);
    info!("  Output classes: {}", config.num_classes);

    let device = default_device();
    let recorder = CompactRecorder::new();

    let extractor = match &cli.pretrained {
        Some(path) => {
            info!("Loading pretrained feature extractor from {:?}", path);
            LeafFeatureExtractor::<DefaultBackend>::new(&config, &device)
                .load_file(path, &recorder, &device)
                .map_err(|e| anyhow::anyhow!("Failed to load pretrained backbone: {:?}", e))?
        }
        None => {
            warn!("No pretrained backbone given; feature extractor is randomly initialized");
            LeafFeatureExtractor::new(&config, &device)
        }
    };

    let model = LeafClassifier::with_features(extractor, &config, &device);
    let num_parameters = model.num_params();
    info!("Model assembled: {} parameters", num_parameters);

    if let Some(parent) = cli.output.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    model
        .save_file(&cli.output, &recorder)
        .map_err(|e| anyhow::anyhow!("Failed to save model: {:?}", e))?;
    info!("Model saved to {:?} (.mpk)", cli.output);

    let metadata = ModelMetadata {
        architecture: "LeafClassifier (conv extractor + dense head)".to_string(),
        num_classes: config.num_classes,
        input_size: config.input_size,
        num_parameters,
        pretrained_backbone: cli.pretrained.is_some(),
        created_at: Utc::now().to_rfc3339(),
    };

    let metadata_path = PathBuf::from(format!("{}.json", cli.output.display()));
    std::fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)
        .with_context(|| format!("Failed to write {:?}", metadata_path))?;
    info!("Metadata written to {:?}", metadata_path);

    Ok(())
}
