//! Leafscan Inference Server
//!
//! Loads the serialized classifier and the disease lookup table once at
//! startup, then serves predictions over HTTP. A failed model or database
//! load is logged and surfaced per-request; the server still starts.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use leafscan::backend::{backend_name, default_device};
use leafscan::{DiseaseDatabase, Predictor, NUM_CLASSES};
use leafscan_server::state::AppState;

/// Leafscan Inference Server
#[derive(Parser, Debug)]
#[command(name = "leafscan-server")]
#[command(version)]
#[command(about = "HTTP API server for leaf disease classification")]
struct Cli {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Path to the serialized model (without the .mpk extension)
    #[arg(long, default_value = leafscan::DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Path to the disease database JSON file
    #[arg(long, default_value = leafscan::DEFAULT_DATABASE_PATH)]
    database: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("Leafscan Inference Server v{}", env!("CARGO_PKG_VERSION"));
    info!("  Backend: {}", backend_name());
    info!("  Model path: {:?}", cli.model);
    info!("  Database path: {:?}", cli.database);

    let device = default_device();
    let predictor = match Predictor::load(&cli.model, &device) {
        Ok(predictor) => {
            info!("Model loaded successfully");
            Some(predictor)
        }
        Err(e) => {
            error!("Error loading model: {}", e);
            None
        }
    };

    let diseases = match DiseaseDatabase::load(&cli.database) {
        Ok(db) => {
            info!("Disease database loaded: {} diseases", db.len());
            db
        }
        Err(e) => {
            error!("Error loading disease database: {}", e);
            DiseaseDatabase::default()
        }
    };

    info!("{} disease classes configured", NUM_CLASSES);

    let state = Arc::new(AppState::new(predictor, diseases));
    let app = leafscan_server::app(state);

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
