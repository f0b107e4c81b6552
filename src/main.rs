//! Sentiment API Server
//!
//! Serves the quantized sentiment model over HTTP.
//!
//! Usage:
//!   cargo run --release --bin sentiment_api
//!
//! Environment:
//!   PORT / SENTIMENT_PORT      - Server port (default: 8000)
//!   SENTIMENT_HOST             - Server host (default: 0.0.0.0)
//!   SENTIMENT_MODEL_DIR        - Model directory (default: tiny_model_onnx)
//!   SENTIMENT_MODEL_FILE       - ONNX file name (default: model_quantized.onnx)
//!   SENTIMENT_MAX_LENGTH       - Token truncation length (default: 128)
//!   SENTIMENT_MAX_CONCURRENCY  - Concurrent inferences (default: 4)
//!   SENTIMENT_INTRA_THREADS    - ONNX Runtime threads per inference (default: 1)
//!   RUST_LOG                   - Log filter (default: info)

use sentiment_api::api::{create_router, handlers::AppState};
use sentiment_api::{OnnxClassifier, ServiceConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = ServiceConfig::from_env()?;

    info!("🧠 Loading model from {}", config.model_dir.display());
    let classifier = Arc::new(OnnxClassifier::load(&config)?);

    let state = Arc::new(AppState::new(classifier, config.max_concurrency));
    let stats = state.metrics.clone();
    let app = create_router(state);

    let addr = config.socket_addr()?;

    info!("🚀 Sentiment API starting on http://{}", addr);
    info!("");
    info!("Endpoints:");
    info!("  POST /v1/sentiment  - Score a text on a -5..5 scale");
    info!("  GET  /v1/stats      - Request statistics");
    info!("  GET  /v1/health     - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("🛑 Shutdown signal received");
    info!("📊 Served {}", stats.snapshot().summary());
    info!("👋 Sentiment API shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
