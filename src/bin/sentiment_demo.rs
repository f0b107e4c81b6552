//! Sentiment Demo Frontend
//!
//! Web UI for testing any `POST /v1/sentiment` service by hand and against a
//! labeled dataset.
//!
//! Usage:
//!   cargo run --bin sentiment_demo
//!
//! Environment:
//!   DEMO_PORT                  - Server port (default: 8001)
//!   DEMO_HOST                  - Server host (default: 0.0.0.0)
//!   DEMO_SERVICE_URL           - Prefilled service URL (default: http://localhost:8000)
//!   DEMO_REQUEST_TIMEOUT_SECS  - Per-call timeout (default: 4.0)
//!   DEMO_DATASET               - JSON file of [text, label] pairs (default: built-in)
//!   RUST_LOG                   - Log filter (default: info)

use sentiment_api::demo::{create_demo_router, DemoState};
use sentiment_api::utils::dataset;
use sentiment_api::DemoConfig;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    let config = DemoConfig::from_env()?;
    let rows = dataset::load(config.dataset_path.as_deref())?;
    info!(
        "📚 Dataset: {} items ({})",
        rows.len(),
        config
            .dataset_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    );

    let state = Arc::new(DemoState::new(&config, &rows));
    let metrics = state.metrics.clone();
    let app = create_demo_router(state);

    let addr = config.socket_addr()?;
    info!("🚀 Sentiment demo starting on http://{}", addr);
    info!(
        "   Default service: {} (timeout {:.1}s)",
        config.default_service_url,
        config.request_timeout.as_secs_f64()
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("📊 Demo made {}", metrics.snapshot().summary());
    Ok(())
}
