//! Demo Route Configuration

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{self, DemoState};
use crate::api::middleware::logging_middleware;

/// Create the demo frontend router
pub fn create_demo_router(state: Arc<DemoState>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/score", post(handlers::api_score))
        .route("/api/batch", post(handlers::api_batch))
        .route("/api/metrics", get(handlers::api_metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware))
}
