//! API Request Handlers

use axum::extract::{Json, State};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::info;

use super::types::*;
use crate::core::classifier::{analyze, SentimentClassifier};
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::utils::metrics::Metrics;

/// Shared application state
pub struct AppState {
    pub classifier: Arc<dyn SentimentClassifier>,
    pub metrics: Arc<Metrics>,
    pub start_time: Instant,
    /// Bounds concurrent CPU-bound inferences
    pub inference_permits: Arc<Semaphore>,
}

impl AppState {
    pub fn new(classifier: Arc<dyn SentimentClassifier>, max_concurrency: usize) -> Self {
        Self {
            classifier,
            metrics: Arc::new(Metrics::new()),
            start_time: Instant::now(),
            inference_permits: Arc::new(Semaphore::new(max_concurrency.max(1))),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthData>> {
    let start = Instant::now();

    let data = HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.classifier.name().to_string(),
        uptime_seconds: state.uptime_seconds(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}

// ============================================
// Sentiment
// ============================================

pub async fn analyze_sentiment(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SentimentRequest>,
) -> AppResult<Json<SentimentResponse>> {
    let start = Instant::now();
    let score = run_inference(&state, req.text, start).await?;
    info!(score, latency_ms = elapsed_ms(start), "🎯 Sentiment scored");
    Ok(Json(SentimentResponse { score }))
}

async fn run_inference(state: &AppState, text: String, start: Instant) -> AppResult<f64> {
    if text.trim().is_empty() {
        state.metrics.record(false, elapsed_ms(start));
        return Err(AppError::invalid_input("Field 'text' must not be empty"));
    }

    let permit = match state.inference_permits.clone().acquire_owned().await {
        Ok(permit) => permit,
        Err(_) => {
            state.metrics.record(false, elapsed_ms(start));
            return Err(AppError::new(ErrorCode::ApiUnavailable, "Inference pool is closed"));
        }
    };

    // The blocking task outlives a dropped request, so it owns the permit
    // and records its own outcome.
    let classifier = state.classifier.clone();
    let metrics = state.metrics.clone();
    let task = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        let result = analyze(classifier.as_ref(), &text);
        metrics.record(result.is_ok(), elapsed_ms(start));
        result
    });

    match task.await {
        Ok(prediction) => Ok(prediction?.score),
        Err(e) => {
            state.metrics.record(false, elapsed_ms(start));
            Err(e.into())
        }
    }
}

// ============================================
// Stats
// ============================================

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Json<ApiResponse<StatsData>> {
    let start = Instant::now();

    let data = StatsData {
        requests: state.metrics.snapshot(),
        uptime_seconds: state.uptime_seconds(),
        api_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(ApiResponse::success(data, elapsed_ms(start)))
}
