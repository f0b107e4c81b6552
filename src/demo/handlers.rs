//! Demo Request Handlers

use axum::extract::{Json, State};
use axum::response::Html;
use std::sync::Arc;
use tracing::info;

use super::page;
use super::types::*;
use crate::core::evaluation::{parse_dataset, EvaluationReport, Evaluator};
use crate::core::scoring::score_to_label;
use crate::models::config::DemoConfig;
use crate::models::errors::{AppError, AppResult, ErrorCode};
use crate::providers::sentiment_client::SentimentServiceClient;
use crate::utils::dataset::DatasetRows;
use crate::utils::metrics::{Metrics, MetricsSnapshot};

/// Shared demo state
pub struct DemoState {
    pub client: SentimentServiceClient,
    pub metrics: Arc<Metrics>,
    /// Rendered once; dataset and default URL never change at runtime
    pub page: String,
}

impl DemoState {
    pub fn new(config: &DemoConfig, dataset: &DatasetRows) -> Self {
        let metrics = Arc::new(Metrics::new());
        Self {
            client: SentimentServiceClient::new(config.request_timeout, metrics.clone()),
            metrics,
            page: page::render(dataset, &config.default_service_url),
        }
    }
}

fn require_url(service_url: &str) -> AppResult<&str> {
    let url = service_url.trim();
    if url.is_empty() {
        return Err(AppError::invalid_input(
            "Please provide the base URL of the external service (e.g., http://localhost:8000).",
        ));
    }
    Ok(url)
}

pub async fn index(State(state): State<Arc<DemoState>>) -> Html<String> {
    Html(state.page.clone())
}

pub async fn api_score(
    State(state): State<Arc<DemoState>>,
    Json(req): Json<ScoreRequest>,
) -> AppResult<Json<ScoreReply>> {
    let service_url = require_url(&req.service_url)?;
    if req.text.trim().is_empty() {
        return Err(AppError::invalid_input("Please enter some text to score."));
    }

    let outcome = state.client.score(service_url, &req.text).await;
    let Some(score) = outcome.score else {
        return Err(AppError::new(
            ErrorCode::ExternalBadResponse,
            outcome.error.unwrap_or_else(|| "Unknown error.".to_string()),
        ));
    };

    Ok(Json(ScoreReply {
        score,
        label: score_to_label(score),
        latency_ms: outcome.latency_ms,
        warning: outcome.warning,
    }))
}

/// Sequential batch evaluation; one failing item does not stop the run
pub async fn api_batch(
    State(state): State<Arc<DemoState>>,
    Json(req): Json<BatchRequest>,
) -> AppResult<Json<EvaluationReport>> {
    let service_url = require_url(&req.service_url)?;
    let items = parse_dataset(&req.dataset)?;

    info!("📋 Batch evaluation of {} items against {}", items.len(), service_url);

    let mut evaluator = Evaluator::new();
    for item in items {
        let outcome = state.client.score(service_url, &item.text).await;
        match outcome.score {
            Some(score) => evaluator.record_score(item, score, outcome.latency_ms),
            None => evaluator.record_failure(
                item,
                outcome.error.unwrap_or_default(),
                outcome.latency_ms,
            ),
        }
    }

    let report = evaluator.finish();
    info!(
        "📊 Batch done: {}/{} correct ({:.1}%), avg {:.1}ms",
        report.correct,
        report.n,
        report.accuracy * 100.0,
        report.avg_latency_ms
    );
    Ok(Json(report))
}

pub async fn api_metrics(State(state): State<Arc<DemoState>>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
