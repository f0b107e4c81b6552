//! Sentiment API Library
//!
//! Multilingual sentiment scoring for short course evaluations:
//! - Quantized DistilBERT inference via ONNX Runtime
//! - Winner-takes-all scoring on a -5..5 scale
//! - `POST /v1/sentiment` HTTP service
//! - Demo frontend with batch accuracy and latency metrics

pub mod api;
pub mod core;
pub mod demo;
pub mod models;
pub mod providers;
pub mod utils;

pub use crate::core::{analyze, score_to_label, sentiment_score, OnnxClassifier, SentimentClassifier};
pub use models::{AppError, AppResult, DemoConfig, ErrorCode, SentimentLabel, ServiceConfig};
pub use providers::{ScoreOutcome, SentimentServiceClient};
pub use utils::{Metrics, MetricsSnapshot};
