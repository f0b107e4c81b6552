//! Demo Request/Response Types

use serde::{Deserialize, Serialize};

use crate::models::types::SentimentLabel;

/// `POST /api/score` body; external calls are proxied to avoid CORS
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    /// Base URL, e.g. `http://localhost:8000`
    pub service_url: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ScoreReply {
    pub score: f64,
    pub label: SentimentLabel,
    pub latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub warning: Option<String>,
}

/// `POST /api/batch` body
#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub service_url: String,
    /// `[[text, gold_label], ...]`; rows are validated before scoring
    pub dataset: Vec<Vec<String>>,
}
