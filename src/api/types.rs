//! API Request/Response Types

use serde::{Deserialize, Serialize};

use crate::utils::metrics::MetricsSnapshot;

/// API Response wrapper for operational endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub latency_ms: f64,
    pub timestamp: i64,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T, latency_ms: f64) -> Self {
        Self {
            success: true,
            data,
            latency_ms,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

// ============================================
// Sentiment
// ============================================

/// `POST /v1/sentiment` body
#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

/// `POST /v1/sentiment` reply; kept bare because clients parse `score` directly
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SentimentResponse {
    pub score: f64,
}

// ============================================
// Stats
// ============================================

#[derive(Debug, Serialize)]
pub struct StatsData {
    #[serde(flatten)]
    pub requests: MetricsSnapshot,
    pub uptime_seconds: u64,
    pub api_version: String,
}

// ============================================
// Health Check
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthData {
    pub status: String,
    pub version: String,
    pub model: String,
    pub uptime_seconds: u64,
}
