//! Sentiment Service Client
//!
//! Calls any service implementing `POST /v1/sentiment` and turns every
//! failure mode into a message a student can act on. Calls never return
//! `Err`: the demo shows the message instead.
//!
//! Contract:
//! - Request:  `{"text": "<course evaluation>"}`
//! - Response: `{"score": <number between -5 and 5>}`

use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::core::scoring::in_range;
use crate::models::errors::ErrorCode;
use crate::utils::metrics::Metrics;

pub const SENTIMENT_PATH: &str = "/v1/sentiment";

/// Characters of a non-200 body echoed back
const BODY_PREVIEW_CHARS: usize = 200;

/// Result of one scoring call
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub endpoint: String,
    pub latency_ms: f64,
    pub score: Option<f64>,
    pub error: Option<String>,
    /// Set when a score came back outside [-5, 5]
    pub warning: Option<String>,
}

impl ScoreOutcome {
    pub fn is_ok(&self) -> bool {
        self.score.is_some()
    }
}

enum CallFailure {
    Status { code: u16, body: String },
    NotAnObject(String),
    MissingScore(Vec<String>),
    BadScore(String),
    Timeout,
    Network(String),
    Unexpected(String),
}

impl CallFailure {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Timeout => ErrorCode::ExternalTimeout,
            Self::Network(_) => ErrorCode::ExternalConnectionFailed,
            _ => ErrorCode::ExternalBadResponse,
        }
    }
}

impl From<reqwest::Error> for CallFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() || err.is_request() {
            Self::Network(err.to_string())
        } else {
            Self::Unexpected(err.to_string())
        }
    }
}

/// HTTP client for an external sentiment service
#[derive(Clone)]
pub struct SentimentServiceClient {
    client: reqwest::Client,
    timeout: Duration,
    metrics: Arc<Metrics>,
}

impl SentimentServiceClient {
    pub fn new(timeout: Duration, metrics: Arc<Metrics>) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
            metrics,
        }
    }

    /// `{base}/v1/sentiment`, tolerant of a trailing slash
    pub fn endpoint(base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), SENTIMENT_PATH)
    }

    /// Score one text and record the outcome in the shared metrics
    pub async fn score(&self, base_url: &str, text: &str) -> ScoreOutcome {
        let endpoint = Self::endpoint(base_url);
        let start = Instant::now();
        let result = self.call(&endpoint, text).await;
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;

        let outcome = match result {
            Ok(score) => {
                let warning = (!in_range(score))
                    .then(|| format!("Score {} is outside expected range [-5, 5].", score));
                ScoreOutcome {
                    endpoint,
                    latency_ms,
                    score: Some(score),
                    error: None,
                    warning,
                }
            }
            Err(failure) => {
                let code = failure.code();
                let message = self.describe(failure);
                warn!(
                    code = code.as_str(),
                    endpoint = %endpoint,
                    latency_ms,
                    "Scoring call failed: {}",
                    message
                );
                ScoreOutcome {
                    endpoint,
                    latency_ms,
                    score: None,
                    error: Some(message),
                    warning: None,
                }
            }
        };

        self.metrics.record(outcome.is_ok(), latency_ms);
        outcome
    }

    async fn call(&self, endpoint: &str, text: &str) -> Result<f64, CallFailure> {
        debug!("📤 POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .timeout(self.timeout)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != reqwest::StatusCode::OK {
            return Err(CallFailure::Status {
                code: status.as_u16(),
                body: body.chars().take(BODY_PREVIEW_CHARS).collect(),
            });
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| CallFailure::Unexpected(format!("response is not JSON: {}", e)))?;
        let Value::Object(fields) = data else {
            return Err(CallFailure::NotAnObject(body.chars().take(BODY_PREVIEW_CHARS).collect()));
        };

        match fields.get("score") {
            None => Err(CallFailure::MissingScore(fields.keys().cloned().collect())),
            Some(Value::Number(n)) => n
                .as_f64()
                .ok_or_else(|| CallFailure::BadScore(n.to_string())),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| CallFailure::BadScore(format!("'{}'", s))),
            Some(other) => Err(CallFailure::BadScore(other.to_string())),
        }
    }

    fn describe(&self, failure: CallFailure) -> String {
        match failure {
            CallFailure::Status { code, body } => format!(
                "External service responded with HTTP {}. Expected 200. Response body (truncated): '{}'",
                code, body
            ),
            CallFailure::NotAnObject(body) => format!(
                "External service returned JSON that is not an object. Expected {{\"score\": <number>}}, got: '{}'",
                body
            ),
            CallFailure::MissingScore(keys) => format!(
                "External service returned JSON without the required field 'score'. Got keys: [{}]",
                keys.iter()
                    .map(|k| format!("'{}'", k))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            CallFailure::BadScore(raw) => format!(
                "Unexpected error while calling/parsing the external service response. Details: 'score' is not a number: {}",
                raw
            ),
            CallFailure::Timeout => format!(
                "Timeout after {:.1}s while calling the external service. \
                 This usually means the container is not running, the URL/port is wrong, or the model is too slow. \
                 Try: (1) open the service health check at /health, (2) verify {} exists, (3) reduce model size.",
                self.timeout.as_secs_f64(),
                SENTIMENT_PATH
            ),
            CallFailure::Network(details) => format!(
                "Could not reach the external service (network error). \
                 Check the base URL and whether the container is running. Details: {}",
                details
            ),
            CallFailure::Unexpected(details) => format!(
                "Unexpected error while calling/parsing the external service response. Details: {}",
                details
            ),
        }
    }
}
