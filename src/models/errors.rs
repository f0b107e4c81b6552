//! Centralized Error Handling Module
//!
//! Every failure carries a unique error code so log lines can be grepped
//! and mapped back to a failing stage.
//!
//! Error codes follow pattern: CATEGORY_SPECIFIC_ERROR
//! - MODEL_xxx: Model / tokenizer loading and inference
//! - API_xxx: API errors
//! - CFG_xxx: Configuration errors
//! - EXT_xxx: External sentiment service errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::fmt;

/// Application-wide error type
#[derive(Debug)]
pub struct AppError {
    /// Unique error code for logging/monitoring
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Optional underlying error
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new AppError
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Create AppError with source error
    pub fn with_source(
        code: ErrorCode,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Get error code as string (for logging)
    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Unique error codes for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // ============================================
    // Model Errors (1xx)
    // ============================================
    /// Model, tokenizer or label config could not be loaded
    ModelLoadFailed,
    /// Tokenization failed
    ModelTokenizeFailed,
    /// ONNX session run failed
    ModelInferenceFailed,
    /// Model produced output of an unexpected shape
    ModelInvalidOutput,

    // ============================================
    // API Errors (3xx)
    // ============================================
    /// Invalid request format
    ApiBadRequest,
    /// Request well-formed but semantically invalid
    ApiInvalidInput,
    /// Internal server error
    ApiInternalError,
    /// Server is saturated
    ApiUnavailable,

    // ============================================
    // Configuration Errors (4xx)
    // ============================================
    /// Invalid configuration value
    ConfigInvalidValue,
    /// Dataset file could not be read or parsed
    ConfigInvalidDataset,

    // ============================================
    // External Service Errors (6xx)
    // ============================================
    /// External service responded, but not with a usable score
    ExternalBadResponse,
    /// External service unreachable
    ExternalConnectionFailed,
    /// External service timeout
    ExternalTimeout,
}

impl ErrorCode {
    /// Get string representation of error code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ModelLoadFailed => "MODEL_LOAD_FAILED",
            Self::ModelTokenizeFailed => "MODEL_TOKENIZE_FAILED",
            Self::ModelInferenceFailed => "MODEL_INFERENCE_FAILED",
            Self::ModelInvalidOutput => "MODEL_INVALID_OUTPUT",

            Self::ApiBadRequest => "API_BAD_REQUEST",
            Self::ApiInvalidInput => "API_INVALID_INPUT",
            Self::ApiInternalError => "API_INTERNAL_ERROR",
            Self::ApiUnavailable => "API_UNAVAILABLE",

            Self::ConfigInvalidValue => "CFG_INVALID_VALUE",
            Self::ConfigInvalidDataset => "CFG_INVALID_DATASET",

            Self::ExternalBadResponse => "EXT_BAD_RESPONSE",
            Self::ExternalConnectionFailed => "EXT_CONNECTION_FAILED",
            Self::ExternalTimeout => "EXT_TIMEOUT",
        }
    }

    /// Get HTTP status code for API responses
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ApiBadRequest | Self::ConfigInvalidValue | Self::ConfigInvalidDataset => 400,
            Self::ApiInvalidInput => 422,
            Self::ExternalBadResponse
            | Self::ExternalConnectionFailed
            | Self::ExternalTimeout => 502,
            Self::ApiUnavailable => 503,
            _ => 500,
        }
    }
}

// ============================================
// Convenience constructors
// ============================================

impl AppError {
    /// Model artifacts missing or unreadable
    pub fn model_load_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelLoadFailed, msg)
    }

    /// Inference failed
    pub fn inference_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelInferenceFailed, msg)
    }

    /// Unexpected model output
    pub fn invalid_output(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelInvalidOutput, msg)
    }

    /// API bad request
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiBadRequest, msg)
    }

    /// Semantically invalid input (blank text, etc.)
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ApiInvalidInput, msg)
    }

    /// Invalid configuration value
    pub fn invalid_config(key: &str, value: &str, expected: &str) -> Self {
        Self::new(
            ErrorCode::ConfigInvalidValue,
            format!("Invalid value {:?} for {}: expected {}", value, key, expected),
        )
    }
}

// ============================================
// Result type alias
// ============================================

/// Application Result type
pub type AppResult<T> = Result<T, AppError>;

// ============================================
// HTTP mapping
// ============================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(code = self.code_str(), "{}", self.message);
        }
        (status, Json(serde_json::json!({ "detail": self.message }))).into_response()
    }
}

// ============================================
// Conversion from common error types
// ============================================

impl From<ort::Error> for AppError {
    fn from(err: ort::Error) -> Self {
        Self::new(ErrorCode::ModelInferenceFailed, err.to_string())
    }
}

impl From<tokenizers::Error> for AppError {
    fn from(err: tokenizers::Error) -> Self {
        Self::new(ErrorCode::ModelTokenizeFailed, err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::new(
            ErrorCode::ApiInternalError,
            format!("Inference task failed: {}", err),
        )
    }
}
