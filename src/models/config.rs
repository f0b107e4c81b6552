//! Configuration module
//!
//! Both binaries are configured through environment variables. Loaders take
//! a lookup function so tests never touch the process environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::errors::{AppError, AppResult};

pub const DEFAULT_SERVICE_PORT: u16 = 8000;
pub const DEFAULT_DEMO_PORT: u16 = 8001;
pub const DEFAULT_MODEL_DIR: &str = "tiny_model_onnx";
pub const DEFAULT_MODEL_FILE: &str = "model_quantized.onnx";
pub const DEFAULT_MAX_LENGTH: usize = 128;
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: f64 = 4.0;

/// Read a variable and parse it, `None` when unset or blank
fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    expected: &str,
) -> AppResult<Option<T>> {
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::invalid_config(key, &raw, expected)),
        _ => Ok(None),
    }
}

fn positive(key: &str, value: usize) -> AppResult<usize> {
    if value == 0 {
        return Err(AppError::invalid_config(key, "0", "a value greater than zero"));
    }
    Ok(value)
}

fn string_var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn socket_addr(host: &str, port: u16) -> AppResult<SocketAddr> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|_| AppError::invalid_config("host", host, "an IP address"))
}

/// Sentiment service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `tokenizer.json`, `config.json` and the ONNX file
    pub model_dir: PathBuf,
    pub model_file: String,
    /// Tokens kept after truncation
    pub max_length: usize,
    /// Concurrent inferences allowed
    pub max_concurrency: usize,
    /// ONNX Runtime intra-op threads per session run
    pub intra_threads: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_SERVICE_PORT,
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            model_file: DEFAULT_MODEL_FILE.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
            max_concurrency: 4,
            intra_threads: 1,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();

        // Platform-provided PORT wins over the service-specific variable
        let port = match parse_var::<u16>(&lookup, "PORT", "a port number")? {
            Some(port) => port,
            None => parse_var(&lookup, "SENTIMENT_PORT", "a port number")?
                .unwrap_or(defaults.port),
        };

        let max_length = parse_var(&lookup, "SENTIMENT_MAX_LENGTH", "a token count")?
            .unwrap_or(defaults.max_length);
        let max_concurrency = parse_var(&lookup, "SENTIMENT_MAX_CONCURRENCY", "a task count")?
            .unwrap_or(defaults.max_concurrency);
        let intra_threads = parse_var(&lookup, "SENTIMENT_INTRA_THREADS", "a thread count")?
            .unwrap_or(defaults.intra_threads);

        Ok(Self {
            host: string_var(&lookup, "SENTIMENT_HOST", &defaults.host),
            port,
            model_dir: PathBuf::from(string_var(
                &lookup,
                "SENTIMENT_MODEL_DIR",
                DEFAULT_MODEL_DIR,
            )),
            model_file: string_var(&lookup, "SENTIMENT_MODEL_FILE", DEFAULT_MODEL_FILE),
            max_length: positive("SENTIMENT_MAX_LENGTH", max_length)?,
            max_concurrency: positive("SENTIMENT_MAX_CONCURRENCY", max_concurrency)?,
            intra_threads: positive("SENTIMENT_INTRA_THREADS", intra_threads)?,
        })
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.model_file)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        socket_addr(&self.host, self.port)
    }
}

/// Demo frontend configuration
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    pub host: String,
    pub port: u16,
    /// Prefilled base URL of the sentiment service
    pub default_service_url: String,
    /// Per-call timeout towards the sentiment service
    pub request_timeout: Duration,
    /// Optional JSON file replacing the built-in dataset
    pub dataset_path: Option<PathBuf>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_DEMO_PORT,
            default_service_url: DEFAULT_SERVICE_URL.to_string(),
            request_timeout: Duration::from_secs_f64(DEFAULT_REQUEST_TIMEOUT_SECS),
            dataset_path: None,
        }
    }
}

impl DemoConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let defaults = Self::default();

        let timeout_secs: f64 = parse_var(&lookup, "DEMO_REQUEST_TIMEOUT_SECS", "seconds")?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(AppError::invalid_config(
                "DEMO_REQUEST_TIMEOUT_SECS",
                &timeout_secs.to_string(),
                "a positive number of seconds",
            ));
        }

        Ok(Self {
            host: string_var(&lookup, "DEMO_HOST", &defaults.host),
            port: parse_var(&lookup, "DEMO_PORT", "a port number")?.unwrap_or(defaults.port),
            default_service_url: string_var(&lookup, "DEMO_SERVICE_URL", DEFAULT_SERVICE_URL),
            request_timeout: Duration::from_secs_f64(timeout_secs),
            dataset_path: lookup("DEMO_DATASET")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        socket_addr(&self.host, self.port)
    }
}
