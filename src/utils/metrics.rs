//! Operational Metrics
//!
//! In-memory request counters and latency history shared by handlers.
//! Counters are atomics; the latency history sits behind a `RwLock`.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

/// Percentiles are only reported once this many samples exist
pub const MIN_SAMPLES_FOR_P95: usize = 20;

/// Point-in-time view of the collector
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub total_requests: u64,
    pub success_requests: u64,
    pub failed_requests: u64,
    pub last_latency_ms: Option<f64>,
    pub avg_latency_ms: Option<f64>,
    pub p95_latency_ms: Option<f64>,
}

impl MetricsSnapshot {
    /// One-line summary for shutdown logs
    pub fn summary(&self) -> String {
        format!(
            "{} requests ({} ok / {} failed), avg latency {}",
            self.total_requests,
            self.success_requests,
            self.failed_requests,
            self.avg_latency_ms
                .map(|ms| format!("{:.1}ms", ms))
                .unwrap_or_else(|| "n/a".to_string()),
        )
    }
}

/// Thread-safe metrics collector
#[derive(Debug, Default)]
pub struct Metrics {
    total_requests: AtomicU64,
    success_requests: AtomicU64,
    failed_requests: AtomicU64,
    latencies_ms: RwLock<Vec<f64>>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one request outcome
    pub fn record(&self, ok: bool, latency_ms: f64) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        if ok {
            self.success_requests.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed_requests.fetch_add(1, Ordering::Relaxed);
        }

        if let Ok(mut latencies) = self.latencies_ms.write() {
            latencies.push(latency_ms);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let latencies = self
            .latencies_ms
            .read()
            .map(|l| l.clone())
            .unwrap_or_default();

        let avg = if latencies.is_empty() {
            None
        } else {
            Some(latencies.iter().sum::<f64>() / latencies.len() as f64)
        };

        let p95 = if latencies.len() >= MIN_SAMPLES_FOR_P95 {
            let mut sorted = latencies.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            let index = (0.95 * (sorted.len() - 1) as f64) as usize;
            Some(sorted[index])
        } else {
            None
        };

        MetricsSnapshot {
            total_requests: self.total_requests.load(Ordering::Relaxed),
            success_requests: self.success_requests.load(Ordering::Relaxed),
            failed_requests: self.failed_requests.load(Ordering::Relaxed),
            last_latency_ms: latencies.last().copied(),
            avg_latency_ms: avg,
            p95_latency_ms: p95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_snapshot() {
        let snapshot = Metrics::new().snapshot();
        assert_eq!(snapshot, MetricsSnapshot::default());

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["avg_latency_ms"].is_null());
        assert!(json["p95_latency_ms"].is_null());
    }

    #[test]
    fn test_record_counts() {
        let metrics = Metrics::new();
        metrics.record(true, 10.0);
        metrics.record(false, 30.0);
        metrics.record(true, 20.0);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_requests, 3);
        assert_eq!(snapshot.success_requests, 2);
        assert_eq!(snapshot.failed_requests, 1);
        assert_eq!(snapshot.last_latency_ms, Some(20.0));
        assert_eq!(snapshot.avg_latency_ms, Some(20.0));
        assert_eq!(snapshot.p95_latency_ms, None);
    }

    #[test]
    fn test_p95_needs_twenty_samples() {
        let metrics = Metrics::new();
        for ms in 1..=19 {
            metrics.record(true, ms as f64);
        }
        assert_eq!(metrics.snapshot().p95_latency_ms, None);

        metrics.record(true, 20.0);
        // floor(0.95 * 19) = 18 -> 19th smallest
        assert_eq!(metrics.snapshot().p95_latency_ms, Some(19.0));
    }

    #[test]
    fn test_p95_ignores_insertion_order() {
        let metrics = Metrics::new();
        for ms in (1..=40).rev() {
            metrics.record(true, ms as f64);
        }
        // floor(0.95 * 39) = 37 -> 38th smallest
        assert_eq!(metrics.snapshot().p95_latency_ms, Some(38.0));
        assert_eq!(metrics.snapshot().last_latency_ms, Some(1.0));
    }

    #[test]
    fn test_summary() {
        let metrics = Metrics::new();
        assert!(metrics.snapshot().summary().contains("n/a"));
        metrics.record(true, 12.34);
        assert!(metrics.snapshot().summary().contains("12.3ms"));
    }
}
