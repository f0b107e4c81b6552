//! Utils Module - Shared Helpers
//!
//! Metrics collection and the demo dataset.

pub mod dataset;
pub mod metrics;

pub use metrics::*;
