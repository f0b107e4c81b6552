//! Batch Evaluation
//!
//! Compares predicted labels against gold labels over a labeled dataset.
//! Failed predictions stay in the denominator: a service that errors on an
//! item is wrong on that item.

use serde::Serialize;

use super::scoring::score_to_label;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::SentimentLabel;

/// One labeled example
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledText {
    pub text: String,
    pub gold: SentimentLabel,
}

impl LabeledText {
    pub fn new(text: impl Into<String>, gold: SentimentLabel) -> Self {
        Self {
            text: text.into(),
            gold,
        }
    }
}

/// Validate raw `[text, gold_label]` rows before any scoring happens
pub fn parse_dataset(rows: &[Vec<String>]) -> AppResult<Vec<LabeledText>> {
    rows.iter()
        .map(|row| match row.as_slice() {
            [text, gold] => Ok(LabeledText::new(text.clone(), gold.parse()?)),
            _ => Err(AppError::bad_request(
                "Dataset must be a list of [text, gold_label] pairs.",
            )),
        })
        .collect()
}

/// Per-item evaluation row
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EvaluationRow {
    pub text: String,
    pub gold: SentimentLabel,
    pub score: Option<f64>,
    pub pred: Option<SentimentLabel>,
    pub ok: bool,
    pub latency_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated evaluation result
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EvaluationReport {
    pub n: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub avg_latency_ms: f64,
    pub rows: Vec<EvaluationRow>,
}

/// Accumulates rows in dataset order
#[derive(Debug, Default)]
pub struct Evaluator {
    rows: Vec<EvaluationRow>,
    correct: usize,
    total_latency_ms: f64,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful score for an item
    pub fn record_score(&mut self, item: LabeledText, score: f64, latency_ms: f64) {
        let pred = score_to_label(score);
        let ok = pred == item.gold;
        if ok {
            self.correct += 1;
        }
        self.push(EvaluationRow {
            text: item.text,
            gold: item.gold,
            score: Some(score),
            pred: Some(pred),
            ok,
            latency_ms,
            error: None,
        });
    }

    /// Record a failed call for an item
    pub fn record_failure(&mut self, item: LabeledText, error: String, latency_ms: f64) {
        self.push(EvaluationRow {
            text: item.text,
            gold: item.gold,
            score: None,
            pred: None,
            ok: false,
            latency_ms,
            error: Some(error),
        });
    }

    fn push(&mut self, row: EvaluationRow) {
        self.total_latency_ms += row.latency_ms;
        self.rows.push(row);
    }

    pub fn finish(self) -> EvaluationReport {
        let n = self.rows.len();
        let (accuracy, avg_latency_ms) = if n > 0 {
            (
                self.correct as f64 / n as f64,
                self.total_latency_ms / n as f64,
            )
        } else {
            (0.0, 0.0)
        };

        EvaluationReport {
            n,
            correct: self.correct,
            accuracy,
            avg_latency_ms,
            rows: self.rows,
        }
    }
}
