//! Sentiment Scoring
//!
//! Turns raw classifier logits into a single score on a -5..5 scale.
//!
//! Scoring Algorithm (winner-takes-all):
//! - positive wins: 3 + 2 * p(positive)      -> 3.0 ..= 5.0
//! - negative wins: -3 - 2 * p(negative)     -> -3.0 ..= -5.0
//! - neutral wins:  p(positive) - p(negative) -> drifts around 0
//! - final clamp into [-5, 5]

use crate::models::types::{ClassProbabilities, SentimentLabel};

pub const MIN_SCORE: f64 = -5.0;
pub const MAX_SCORE: f64 = 5.0;

/// Base magnitude awarded to a decisive positive/negative winner
const WINNER_BASE: f64 = 3.0;
/// Extra magnitude scaled by the winner's confidence
const CONFIDENCE_SPAN: f64 = 2.0;

/// Scores at or beyond this magnitude map to a polar label
pub const LABEL_THRESHOLD: f64 = 1.0;

/// Numerically stable softmax
pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let Some(max) = logits.iter().copied().map(f64::from).reduce(f64::max) else {
        return Vec::new();
    };

    let exps: Vec<f64> = logits.iter().map(|&x| (f64::from(x) - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Winner-takes-all score in [-5, 5]
pub fn sentiment_score(probs: &ClassProbabilities) -> f64 {
    let score = match probs.winner() {
        SentimentLabel::Positive => WINNER_BASE + probs.positive * CONFIDENCE_SPAN,
        SentimentLabel::Negative => -WINNER_BASE - probs.negative * CONFIDENCE_SPAN,
        SentimentLabel::Neutral => probs.positive - probs.negative,
    };
    score.clamp(MIN_SCORE, MAX_SCORE)
}

/// Map a score back to a coarse label
///
/// `score <= -1` is negative, `score >= 1` is positive, anything between is
/// neutral.
pub fn score_to_label(score: f64) -> SentimentLabel {
    if score <= -LABEL_THRESHOLD {
        SentimentLabel::Negative
    } else if score >= LABEL_THRESHOLD {
        SentimentLabel::Positive
    } else {
        SentimentLabel::Neutral
    }
}

/// Whether a score lies in the documented range
pub fn in_range(score: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}
