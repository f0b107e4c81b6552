//! Core Module - Scoring, Inference & Evaluation
//!
//! Everything that decides a sentiment score lives here; HTTP layers only
//! move data in and out.

pub mod classifier;
pub mod evaluation;
pub mod scoring;

pub use classifier::*;
pub use evaluation::*;
pub use scoring::*;
