//! Sentiment Classifier
//!
//! The service only depends on the [`SentimentClassifier`] trait; the
//! production implementation runs a quantized DistilBERT export through
//! ONNX Runtime with a HuggingFace tokenizer.
//!
//! Model directory layout:
//! - `tokenizer.json`        - fast tokenizer definition
//! - `config.json`           - optional, `id2label` decides class order
//! - `model_quantized.onnx`  - int8 dynamic-quantized graph (name configurable)

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::{DynValue, Tensor};
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

use super::scoring::{score_to_label, sentiment_score, softmax};
use crate::models::config::ServiceConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{ClassProbabilities, LabelMap, SentimentLabel};

/// Anything that can turn text into class probabilities
pub trait SentimentClassifier: Send + Sync {
    /// Short identifier reported by health checks
    fn name(&self) -> &str;

    /// Class probabilities for one text
    fn predict(&self, text: &str) -> AppResult<ClassProbabilities>;
}

/// Full analysis of one text
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub probabilities: ClassProbabilities,
    pub score: f64,
    pub label: SentimentLabel,
}

/// Validate, classify and score a text
pub fn analyze(classifier: &dyn SentimentClassifier, text: &str) -> AppResult<Prediction> {
    if text.trim().is_empty() {
        return Err(AppError::invalid_input("Text must not be empty"));
    }

    let probabilities = classifier.predict(text)?;
    if !probabilities.is_finite() {
        return Err(AppError::invalid_output(format!(
            "Model produced non-finite class probabilities: {:?}",
            probabilities
        )));
    }
    let score = sentiment_score(&probabilities);
    debug!(
        positive = probabilities.positive,
        neutral = probabilities.neutral,
        negative = probabilities.negative,
        score,
        "Scored text"
    );

    Ok(Prediction {
        probabilities,
        score,
        label: score_to_label(score),
    })
}

/// ONNX Runtime backed classifier
pub struct OnnxClassifier {
    name: String,
    tokenizer: Tokenizer,
    session: Session,
    labels: LabelMap,
    /// BERT-style graphs declare it, DistilBERT does not
    needs_token_type_ids: bool,
}

impl OnnxClassifier {
    /// Load tokenizer, label map and ONNX session from the configured model directory
    pub fn load(config: &ServiceConfig) -> AppResult<Self> {
        let tokenizer_path = config.tokenizer_path();
        let mut tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            AppError::model_load_failed(format!(
                "Failed to load tokenizer from {}: {}",
                tokenizer_path.display(),
                e
            ))
        })?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_length,
                ..Default::default()
            }))
            .map_err(|e| AppError::model_load_failed(format!("Invalid truncation: {}", e)))?;
        tokenizer.with_padding(None);

        let labels = LabelMap::from_model_dir(&config.model_dir)?;

        let model_path = config.model_path();
        if !model_path.exists() {
            return Err(AppError::model_load_failed(format!(
                "Model file not found: {}",
                model_path.display()
            )));
        }

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(config.intra_threads))
            .and_then(|b| b.commit_from_file(&model_path))
            .map_err(|e| {
                AppError::model_load_failed(format!(
                    "Failed to create ONNX session for {}: {}",
                    model_path.display(),
                    e
                ))
            })?;

        let needs_token_type_ids = session
            .inputs
            .iter()
            .any(|input| input.name == "token_type_ids");

        info!(
            "🧠 Loaded model {} ({} inputs, max_length {})",
            model_path.display(),
            session.inputs.len(),
            config.max_length
        );

        Ok(Self {
            name: config.model_file.clone(),
            tokenizer,
            session,
            labels,
            needs_token_type_ids,
        })
    }

    fn tensor(values: Vec<i64>) -> AppResult<DynValue> {
        let len = values.len();
        let array = Array2::from_shape_vec((1, len), values)
            .map_err(|e| AppError::inference_failed(format!("Bad input shape: {}", e)))?;
        Ok(Tensor::from_array(array)?.into_dyn())
    }
}

impl SentimentClassifier for OnnxClassifier {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, text: &str) -> AppResult<ClassProbabilities> {
        let encoding = self.tokenizer.encode(text, true)?;
        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        let mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| i64::from(m))
            .collect();
        let seq_len = ids.len();

        let mut inputs: Vec<(&str, DynValue)> = vec![
            ("input_ids", Self::tensor(ids)?),
            ("attention_mask", Self::tensor(mask)?),
        ];
        if self.needs_token_type_ids {
            inputs.push(("token_type_ids", Self::tensor(vec![0; seq_len])?));
        }

        let outputs = self.session.run(inputs)?;
        let logits = outputs
            .get("logits")
            .ok_or_else(|| AppError::invalid_output("Model has no 'logits' output"))?
            .try_extract_tensor::<f32>()?;

        let row: Vec<f32> = logits.iter().copied().collect();
        self.labels.apply(&softmax(&row))
    }
}
