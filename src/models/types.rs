//! Core data types shared by the service, the scorer and the demo frontend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::errors::{AppError, AppResult, ErrorCode};

/// Coarse sentiment class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    /// All labels in winner tie-break order
    pub const ALL: [SentimentLabel; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SentimentLabel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "negative" => Ok(Self::Negative),
            other => Err(AppError::bad_request(format!(
                "Gold label must be positive/neutral/negative. Got: '{}'",
                other
            ))),
        }
    }
}

/// Softmax probabilities mapped onto named classes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ClassProbabilities {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl ClassProbabilities {
    pub fn get(&self, label: SentimentLabel) -> f64 {
        match label {
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Negative => self.negative,
        }
    }

    pub fn is_finite(&self) -> bool {
        SentimentLabel::ALL.iter().all(|&l| self.get(l).is_finite())
    }

    /// Class with the highest probability; first of positive/neutral/negative on ties
    pub fn winner(&self) -> SentimentLabel {
        let mut best = SentimentLabel::Positive;
        for label in SentimentLabel::ALL {
            if self.get(label) > self.get(best) {
                best = label;
            }
        }
        best
    }
}

/// Model output index -> sentiment label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<SentimentLabel>,
}

impl Default for LabelMap {
    /// `lxyuan/distilbert-base-multilingual-cased-sentiments-student` layout
    fn default() -> Self {
        Self {
            labels: vec![
                SentimentLabel::Positive,
                SentimentLabel::Neutral,
                SentimentLabel::Negative,
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelConfigFile {
    #[serde(default)]
    id2label: Option<std::collections::HashMap<String, String>>,
}

impl LabelMap {
    /// Build from an index-ordered label list; each label must occur exactly once
    pub fn new(labels: Vec<SentimentLabel>) -> AppResult<Self> {
        let complete = labels.len() == 3
            && SentimentLabel::ALL
                .iter()
                .all(|l| labels.iter().filter(|x| *x == l).count() == 1);
        if !complete {
            return Err(AppError::new(
                ErrorCode::ModelLoadFailed,
                format!(
                    "Label map must contain positive, neutral and negative exactly once, got {:?}",
                    labels
                ),
            ));
        }
        Ok(Self { labels })
    }

    /// Parse the `id2label` table of a HuggingFace `config.json`
    pub fn from_config_json(json: &str) -> AppResult<Self> {
        let config: ModelConfigFile = serde_json::from_str(json).map_err(|e| {
            AppError::with_source(
                ErrorCode::ModelLoadFailed,
                format!("Malformed model config: {}", e),
                e,
            )
        })?;
        let Some(id2label) = config.id2label else {
            return Ok(Self::default());
        };

        let mut indexed = Vec::with_capacity(id2label.len());
        for (id, name) in id2label {
            let index: usize = id.parse().map_err(|_| {
                AppError::model_load_failed(format!("id2label key {:?} is not an index", id))
            })?;
            let label = name.to_lowercase().parse::<SentimentLabel>().map_err(|_| {
                AppError::model_load_failed(format!("Unsupported model label {:?}", name))
            })?;
            indexed.push((index, label));
        }
        indexed.sort_by_key(|(index, _)| *index);

        if indexed.iter().enumerate().any(|(pos, (index, _))| pos != *index) {
            return Err(AppError::model_load_failed(
                "id2label indices must be contiguous from 0",
            ));
        }

        Self::new(indexed.into_iter().map(|(_, label)| label).collect())
    }

    /// Load `config.json` from a model directory, falling back to the default layout
    pub fn from_model_dir(dir: &Path) -> AppResult<Self> {
        let path = dir.join("config.json");
        if !path.exists() {
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(&path).map_err(|e| {
            AppError::with_source(
                ErrorCode::ModelLoadFailed,
                format!("Failed to read {}", path.display()),
                e,
            )
        })?;
        Self::from_config_json(&json).map_err(|mut e| {
            e.message = format!("{}: {}", path.display(), e.message);
            e
        })
    }

    /// Map a probability vector (model output order) onto named classes
    pub fn apply(&self, probs: &[f64]) -> AppResult<ClassProbabilities> {
        if probs.len() != self.labels.len() {
            return Err(AppError::invalid_output(format!(
                "Expected {} class scores, model returned {}",
                self.labels.len(),
                probs.len()
            )));
        }

        let mut out = ClassProbabilities::default();
        for (label, p) in self.labels.iter().zip(probs) {
            match label {
                SentimentLabel::Positive => out.positive = *p,
                SentimentLabel::Neutral => out.neutral = *p,
                SentimentLabel::Negative => out.negative = *p,
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parse_and_display() {
        assert_eq!("neutral".parse::<SentimentLabel>().unwrap(), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::Negative.to_string(), "negative");

        let err = "Positive".parse::<SentimentLabel>().unwrap_err();
        assert!(err.message.ends_with("Got: 'Positive'"));
    }

    #[test]
    fn test_winner_tie_break() {
        let probs = ClassProbabilities {
            positive: 0.4,
            neutral: 0.4,
            negative: 0.2,
        };
        assert_eq!(probs.winner(), SentimentLabel::Positive);

        let probs = ClassProbabilities {
            positive: 0.2,
            neutral: 0.4,
            negative: 0.4,
        };
        assert_eq!(probs.winner(), SentimentLabel::Neutral);
    }

    #[test]
    fn test_label_map_from_config() {
        let json = r#"{"id2label": {"0": "NEGATIVE", "1": "neutral", "2": "Positive"}, "dim": 768}"#;
        let map = LabelMap::from_config_json(json).unwrap();
        let probs = map.apply(&[0.7, 0.2, 0.1]).unwrap();
        assert_eq!(probs.negative, 0.7);
        assert_eq!(probs.neutral, 0.2);
        assert_eq!(probs.positive, 0.1);
    }

    #[test]
    fn test_label_map_defaults_without_id2label() {
        let map = LabelMap::from_config_json(r#"{"model_type": "distilbert"}"#).unwrap();
        assert_eq!(map, LabelMap::default());
    }

    #[test]
    fn test_label_map_rejects_incomplete() {
        let json = r#"{"id2label": {"0": "positive", "1": "positive", "2": "negative"}}"#;
        assert!(LabelMap::from_config_json(json).is_err());

        let json = r#"{"id2label": {"0": "positive", "2": "neutral", "3": "negative"}}"#;
        assert!(LabelMap::from_config_json(json).is_err());
    }

    #[test]
    fn test_label_map_from_model_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(LabelMap::from_model_dir(dir.path()).unwrap(), LabelMap::default());

        let config = dir.path().join("config.json");
        std::fs::write(
            &config,
            r#"{"id2label": {"0": "negative", "1": "neutral", "2": "positive"}}"#,
        )
        .unwrap();
        let map = LabelMap::from_model_dir(dir.path()).unwrap();
        assert_eq!(map.apply(&[0.6, 0.3, 0.1]).unwrap().negative, 0.6);
    }

    #[test]
    fn test_malformed_model_config_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, "{\"id2label\": ").unwrap();

        let err = LabelMap::from_model_dir(dir.path()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelLoadFailed);
        assert!(err.message.contains(&config.display().to_string()));
        assert!(err.message.contains("Malformed model config"));
    }

    #[test]
    fn test_label_map_shape_mismatch() {
        let err = LabelMap::default().apply(&[1.0, 0.0]).unwrap_err();
        assert_eq!(err.code, ErrorCode::ModelInvalidOutput);
    }
}
