use std::path::Path;
use std::sync::Arc;

use image::DynamicImage;
use log::{info, warn};
use shared::{ClassLabel, ClassScore};

use super::preprocess::{InputTensor, decode_image, preprocess_image};

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("model error: {0}")]
    Model(String),
}

/// The single prediction entry point of a loaded model.
pub trait Classifier: Send + Sync {
    /// Returns one raw score per class, in table order.
    fn predict(&self, input: &InputTensor) -> Result<Vec<f32>, InferenceError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: ClassLabel,
    pub confidence: f32,
    pub distribution: Vec<(ClassLabel, f32)>,
}

impl Classification {
    pub fn scores(&self) -> Vec<ClassScore> {
        self.distribution
            .iter()
            .map(|&(label, probability)| ClassScore { label, probability })
            .collect()
    }
}

#[derive(Clone)]
pub struct Model {
    classifier: Arc<dyn Classifier>,
}

impl Model {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Load the model artifact, picking the runtime from its extension.
    pub fn load(model_path: &Path) -> Result<Self, InferenceError> {
        if !model_path.is_file() {
            return Err(InferenceError::ModelUnavailable(format!(
                "model file not found: {}",
                model_path.display()
            )));
        }

        let extension = model_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        let classifier: Arc<dyn Classifier> = match extension.as_str() {
            "onnx" => Arc::new(super::onnx::OnnxModel::load(model_path)?),
            #[cfg(feature = "torch")]
            "pt" | "ts" => Arc::new(super::torch::TorchModel::load(model_path)?),
            #[cfg(not(feature = "torch"))]
            "pt" | "ts" => {
                return Err(InferenceError::ModelUnavailable(format!(
                    "{} is a TorchScript module but the backend was built without the `torch` feature",
                    model_path.display()
                )));
            }
            other => {
                return Err(InferenceError::ModelUnavailable(format!(
                    "unsupported model format '{}' for {}",
                    other,
                    model_path.display()
                )));
            }
        };

        info!("Loaded model from {}", model_path.display());
        Ok(Self { classifier })
    }

    /// Classify one encoded image with a single call to the model.
    pub fn classify(&self, image: &[u8]) -> Result<Classification, InferenceError> {
        let decoded = decode_image(image)?;
        self.classify_image(&decoded)
    }

    pub fn classify_image(&self, image: &DynamicImage) -> Result<Classification, InferenceError> {
        let tensor = preprocess_image(image)?;
        let raw = self.classifier.predict(&tensor)?;
        calculate_result(&raw)
    }
}

/// Turn one raw output vector into label, confidence and distribution.
pub fn calculate_result(raw: &[f32]) -> Result<Classification, InferenceError> {
    if raw.len() != ClassLabel::ALL.len() {
        return Err(InferenceError::Model(format!(
            "model returned {} scores, expected {}",
            raw.len(),
            ClassLabel::ALL.len()
        )));
    }
    if raw.iter().any(|v| !v.is_finite()) {
        return Err(InferenceError::Model("model returned non-finite scores".into()));
    }

    let probabilities = normalize_scores(raw);

    let (index, confidence) = probabilities
        .iter()
        .copied()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .ok_or_else(|| InferenceError::Model("empty output".into()))?;

    let label = ClassLabel::from_index(index)
        .ok_or_else(|| InferenceError::Model(format!("class index {} out of range", index)))?;

    let distribution = ClassLabel::ALL.into_iter().zip(probabilities).collect();

    Ok(Classification {
        label,
        confidence,
        distribution,
    })
}

/// Softmax the scores unless they already form a probability vector. Values
/// that all sit in [0, 1] without summing to 1 (independent sigmoid outputs)
/// are softmaxed too, so the distribution always sums to 1; the argmax is kept
/// but the confidence is lower than the raw maximum.
fn normalize_scores(raw: &[f32]) -> Vec<f32> {
    let in_range = raw.iter().all(|v| (0.0..=1.0).contains(v));
    let sum: f32 = raw.iter().sum();
    if in_range && (sum - 1.0).abs() <= 1e-3 {
        return raw.to_vec();
    }

    warn!("Model output is not a probability vector (sum {}), applying softmax", sum);
    let max = raw.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = raw.iter().map(|v| (v - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|v| v / total).collect()
}
