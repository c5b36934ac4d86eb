use std::path::Path;

use ndarray::Array4;
use tract_onnx::prelude::*;
use tracing::{debug, error, info};

use crate::config::PreprocessConfig;
use crate::error::{ClassifyError, Result};
use crate::labels::{label_for, CLASS_LABELS};
use crate::models::{Prediction, PredictionResponse};

const DISTRIBUTION_TOLERANCE: f32 = 1e-3;

pub struct Predictor {
    model: TypedRunnableModel<TypedModel>,
}

impl Predictor {
    /// Load an ONNX classifier and fix its input to the preprocessing shape.
    pub fn load(path: &Path, config: &PreprocessConfig) -> Result<Self> {
        let load_error = |stage: &str, e: TractError| {
            error!("Failed to {} ONNX model {}: {:#}", stage, path.display(), e);
            ClassifyError::ModelLoad {
                path: path.to_path_buf(),
                reason: format!("{stage}: {e:#}"),
            }
        };

        let shape = config.input_shape();
        info!(path = %path.display(), ?shape, "loading model");

        let model = tract_onnx::onnx()
            .model_for_path(path)
            .map_err(|e| load_error("load", e))?
            .with_input_fact(0, f32::fact(shape).into())
            .map_err(|e| load_error("configure", e))?
            .into_optimized()
            .map_err(|e| load_error("optimize", e))?
            .into_runnable()
            .map_err(|e| load_error("initialize", e))?;

        Ok(Self { model })
    }

    /// Raw output scores for a single preprocessed image.
    pub fn scores(&self, input: Array4<f32>) -> Result<Vec<f32>> {
        let tensor = Tensor::from(input);
        let result = self.model.run(tvec!(tensor.into())).map_err(|e| {
            error!("Model inference failed: {:#}", e);
            ClassifyError::Inference(format!("{e:#}"))
        })?;

        let output = result
            .first()
            .ok_or(ClassifyError::EmptyOutput)?
            .to_array_view::<f32>()
            .map_err(|e| ClassifyError::Inference(format!("{e:#}")))?;

        Ok(output.iter().copied().collect())
    }

    pub fn predict(&self, input: Array4<f32>, top_k: usize) -> Result<PredictionResponse> {
        let scores = self.scores(input)?;
        classify_scores(&scores, top_k)
    }
}

/// Turn one row of class scores into the labelled top-`top_k` predictions.
pub fn classify_scores(scores: &[f32], top_k: usize) -> Result<PredictionResponse> {
    if scores.is_empty() {
        return Err(ClassifyError::EmptyOutput);
    }
    if scores.len() != CLASS_LABELS.len() {
        error!(
            "Model output has {} classes, expected {}",
            scores.len(),
            CLASS_LABELS.len()
        );
        return Err(ClassifyError::LabelMismatch {
            outputs: scores.len(),
            labels: CLASS_LABELS.len(),
        });
    }

    let probabilities = to_probabilities(scores);
    if !probabilities.iter().any(|p| p.is_finite()) {
        error!("Model output contains no finite scores");
        return Err(ClassifyError::Inference(
            "model output contains no finite scores".to_string(),
        ));
    }

    let mut ranked = rank(&probabilities, top_k.max(1))
        .into_iter()
        .filter_map(|index| {
            label_for(index).map(|label| Prediction {
                ingredient: label.to_string(),
                confidence: f64::from(probabilities[index] * 100.0),
            })
        });

    let top = ranked.next().ok_or(ClassifyError::EmptyOutput)?;
    info!(ingredient = %top.ingredient, confidence = top.confidence, "predicted");

    Ok(PredictionResponse {
        top,
        alternatives: ranked.collect(),
    })
}

/// Pass through scores that already form a distribution, softmax anything else.
pub fn to_probabilities(scores: &[f32]) -> Vec<f32> {
    let in_range = scores.iter().all(|s| (0.0..=1.0).contains(s));
    let sum: f32 = scores.iter().sum();
    if in_range && (sum - 1.0).abs() <= DISTRIBUTION_TOLERANCE {
        return scores.to_vec();
    }

    debug!(sum, "scores are not a distribution, applying softmax");
    let max = scores
        .iter()
        .copied()
        .filter(|s| !s.is_nan())
        .fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let total: f32 = exps.iter().filter(|e| !e.is_nan()).sum();
    exps.into_iter().map(|e| e / total).collect()
}

/// Indices of the `top_k` highest probabilities, first index wins ties, NaN last.
pub fn rank(probabilities: &[f32], top_k: usize) -> Vec<usize> {
    let key = |i: usize| {
        let p = probabilities[i];
        if p.is_nan() {
            f32::NEG_INFINITY
        } else {
            p
        }
    };

    let mut indices: Vec<usize> = (0..probabilities.len()).collect();
    indices.sort_by(|&a, &b| key(b).total_cmp(&key(a)));
    indices.truncate(top_k);
    indices
}
