//! Linear classifier artifact
//!
//! A multinomial linear model: one weight row per class, logits passed
//! through a numerically stable softmax. The reported confidence is the
//! maximum of the resulting distribution.

use crate::bundle::{ClassOutcome, ClassifierModel};
use serde::{Deserialize, Serialize};
use textcat_core::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    /// One row of feature weights per class
    weights: Vec<Vec<f32>>,

    /// One bias per class
    bias: Vec<f32>,
}

impl LinearClassifier {
    /// Construct a classifier from raw weights and biases.
    pub fn new(weights: Vec<Vec<f32>>, bias: Vec<f32>) -> Self {
        Self { weights, bias }
    }

    /// Check internal consistency after deserialization
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.weights.len() < 2 {
            return Err(format!(
                "expected at least 2 classes, found {}",
                self.weights.len()
            ));
        }
        if self.bias.len() != self.weights.len() {
            return Err(format!(
                "bias length {} does not match class count {}",
                self.bias.len(),
                self.weights.len()
            ));
        }
        let dimension = self.weights[0].len();
        if dimension == 0 {
            return Err("zero-dimensional weight rows".to_string());
        }
        if self.weights.iter().any(|row| row.len() != dimension) {
            return Err("weight rows have inconsistent dimensions".to_string());
        }
        Ok(())
    }

    /// Feature dimension the model expects
    pub fn dimension(&self) -> usize {
        self.weights.first().map_or(0, |row| row.len())
    }
}

impl ClassifierModel for LinearClassifier {
    fn predict(&self, features: &[f32]) -> Result<ClassOutcome> {
        let dimension = self.dimension();
        if features.len() != dimension {
            return Err(Error::prediction(format!(
                "feature vector length {} does not match model dimension {}",
                features.len(),
                dimension
            )));
        }

        let logits: Vec<f32> = self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, b)| row.iter().zip(features).map(|(w, x)| w * x).sum::<f32>() + b)
            .collect();

        // Softmax with max subtraction for numerical stability
        let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let exps: Vec<f32> = logits.iter().map(|l| (l - max_logit).exp()).collect();
        let total: f32 = exps.iter().sum();

        let (class_id, confidence) = exps
            .iter()
            .map(|e| e / total)
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .ok_or_else(|| Error::prediction("empty probability distribution"))?;

        Ok(ClassOutcome {
            class_id,
            confidence,
        })
    }

    fn num_classes(&self) -> usize {
        self.weights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_class() -> LinearClassifier {
        // Class 0 fires on feature 0, class 1 on feature 1
        LinearClassifier::new(vec![vec![2.0, -1.0], vec![-1.0, 2.0]], vec![0.0, 0.0])
    }

    #[test]
    fn predicts_argmax_class() {
        let model = two_class();

        let outcome = model.predict(&[1.0, 0.0]).unwrap();
        assert_eq!(outcome.class_id, 0);

        let outcome = model.predict(&[0.0, 1.0]).unwrap();
        assert_eq!(outcome.class_id, 1);
    }

    #[test]
    fn confidence_is_max_probability_within_bounds() {
        let model = two_class();
        let outcome = model.predict(&[1.0, 0.0]).unwrap();

        assert!(outcome.confidence > 0.5);
        assert!(outcome.confidence <= 1.0);
    }

    #[test]
    fn uniform_input_splits_probability() {
        let model = two_class();
        let outcome = model.predict(&[1.0, 1.0]).unwrap();
        assert!((outcome.confidence - 0.5).abs() < 1e-5);
    }

    #[test]
    fn dimension_mismatch_is_prediction_error() {
        let model = two_class();
        let err = model.predict(&[1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, Error::Prediction(_)));
        assert!(err.to_string().contains("dimension"));
    }

    #[test]
    fn large_logits_stay_finite() {
        let model = LinearClassifier::new(
            vec![vec![1000.0, 0.0], vec![0.0, 1000.0]],
            vec![0.0, 0.0],
        );
        let outcome = model.predict(&[1.0, 0.0]).unwrap();
        assert!(outcome.confidence.is_finite());
        assert!(outcome.confidence <= 1.0);
    }

    #[test]
    fn validate_rejects_single_class() {
        let model = LinearClassifier::new(vec![vec![1.0]], vec![0.0]);
        assert!(model.validate().is_err());
    }

    #[test]
    fn validate_rejects_ragged_rows() {
        let model = LinearClassifier::new(vec![vec![1.0, 2.0], vec![1.0]], vec![0.0, 0.0]);
        assert!(model.validate().is_err());
    }
}
