//! Classification and regression metrics, computed by the ML library.

use crate::error::BenchError;
use linfa::Dataset;
use linfa::prelude::*;
use ndarray::{Array1, Ix1};
use serde::{Deserialize, Serialize};

/// Classification quality of a model on one dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    /// Fraction of misclassified samples as reported by the library.
    pub classification_error: f64,
}

impl ClassificationMetrics {
    pub fn from_error(classification_error: f64) -> Self {
        if !(0.0..=1.0).contains(&classification_error) {
            tracing::warn!(
                classification_error,
                "Library reported a classification error outside [0, 1]"
            );
        }
        Self {
            classification_error,
        }
    }

    /// `(1 - classification_error) * 100`, passed through unclamped.
    pub fn accuracy_percent(&self) -> f64 {
        accuracy_percent(self.classification_error)
    }
}

/// Accuracy percentage derived from a classification error.
pub fn accuracy_percent(classification_error: f64) -> f64 {
    (1.0 - classification_error) * 100.0
}

/// Regression quality of a model on one dataset, in target units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    pub max_error: f64,
    pub rmse: f64,
}

/// Metrics recorded while fitting: on the rows the model was fitted to and on
/// the rows held out for validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitMetrics<M> {
    pub training: M,
    pub validation: M,
}

/// Score class predictions against the labels of `truth`.
pub fn classification_metrics(
    predictions: &Array1<usize>,
    truth: &Dataset<f64, usize, Ix1>,
) -> Result<ClassificationMetrics, BenchError> {
    if truth.targets.is_empty() {
        return Err(BenchError::evaluation("cannot score an empty dataset"));
    }
    let cm = predictions
        .confusion_matrix(truth)
        .map_err(|e| BenchError::evaluation(e.to_string()))?;
    Ok(ClassificationMetrics::from_error(
        1.0 - f64::from(cm.accuracy()),
    ))
}

/// Score regression predictions against `truth`.
pub fn regression_metrics(
    predictions: &Array1<f64>,
    truth: &Array1<f64>,
) -> Result<RegressionMetrics, BenchError> {
    if truth.is_empty() {
        return Err(BenchError::evaluation("cannot score an empty dataset"));
    }
    let max_error = predictions
        .max_error(truth)
        .map_err(|e| BenchError::evaluation(e.to_string()))?;
    let mse = predictions
        .mean_squared_error(truth)
        .map_err(|e| BenchError::evaluation(e.to_string()))?;
    Ok(RegressionMetrics {
        max_error,
        rmse: mse.sqrt(),
    })
}
