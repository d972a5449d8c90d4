//! One timed library evaluation per model family.

use crate::data::images::LabeledImages;
use crate::data::table::DataTable;
use crate::error::BenchError;
use crate::timer::time_secs;
use crate::training::metrics::{ClassificationMetrics, RegressionMetrics};
use crate::training::models::{ImageClassifier, TabularClassifier, TabularRegressor};

/// Metrics from one evaluation together with the seconds it took.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluated<M> {
    pub metrics: M,
    pub seconds: f64,
}

/// Scores fitted models on held-out datasets.
///
/// Each model is consumed, so a handle can be evaluated only once.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Self
    }

    pub fn evaluate_image_classifier(
        &self,
        model: ImageClassifier,
        data: LabeledImages,
    ) -> Result<Evaluated<ClassificationMetrics>, BenchError> {
        let samples = data.sample_count();
        let (result, seconds) = time_secs(|| model.evaluate(data));
        let metrics = result?;
        tracing::info!(
            samples,
            accuracy = metrics.accuracy_percent(),
            seconds,
            "Evaluated image classifier"
        );
        Ok(Evaluated { metrics, seconds })
    }

    pub fn evaluate_tabular_classifier(
        &self,
        model: TabularClassifier,
        data: &DataTable,
    ) -> Result<Evaluated<ClassificationMetrics>, BenchError> {
        let (result, seconds) = time_secs(|| model.evaluate(data));
        let metrics = result?;
        tracing::info!(
            rows = data.row_count(),
            accuracy = metrics.accuracy_percent(),
            seconds,
            "Evaluated tabular classifier"
        );
        Ok(Evaluated { metrics, seconds })
    }

    pub fn evaluate_tabular_regressor(
        &self,
        model: TabularRegressor,
        data: &DataTable,
    ) -> Result<Evaluated<RegressionMetrics>, BenchError> {
        let (result, seconds) = time_secs(|| model.evaluate(data));
        let metrics = result?;
        tracing::info!(
            rows = data.row_count(),
            max_error = metrics.max_error,
            rmse = metrics.rmse,
            seconds,
            "Evaluated tabular regressor"
        );
        Ok(Evaluated { metrics, seconds })
    }
}
