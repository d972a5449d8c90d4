//! Fitted model handles. Each is consumed by exactly one evaluation.

use crate::data::encode::{FeatureEncoder, LabelEncoder, numeric_targets};
use crate::data::images::LabeledImages;
use crate::data::table::DataTable;
use crate::error::BenchError;
use crate::training::metrics::{
    ClassificationMetrics, FitMetrics, RegressionMetrics, classification_metrics,
    regression_metrics,
};
use linfa::Dataset;
use linfa::prelude::*;
use linfa_linear::FittedLinearRegression;
use linfa_logistic::MultiFittedLogisticRegression;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Ix1};

/// Library classifier chosen by the trainer.
pub enum ClassifierModel {
    DecisionTree(DecisionTree<f64, usize>),
    Logistic(MultiFittedLogisticRegression<f64, usize>),
}

impl ClassifierModel {
    pub fn algorithm(&self) -> &'static str {
        match self {
            Self::DecisionTree(_) => "decision_tree",
            Self::Logistic(_) => "logistic_regression",
        }
    }

    pub fn predict(&self, data: &Dataset<f64, usize, Ix1>) -> Array1<usize> {
        match self {
            Self::DecisionTree(model) => model.predict(data),
            Self::Logistic(model) => model.predict(data),
        }
    }

    pub fn score(
        &self,
        data: &Dataset<f64, usize, Ix1>,
    ) -> Result<ClassificationMetrics, BenchError> {
        classification_metrics(&self.predict(data), data)
    }
}

/// Classifier over labeled image directories.
pub struct ImageClassifier {
    pub(crate) labels: Vec<String>,
    pub(crate) model: ClassifierModel,
    pub metrics: FitMetrics<ClassificationMetrics>,
}

impl ImageClassifier {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn algorithm(&self) -> &'static str {
        self.model.algorithm()
    }

    /// Score the classifier on a held-out image set.
    pub fn evaluate(self, data: LabeledImages) -> Result<ClassificationMetrics, BenchError> {
        let targets = data.targets_for_labels(&self.labels);
        let dataset = Dataset::new(data.features, targets);
        self.model.score(&dataset)
    }
}

/// Classifier over a table with a categorical target column.
pub struct TabularClassifier {
    pub(crate) features: FeatureEncoder,
    pub(crate) labels: LabelEncoder,
    pub(crate) model: ClassifierModel,
    pub metrics: FitMetrics<ClassificationMetrics>,
}

impl TabularClassifier {
    pub fn algorithm(&self) -> &'static str {
        self.model.algorithm()
    }

    pub fn class_names(&self) -> Vec<String> {
        self.labels.class_names()
    }

    /// Score the classifier on a held-out table with the same columns.
    pub fn evaluate(self, data: &DataTable) -> Result<ClassificationMetrics, BenchError> {
        let dataset = Dataset::new(self.features.transform(data)?, self.labels.transform(data)?);
        self.model.score(&dataset)
    }
}

/// Linear regressor over a table with a numeric target column.
pub struct TabularRegressor {
    pub(crate) features: FeatureEncoder,
    pub(crate) target: String,
    pub(crate) model: FittedLinearRegression<f64>,
    pub metrics: FitMetrics<RegressionMetrics>,
}

impl TabularRegressor {
    pub fn feature_names(&self) -> Vec<String> {
        self.features.feature_names()
    }

    /// Score the regressor on a held-out table with the same columns.
    ///
    /// Rows without a target value cannot be scored and are skipped.
    pub fn evaluate(self, data: &DataTable) -> Result<RegressionMetrics, BenchError> {
        let data = &data.drop_missing_in(&self.target)?;
        let dataset = Dataset::new(
            self.features.transform(data)?,
            numeric_targets(data, &self.target)?,
        );
        let predictions: Array1<f64> = self.model.predict(&dataset);
        regression_metrics(&predictions, &dataset.targets)
    }
}
