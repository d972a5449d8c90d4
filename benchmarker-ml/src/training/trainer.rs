//! Model fitting. One timed library training call per model family.

use crate::config::{BenchConfig, ClassifierConfig, ValidationConfig};
use crate::data::encode::{FeatureEncoder, LabelEncoder, numeric_targets};
use crate::data::images::LabeledImages;
use crate::data::split::split_indices;
use crate::data::table::DataTable;
use crate::error::BenchError;
use crate::timer::time_secs;
use crate::training::metrics::{
    ClassificationMetrics, FitMetrics, RegressionMetrics, regression_metrics,
};
use crate::training::models::{
    ClassifierModel, ImageClassifier, TabularClassifier, TabularRegressor,
};
use linfa::Dataset;
use linfa::prelude::*;
use linfa_linear::{FittedLinearRegression, LinearRegression};
use linfa_logistic::MultiLogisticRegression;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis, Ix1};

/// A fitted model together with the seconds its training took.
pub struct Fitted<M> {
    pub model: M,
    pub seconds: f64,
}

/// Fits the benchmark's model families.
#[derive(Debug, Clone)]
pub struct Trainer {
    validation: ValidationConfig,
    classifier: ClassifierConfig,
}

impl Trainer {
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            validation: config.validation.clone(),
            classifier: config.classifier.clone(),
        }
    }

    /// Fit an image classifier on labeled images.
    pub fn fit_image_classifier(
        &self,
        data: &LabeledImages,
    ) -> Result<Fitted<ImageClassifier>, BenchError> {
        let (result, seconds) = time_secs(|| -> Result<ImageClassifier, BenchError> {
            let (model, metrics) = self.fit_classifier(
                IMAGE_CANDIDATES,
                data.features.clone(),
                data.targets.clone(),
            )?;
            Ok(ImageClassifier {
                labels: data.labels.clone(),
                model,
                metrics,
            })
        });
        let model = result?;
        tracing::info!(
            algorithm = model.algorithm(),
            labels = model.labels().len(),
            samples = data.sample_count(),
            seconds,
            "Fitted image classifier"
        );
        Ok(Fitted { model, seconds })
    }

    /// Fit a classifier predicting `target` from every other column of `table`.
    pub fn fit_tabular_classifier(
        &self,
        table: &DataTable,
        target: &str,
    ) -> Result<Fitted<TabularClassifier>, BenchError> {
        let (result, seconds) = time_secs(|| -> Result<TabularClassifier, BenchError> {
            let features = FeatureEncoder::fit(table, target)?;
            let labels = LabelEncoder::fit(table, target)?;
            let (model, metrics) = self.fit_classifier(
                TABULAR_CANDIDATES,
                features.transform(table)?,
                labels.transform(table)?,
            )?;
            Ok(TabularClassifier {
                features,
                labels,
                model,
                metrics,
            })
        });
        let model = result?;
        tracing::info!(
            algorithm = model.algorithm(),
            classes = model.class_names().len(),
            rows = table.row_count(),
            seconds,
            "Fitted tabular classifier"
        );
        Ok(Fitted { model, seconds })
    }

    /// Fit a linear regressor predicting `target`, after dropping every row
    /// with a missing value.
    pub fn fit_tabular_regressor(
        &self,
        table: DataTable,
        target: &str,
    ) -> Result<Fitted<TabularRegressor>, BenchError> {
        let (result, seconds) = time_secs(|| -> Result<(TabularRegressor, usize), BenchError> {
            let table = table.drop_missing();
            let features = FeatureEncoder::fit(&table, target)?;
            let records = features.transform(&table)?;
            let targets = numeric_targets(&table, target)?;
            let (model, metrics) = self.fit_regressor(records, targets)?;
            Ok((
                TabularRegressor {
                    features,
                    target: target.to_string(),
                    model,
                    metrics,
                },
                table.row_count(),
            ))
        });
        let (model, rows) = result?;
        tracing::info!(
            features = model.feature_names().len(),
            rows,
            seconds,
            "Fitted tabular regressor"
        );
        Ok(Fitted { model, seconds })
    }

    /// Fit every classifier candidate and keep the one that validates best.
    fn fit_classifier(
        &self,
        candidates: &[Candidate],
        records: Array2<f64>,
        targets: Array1<usize>,
    ) -> Result<(ClassifierModel, FitMetrics<ClassificationMetrics>), BenchError> {
        let holdout = self.holdout(records, targets)?;

        let mut best: Option<(ClassifierModel, FitMetrics<ClassificationMetrics>)> = None;
        let mut failures = Vec::new();
        for &candidate in candidates {
            let model = match self.fit_candidate(candidate, &holdout.train) {
                Ok(model) => model,
                Err(err) => {
                    tracing::warn!(candidate = candidate.name(), error = %err, "Candidate failed to fit");
                    failures.push(format!("{}: {err}", candidate.name()));
                    continue;
                }
            };
            let training = model.score(&holdout.train)?;
            let validation = match &holdout.validation {
                Some(valid) => model.score(valid)?,
                None => training,
            };
            tracing::debug!(
                candidate = candidate.name(),
                training_error = training.classification_error,
                validation_error = validation.classification_error,
                "Scored candidate"
            );
            let better = best.as_ref().is_none_or(|(_, m)| {
                validation.classification_error < m.validation.classification_error
            });
            if better {
                best = Some((
                    model,
                    FitMetrics {
                        training,
                        validation,
                    },
                ));
            }
        }

        best.ok_or_else(|| BenchError::training(failures.join("; ")))
    }

    fn fit_candidate(
        &self,
        candidate: Candidate,
        train: &Dataset<f64, usize, Ix1>,
    ) -> Result<ClassifierModel, BenchError> {
        match candidate {
            Candidate::DecisionTree => DecisionTree::<f64, usize>::params()
                .split_quality(SplitQuality::Gini)
                .max_depth(self.classifier.tree_max_depth)
                .fit(train)
                .map(ClassifierModel::DecisionTree)
                .map_err(|e| BenchError::training(e.to_string())),
            Candidate::Logistic => MultiLogisticRegression::<f64>::new()
                .max_iterations(self.classifier.max_iterations)
                .fit(train)
                .map(ClassifierModel::Logistic)
                .map_err(|e| BenchError::training(e.to_string())),
        }
    }

    fn fit_regressor(
        &self,
        records: Array2<f64>,
        targets: Array1<f64>,
    ) -> Result<(FittedLinearRegression<f64>, FitMetrics<RegressionMetrics>), BenchError> {
        let holdout = self.holdout(records, targets)?;
        let model = LinearRegression::new()
            .fit(&holdout.train)
            .map_err(|e| BenchError::training(e.to_string()))?;

        let training = score_regressor(&model, &holdout.train)?;
        let validation = match &holdout.validation {
            Some(valid) => score_regressor(&model, valid)?,
            None => training,
        };
        Ok((
            model,
            FitMetrics {
                training,
                validation,
            },
        ))
    }

    /// Split off the validation rows. No validation set is produced when the
    /// hold-out rounds to zero rows.
    fn holdout<T: Clone>(
        &self,
        records: Array2<f64>,
        targets: Array1<T>,
    ) -> Result<Holdout<T>, BenchError> {
        let n = targets.len();
        let (valid_idx, train_idx) = split_indices(n, self.validation.fraction, self.validation.seed);
        if train_idx.is_empty() {
            return Err(BenchError::training("no rows to train on"));
        }
        if valid_idx.is_empty() {
            return Ok(Holdout {
                train: Dataset::new(records, targets),
                validation: None,
            });
        }
        Ok(Holdout {
            train: Dataset::new(
                records.select(Axis(0), &train_idx),
                targets.select(Axis(0), &train_idx),
            ),
            validation: Some(Dataset::new(
                records.select(Axis(0), &valid_idx),
                targets.select(Axis(0), &valid_idx),
            )),
        })
    }
}

const IMAGE_CANDIDATES: &[Candidate] = &[Candidate::Logistic];
const TABULAR_CANDIDATES: &[Candidate] = &[Candidate::DecisionTree, Candidate::Logistic];

struct Holdout<T> {
    train: Dataset<f64, T, Ix1>,
    validation: Option<Dataset<f64, T, Ix1>>,
}

#[derive(Debug, Clone, Copy)]
enum Candidate {
    DecisionTree,
    Logistic,
}

impl Candidate {
    fn name(self) -> &'static str {
        match self {
            Self::DecisionTree => "decision_tree",
            Self::Logistic => "logistic_regression",
        }
    }
}

fn score_regressor(
    model: &FittedLinearRegression<f64>,
    data: &Dataset<f64, f64, Ix1>,
) -> Result<RegressionMetrics, BenchError> {
    let predictions: Array1<f64> = model.predict(data);
    regression_metrics(&predictions, &data.targets)
}
