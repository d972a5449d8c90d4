//! The benchmark scenarios and the runner that executes one of them.
//!
//! A scenario moves through `LoadingData -> Training -> Evaluating ->
//! Reporting -> Done`, strictly in that order. Any error aborts it and is
//! returned to the caller before its report is written.

use crate::config::{BenchConfig, SplitConfig};
use crate::data::images::LabeledImages;
use crate::data::resources::ResourceBundle;
use crate::data::table::DataTable;
use crate::error::BenchError;
use crate::eval::evaluator::Evaluator;
use crate::report::{
    ClassificationReport, RegressionReport, ReportFormatter, ScenarioMetrics, ScenarioReport,
};
use crate::training::trainer::Trainer;
use std::fmt;
use std::io::Write;

/// Subdirectory of an image resource holding the training images.
pub const TRAINING_DIR: &str = "Training";
/// Subdirectory of an image resource holding the evaluation images.
pub const TESTING_DIR: &str = "Testing";

const CSV_EXTENSION: &str = "csv";
const CSV_DELIMITER: u8 = b',';

const PAYMENT_FRAUD_COLUMNS: &[&str] = &[
    "step",
    "type",
    "amount",
    "oldbalanceOrg",
    "newbalanceOrig",
    "oldbalanceDest",
    "newbalanceDest",
    "isFlaggedFraud",
    "isFraud",
];

const STEAM_REVIEWS_COLUMNS: &[&str] = &[
    "language",
    "recommended",
    "votes_helpful",
    "votes_funny",
    "weighted_vote_score",
    "comment_count",
    "steam_purchase",
    "received_for_free",
    "written_during_early_access",
    "author.num_games_owned",
    "author.num_reviews",
    "author.playtime_forever",
    "author.playtime_last_two_weeks",
    "author.playtime_at_review",
    "author.last_played",
];

/// What a scenario trains and how its data is shaped.
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioKind {
    /// `<resource>/Training` and `<resource>/Testing`, one subdirectory per label.
    ImageClassifier,
    /// `<resource>.csv`, split into test and train rows.
    TabularClassifier {
        features: Vec<String>,
        target: String,
        split: SplitConfig,
    },
    /// `<resource>.csv`, split into test and train rows.
    TabularRegressor {
        features: Vec<String>,
        target: String,
        split: SplitConfig,
    },
}

/// One measured task.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    /// Name printed in the report's dataset header.
    pub name: String,
    /// Directory name (images) or file stem (tables) inside the bundle.
    pub resource: String,
    pub kind: ScenarioKind,
}

impl Scenario {
    pub fn image_classifier(name: impl Into<String>, resource: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
            kind: ScenarioKind::ImageClassifier,
        }
    }

    pub fn tabular_classifier(
        name: impl Into<String>,
        resource: impl Into<String>,
        features: &[&str],
        target: impl Into<String>,
        split: SplitConfig,
    ) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
            kind: ScenarioKind::TabularClassifier {
                features: features.iter().map(|c| c.to_string()).collect(),
                target: target.into(),
                split,
            },
        }
    }

    pub fn tabular_regressor(
        name: impl Into<String>,
        resource: impl Into<String>,
        features: &[&str],
        target: impl Into<String>,
        split: SplitConfig,
    ) -> Self {
        Self {
            name: name.into(),
            resource: resource.into(),
            kind: ScenarioKind::TabularRegressor {
                features: features.iter().map(|c| c.to_string()).collect(),
                target: target.into(),
                split,
            },
        }
    }

    /// The four scenarios of a benchmark iteration, in run order.
    pub fn builtin(split: &SplitConfig) -> Vec<Self> {
        vec![
            Self::image_classifier("ClassifierData", "ClassifierData"),
            Self::image_classifier("Animals", "Animals"),
            Self::tabular_classifier(
                "PaymentFraud",
                "PaymentFraud",
                PAYMENT_FRAUD_COLUMNS,
                "isFraud",
                split.clone(),
            ),
            Self::tabular_regressor(
                "SteamReviews",
                "SteamReviewsCleaned",
                STEAM_REVIEWS_COLUMNS,
                "author.playtime_forever",
                split.clone(),
            ),
        ]
    }
}

/// Progress of a running scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioState {
    LoadingData,
    Training,
    Evaluating,
    Reporting,
    Done,
}

impl fmt::Display for ScenarioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadingData => write!(f, "loading_data"),
            Self::Training => write!(f, "training"),
            Self::Evaluating => write!(f, "evaluating"),
            Self::Reporting => write!(f, "reporting"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Executes scenarios against one resource bundle.
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    bundle: ResourceBundle,
    trainer: Trainer,
    evaluator: Evaluator,
    thumbnail_side: u32,
}

impl ScenarioRunner {
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            bundle: ResourceBundle::new(config.resources_dir.clone()),
            trainer: Trainer::new(config),
            evaluator: Evaluator::new(),
            thumbnail_side: config.image.thumbnail_side,
        }
    }

    pub fn bundle(&self) -> &ResourceBundle {
        &self.bundle
    }

    /// Run one scenario to completion and write its report section.
    pub fn run<W: Write>(
        &self,
        scenario: &Scenario,
        formatter: &ReportFormatter,
        out: &mut W,
    ) -> Result<ScenarioReport, BenchError> {
        tracing::info!(scenario = %scenario.name, "Starting scenario");
        let metrics = match &scenario.kind {
            ScenarioKind::ImageClassifier => self.run_image_classifier(scenario)?,
            ScenarioKind::TabularClassifier {
                features,
                target,
                split,
            } => self.run_tabular_classifier(scenario, features, target, split)?,
            ScenarioKind::TabularRegressor {
                features,
                target,
                split,
            } => self.run_tabular_regressor(scenario, features, target, split)?,
        };
        let report = ScenarioReport {
            dataset: scenario.name.clone(),
            metrics,
        };

        transition(scenario, ScenarioState::Reporting);
        formatter.write_scenario(out, &report)?;
        transition(scenario, ScenarioState::Done);
        Ok(report)
    }

    fn run_image_classifier(&self, scenario: &Scenario) -> Result<ScenarioMetrics, BenchError> {
        transition(scenario, ScenarioState::LoadingData);
        let training_dir = self.bundle.subdirectory(&scenario.resource, TRAINING_DIR)?;
        let testing_dir = self.bundle.subdirectory(&scenario.resource, TESTING_DIR)?;
        let training = LabeledImages::from_labeled_directories(&training_dir, self.thumbnail_side)?;
        let testing = LabeledImages::from_labeled_directories(&testing_dir, self.thumbnail_side)?;

        transition(scenario, ScenarioState::Training);
        let fitted = self.trainer.fit_image_classifier(&training)?;
        let fit = fitted.model.metrics;

        transition(scenario, ScenarioState::Evaluating);
        let evaluated = self
            .evaluator
            .evaluate_image_classifier(fitted.model, testing)?;

        Ok(ScenarioMetrics::Classification(ClassificationReport {
            fit_seconds: fitted.seconds,
            fit,
            eval_seconds: evaluated.seconds,
            evaluation: evaluated.metrics,
        }))
    }

    fn run_tabular_classifier(
        &self,
        scenario: &Scenario,
        features: &[String],
        target: &str,
        split: &SplitConfig,
    ) -> Result<ScenarioMetrics, BenchError> {
        transition(scenario, ScenarioState::LoadingData);
        let (test, train) = self.load_split_table(scenario, features, split)?;

        transition(scenario, ScenarioState::Training);
        let fitted = self.trainer.fit_tabular_classifier(&train, target)?;
        let fit = fitted.model.metrics;

        transition(scenario, ScenarioState::Evaluating);
        let evaluated = self
            .evaluator
            .evaluate_tabular_classifier(fitted.model, &test)?;

        Ok(ScenarioMetrics::Classification(ClassificationReport {
            fit_seconds: fitted.seconds,
            fit,
            eval_seconds: evaluated.seconds,
            evaluation: evaluated.metrics,
        }))
    }

    fn run_tabular_regressor(
        &self,
        scenario: &Scenario,
        features: &[String],
        target: &str,
        split: &SplitConfig,
    ) -> Result<ScenarioMetrics, BenchError> {
        transition(scenario, ScenarioState::LoadingData);
        let (test, train) = self.load_split_table(scenario, features, split)?;

        transition(scenario, ScenarioState::Training);
        let fitted = self.trainer.fit_tabular_regressor(train, target)?;
        let fit = fitted.model.metrics;

        transition(scenario, ScenarioState::Evaluating);
        let evaluated = self
            .evaluator
            .evaluate_tabular_regressor(fitted.model, &test)?;

        Ok(ScenarioMetrics::Regression(RegressionReport {
            fit_seconds: fitted.seconds,
            fit,
            eval_seconds: evaluated.seconds,
            evaluation: evaluated.metrics,
        }))
    }

    /// Read the scenario's table, keep the allow-listed columns and return
    /// `(test, train)`.
    fn load_split_table(
        &self,
        scenario: &Scenario,
        features: &[String],
        split: &SplitConfig,
    ) -> Result<(DataTable, DataTable), BenchError> {
        let path = self.bundle.file(&scenario.resource, CSV_EXTENSION)?;
        let table = DataTable::from_csv_path(&path, CSV_DELIMITER)?.select(features)?;
        let (test, train) = table.random_split(split.test_fraction, split.seed);
        tracing::debug!(
            scenario = %scenario.name,
            test_rows = test.row_count(),
            train_rows = train.row_count(),
            "Split table"
        );
        Ok((test, train))
    }
}

fn transition(scenario: &Scenario, state: ScenarioState) {
    tracing::debug!(scenario = %scenario.name, %state, "Scenario state");
}
