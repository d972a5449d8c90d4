//! Model training: fitted handles, library metrics and the timed trainer.

pub mod metrics;
pub mod models;
pub mod trainer;

pub use metrics::{ClassificationMetrics, FitMetrics, RegressionMetrics};
pub use models::{ClassifierModel, ImageClassifier, TabularClassifier, TabularRegressor};
pub use trainer::{Fitted, Trainer};
