//! Error types for the benchmarker-ml crate.

use thiserror::Error;

/// Top-level error type for benchmark operations.
///
/// Every failure is fatal to a benchmark run: the scenario runner propagates
/// it and the loop stops at the first one.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Evaluation error: {0}")]
    Evaluation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl BenchError {
    pub fn resource_not_found(msg: impl Into<String>) -> Self {
        Self::ResourceNotFound(msg.into())
    }

    pub fn column_not_found(msg: impl Into<String>) -> Self {
        Self::ColumnNotFound(msg.into())
    }

    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset(msg.into())
    }

    pub fn training(msg: impl Into<String>) -> Self {
        Self::Training(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<figment::Error> for BenchError {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}
