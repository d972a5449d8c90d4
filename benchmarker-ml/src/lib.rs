//! # benchmarker-ml: timed training and evaluation of fixed ML tasks
//!
//! This crate measures how long an ML library takes to fit and evaluate four
//! fixed models, and how well they score:
//!
//! 1. **ClassifierData**: image classifier over labeled directories
//! 2. **Animals**: image classifier over labeled directories
//! 3. **PaymentFraud**: tabular classifier on `isFraud`
//! 4. **SteamReviews**: linear regressor on `author.playtime_forever`
//!
//! Fitting, prediction and metrics come from `linfa`. This crate feeds it
//! tables and images as `ndarray` records, times each call and prints a
//! plain-text report.

// Foundation
pub mod config;
pub mod error;
pub mod locale;
pub mod timer;

// Data loading
pub mod data;

// Models
pub mod eval;
pub mod training;

// Run
pub mod benchmark;
pub mod report;
pub mod scenario;

// Re-exports
pub use benchmark::{Benchmark, BenchmarkSummary, IterationRecord};
pub use config::{BenchConfig, load_config};
pub use error::BenchError;
pub use locale::Messages;
pub use report::{ReportFormatter, ScenarioMetrics, ScenarioReport, format_timestamp};
pub use scenario::{Scenario, ScenarioKind, ScenarioRunner, ScenarioState};

use std::io::Write;

/// Run the built-in benchmark described by `config`, writing the report to `out`.
pub fn run_benchmark<W: Write>(
    config: &BenchConfig,
    out: &mut W,
) -> Result<BenchmarkSummary, BenchError> {
    Benchmark::new(config)?.run(out)
}
