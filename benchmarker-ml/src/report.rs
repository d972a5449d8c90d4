//! Line-oriented text report.
//!
//! The report is written incrementally: every line is flushed to the sink as
//! soon as it is known, so a failing scenario leaves the earlier output intact.

use crate::error::BenchError;
use crate::locale::Messages;
use crate::training::metrics::{ClassificationMetrics, FitMetrics, RegressionMetrics};
use chrono::{DateTime, Local};
use std::io::Write;

/// `yyyy-MM-dd HH:mm:ss:Z`, e.g. `2026-10-19 14:03:07:+0200`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S:%z";

/// Render a wall-clock time the way the report prints it.
pub fn format_timestamp(at: &DateTime<Local>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Timings and metrics of one classifier scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationReport {
    pub fit_seconds: f64,
    pub fit: FitMetrics<ClassificationMetrics>,
    pub eval_seconds: f64,
    pub evaluation: ClassificationMetrics,
}

/// Timings and metrics of one regressor scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionReport {
    pub fit_seconds: f64,
    pub fit: FitMetrics<RegressionMetrics>,
    pub eval_seconds: f64,
    pub evaluation: RegressionMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScenarioMetrics {
    Classification(ClassificationReport),
    Regression(RegressionReport),
}

/// Everything one scenario produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReport {
    pub dataset: String,
    pub metrics: ScenarioMetrics,
}

impl ScenarioReport {
    /// Seconds spent fitting plus seconds spent evaluating.
    pub fn measured_secs(&self) -> f64 {
        match &self.metrics {
            ScenarioMetrics::Classification(r) => r.fit_seconds + r.eval_seconds,
            ScenarioMetrics::Regression(r) => r.fit_seconds + r.eval_seconds,
        }
    }
}

/// Writes report sections using one string table.
#[derive(Debug, Clone, Default)]
pub struct ReportFormatter {
    messages: Messages,
}

impl ReportFormatter {
    pub fn new(messages: Messages) -> Self {
        Self { messages }
    }

    pub fn messages(&self) -> &Messages {
        &self.messages
    }

    /// Program banner and start timestamp.
    pub fn write_header<W: Write>(&self, out: &mut W, started_at: &str) -> Result<(), BenchError> {
        let m = &self.messages;
        writeln!(out, "{}", m.program_banner)?;
        writeln!(out, "{}: {started_at}", m.measurement_start)?;
        Ok(())
    }

    pub fn write_iteration_start<W: Write>(
        &self,
        out: &mut W,
        iteration: usize,
    ) -> Result<(), BenchError> {
        let m = &self.messages;
        writeln!(out, "{}", m.separator())?;
        writeln!(out, "{}: {iteration}", m.iteration_start)?;
        writeln!(out, "{}", m.separator())?;
        Ok(())
    }

    /// Dataset header followed by the fit and evaluation blocks of one scenario.
    pub fn write_scenario<W: Write>(
        &self,
        out: &mut W,
        report: &ScenarioReport,
    ) -> Result<(), BenchError> {
        let m = &self.messages;
        writeln!(out, "{}: {}", m.dataset, report.dataset)?;
        writeln!(out, "{}", m.separator())?;
        match &report.metrics {
            ScenarioMetrics::Classification(r) => self.write_classification(out, r)?,
            ScenarioMetrics::Regression(r) => self.write_regression(out, r)?,
        }
        writeln!(out, "{}", m.separator())?;
        out.flush()?;
        Ok(())
    }

    fn write_classification<W: Write>(
        &self,
        out: &mut W,
        r: &ClassificationReport,
    ) -> Result<(), BenchError> {
        let m = &self.messages;
        writeln!(
            out,
            "{}: {} {}",
            m.classifier_creation_time, r.fit_seconds, m.seconds_unit
        )?;
        writeln!(
            out,
            "{}: {}%, {}: {}%",
            m.training_accuracy,
            r.fit.training.accuracy_percent(),
            m.validation_accuracy,
            r.fit.validation.accuracy_percent()
        )?;
        writeln!(out, "{}", m.separator())?;
        writeln!(
            out,
            "{}: {} {}, {}: {}%",
            m.classifier_evaluation_time,
            r.eval_seconds,
            m.seconds_unit,
            m.accuracy,
            r.evaluation.accuracy_percent()
        )?;
        Ok(())
    }

    fn write_regression<W: Write>(
        &self,
        out: &mut W,
        r: &RegressionReport,
    ) -> Result<(), BenchError> {
        let m = &self.messages;
        writeln!(
            out,
            "{}: {} {}",
            m.regressor_creation_time, r.fit_seconds, m.seconds_unit
        )?;
        writeln!(
            out,
            "{}: {}, {}: {}",
            m.worst_training_error,
            r.fit.training.max_error,
            m.worst_validation_error,
            r.fit.validation.max_error
        )?;
        writeln!(
            out,
            "{}: {}, {}: {}",
            m.training_rmse, r.fit.training.rmse, m.validation_rmse, r.fit.validation.rmse
        )?;
        writeln!(out, "{}", m.separator())?;
        writeln!(
            out,
            "{}: {} {}, {}: {}",
            m.regressor_evaluation_time,
            r.eval_seconds,
            m.seconds_unit,
            m.worst_evaluation_error,
            r.evaluation.max_error
        )?;
        writeln!(out, "{}: {}", m.evaluation_rmse, r.evaluation.rmse)?;
        Ok(())
    }

    pub fn write_iteration_total<W: Write>(
        &self,
        out: &mut W,
        iteration: usize,
        seconds: f64,
    ) -> Result<(), BenchError> {
        let m = &self.messages;
        writeln!(
            out,
            "{} {iteration}: {seconds} {}",
            m.iteration_total, m.seconds_unit
        )?;
        out.flush()?;
        Ok(())
    }

    /// Grand total, ending timestamp and closing line.
    pub fn write_footer<W: Write>(
        &self,
        out: &mut W,
        total_seconds: f64,
        ended_at: &str,
    ) -> Result<(), BenchError> {
        let m = &self.messages;
        writeln!(
            out,
            "{}: {total_seconds} {}",
            m.measurement_total, m.seconds_unit
        )?;
        writeln!(out, "{}: {ended_at}", m.ending_timestamp)?;
        writeln!(out, "{}", m.program_finished)?;
        out.flush()?;
        Ok(())
    }
}
