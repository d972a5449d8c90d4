//! The benchmark loop: every scenario, repeated for a number of iterations.

use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::report::{ReportFormatter, ScenarioReport, format_timestamp};
use crate::scenario::{Scenario, ScenarioRunner};
use crate::timer::Stopwatch;
use chrono::Local;
use std::io::Write;

/// The scenario reports of one pass and how long the pass took.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    /// 1-based iteration number.
    pub iteration: usize,
    pub scenarios: Vec<ScenarioReport>,
    pub total_secs: f64,
}

/// Outcome of a completed benchmark run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkSummary {
    pub iterations: Vec<IterationRecord>,
    pub total_secs: f64,
    pub started_at: String,
    pub ended_at: String,
}

/// A benchmark run.
///
/// The iteration counter and the run clock live here rather than in globals,
/// so one value describes one run.
#[derive(Debug, Clone)]
pub struct Benchmark {
    iterations: usize,
    scenarios: Vec<Scenario>,
    runner: ScenarioRunner,
    formatter: ReportFormatter,
    iteration: usize,
    clock: Option<Stopwatch>,
}

impl Benchmark {
    /// Build a run of the built-in scenarios from a validated configuration.
    pub fn new(config: &BenchConfig) -> Result<Self, BenchError> {
        config.validate()?;
        Ok(Self {
            iterations: config.iterations,
            scenarios: Scenario::builtin(&config.split),
            runner: ScenarioRunner::new(config),
            formatter: ReportFormatter::default(),
            iteration: 0,
            clock: None,
        })
    }

    /// Replace the scenarios run in each iteration.
    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// The iteration in progress, or the last one started. Zero before `run`.
    pub fn current_iteration(&self) -> usize {
        self.iteration
    }

    /// Seconds since `run` started, if it has.
    pub fn elapsed_secs(&self) -> Option<f64> {
        self.clock.map(|c| c.elapsed_secs())
    }

    /// Run every iteration, writing the report to `out`.
    ///
    /// Stops at the first failing scenario and returns its error; the lines
    /// already written stay in `out`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<BenchmarkSummary, BenchError> {
        let started_at = format_timestamp(&Local::now());
        let clock = Stopwatch::start();
        self.clock = Some(clock);
        self.iteration = 0;
        tracing::info!(
            iterations = self.iterations,
            scenarios = self.scenarios.len(),
            resources = %self.runner.bundle().root().display(),
            "Starting benchmark"
        );
        self.formatter.write_header(out, &started_at)?;

        let mut records = Vec::with_capacity(self.iterations);
        for iteration in 1..=self.iterations {
            self.iteration = iteration;
            records.push(self.run_iteration(iteration, out)?);
        }

        let total_secs = clock.elapsed_secs();
        let ended_at = format_timestamp(&Local::now());
        self.formatter.write_footer(out, total_secs, &ended_at)?;
        tracing::info!(total_secs, "Benchmark finished");

        Ok(BenchmarkSummary {
            iterations: records,
            total_secs,
            started_at,
            ended_at,
        })
    }

    fn run_iteration<W: Write>(
        &self,
        iteration: usize,
        out: &mut W,
    ) -> Result<IterationRecord, BenchError> {
        self.formatter.write_iteration_start(out, iteration)?;
        tracing::info!(iteration, "Starting iteration");
        let watch = Stopwatch::start();

        let mut scenarios = Vec::with_capacity(self.scenarios.len());
        for scenario in &self.scenarios {
            let report = self
                .runner
                .run(scenario, &self.formatter, out)
                .inspect_err(|e| {
                    tracing::error!(iteration, scenario = %scenario.name, error = %e, "Scenario failed");
                })?;
            scenarios.push(report);
        }

        let total_secs = watch.elapsed_secs();
        self.formatter
            .write_iteration_total(out, iteration, total_secs)?;
        tracing::info!(iteration, total_secs, "Finished iteration");
        Ok(IterationRecord {
            iteration,
            scenarios,
            total_secs,
        })
    }
}
