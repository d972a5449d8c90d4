//! Benchmarker CLI. Runs the training/evaluation benchmark and prints its report.
//!
//! The report goes to stdout; diagnostics go to stderr and, with `--log-dir`,
//! to daily JSON log files.

mod commands;

use benchmarker_ml::BenchConfig;
use clap::Parser;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Benchmarker: time ML model training and evaluation on fixed datasets
#[derive(Parser, Debug)]
#[command(name = "benchmarker", version, about, long_about = None)]
struct Cli {
    /// Directory holding the dataset resources
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Number of benchmark iterations
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Workspace directory searched for benchmarker.toml
    #[arg(short, long, default_value = ".")]
    workspace: PathBuf,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write JSON logs to daily files in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Subcommand, Debug)]
enum ConfigAction {
    /// Write a default benchmarker.toml into the workspace
    Init,
    /// Show the effective configuration
    Show,
}

fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    match verbose {
        0 if quiet => "error",
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the stderr layer and, if requested, the JSON file layer. The
/// returned guard must outlive every log call.
fn init_tracing(cli: &Cli) -> Option<WorkerGuard> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(EnvFilter::new(log_filter(cli.verbose, cli.quiet)));

    let (json_layer, guard) = match &cli.log_dir {
        Some(dir) => {
            let _ = std::fs::create_dir_all(dir);
            let file_appender = tracing_appender::rolling::daily(dir, "benchmarker.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();
    guard
}

/// Apply command-line overrides on top of the layered configuration.
fn apply_overrides(config: &mut BenchConfig, cli: &Cli) {
    if let Some(resources) = &cli.resources {
        config.resources_dir = resources.clone();
    }
    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing(&cli);

    let workspace = cli
        .workspace
        .canonicalize()
        .unwrap_or_else(|_| cli.workspace.clone());

    let mut config =
        benchmarker_ml::load_config(Some(&workspace), cli.config.as_deref(), None)
            .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;
    apply_overrides(&mut config, &cli);
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration error: {}", e))?;

    if let Some(command) = cli.command {
        return commands::handle_command(command, &workspace, &config);
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match benchmarker_ml::run_benchmark(&config, &mut out) {
        Ok(summary) => {
            tracing::debug!(
                iterations = summary.iterations.len(),
                total_secs = summary.total_secs,
                "Run complete"
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %e, "Benchmark aborted");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let cli = Cli::try_parse_from(["benchmarker"]).unwrap();
        assert!(cli.resources.is_none());
        assert!(cli.command.is_none());
        assert_eq!(log_filter(cli.verbose, cli.quiet), "info");
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["benchmarker", "-vv"]).unwrap();
        assert_eq!(log_filter(cli.verbose, cli.quiet), "trace");
        let cli = Cli::try_parse_from(["benchmarker", "-q"]).unwrap();
        assert_eq!(log_filter(cli.verbose, cli.quiet), "error");
    }

    #[test]
    fn test_overrides_apply() {
        let cli =
            Cli::try_parse_from(["benchmarker", "--resources", "/data/bundle", "-n", "1"]).unwrap();
        let mut config = BenchConfig::default();
        apply_overrides(&mut config, &cli);
        assert_eq!(config.resources_dir, PathBuf::from("/data/bundle"));
        assert_eq!(config.iterations, 1);
        assert_eq!(config.split.seed, 5);
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["benchmarker", "config", "show"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Show
            })
        ));
    }
}
