//! Configuration for benchmark runs.
//!
//! Uses `figment` for layered configuration: defaults -> config file -> environment -> CLI args.
//! Configuration is loaded from `~/.config/benchmarker/config.toml` and/or `benchmarker.toml`
//! in the working directory.

use crate::error::BenchError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the workspace-level configuration.
pub const WORKSPACE_CONFIG_FILE: &str = "benchmarker.toml";

/// Top-level benchmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Directory holding the dataset resources.
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,
    /// Number of full passes over all scenarios.
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Train/test split for tabular scenarios.
    #[serde(default)]
    pub split: SplitConfig,
    /// Validation hold-out taken from the training data at fit time.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Image feature extraction.
    #[serde(default)]
    pub image: ImageConfig,
    /// Classifier hyperparameters.
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            resources_dir: default_resources_dir(),
            iterations: default_iterations(),
            split: SplitConfig::default(),
            validation: ValidationConfig::default(),
            image: ImageConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("Resources")
}

fn default_iterations() -> usize {
    3
}

/// Held-out fraction and seed for the tabular train/test split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            test_fraction: default_test_fraction(),
            seed: default_seed(),
        }
    }
}

fn default_test_fraction() -> f64 {
    0.20
}

fn default_seed() -> u64 {
    5
}

/// Validation subset held out of the training data while fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default = "default_validation_fraction")]
    pub fraction: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fraction: default_validation_fraction(),
            seed: default_seed(),
        }
    }
}

fn default_validation_fraction() -> f64 {
    0.05
}

/// Image feature extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Side length in pixels of the square thumbnail each image is reduced to.
    #[serde(default = "default_thumbnail_side")]
    pub thumbnail_side: u32,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            thumbnail_side: default_thumbnail_side(),
        }
    }
}

fn default_thumbnail_side() -> u32 {
    32
}

/// Hyperparameters for the classifier candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Solver iterations for logistic regression.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u64,
    /// Depth limit of the decision tree candidate (`None` grows it fully).
    #[serde(default = "default_tree_max_depth")]
    pub tree_max_depth: Option<usize>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tree_max_depth: default_tree_max_depth(),
        }
    }
}

fn default_max_iterations() -> u64 {
    100
}

fn default_tree_max_depth() -> Option<usize> {
    Some(12)
}

impl BenchConfig {
    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.iterations == 0 {
            return Err(BenchError::config("iterations must be at least 1"));
        }
        if !(self.split.test_fraction > 0.0 && self.split.test_fraction < 1.0) {
            return Err(BenchError::config(format!(
                "split.test_fraction must be in (0, 1), got {}",
                self.split.test_fraction
            )));
        }
        if !(self.validation.fraction >= 0.0 && self.validation.fraction < 1.0) {
            return Err(BenchError::config(format!(
                "validation.fraction must be in [0, 1), got {}",
                self.validation.fraction
            )));
        }
        if self.image.thumbnail_side == 0 {
            return Err(BenchError::config("image.thumbnail_side must be at least 1"));
        }
        if self.classifier.max_iterations == 0 {
            return Err(BenchError::config(
                "classifier.max_iterations must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Explicit overrides (passed as argument)
/// 2. Environment variables (prefixed with `BENCHMARKER_`)
/// 3. The explicit config file, or `benchmarker.toml` in the workspace
/// 4. User config (`~/.config/benchmarker/config.toml`)
/// 5. Built-in defaults
pub fn load_config(
    workspace: Option<&Path>,
    config_file: Option<&Path>,
    overrides: Option<&BenchConfig>,
) -> Result<BenchConfig, BenchError> {
    let mut figment = Figment::from(Serialized::defaults(BenchConfig::default()));

    // User-level config
    if let Some(dirs) = directories::ProjectDirs::from("dev", "benchmarker", "benchmarker") {
        let user_config = dirs.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    match config_file {
        Some(path) => {
            if !path.exists() {
                return Err(BenchError::config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            figment = figment.merge(Toml::file(path));
        }
        None => {
            if let Some(ws) = workspace {
                let ws_config = ws.join(WORKSPACE_CONFIG_FILE);
                if ws_config.exists() {
                    figment = figment.merge(Toml::file(&ws_config));
                }
            }
        }
    }

    // BENCHMARKER_ITERATIONS, BENCHMARKER_SPLIT__SEED, ...
    figment = figment.merge(Env::prefixed("BENCHMARKER_").split("__"));

    if let Some(overrides) = overrides {
        figment = figment.merge(Serialized::defaults(overrides));
    }

    let config: BenchConfig = figment.extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.iterations, 3);
        assert_eq!(config.split.test_fraction, 0.20);
        assert_eq!(config.split.seed, 5);
        assert_eq!(config.resources_dir, PathBuf::from("Resources"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_iterations() {
        let config = BenchConfig {
            iterations: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(BenchError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_fractions() {
        let mut config = BenchConfig::default();
        config.split.test_fraction = 1.0;
        assert!(config.validate().is_err());

        let mut config = BenchConfig::default();
        config.validation.fraction = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_workspace() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                WORKSPACE_CONFIG_FILE,
                r#"
                iterations = 1
                resources_dir = "fixtures"

                [split]
                seed = 42
                "#,
            )?;
            let config = load_config(Some(jail.directory()), None, None)
                .map_err(|e| e.to_string())?;
            assert_eq!(config.iterations, 1);
            assert_eq!(config.resources_dir, PathBuf::from("fixtures"));
            assert_eq!(config.split.seed, 42);
            assert_eq!(config.split.test_fraction, 0.20);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(WORKSPACE_CONFIG_FILE, "iterations = 2")?;
            jail.set_env("BENCHMARKER_ITERATIONS", "7");
            jail.set_env("BENCHMARKER_VALIDATION__FRACTION", "0.1");
            let config = load_config(Some(jail.directory()), None, None)
                .map_err(|e| e.to_string())?;
            assert_eq!(config.iterations, 7);
            assert_eq!(config.validation.fraction, 0.1);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_overrides_win() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("BENCHMARKER_ITERATIONS", "7");
            let overrides = BenchConfig {
                iterations: 1,
                ..Default::default()
            };
            let config = load_config(Some(jail.directory()), None, Some(&overrides))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.iterations, 1);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let result = load_config(None, Some(Path::new("/nonexistent/benchmarker.toml")), None);
        assert!(matches!(result, Err(BenchError::Config(_))));
    }

    #[test]
    fn test_invalid_file_value_rejected() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(WORKSPACE_CONFIG_FILE, "iterations = 0")?;
            let result = load_config(Some(jail.directory()), None, None);
            assert!(matches!(result, Err(BenchError::Config(_))));
            Ok(())
        });
    }
}
