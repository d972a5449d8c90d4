//! Subcommand handlers.

use crate::{Commands, ConfigAction};
use benchmarker_ml::BenchConfig;
use benchmarker_ml::config::WORKSPACE_CONFIG_FILE;
use std::path::Path;

pub fn handle_command(
    command: Commands,
    workspace: &Path,
    config: &BenchConfig,
) -> anyhow::Result<()> {
    match command {
        Commands::Config { action } => handle_config(action, workspace, config),
    }
}

fn handle_config(action: ConfigAction, workspace: &Path, config: &BenchConfig) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let config_path = workspace.join(WORKSPACE_CONFIG_FILE);
            if config_path.exists() {
                println!(
                    "Configuration file already exists at: {}",
                    config_path.display()
                );
                return Ok(());
            }
            write_default_config(&config_path)?;
            println!(
                "Created default configuration at: {}",
                config_path.display()
            );
            Ok(())
        }
        ConfigAction::Show => {
            println!("{}", toml::to_string_pretty(config)?);
            Ok(())
        }
    }
}

fn write_default_config(path: &Path) -> anyhow::Result<()> {
    let toml_str = toml::to_string_pretty(&BenchConfig::default())?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
