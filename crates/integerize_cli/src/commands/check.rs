//! Check command implementation
//!
//! Prints the resolved configuration after file and environment overrides.

use integerize_core::config::IntegerizeConfig;
use integerize_core::engine::Integerizer;
use tracing::info;

use crate::{CliError, Result};

/// Render the configuration as TOML.
pub fn render(config: &IntegerizeConfig) -> Result<String> {
    toml::to_string(config).map_err(|e| CliError::InvalidArgument(e.to_string()))
}

/// Run the check command
pub fn run(config_path: &str, config: &IntegerizeConfig) -> Result<()> {
    info!("Checking configuration...");
    // Building an integerizer runs the same validation as the real commands.
    Integerizer::new(config.clone())?;

    println!("# resolved from {} and INTEGERIZE_* overrides", config_path);
    print!("{}", render(config)?);
    info!("Configuration OK");
    Ok(())
}
