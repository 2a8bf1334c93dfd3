//! Configuration loading.
//!
//! Reads an [`IntegerizeConfig`] from a TOML file, falling back to defaults
//! when the file is absent, then applies `INTEGERIZE_*` environment
//! overrides and validates the result.

use std::path::Path;

use integerize_core::config::IntegerizeConfig;
use tracing::{debug, info};

use crate::{CliError, Result};

/// Environment variable overriding the methodology.
pub const ENV_METHODOLOGY: &str = "INTEGERIZE_METHODOLOGY";
/// Environment variable overriding the row condition.
pub const ENV_CONDITION: &str = "INTEGERIZE_CONDITION";
/// Environment variable overriding the seed.
pub const ENV_SEED: &str = "INTEGERIZE_SEED";
/// Environment variable overriding the neighbour radii, comma separated.
pub const ENV_NEIGHBOUR_RADII: &str = "INTEGERIZE_NEIGHBOUR_RADII";

/// Load configuration from `path` (or defaults), apply environment
/// overrides and validate.
pub fn load(path: &Path) -> Result<IntegerizeConfig> {
    let config = load_file(path)?;
    let config = apply_overrides(config, |key| std::env::var(key).ok())?;
    config.validate()?;
    Ok(config)
}

/// Load configuration from a TOML file, or defaults if it does not exist.
pub fn load_file(path: &Path) -> Result<IntegerizeConfig> {
    if !path.exists() {
        debug!("No configuration at {}, using defaults", path.display());
        return Ok(IntegerizeConfig::default());
    }

    info!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    toml::from_str(&content).map_err(|e| CliError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Apply overrides from `lookup`, which maps a variable name to its value.
pub fn apply_overrides<F>(mut config: IntegerizeConfig, lookup: F) -> Result<IntegerizeConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(methodology) = lookup(ENV_METHODOLOGY) {
        config.methodology = methodology.parse()?;
    }

    if let Some(condition) = lookup(ENV_CONDITION) {
        config.condition = condition.parse()?;
    }

    if let Some(seed) = lookup(ENV_SEED) {
        config.seed = seed.trim().parse().map_err(|_| {
            CliError::InvalidArgument(format!("{} must be an unsigned integer, got '{}'", ENV_SEED, seed))
        })?;
    }

    if let Some(radii) = lookup(ENV_NEIGHBOUR_RADII) {
        config.neighbour_radii = parse_radii(&radii)?;
    }

    Ok(config)
}

fn parse_radii(text: &str) -> Result<Vec<usize>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse().map_err(|_| {
                CliError::InvalidArgument(format!(
                    "{} must be comma-separated integers, got '{}'",
                    ENV_NEIGHBOUR_RADII, text
                ))
            })
        })
        .collect()
}
