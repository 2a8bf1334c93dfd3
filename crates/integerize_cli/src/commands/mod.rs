//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Job files are read and
//! results written as JSON through the helpers here.

pub mod batch;
pub mod check;
pub mod matrix;
pub mod vector;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::{CliError, Result};

/// Read a JSON job file.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| CliError::Parse {
        path: path.to_string(),
        message: e.to_string(),
    })
}

/// Write `value` as pretty JSON to `output`, or to stdout when `None`.
pub fn write_json<T: Serialize>(value: &T, output: Option<&str>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            info!("Writing results to {}", path);
            std::fs::write(path, json + "\n").map_err(|source| CliError::Io {
                path: path.to_string(),
                source,
            })
        }
        None => {
            println!("{}", json);
            Ok(())
        }
    }
}
