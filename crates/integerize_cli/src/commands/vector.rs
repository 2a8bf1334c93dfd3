//! Vector command implementation
//!
//! Integerizes one vector read from a JSON job file.

use integerize_core::batch::VectorJob;
use integerize_core::config::IntegerizeConfig;
use integerize_core::engine::Integerizer;
use integerize_core::types::Methodology;
use integerize_core::verify::verify_vector;
use serde::Serialize;
use tracing::info;

use super::{read_json, write_json};
use crate::Result;

/// Result of the vector command.
#[derive(Debug, Serialize)]
pub struct VectorOutput {
    /// Label copied from the job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Methodology used.
    pub methodology: Methodology,
    /// Seed of the random source.
    pub seed: u64,
    /// Control the result sums to.
    pub control: u64,
    /// Integerized values.
    pub values: Vec<u64>,
}

/// Integerize `job` with `config`.
pub fn integerize(job: VectorJob, config: &IntegerizeConfig) -> Result<VectorOutput> {
    let mut integerizer = Integerizer::new(config.clone())?;
    let values = integerizer.round_vector(&job.values, job.control)?;
    let control = values.iter().sum();
    if let Some(expected) = job.control {
        verify_vector(&values, expected)?;
    }
    Ok(VectorOutput {
        label: job.label,
        methodology: config.methodology,
        seed: config.seed,
        control,
        values,
    })
}

/// Run the vector command
pub fn run(input: &str, output: Option<&str>, config: &IntegerizeConfig) -> Result<()> {
    info!("Integerizing vector from {}", input);
    let job: VectorJob = read_json(input)?;
    let result = integerize(job, config)?;
    info!("  {} values, control {}", result.values.len(), result.control);
    write_json(&result, output)
}
