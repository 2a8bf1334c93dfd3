//! Batch command implementation
//!
//! Integerizes a list of independent vectors, one random source per job.

use integerize_core::batch::{integerize_batch, VectorJob};
use integerize_core::config::IntegerizeConfig;
use serde::Serialize;
use tracing::{info, warn};

use super::{read_json, write_json};
use crate::{CliError, Result};

/// Outcome of one batch job.
#[derive(Debug, Serialize)]
pub struct JobOutput {
    /// Position of the job in the input file.
    pub index: usize,
    /// Label copied from the job.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Integerized values, absent when the job failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<u64>>,
    /// Error message, absent when the job succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Integerize every job, pairing each with its outcome.
pub fn integerize(jobs: Vec<VectorJob>, config: &IntegerizeConfig) -> Vec<JobOutput> {
    let results = integerize_batch(&jobs, config.methodology, config.seed);
    jobs.into_iter()
        .zip(results)
        .enumerate()
        .map(|(index, (job, result))| match result {
            Ok(values) => JobOutput {
                index,
                label: job.label,
                values: Some(values),
                error: None,
            },
            Err(e) => {
                warn!("Job {} failed: {}", index, e);
                JobOutput {
                    index,
                    label: job.label,
                    values: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect()
}

/// Run the batch command
///
/// Results for every job are written even when some fail; the command then
/// reports the failures as an error.
pub fn run(input: &str, output: Option<&str>, config: &IntegerizeConfig) -> Result<()> {
    info!("Integerizing batch from {}", input);
    let jobs: Vec<VectorJob> = read_json(input)?;
    let total = jobs.len();
    info!("  {} jobs, base seed {}", total, config.seed);

    let outputs = integerize(jobs, config);
    write_json(&outputs, output)?;

    let failed = outputs.iter().filter(|o| o.error.is_some()).count();
    if failed > 0 {
        return Err(CliError::BatchFailures { failed, total });
    }
    info!("Batch complete");
    Ok(())
}
