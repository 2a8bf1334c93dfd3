//! Matrix command implementation
//!
//! Integerizes one matrix against row and column controls.

use integerize_core::config::IntegerizeConfig;
use integerize_core::engine::Integerizer;
use integerize_core::two_d::AllocationReport;
use integerize_core::verify::{rounding_error, verify_matrix, RoundingError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{read_json, write_json};
use crate::Result;

/// Matrix job file contents.
#[derive(Debug, Deserialize)]
pub struct MatrixJob {
    /// Non-negative estimates, one inner vector per row.
    pub matrix: Vec<Vec<f64>>,
    /// Target per row.
    pub row_controls: Vec<u64>,
    /// Target per column.
    pub col_controls: Vec<u64>,
}

/// Result of the matrix command.
#[derive(Debug, Serialize)]
pub struct MatrixOutput {
    /// Integerized matrix.
    pub values: Vec<Vec<u64>>,
    /// How the row corrections were made.
    pub report: AllocationReport,
    /// Remaining deviation from the controls, all zero under `equal`.
    pub rounding_error: RoundingError,
}

/// Integerize `job` with `config`.
pub fn integerize(job: &MatrixJob, config: &IntegerizeConfig) -> Result<MatrixOutput> {
    let mut integerizer = Integerizer::new(config.clone())?;
    let result = integerizer.round_matrix(&job.matrix, &job.row_controls, &job.col_controls)?;
    verify_matrix(
        &result.values,
        &job.row_controls,
        &job.col_controls,
        config.condition,
    )?;
    let rounding_error = rounding_error(&result.values, &job.row_controls, &job.col_controls)?;
    Ok(MatrixOutput {
        values: result.values,
        report: result.report,
        rounding_error,
    })
}

/// Run the matrix command
pub fn run(input: &str, output: Option<&str>, config: &IntegerizeConfig) -> Result<()> {
    info!("Integerizing matrix from {}", input);
    let job: MatrixJob = read_json(input)?;
    info!(
        "  {} rows x {} columns, condition {}",
        job.row_controls.len(),
        job.col_controls.len(),
        config.condition
    );

    let result = integerize(&job, config)?;
    info!("  Reallocation took {} passes", result.report.passes);
    if result.report.relaxed() {
        warn!("Some units were placed by full relaxation; see report.fallbacks");
    }
    write_json(&result, output)
}
