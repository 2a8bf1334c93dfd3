//! Two-dimensional controlled rounding.
//!
//! [`integerize_2d`] rounds every column with [`integerize_1d`] against its
//! column control, then moves units between rows within each column until
//! every row satisfies its control under the chosen [`Condition`]. Column
//! totals are never disturbed by the second stage.
//!
//! ## Example
//!
//! ```
//! use integerize_core::two_d::integerize_2d;
//! use integerize_core::types::{Condition, Methodology};
//!
//! let matrix = vec![vec![2.0, 0.0, 0.0, 1.0], vec![0.0, 1.0, 0.0, 0.0]];
//! let result = integerize_2d(
//!     &matrix,
//!     &[2, 2],
//!     &[2, 1, 0, 1],
//!     Condition::Equal,
//!     &[1, 2, 3],
//!     Methodology::Largest,
//!     None,
//! )
//! .unwrap();
//! assert_eq!(result, vec![vec![2, 0, 0, 0], vec![0, 1, 0, 1]]);
//! ```

mod ledger;
mod neighbour;
mod reallocate;

use serde::Serialize;
use tracing::debug;

pub use ledger::DonorCell;

use crate::one_d::integerize_1d;
use crate::rng::RandomSource;
use crate::types::{Condition, IntegerizeError, Methodology};
use crate::validate::{validate_controls, validate_matrix, validate_radii, validate_random_source};
use reallocate::Reallocation;

/// How a deficient row received a unit when it had no populated donor column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FallbackKind {
    /// A zero donor cell next to a nonzero cell of the same row.
    Neighbour {
        /// Radius at which the populated neighbour was found
        radius: usize,
    },
    /// The most-credited donor column, regardless of the row's pattern.
    FullRelaxation,
}

/// A unit placed by one of the fallbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Fallback {
    /// Row that received the unit.
    pub row: usize,
    /// Column that received the unit.
    pub column: usize,
    /// Which fallback chose the column.
    pub kind: FallbackKind,
}

/// Diagnostics collected by the reallocation loop.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AllocationReport {
    /// Number of passes run; zero when the column pass already met every row.
    pub passes: usize,
    /// Cells that gave up a unit, in the order taken.
    pub donor_cells: Vec<DonorCell>,
    /// Units placed by the neighbour or full-relaxation fallbacks.
    pub fallbacks: Vec<Fallback>,
}

impl AllocationReport {
    /// Whether any unit had to be placed by full relaxation.
    pub fn relaxed(&self) -> bool {
        self.fallbacks
            .iter()
            .any(|f| f.kind == FallbackKind::FullRelaxation)
    }
}

/// Integer matrix together with its [`AllocationReport`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IntegerizedMatrix {
    /// The rounded matrix, same shape as the input.
    pub values: Vec<Vec<u64>>,
    /// How the row corrections were made.
    pub report: AllocationReport,
}

/// Rounds a non-negative matrix so every column sums to its control and every
/// row satisfies `condition` against its control.
///
/// # Arguments
///
/// * `matrix` - Rectangular, non-negative, finite estimates
/// * `row_controls` - One target per row
/// * `col_controls` - One target per column
/// * `condition` - [`Condition::Equal`] or [`Condition::LessOrEqual`] for rows
/// * `neighbour_radii` - Positive radii tried in order by the neighbour
///   fallback; an empty list goes straight to full relaxation
/// * `column_methodology` - Methodology of the per-column rounding
/// * `rng` - Random source shared by all columns, consumed in ascending
///   column order
///
/// # Errors
///
/// - [`IntegerizeError::Validation`] for a ragged matrix, mis-sized controls,
///   negative or non-finite cells, control totals that cannot be met together
///   under `condition`, a zero radius, or a missing random source
/// - [`IntegerizeError::Arithmetic`] when a column is all zero but its control
///   is positive
/// - [`IntegerizeError::Precision`] when a column control is too large to
///   reach in `f64`
/// - [`IntegerizeError::UnresolvedAllocation`] when the reallocation loop
///   stops making progress
pub fn integerize_2d(
    matrix: &[Vec<f64>],
    row_controls: &[u64],
    col_controls: &[u64],
    condition: Condition,
    neighbour_radii: &[usize],
    column_methodology: Methodology,
    rng: Option<&mut dyn RandomSource>,
) -> Result<Vec<Vec<u64>>, IntegerizeError> {
    integerize_2d_with_report(
        matrix,
        row_controls,
        col_controls,
        condition,
        neighbour_radii,
        column_methodology,
        rng,
    )
    .map(|result| result.values)
}

/// As [`integerize_2d`], also returning the [`AllocationReport`].
pub fn integerize_2d_with_report(
    matrix: &[Vec<f64>],
    row_controls: &[u64],
    col_controls: &[u64],
    condition: Condition,
    neighbour_radii: &[usize],
    column_methodology: Methodology,
    mut rng: Option<&mut dyn RandomSource>,
) -> Result<IntegerizedMatrix, IntegerizeError> {
    let columns = validate_matrix(matrix, row_controls, col_controls)?;
    validate_controls(row_controls, col_controls, condition)?;
    validate_radii(neighbour_radii)?;
    validate_random_source(column_methodology, rng.is_some())?;

    let mut cells = vec![vec![0_u64; columns]; matrix.len()];
    for (c, &control) in col_controls.iter().enumerate() {
        let column: Vec<f64> = matrix.iter().map(|row| row[c]).collect();
        let column_rng = rng.as_mut().map(|r| &mut **r as &mut dyn RandomSource);
        let rounded = integerize_1d(&column, Some(control), column_methodology, column_rng)
            .map_err(|e| e.in_column(c))?;
        for (row, value) in cells.iter_mut().zip(rounded) {
            row[c] = value;
        }
    }

    debug!(
        rows = matrix.len(),
        columns,
        %condition,
        %column_methodology,
        "column pass complete"
    );

    let (values, report) =
        Reallocation::new(cells, columns, row_controls, condition, neighbour_radii).run()?;
    Ok(IntegerizedMatrix { values, report })
}
