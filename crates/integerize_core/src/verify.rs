//! Post-hoc checks of integerized results against their controls.
//!
//! The integerizers guarantee these properties already; the checks exist for
//! callers that receive results from elsewhere (a file, another process) and
//! for reporting how far a matrix is from its controls.

use serde::Serialize;
use thiserror::Error;

use crate::types::Condition;

/// A margin of an integer result that does not meet its control.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum VerificationError {
    /// Vector total differs from its control.
    #[error("Vector sums to {actual}, control is {control}")]
    VectorTotal {
        /// Sum of the result
        actual: u64,
        /// Required total
        control: u64,
    },

    /// A row total violates its condition.
    #[error("Row {row} sums to {actual}, control is {control} ({condition})")]
    RowTotal {
        /// Row index
        row: usize,
        /// Sum of the row
        actual: u64,
        /// Row control
        control: u64,
        /// Condition the row was checked against
        condition: Condition,
    },

    /// A column total differs from its control.
    #[error("Column {column} sums to {actual}, control is {control}")]
    ColumnTotal {
        /// Column index
        column: usize,
        /// Sum of the column
        actual: u64,
        /// Column control
        control: u64,
    },

    /// Result shape does not match the controls.
    #[error("Shape mismatch: {what} has length {got}, expected {expected}")]
    Shape {
        /// Which dimension is mis-sized
        what: &'static str,
        /// Length implied by the controls
        expected: usize,
        /// Length found
        got: usize,
    },
}

/// Per-dimension deviations of a matrix from its controls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RoundingError {
    /// `rowsum - row_control` for each row.
    pub rows: Vec<i128>,
    /// `colsum - col_control` for each column.
    pub columns: Vec<i128>,
}

impl RoundingError {
    /// Whether every deviation is zero.
    pub fn is_exact(&self) -> bool {
        self.rows.iter().chain(&self.columns).all(|&d| d == 0)
    }
}

/// Checks that `result` sums exactly to `control`.
pub fn verify_vector(result: &[u64], control: u64) -> Result<(), VerificationError> {
    let actual: u64 = result.iter().sum();
    if actual != control {
        return Err(VerificationError::VectorTotal { actual, control });
    }
    Ok(())
}

/// Checks every column sum for equality and every row sum against
/// `condition`, reporting the first violation (shape, then rows, then
/// columns).
///
/// # Examples
///
/// ```rust
/// use integerize_core::types::Condition;
/// use integerize_core::verify::verify_matrix;
///
/// let m = vec![vec![2, 2], vec![2, 2]];
/// assert!(verify_matrix(&m, &[4, 4], &[4, 4], Condition::Equal).is_ok());
/// assert!(verify_matrix(&m, &[4, 5], &[4, 4], Condition::Equal).is_err());
/// assert!(verify_matrix(&m, &[4, 5], &[4, 4], Condition::LessOrEqual).is_ok());
/// ```
pub fn verify_matrix(
    result: &[Vec<u64>],
    row_controls: &[u64],
    col_controls: &[u64],
    condition: Condition,
) -> Result<(), VerificationError> {
    check_shape(result, row_controls, col_controls)?;
    let error = deviations(result, row_controls, col_controls);

    for (row, &d) in error.rows.iter().enumerate() {
        if !condition.is_satisfied(d) {
            return Err(VerificationError::RowTotal {
                row,
                actual: result[row].iter().sum(),
                control: row_controls[row],
                condition,
            });
        }
    }
    for (column, &d) in error.columns.iter().enumerate() {
        if d != 0 {
            return Err(VerificationError::ColumnTotal {
                column,
                actual: result.iter().map(|r| r[column]).sum(),
                control: col_controls[column],
            });
        }
    }
    Ok(())
}

/// Row and column deviations of `result` from its controls.
///
/// # Errors
///
/// Returns [`VerificationError::Shape`] when the result does not match the
/// controls' dimensions.
pub fn rounding_error(
    result: &[Vec<u64>],
    row_controls: &[u64],
    col_controls: &[u64],
) -> Result<RoundingError, VerificationError> {
    check_shape(result, row_controls, col_controls)?;
    Ok(deviations(result, row_controls, col_controls))
}

fn check_shape(
    result: &[Vec<u64>],
    row_controls: &[u64],
    col_controls: &[u64],
) -> Result<(), VerificationError> {
    if result.len() != row_controls.len() {
        return Err(VerificationError::Shape {
            what: "rows",
            expected: row_controls.len(),
            got: result.len(),
        });
    }
    if let Some(row) = result.iter().find(|r| r.len() != col_controls.len()) {
        return Err(VerificationError::Shape {
            what: "columns",
            expected: col_controls.len(),
            got: row.len(),
        });
    }
    Ok(())
}

fn deviations(result: &[Vec<u64>], row_controls: &[u64], col_controls: &[u64]) -> RoundingError {
    let rows = result
        .iter()
        .zip(row_controls)
        .map(|(row, &control)| {
            row.iter().map(|&v| i128::from(v)).sum::<i128>() - i128::from(control)
        })
        .collect();
    let columns = col_controls
        .iter()
        .enumerate()
        .map(|(c, &control)| {
            result.iter().map(|r| i128::from(r[c])).sum::<i128>() - i128::from(control)
        })
        .collect();
    RoundingError { rows, columns }
}
