//! Error types for structured error handling.
//!
//! This module provides:
//! - `ValidationError`: malformed input rejected before any rounding happens
//! - `IntegerizeError`: every failure the integerizers can return
//!
//! Errors are raised synchronously to the caller and never accompanied by a
//! partial result. None of them is transient, so retrying with the same input
//! always fails the same way.

use thiserror::Error;

use super::condition::Condition;
use super::methodology::Methodology;

/// Input rejected before rounding.
///
/// # Examples
///
/// ```
/// use integerize_core::types::ValidationError;
///
/// let err = ValidationError::NegativeValue { index: 2, value: -0.5 };
/// assert_eq!(format!("{}", err), "Negative value -0.5 at index 2");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A vector element is below zero.
    #[error("Negative value {value} at index {index}")]
    NegativeValue {
        /// Position of the offending element
        index: usize,
        /// The offending value
        value: f64,
    },

    /// A vector element is NaN or infinite.
    #[error("Non-finite value {value} at index {index}")]
    NonFiniteValue {
        /// Position of the offending element
        index: usize,
        /// The offending value
        value: f64,
    },

    /// A matrix cell is below zero.
    #[error("Negative value {value} at row {row}, column {column}")]
    NegativeCell {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        column: usize,
        /// The offending value
        value: f64,
    },

    /// A matrix cell is NaN or infinite.
    #[error("Non-finite value {value} at row {row}, column {column}")]
    NonFiniteCell {
        /// Row of the offending cell
        row: usize,
        /// Column of the offending cell
        column: usize,
        /// The offending value
        value: f64,
    },

    /// Methodology name not recognised.
    #[error("Unknown methodology '{0}': expected largest, smallest, largest_difference or weighted_random")]
    UnknownMethodology(String),

    /// Condition name not recognised.
    #[error("Unknown condition '{0}': expected equal or less_or_equal")]
    UnknownCondition(String),

    /// A methodology that draws random numbers was called without a source.
    #[error("Methodology '{0}' requires a seeded random source")]
    MissingRandomSource(Methodology),

    /// No control was supplied and the values do not sum to an integer.
    #[error("Implied control {sum} is not integral; supply an explicit control")]
    NonIntegralControl {
        /// Sum of the input values
        sum: f64,
    },

    /// A control vector does not match the matrix shape.
    #[error("Dimension mismatch: {what} has length {got}, expected {expected}")]
    DimensionMismatch {
        /// Which input is mis-sized
        what: &'static str,
        /// Length implied by the matrix
        expected: usize,
        /// Length supplied
        got: usize,
    },

    /// Matrix rows have different lengths.
    #[error("Ragged matrix: row {row} has {got} columns, expected {expected}")]
    RaggedMatrix {
        /// First row with the wrong length
        row: usize,
        /// Column count of the matrix
        expected: usize,
        /// Column count of the offending row
        got: usize,
    },

    /// Row and column controls cannot both be met by any matrix.
    #[error(
        "Inconsistent controls under '{condition}': row controls total {row_total}, \
         column controls total {col_total}"
    )]
    InconsistentControls {
        /// Row condition the totals were checked against
        condition: Condition,
        /// Sum of the row controls
        row_total: u128,
        /// Sum of the column controls
        col_total: u128,
    },

    /// A neighbour search radius is zero.
    #[error("Neighbour radius at position {position} must be positive")]
    NonPositiveRadius {
        /// Position of the radius in the supplied list
        position: usize,
    },
}

/// Failure of an integerization call.
///
/// # Variants
/// - `Validation`: input rejected up front
/// - `Arithmetic`: zero-sum values cannot be scaled to a positive control
/// - `Precision`: the scaled values lost too much precision to reach the
///   control when rounded up
/// - `UnresolvedAllocation`: the row/column reallocation stopped making
///   progress
///
/// # Examples
/// ```
/// use integerize_core::types::IntegerizeError;
///
/// let err = IntegerizeError::Arithmetic { column: Some(3), control: 12 };
/// assert!(err.to_string().contains("column 3"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegerizeError {
    /// Input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// All values are zero but the control is positive.
    #[error("Cannot scale zero-sum values to positive control {control}{}", column_suffix(.column))]
    Arithmetic {
        /// Matrix column being rounded, if any
        column: Option<usize>,
        /// The positive control that could not be met
        control: u64,
    },

    /// Rounding the scaled values up fell short of the control.
    #[error("Rounded-up total {rounded_total} is below control {control}; values too large to scale exactly")]
    Precision {
        /// The control that was not reached
        control: u64,
        /// Sum of the rounded-up scaled values
        rounded_total: u64,
    },

    /// The reallocation loop could not satisfy the row condition.
    #[error(
        "Unresolved allocation after {pass} passes: {unresolved_rows} rows outside their controls, \
         {outstanding_credit} donor units unplaced"
    )]
    UnresolvedAllocation {
        /// Pass on which no adjustment could be made
        pass: usize,
        /// Rows still violating the condition
        unresolved_rows: usize,
        /// Units removed from columns and not yet returned
        outstanding_credit: u64,
    },
}

impl IntegerizeError {
    /// Attach a matrix column to an arithmetic error raised by a column pass.
    pub(crate) fn in_column(self, index: usize) -> Self {
        match self {
            IntegerizeError::Arithmetic { column: None, control } => IntegerizeError::Arithmetic {
                column: Some(index),
                control,
            },
            other => other,
        }
    }
}

fn column_suffix(column: &Option<usize>) -> String {
    match column {
        Some(c) => format!(" in column {}", c),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::MissingRandomSource(Methodology::WeightedRandom);
        assert_eq!(
            err.to_string(),
            "Methodology 'weighted_random' requires a seeded random source"
        );

        let err = ValidationError::DimensionMismatch {
            what: "row_controls",
            expected: 3,
            got: 2,
        };
        assert!(err.to_string().contains("row_controls has length 2, expected 3"));
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: IntegerizeError = ValidationError::NonIntegralControl { sum: 4.5 }.into();
        assert_eq!(
            err.to_string(),
            "Implied control 4.5 is not integral; supply an explicit control"
        );
    }

    #[test]
    fn test_arithmetic_display() {
        let err = IntegerizeError::Arithmetic {
            column: None,
            control: 5,
        };
        assert_eq!(
            err.to_string(),
            "Cannot scale zero-sum values to positive control 5"
        );
    }

    #[test]
    fn test_in_column_only_tags_arithmetic() {
        let err = IntegerizeError::Arithmetic {
            column: None,
            control: 2,
        }
        .in_column(4);
        assert_eq!(
            err,
            IntegerizeError::Arithmetic {
                column: Some(4),
                control: 2
            }
        );

        let err: IntegerizeError = ValidationError::NonPositiveRadius { position: 0 }.into();
        assert_eq!(err.clone().in_column(1), err);
    }

    #[test]
    fn test_inconsistent_controls_display() {
        let err = ValidationError::InconsistentControls {
            condition: Condition::Equal,
            row_total: 7,
            col_total: 6,
        };
        assert_eq!(
            err.to_string(),
            "Inconsistent controls under 'equal': row controls total 7, column controls total 6"
        );
    }

    #[test]
    fn test_unresolved_display() {
        let err = IntegerizeError::UnresolvedAllocation {
            pass: 3,
            unresolved_rows: 1,
            outstanding_credit: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("3 passes"));
        assert!(msg.contains("2 donor units"));
    }
}
