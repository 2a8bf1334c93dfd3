//! Input validation shared by the integerizers.
//!
//! Every check here runs before any rounding so that a rejected call has no
//! side effects, including on the caller's random source.

use crate::types::{Condition, Methodology, ValidationError};

/// Absolute tolerance for treating a small floating-point value as an integer.
pub const INTEGRAL_TOLERANCE: f64 = 1e-9;

/// Units in the last place a large value may sit from an integer and still
/// count as one.
pub const INTEGRAL_ULPS: f64 = 8.0;

/// Distance from an integer within which `x` is treated as that integer:
/// [`INTEGRAL_TOLERANCE`], or [`INTEGRAL_ULPS`] of `x` once that is larger.
///
/// The second term takes over above roughly 5.6e5 and stays below 0.01 up to
/// about 5.6e12.
#[inline]
pub fn integral_tolerance(x: f64) -> f64 {
    INTEGRAL_TOLERANCE.max(INTEGRAL_ULPS * f64::EPSILON * x.abs())
}

/// Whether `x` lies within [`integral_tolerance`] of an integer.
///
/// # Examples
///
/// ```
/// use integerize_core::validate::is_integral;
///
/// assert!(is_integral(4.0));
/// assert!(is_integral(0.1 + 0.2 + 0.7));
/// assert!(!is_integral(4.5));
/// assert!(!is_integral(1e9 + 0.4));
/// ```
#[inline]
pub fn is_integral(x: f64) -> bool {
    (x - x.round()).abs() <= integral_tolerance(x)
}

/// Rejects negative and non-finite vector elements.
pub fn validate_values(values: &[f64]) -> Result<(), ValidationError> {
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteValue { index, value });
        }
        if value < 0.0 {
            return Err(ValidationError::NegativeValue { index, value });
        }
    }
    Ok(())
}

/// Rejects a random-source requirement that the caller cannot meet.
pub fn validate_random_source(
    methodology: Methodology,
    has_random_source: bool,
) -> Result<(), ValidationError> {
    if methodology.requires_random_source() && !has_random_source {
        return Err(ValidationError::MissingRandomSource(methodology));
    }
    Ok(())
}

/// Resolves the control total: the explicit control if given, otherwise the
/// sum of the values, which must then be integral.
pub fn resolve_control(sum: f64, control: Option<u64>) -> Result<u64, ValidationError> {
    match control {
        Some(c) => Ok(c),
        None if is_integral(sum) => Ok(sum.round() as u64),
        None => Err(ValidationError::NonIntegralControl { sum }),
    }
}

/// Checks matrix shape against its controls and every cell's value.
///
/// Returns the column count. An empty matrix takes its column count from
/// `col_controls`.
pub fn validate_matrix(
    matrix: &[Vec<f64>],
    row_controls: &[u64],
    col_controls: &[u64],
) -> Result<usize, ValidationError> {
    if row_controls.len() != matrix.len() {
        return Err(ValidationError::DimensionMismatch {
            what: "row_controls",
            expected: matrix.len(),
            got: row_controls.len(),
        });
    }

    let columns = matrix.first().map_or(col_controls.len(), Vec::len);
    if col_controls.len() != columns {
        return Err(ValidationError::DimensionMismatch {
            what: "col_controls",
            expected: columns,
            got: col_controls.len(),
        });
    }

    for (row, cells) in matrix.iter().enumerate() {
        if cells.len() != columns {
            return Err(ValidationError::RaggedMatrix {
                row,
                expected: columns,
                got: cells.len(),
            });
        }
        for (column, &value) in cells.iter().enumerate() {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteCell { row, column, value });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeCell { row, column, value });
            }
        }
    }
    Ok(columns)
}

/// Rejects row and column controls that no matrix can meet together.
///
/// Column sums are always exact, so under [`Condition::Equal`] the two totals
/// must agree, and under [`Condition::LessOrEqual`] the column total must not
/// exceed the row total.
pub fn validate_controls(
    row_controls: &[u64],
    col_controls: &[u64],
    condition: Condition,
) -> Result<(), ValidationError> {
    let row_total: u128 = row_controls.iter().map(|&c| u128::from(c)).sum();
    let col_total: u128 = col_controls.iter().map(|&c| u128::from(c)).sum();
    let consistent = match condition {
        Condition::Equal => row_total == col_total,
        Condition::LessOrEqual => col_total <= row_total,
    };
    if consistent {
        Ok(())
    } else {
        Err(ValidationError::InconsistentControls {
            condition,
            row_total,
            col_total,
        })
    }
}

/// Rejects zero neighbour radii. An empty list is allowed and sends the
/// reallocation loop straight to full relaxation.
pub fn validate_radii(radii: &[usize]) -> Result<(), ValidationError> {
    match radii.iter().position(|&r| r == 0) {
        Some(position) => Err(ValidationError::NonPositiveRadius { position }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_integral_tolerates_float_noise() {
        let sum: f64 = [0.1, 0.2, 0.3, 0.4].iter().sum();
        assert!(is_integral(sum));
        assert!(is_integral(1e12 + 1e-4));
        assert!(!is_integral(2.000_001));
    }

    #[test]
    fn test_is_integral_keeps_real_fractions_of_large_values() {
        assert!(!is_integral(1e7 + 0.004));
        assert!(!is_integral(1e9 + 0.4));
        assert!(!is_integral(1e10 + 1.3));
        assert!(is_integral(3e9 + 1.0));
        assert!(integral_tolerance(1e9) < 1e-5);
        assert_eq!(integral_tolerance(0.5), INTEGRAL_TOLERANCE);
    }

    #[test]
    fn test_validate_values() {
        assert!(validate_values(&[]).is_ok());
        assert!(validate_values(&[0.0, 1.5]).is_ok());
        assert_eq!(
            validate_values(&[1.0, -0.1]),
            Err(ValidationError::NegativeValue {
                index: 1,
                value: -0.1
            })
        );
        assert!(matches!(
            validate_values(&[f64::NAN]),
            Err(ValidationError::NonFiniteValue { index: 0, .. })
        ));
        assert!(matches!(
            validate_values(&[1.0, f64::INFINITY]),
            Err(ValidationError::NonFiniteValue { index: 1, .. })
        ));
    }

    #[test]
    fn test_validate_random_source() {
        assert!(validate_random_source(Methodology::Largest, false).is_ok());
        assert!(validate_random_source(Methodology::WeightedRandom, true).is_ok());
        assert_eq!(
            validate_random_source(Methodology::WeightedRandom, false),
            Err(ValidationError::MissingRandomSource(
                Methodology::WeightedRandom
            ))
        );
    }

    #[test]
    fn test_resolve_control() {
        assert_eq!(resolve_control(4.5, Some(3)), Ok(3));
        assert_eq!(resolve_control(4.000_000_000_1, None), Ok(4));
        assert_eq!(
            resolve_control(4.5, None),
            Err(ValidationError::NonIntegralControl { sum: 4.5 })
        );
        assert!(matches!(
            resolve_control(5e9 + 0.7 + 5e9 + 0.6, None),
            Err(ValidationError::NonIntegralControl { .. })
        ));
    }

    #[test]
    fn test_validate_controls() {
        assert!(validate_controls(&[3, 4], &[5, 2], Condition::Equal).is_ok());
        assert!(validate_controls(&[3, 4], &[5, 1], Condition::LessOrEqual).is_ok());
        assert!(validate_controls(&[], &[], Condition::Equal).is_ok());

        assert_eq!(
            validate_controls(&[3, 4], &[3, 3], Condition::Equal),
            Err(ValidationError::InconsistentControls {
                condition: Condition::Equal,
                row_total: 7,
                col_total: 6
            })
        );
        assert_eq!(
            validate_controls(&[2, 2], &[3, 2], Condition::LessOrEqual),
            Err(ValidationError::InconsistentControls {
                condition: Condition::LessOrEqual,
                row_total: 4,
                col_total: 5
            })
        );
    }

    #[test]
    fn test_validate_controls_does_not_overflow() {
        assert!(validate_controls(&[u64::MAX, u64::MAX], &[u64::MAX, u64::MAX], Condition::Equal).is_ok());
        assert!(validate_controls(&[u64::MAX], &[u64::MAX, 1], Condition::LessOrEqual).is_err());
    }

    #[test]
    fn test_validate_matrix_shapes() {
        let m = vec![vec![1.0, 2.0], vec![3.0, 4.0]];
        assert_eq!(validate_matrix(&m, &[3, 7], &[4, 6]), Ok(2));

        assert_eq!(
            validate_matrix(&m, &[3], &[4, 6]),
            Err(ValidationError::DimensionMismatch {
                what: "row_controls",
                expected: 2,
                got: 1
            })
        );
        assert_eq!(
            validate_matrix(&m, &[3, 7], &[4, 6, 0]),
            Err(ValidationError::DimensionMismatch {
                what: "col_controls",
                expected: 2,
                got: 3
            })
        );

        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            validate_matrix(&ragged, &[3, 3], &[4, 2]),
            Err(ValidationError::RaggedMatrix {
                row: 1,
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_validate_matrix_cells() {
        let m = vec![vec![1.0, 2.0], vec![-3.0, 4.0]];
        assert_eq!(
            validate_matrix(&m, &[3, 1], &[0, 6]),
            Err(ValidationError::NegativeCell {
                row: 1,
                column: 0,
                value: -3.0
            })
        );
    }

    #[test]
    fn test_validate_empty_matrix() {
        assert_eq!(validate_matrix(&[], &[], &[0, 0, 0]), Ok(3));
    }

    #[test]
    fn test_validate_radii() {
        assert!(validate_radii(&[]).is_ok());
        assert!(validate_radii(&[1, 2, 3]).is_ok());
        assert_eq!(
            validate_radii(&[1, 0]),
            Err(ValidationError::NonPositiveRadius { position: 1 })
        );
    }
}
