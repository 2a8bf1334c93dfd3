//! One-dimensional controlled rounding.
//!
//! [`integerize_1d`] scales a vector of non-negative reals to its control
//! total, rounds every entry up, then removes the excess one unit at a time
//! from entries chosen by the [`Methodology`].
//!
//! Rounding up first keeps small categories alive: a rare category with an
//! expected value of 0.2 starts at 1 and only drops back to 0 if the
//! methodology picks it for correction.

use tracing::trace;

use crate::rng::RandomSource;
use crate::select::{select_by_rank, weighted_sample_without_replacement};
use crate::types::{IntegerizeError, Methodology, RankKey, SelectionRule, ValidationError};
use crate::validate::{is_integral, resolve_control, validate_random_source, validate_values};

/// Rounds `values` to non-negative integers summing exactly to the control.
///
/// # Arguments
///
/// * `values` - Non-negative, finite estimates; order identifies the category
/// * `control` - Required total; if `None`, `sum(values)` is used and must be
///   integral
/// * `methodology` - How the excess from rounding up is removed
/// * `rng` - Random source, required by [`Methodology::WeightedRandom`] and
///   never drawn from by the other methodologies
///
/// # Errors
///
/// - [`IntegerizeError::Validation`] for negative or non-finite values, a
///   missing random source, or a non-integral implied control
/// - [`IntegerizeError::Arithmetic`] when every value is zero but the control
///   is positive
/// - [`IntegerizeError::Precision`] when the control is too large for the
///   scaled values to reach it in `f64`
///
/// # Examples
///
/// ```
/// use integerize_core::integerize_1d;
/// use integerize_core::types::Methodology;
///
/// let values = [0.2, 0.3, 2.5, 1.0];
/// let result = integerize_1d(&values, None, Methodology::Largest, None).unwrap();
/// assert_eq!(result, vec![1, 1, 2, 0]);
///
/// let result = integerize_1d(&values, None, Methodology::Smallest, None).unwrap();
/// assert_eq!(result, vec![0, 0, 3, 1]);
/// ```
pub fn integerize_1d(
    values: &[f64],
    control: Option<u64>,
    methodology: Methodology,
    rng: Option<&mut dyn RandomSource>,
) -> Result<Vec<u64>, IntegerizeError> {
    validate_values(values)?;
    validate_random_source(methodology, rng.is_some())?;

    let total: f64 = values.iter().sum();
    let control = resolve_control(total, control)?;
    let scaled = scale_to_control(values, total, control)?;
    let (scaled, mut rounded, excess) = round_up(scaled, control)?;
    if excess == 0 {
        return Ok(rounded);
    }

    // Only entries that can still give a unit back are eligible.
    let candidates: Vec<usize> = (0..rounded.len()).filter(|&i| rounded[i] > 0).collect();
    debug_assert!(excess <= candidates.len(), "excess exceeds nonzero entries");

    let differences: Vec<f64> = rounded
        .iter()
        .zip(&scaled)
        .map(|(&u, &w)| u as f64 - w)
        .collect();

    let selected = match methodology.selection_rule() {
        SelectionRule::Ranked { key, rank, tie } => match key {
            RankKey::Rounded => select_by_rank(&rounded, &candidates, excess, rank, tie),
            RankKey::Difference => select_by_rank(&differences, &candidates, excess, rank, tie),
        },
        SelectionRule::Weighted => {
            let rng = rng.ok_or(ValidationError::MissingRandomSource(methodology))?;
            weighted_sample_without_replacement(&differences, &candidates, excess, rng)
        }
    };

    trace!(
        n = values.len(),
        control,
        excess,
        %methodology,
        ?selected,
        "integerize_1d correction"
    );

    for i in selected {
        rounded[i] -= 1;
    }
    Ok(rounded)
}

/// Proportionally scales `values` so they sum to `control`.
fn scale_to_control(values: &[f64], total: f64, control: u64) -> Result<Vec<f64>, IntegerizeError> {
    if total == 0.0 {
        if control == 0 {
            return Ok(vec![0.0; values.len()]);
        }
        return Err(IntegerizeError::Arithmetic {
            column: None,
            control,
        });
    }

    let target = control as f64;
    Ok(values.iter().map(|&v| v * target / total).collect())
}

/// Rounds every scaled value up, returning the values used, their ceilings
/// and the excess of the ceilings over `control`.
///
/// Values within [`integral_tolerance`](crate::validate::integral_tolerance)
/// of an integer are snapped to it first so that floating-point noise cannot
/// add a spurious unit. Snapping can only lower a ceiling, so if the snapped
/// ceilings fall short of `control` the unsnapped values are used instead.
fn round_up(
    scaled: Vec<f64>,
    control: u64,
) -> Result<(Vec<f64>, Vec<u64>, usize), IntegerizeError> {
    let snapped: Vec<f64> = scaled
        .iter()
        .map(|&w| if is_integral(w) { w.round() } else { w })
        .collect();

    let mut rounded_total = 0_u128;
    for candidate in [snapped, scaled] {
        let rounded: Vec<u64> = candidate.iter().map(|w| w.ceil() as u64).collect();
        rounded_total = rounded.iter().map(|&u| u128::from(u)).sum();
        if let Some(excess) = rounded_total.checked_sub(u128::from(control)) {
            return Ok((candidate, rounded, excess as usize));
        }
    }
    Err(IntegerizeError::Precision {
        control,
        rounded_total: rounded_total as u64,
    })
}
