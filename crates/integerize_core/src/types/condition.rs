//! Row-control conditions for two-dimensional integerization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// How each row sum of an integerized matrix must relate to its control.
///
/// Column sums always match their controls exactly; the condition only
/// governs rows.
///
/// # Examples
///
/// ```
/// use integerize_core::types::Condition;
///
/// assert!(Condition::Equal.is_satisfied(0));
/// assert!(!Condition::Equal.is_satisfied(-1));
/// assert!(Condition::LessOrEqual.is_satisfied(-3));
/// assert!(!Condition::LessOrEqual.is_satisfied(1));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Row sums equal their controls.
    #[default]
    #[serde(alias = "exact")]
    Equal,

    /// Row sums do not exceed their controls.
    #[serde(alias = "less than")]
    LessOrEqual,
}

impl Condition {
    /// Whether a row whose sum deviates from its control by `deviation`
    /// (`rowsum - control`) satisfies this condition.
    #[inline]
    pub fn is_satisfied(&self, deviation: i128) -> bool {
        match self {
            Condition::Equal => deviation == 0,
            Condition::LessOrEqual => deviation <= 0,
        }
    }

    /// Canonical name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Condition::Equal => "equal",
            Condition::LessOrEqual => "less_or_equal",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Condition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "equal" | "exact" => Ok(Condition::Equal),
            "less_or_equal" | "less than" => Ok(Condition::LessOrEqual),
            _ => Err(ValidationError::UnknownCondition(s.to_string())),
        }
    }
}
