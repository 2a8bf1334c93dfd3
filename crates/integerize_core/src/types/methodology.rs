//! Correction methodologies and the selection rules they resolve to.
//!
//! Rounding every value up produces an excess over the control total. A
//! [`Methodology`] decides which entries give back one unit each. The
//! deterministic methodologies differ only in the key they rank by, the
//! direction of the ranking and which occurrence wins a tie, so each one maps
//! onto a [`SelectionRule`] rather than carrying its own comparator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Methodology used to remove the excess introduced by rounding up.
///
/// # Examples
///
/// ```
/// use integerize_core::types::Methodology;
///
/// let m: Methodology = "largest_difference".parse().unwrap();
/// assert_eq!(m, Methodology::LargestDifference);
/// assert!(!m.requires_random_source());
/// assert!(Methodology::WeightedRandom.requires_random_source());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Methodology {
    /// Decrement the largest rounded values; ties go to the last occurrence.
    Largest,

    /// Decrement the smallest nonzero rounded values; ties go to the first
    /// occurrence.
    Smallest,

    /// Decrement the values that were rounded up the most; ties go to the
    /// last occurrence.
    LargestDifference,

    /// Sample the values to decrement without replacement, with probability
    /// proportional to how far each was rounded up.
    ///
    /// Spreads the corrections across categories so that the bias of many
    /// independent calls cancels out when results are aggregated.
    #[default]
    WeightedRandom,
}

impl Methodology {
    /// All recognised methodologies, in declaration order.
    pub const ALL: [Methodology; 4] = [
        Methodology::Largest,
        Methodology::Smallest,
        Methodology::LargestDifference,
        Methodology::WeightedRandom,
    ];

    /// Canonical name as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Methodology::Largest => "largest",
            Methodology::Smallest => "smallest",
            Methodology::LargestDifference => "largest_difference",
            Methodology::WeightedRandom => "weighted_random",
        }
    }

    /// Whether this methodology draws from a random source.
    #[inline]
    pub fn requires_random_source(&self) -> bool {
        matches!(self, Methodology::WeightedRandom)
    }

    /// The selection rule this methodology applies to the rounded vector.
    pub fn selection_rule(&self) -> SelectionRule {
        match self {
            Methodology::Largest => SelectionRule::Ranked {
                key: RankKey::Rounded,
                rank: Rank::Largest,
                tie: TieBreak::LastOccurrence,
            },
            Methodology::Smallest => SelectionRule::Ranked {
                key: RankKey::Rounded,
                rank: Rank::Smallest,
                tie: TieBreak::FirstOccurrence,
            },
            Methodology::LargestDifference => SelectionRule::Ranked {
                key: RankKey::Difference,
                rank: Rank::Largest,
                tie: TieBreak::LastOccurrence,
            },
            Methodology::WeightedRandom => SelectionRule::Weighted,
        }
    }
}

impl fmt::Display for Methodology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Methodology {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "largest" => Ok(Methodology::Largest),
            "smallest" => Ok(Methodology::Smallest),
            "largest_difference" => Ok(Methodology::LargestDifference),
            "weighted_random" => Ok(Methodology::WeightedRandom),
            _ => Err(ValidationError::UnknownMethodology(s.to_string())),
        }
    }
}

/// Rule for choosing which entries receive the -1 correction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionRule {
    /// Deterministic ranking of the eligible entries.
    Ranked {
        /// Value the entries are ranked by.
        key: RankKey,
        /// Whether larger or smaller keys are selected first.
        rank: Rank,
        /// Which index wins among equal keys.
        tie: TieBreak,
    },

    /// Probabilistic draw without replacement, weighted by the rounding
    /// difference.
    Weighted,
}

/// Value a ranked selection is keyed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RankKey {
    /// The rounded-up integer `u[i]`.
    Rounded,
    /// The rounding amount `u[i] - w[i]`.
    Difference,
}

/// Direction of a ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rank {
    /// Larger keys first.
    Largest,
    /// Smaller keys first.
    Smallest,
}

/// Resolution of equal keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TieBreak {
    /// The lower index wins.
    FirstOccurrence,
    /// The higher index wins.
    LastOccurrence,
}
