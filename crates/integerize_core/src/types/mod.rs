//! Core types shared by the one- and two-dimensional integerizers.
//!
//! This module provides:
//! - [`Methodology`]: how the excess of a rounded-up vector is removed
//! - [`SelectionRule`], [`RankKey`], [`Rank`], [`TieBreak`]: the enumerated
//!   selection rules each methodology resolves to
//! - [`Condition`]: how row sums are compared to their controls
//! - Error types: [`IntegerizeError`], [`ValidationError`]

pub mod condition;
pub mod error;
pub mod methodology;

pub use condition::Condition;
pub use error::{IntegerizeError, ValidationError};
pub use methodology::{Methodology, Rank, RankKey, SelectionRule, TieBreak};
