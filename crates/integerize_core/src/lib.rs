//! # integerize_core: Controlled Rounding of Proportional Estimates
//!
//! Converts non-negative real-valued estimates (population shares, housing
//! units, jobs by category) into non-negative integers that sum exactly to
//! fixed control totals.
//!
//! - One dimension ([`integerize_1d`]): scale a vector to its control, round
//!   every entry up, then remove the excess from entries chosen by a
//!   [`Methodology`](types::Methodology).
//! - Two dimensions ([`integerize_2d`]): round every column against its
//!   control, then shift units between rows within each column until every row
//!   meets its control under a [`Condition`](types::Condition), with a
//!   nearest-neighbour fallback that avoids populating structurally empty
//!   cells.
//!
//! ## Modules
//!
//! - `types`: methodologies, conditions, selection rules, errors
//! - `rng`: the caller-owned random source and its seeded `StdRng` wrapper
//! - `select`: ranked and weighted selection of correction indices
//! - `validate`: input checks run before any rounding
//! - `one_d`, `two_d`: the integerizers
//! - `verify`: post-hoc margin checks and rounding-error vectors
//! - `config`, `engine`: run configuration and a configured integerizer
//! - `batch`: many independent vectors, one random source per job
//!
//! ## Usage Examples
//!
//! ```rust
//! use integerize_core::prelude::*;
//!
//! let values = [0.2, 0.3, 2.5, 1.0];
//! assert_eq!(
//!     integerize_1d(&values, None, Methodology::Largest, None).unwrap(),
//!     vec![1, 1, 2, 0]
//! );
//!
//! let mut rng = SeededRng::from_seed(42);
//! let counts = integerize_1d(&values, Some(10), Methodology::WeightedRandom, Some(&mut rng)).unwrap();
//! assert_eq!(counts.iter().sum::<u64>(), 10);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): run [`batch::integerize_batch`] on the rayon
//!   thread pool

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod batch;
pub mod config;
pub mod engine;
pub mod one_d;
pub mod rng;
pub mod select;
pub mod two_d;
pub mod types;
pub mod validate;
pub mod verify;

pub use one_d::integerize_1d;
pub use two_d::{integerize_2d, integerize_2d_with_report};

/// Commonly used items.
pub mod prelude {
    pub use crate::batch::{integerize_batch, VectorJob};
    pub use crate::config::{ConfigError, IntegerizeConfig};
    pub use crate::engine::Integerizer;
    pub use crate::rng::{RandomSource, SeededRng};
    pub use crate::two_d::{AllocationReport, IntegerizedMatrix};
    pub use crate::types::{Condition, IntegerizeError, Methodology, TieBreak, ValidationError};
    pub use crate::verify::{rounding_error, verify_matrix, verify_vector, VerificationError};
    pub use crate::{integerize_1d, integerize_2d, integerize_2d_with_report};
}
