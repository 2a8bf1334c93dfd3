//! Batch integerization of independent vectors.
//!
//! Typical use is one vector per category group, for example the jobs of each
//! industry code distributed over land-use categories. Every job gets its own
//! random source from [`SeededRng::for_job`], so the results depend only on
//! the base seed and the job's position, never on thread count or scheduling.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::one_d::integerize_1d;
use crate::rng::SeededRng;
use crate::types::{IntegerizeError, Methodology};

/// One vector to integerize.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorJob {
    /// Optional caller label, carried through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Non-negative estimates.
    pub values: Vec<f64>,
    /// Required total; the sum of `values` when absent.
    #[serde(default)]
    pub control: Option<u64>,
}

impl VectorJob {
    /// Job with no label.
    pub fn new(values: Vec<f64>, control: Option<u64>) -> Self {
        Self {
            label: None,
            values,
            control,
        }
    }

    fn run(&self, methodology: Methodology, base_seed: u64, index: usize) -> Result<Vec<u64>, IntegerizeError> {
        let mut rng = SeededRng::for_job(base_seed, index);
        integerize_1d(&self.values, self.control, methodology, Some(&mut rng))
    }
}

/// Integerizes every job, returning one result per job in input order.
///
/// Job `i` draws from `SeededRng::for_job(base_seed, i)`. A failing job does
/// not stop the others.
///
/// # Performance
///
/// When the `parallel` feature is enabled, jobs run on the rayon thread pool.
/// Otherwise they run sequentially with identical results.
///
/// # Examples
///
/// ```rust
/// use integerize_core::batch::{integerize_batch, VectorJob};
/// use integerize_core::types::Methodology;
///
/// let jobs = vec![
///     VectorJob::new(vec![0.5, 1.5, 2.0], None),
///     VectorJob::new(vec![0.0, 0.0], Some(3)),
/// ];
/// let results = integerize_batch(&jobs, Methodology::WeightedRandom, 42);
/// assert_eq!(results[0].as_ref().unwrap().iter().sum::<u64>(), 4);
/// assert!(results[1].is_err());
/// ```
#[cfg(feature = "parallel")]
pub fn integerize_batch(
    jobs: &[VectorJob],
    methodology: Methodology,
    base_seed: u64,
) -> Vec<Result<Vec<u64>, IntegerizeError>> {
    use rayon::prelude::*;

    debug!(jobs = jobs.len(), %methodology, base_seed, "parallel batch");
    jobs.par_iter()
        .enumerate()
        .map(|(index, job)| job.run(methodology, base_seed, index))
        .collect()
}

/// Sequential fallback when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn integerize_batch(
    jobs: &[VectorJob],
    methodology: Methodology,
    base_seed: u64,
) -> Vec<Result<Vec<u64>, IntegerizeError>> {
    debug!(jobs = jobs.len(), %methodology, base_seed, "sequential batch");
    jobs.iter()
        .enumerate()
        .map(|(index, job)| job.run(methodology, base_seed, index))
        .collect()
}
