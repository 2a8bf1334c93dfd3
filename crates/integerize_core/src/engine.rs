//! Configured integerizer owning its random source.
//!
//! [`Integerizer`] pairs an [`IntegerizeConfig`] with a [`SeededRng`] seeded
//! from it. Every call advances the same source, so replaying the same
//! sequence of calls with the same seed reproduces every result.

use tracing::debug;

use crate::config::{ConfigError, IntegerizeConfig};
use crate::one_d::integerize_1d;
use crate::rng::SeededRng;
use crate::two_d::{integerize_2d_with_report, IntegerizedMatrix};
use crate::types::IntegerizeError;

/// Integerizer bound to one configuration and one random source.
///
/// # Examples
///
/// ```rust
/// use integerize_core::config::IntegerizeConfig;
/// use integerize_core::engine::Integerizer;
///
/// let mut integerizer = Integerizer::new(IntegerizeConfig::default()).unwrap();
/// let counts = integerizer.round_vector(&[0.6, 1.7, 2.7], None).unwrap();
/// assert_eq!(counts.iter().sum::<u64>(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct Integerizer {
    config: IntegerizeConfig,
    rng: SeededRng,
}

impl Integerizer {
    /// Creates an integerizer seeded from `config.seed`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration fails validation.
    pub fn new(config: IntegerizeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = SeededRng::from_seed(config.seed);
        debug!(
            methodology = %config.methodology,
            condition = %config.condition,
            seed = config.seed,
            "integerizer created"
        );
        Ok(Self { config, rng })
    }

    /// The configuration this integerizer was built with.
    #[inline]
    pub fn config(&self) -> &IntegerizeConfig {
        &self.config
    }

    /// Seed of the owned random source.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Rounds one vector with the configured methodology.
    ///
    /// See [`integerize_1d`] for the semantics and errors.
    pub fn round_vector(
        &mut self,
        values: &[f64],
        control: Option<u64>,
    ) -> Result<Vec<u64>, IntegerizeError> {
        integerize_1d(values, control, self.config.methodology, Some(&mut self.rng))
    }

    /// Rounds one matrix with the configured methodology, condition and radii.
    ///
    /// See [`crate::two_d::integerize_2d`] for the semantics and errors.
    pub fn round_matrix(
        &mut self,
        matrix: &[Vec<f64>],
        row_controls: &[u64],
        col_controls: &[u64],
    ) -> Result<IntegerizedMatrix, IntegerizeError> {
        integerize_2d_with_report(
            matrix,
            row_controls,
            col_controls,
            self.config.condition,
            &self.config.neighbour_radii,
            self.config.methodology,
            Some(&mut self.rng),
        )
    }
}
