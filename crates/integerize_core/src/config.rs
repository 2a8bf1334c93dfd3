//! Integerization configuration.
//!
//! [`IntegerizeConfig`] gathers the choices a caller makes once per run:
//! methodology, row condition, neighbour radii and seed. It deserialises from
//! TOML or JSON with every field optional, and can be built in code with
//! [`IntegerizeConfigBuilder`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Condition, Methodology};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Neighbour radii used when none are configured.
pub const DEFAULT_NEIGHBOUR_RADII: [usize; 3] = [1, 2, 3];

/// Configuration rejected at build or load time.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

/// Run-level integerization settings.
///
/// # Examples
///
/// ```rust
/// use integerize_core::config::IntegerizeConfig;
/// use integerize_core::types::{Condition, Methodology};
///
/// let config: IntegerizeConfig = toml::from_str(r#"
///     methodology = "largest_difference"
///     neighbor_radii = [2, 4]
/// "#).unwrap();
///
/// assert_eq!(config.methodology, Methodology::LargestDifference);
/// assert_eq!(config.condition, Condition::Equal);
/// assert_eq!(config.neighbour_radii, vec![2, 4]);
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegerizeConfig {
    /// Methodology for vectors and for the column pass of matrices.
    pub methodology: Methodology,
    /// Row condition for matrices.
    pub condition: Condition,
    /// Radii tried in order by the neighbour fallback.
    #[serde(alias = "neighbor_radii")]
    pub neighbour_radii: Vec<usize>,
    /// Seed of the random source.
    pub seed: u64,
}

impl Default for IntegerizeConfig {
    fn default() -> Self {
        Self {
            methodology: Methodology::default(),
            condition: Condition::default(),
            neighbour_radii: DEFAULT_NEIGHBOUR_RADII.to_vec(),
            seed: DEFAULT_SEED,
        }
    }
}

impl IntegerizeConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> IntegerizeConfigBuilder {
        IntegerizeConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any neighbour radius is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(position) = self.neighbour_radii.iter().position(|&r| r == 0) {
            return Err(ConfigError::InvalidParameter {
                name: "neighbour_radii",
                value: format!("radius at position {} must be positive", position),
            });
        }
        Ok(())
    }
}

/// Builder for [`IntegerizeConfig`].
///
/// Unset fields take their defaults.
///
/// # Examples
///
/// ```rust
/// use integerize_core::config::IntegerizeConfig;
/// use integerize_core::types::Methodology;
///
/// let config = IntegerizeConfig::builder()
///     .methodology(Methodology::Largest)
///     .seed(7)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.seed, 7);
/// ```
#[derive(Clone, Debug, Default)]
pub struct IntegerizeConfigBuilder {
    methodology: Option<Methodology>,
    condition: Option<Condition>,
    neighbour_radii: Option<Vec<usize>>,
    seed: Option<u64>,
}

impl IntegerizeConfigBuilder {
    /// Sets the methodology.
    #[inline]
    pub fn methodology(mut self, methodology: Methodology) -> Self {
        self.methodology = Some(methodology);
        self
    }

    /// Sets the row condition.
    #[inline]
    pub fn condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Sets the neighbour radii.
    ///
    /// # Arguments
    ///
    /// * `radii` - Positive radii, tried in the order given
    #[inline]
    pub fn neighbour_radii(mut self, radii: impl Into<Vec<usize>>) -> Self {
        self.neighbour_radii = Some(radii.into());
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any neighbour radius is zero.
    pub fn build(self) -> Result<IntegerizeConfig, ConfigError> {
        let defaults = IntegerizeConfig::default();
        let config = IntegerizeConfig {
            methodology: self.methodology.unwrap_or(defaults.methodology),
            condition: self.condition.unwrap_or(defaults.condition),
            neighbour_radii: self.neighbour_radii.unwrap_or(defaults.neighbour_radii),
            seed: self.seed.unwrap_or(defaults.seed),
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = IntegerizeConfig::default();
        assert_eq!(config.methodology, Methodology::WeightedRandom);
        assert_eq!(config.condition, Condition::Equal);
        assert_eq!(config.neighbour_radii, vec![1, 2, 3]);
        assert_eq!(config.seed, 42);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = IntegerizeConfig::builder()
            .methodology(Methodology::Smallest)
            .condition(Condition::LessOrEqual)
            .neighbour_radii([5])
            .seed(99)
            .build()
            .unwrap();
        assert_eq!(config.methodology, Methodology::Smallest);
        assert_eq!(config.condition, Condition::LessOrEqual);
        assert_eq!(config.neighbour_radii, vec![5]);
        assert_eq!(config.seed, 99);
    }

    #[test]
    fn test_builder_rejects_zero_radius() {
        let result = IntegerizeConfig::builder().neighbour_radii(vec![1, 0]).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "neighbour_radii",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_radii_allowed() {
        let config = IntegerizeConfig::builder()
            .neighbour_radii(Vec::new())
            .build()
            .unwrap();
        assert!(config.neighbour_radii.is_empty());
    }

    #[test]
    fn test_toml_round_trip_keeps_fields() {
        let config = IntegerizeConfig::builder()
            .condition(Condition::LessOrEqual)
            .seed(3)
            .build()
            .unwrap();
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("condition = \"less_or_equal\""));
        let parsed: IntegerizeConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_toml_aliases() {
        let config: IntegerizeConfig = toml::from_str(
            r#"
            condition = "exact"
            neighbor_radii = [1]
            "#,
        )
        .unwrap();
        assert_eq!(config.condition, Condition::Equal);
        assert_eq!(config.neighbour_radii, vec![1]);
    }

    #[test]
    fn test_unknown_methodology_rejected() {
        let result: Result<IntegerizeConfig, _> = toml::from_str("methodology = \"median\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidParameter {
            name: "seed",
            value: "not a number".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid parameter 'seed': not a number");
    }
}
