//! Curvature scoring configuration.

use crate::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of the pairwise curvature energy.
///
/// For a chain `a -> b -> c` with edges `u = b - a`, `v = c - b`:
///
/// ```text
/// E = -0.5 * cos(theta)^cosine_power / (|u| |v|)^distance_prod_power_in_denominator
/// ```
///
/// and `E = 0` whenever `cos(theta) < cosine_threshold`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CurvatureConfig {
    /// Exponent applied to the bend cosine (sign-preserving for odd integers).
    pub cosine_power: f64,
    /// Chains bent more sharply than this cosine score exactly zero.
    pub cosine_threshold: f64,
    /// Exponent of the edge-length product in the denominator.
    pub distance_prod_power_in_denominator: f64,
    /// Run large adjacency and scoring passes on the rayon pool.
    ///
    /// Matrix-vector products pick their path by matrix size alone.
    pub parallel: bool,
}

impl Default for CurvatureConfig {
    fn default() -> Self {
        Self {
            cosine_power: 3.0,
            cosine_threshold: f64::NEG_INFINITY, // no cutoff
            distance_prod_power_in_denominator: 1.0,
            parallel: true,
        }
    }
}

impl CurvatureConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cosine exponent.
    #[must_use]
    pub fn with_cosine_power(mut self, power: f64) -> Self {
        self.cosine_power = power;
        self
    }

    /// Sets the cosine cutoff.
    #[must_use]
    pub fn with_cosine_threshold(mut self, threshold: f64) -> Self {
        self.cosine_threshold = threshold;
        self
    }

    /// Sets the edge-length product exponent.
    #[must_use]
    pub fn with_distance_prod_power(mut self, power: f64) -> Self {
        self.distance_prod_power_in_denominator = power;
        self
    }

    /// Sets whether to use parallel evaluation.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks that all parameters are usable.
    ///
    /// # Errors
    /// Returns [`Error::ConfigError`] for a non-finite exponent or a NaN threshold.
    pub fn validate(&self) -> Result<()> {
        if !self.cosine_power.is_finite() {
            return Err(Error::ConfigError(format!(
                "cosine_power must be finite, got {}",
                self.cosine_power
            )));
        }
        if !self.distance_prod_power_in_denominator.is_finite() {
            return Err(Error::ConfigError(format!(
                "distance_prod_power_in_denominator must be finite, got {}",
                self.distance_prod_power_in_denominator
            )));
        }
        if self.cosine_threshold.is_nan() {
            return Err(Error::ConfigError(
                "cosine_threshold must not be NaN".to_string(),
            ));
        }
        Ok(())
    }
}
