//! Configuration for trend fitting.

use crate::error::ModelFitError;

/// Mid-decade anchors at which each fit is evaluated for annotation.
pub const DEFAULT_ANCHOR_YEARS: [i32; 8] = [1945, 1955, 1965, 1975, 1985, 1995, 2005, 2015];

/// Configuration for [`fit_poisson`](crate::fit_poisson) and
/// [`fit_series`](crate::fit_series).
///
/// # Example
///
/// ```
/// use boreas_trend::TrendConfig;
///
/// let config = TrendConfig::default()
///     .with_max_iterations(50)
///     .with_anchor_years(vec![1950, 2000]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct TrendConfig {
    anchor_years: Vec<i32>,
    max_iterations: usize,
    tolerance: f64,
}

impl Default for TrendConfig {
    /// Eight mid-decade anchors, 25 iterations, relative deviance tolerance
    /// of `1e-8`.
    fn default() -> Self {
        Self {
            anchor_years: DEFAULT_ANCHOR_YEARS.to_vec(),
            max_iterations: 25,
            tolerance: 1e-8,
        }
    }
}

impl TrendConfig {
    /// Sets the years at which fits are evaluated.
    pub fn with_anchor_years(mut self, years: Vec<i32>) -> Self {
        self.anchor_years = years;
        self
    }

    /// Sets the IRLS iteration limit.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the relative deviance convergence tolerance.
    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    /// Returns the anchor years.
    pub fn anchor_years(&self) -> &[i32] {
        &self.anchor_years
    }

    /// Returns the IRLS iteration limit.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the convergence tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Validates this configuration.
    ///
    /// Anchors must be non-empty and strictly increasing, the iteration limit
    /// positive, and the tolerance finite and positive.
    pub fn validate(&self) -> Result<(), ModelFitError> {
        if self.anchor_years.is_empty() {
            return Err(ModelFitError::InvalidConfig {
                reason: "anchor_years must not be empty".to_string(),
            });
        }
        if self.anchor_years.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ModelFitError::InvalidConfig {
                reason: format!(
                    "anchor_years must be strictly increasing, got {:?}",
                    self.anchor_years
                ),
            });
        }
        if self.max_iterations == 0 {
            return Err(ModelFitError::InvalidConfig {
                reason: "max_iterations must be at least 1".to_string(),
            });
        }
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ModelFitError::InvalidConfig {
                reason: format!(
                    "tolerance must be finite and positive, got {}",
                    self.tolerance
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = TrendConfig::default();
        assert_eq!(config.anchor_years(), &DEFAULT_ANCHOR_YEARS);
        assert_eq!(config.max_iterations(), 25);
        assert_eq!(config.tolerance(), 1e-8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unsorted_anchors_rejected() {
        let config = TrendConfig::default().with_anchor_years(vec![2015, 1945]);
        assert!(matches!(
            config.validate(),
            Err(ModelFitError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = TrendConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_tolerance_rejected() {
        assert!(TrendConfig::default().with_tolerance(0.0).validate().is_err());
        assert!(
            TrendConfig::default()
                .with_tolerance(f64::NAN)
                .validate()
                .is_err()
        );
    }
}
