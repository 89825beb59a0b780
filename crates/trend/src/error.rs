//! Error types for the boreas-trend crate.

/// Error type for all fallible operations in the boreas-trend crate.
///
/// A failed fit is never replaced by a default curve; callers decide what to
/// do with the error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelFitError {
    /// Returned when the series has no observations.
    #[error("series is empty")]
    EmptySeries,

    /// Returned when the series covers fewer than two distinct years.
    #[error("insufficient data: {distinct} distinct year(s), need at least 2")]
    InsufficientYears {
        /// Number of distinct years in the series.
        distinct: usize,
    },

    /// Returned when every count is zero, leaving nothing to fit.
    #[error("all counts are zero")]
    AllZero,

    /// Returned when a count is negative.
    #[error("negative count {count} in {year}")]
    NegativeCount {
        /// Year of the offending observation.
        year: i32,
        /// The negative value.
        count: f64,
    },

    /// Returned when a count or a fitted value is NaN or infinite.
    #[error("non-finite value encountered")]
    NonFinite,

    /// Returned when the weighted normal equations cannot be solved.
    #[error("weighted design matrix is singular")]
    Singular,

    /// Returned when the deviance has not settled after the iteration limit.
    #[error("fit did not converge after {iterations} iterations")]
    NonConvergence {
        /// Number of IRLS iterations performed.
        iterations: usize,
    },

    /// Returned when a [`TrendConfig`](crate::TrendConfig) is unusable.
    #[error("invalid trend config: {reason}")]
    InvalidConfig {
        /// What is wrong with the configuration.
        reason: String,
    },
}
