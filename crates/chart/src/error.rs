//! Error types for the boreas-chart crate.

use std::path::PathBuf;

use boreas_io::ExceedanceType;

/// Error type for all fallible operations in the boreas-chart crate.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    /// Returned when a chart specification is internally inconsistent.
    #[error("chart '{chart}': {reason}")]
    InvalidSpec {
        /// Chart name.
        chart: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Returned when a series has no label placement configured.
    #[error("chart '{chart}': no label placement for {series}")]
    MissingPlacement {
        /// Chart name.
        chart: String,
        /// Series without a placement.
        series: ExceedanceType,
    },

    /// Returned when a series has no observed points.
    #[error("chart '{chart}': no observations for {series}")]
    MissingSeries {
        /// Chart name.
        chart: String,
        /// Series without data.
        series: ExceedanceType,
    },

    /// Returned when a series has no fitted trend.
    #[error("chart '{chart}': no fitted trend for {series}")]
    MissingTrend {
        /// Chart name.
        chart: String,
        /// Series without a fit.
        series: ExceedanceType,
    },

    /// Returned when a series has no decadal predictions to annotate.
    #[error("no decadal predictions for {series}")]
    MissingPrediction {
        /// Series without predictions.
        series: ExceedanceType,
    },

    /// Returned when the output directory cannot be created.
    #[error("cannot create output directory {}: {reason}", path.display())]
    OutputDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Description of the underlying I/O failure.
        reason: String,
    },

    /// Wraps an error from the drawing backend.
    #[error("failed to draw {}: {reason}", path.display())]
    Drawing {
        /// File being written.
        path: PathBuf,
        /// Description of the backend failure.
        reason: String,
    },
}
