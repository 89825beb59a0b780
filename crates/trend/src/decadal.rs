//! Decade-representative predictions from a fitted trend.

use boreas_io::ExceedanceType;
use tracing::info;

use crate::config::TrendConfig;
use crate::error::ModelFitError;
use crate::poisson::{PoissonFit, fit_poisson};

/// Expected count for one series at one anchor year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecadalPrediction {
    /// Anchor year.
    pub year: i32,
    /// Series the prediction belongs to.
    pub series: ExceedanceType,
    /// Expected count from the fitted model, unrounded.
    pub predicted_count: f64,
}

/// Evaluate `fit` at each anchor year, in anchor order.
pub fn predict_decadal(
    fit: &PoissonFit,
    series: ExceedanceType,
    anchors: &[i32],
) -> Vec<DecadalPrediction> {
    anchors
        .iter()
        .map(|&year| DecadalPrediction {
            year,
            series,
            predicted_count: fit.predict(f64::from(year)),
        })
        .collect()
}

/// A fitted series together with its decadal predictions.
#[derive(Debug, Clone)]
pub struct SeriesTrend {
    series: ExceedanceType,
    fit: PoissonFit,
    decadal: Vec<DecadalPrediction>,
}

impl SeriesTrend {
    /// The series code.
    pub fn series(&self) -> ExceedanceType {
        self.series
    }

    /// The underlying fit.
    pub fn fit(&self) -> &PoissonFit {
        &self.fit
    }

    /// Predictions at every anchor year, earliest first.
    pub fn decadal(&self) -> &[DecadalPrediction] {
        &self.decadal
    }

    /// Earliest and latest decadal predictions.
    pub fn endpoints(&self) -> Option<(&DecadalPrediction, &DecadalPrediction)> {
        Some((self.decadal.first()?, self.decadal.last()?))
    }
}

/// Fit one series and evaluate it at the configured anchors.
///
/// # Errors
///
/// Any [`ModelFitError`] from [`fit_poisson`].
pub fn fit_series(
    series: ExceedanceType,
    points: &[(i32, f64)],
    config: &TrendConfig,
) -> Result<SeriesTrend, ModelFitError> {
    let fit = fit_poisson(points, config)?;
    let decadal = predict_decadal(&fit, series, config.anchor_years());

    if let (Some(first), Some(last)) = (decadal.first(), decadal.last()) {
        info!(
            %series,
            n_obs = fit.n_obs(),
            slope = fit.slope(),
            iterations = fit.iterations(),
            first_year = first.year,
            first = first.predicted_count,
            last_year = last.year,
            last = last.predicted_count,
            "trend fitted"
        );
    }

    Ok(SeriesTrend {
        series,
        fit,
        decadal,
    })
}
