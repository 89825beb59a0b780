//! Poisson regression of annual counts on year, log link, fitted by IRLS.

use std::collections::BTreeSet;

use statrs::function::gamma::ln_gamma;
use tracing::trace;

use crate::config::TrendConfig;
use crate::error::ModelFitError;

/// A fitted `log(E[count]) = b0 + b1 * year` model.
///
/// Internally the year is centered on its sample mean; [`intercept`] and
/// [`slope`] are reported on the raw year scale.
///
/// [`intercept`]: PoissonFit::intercept
/// [`slope`]: PoissonFit::slope
#[derive(Debug, Clone)]
pub struct PoissonFit {
    /// Intercept at `year == year_center`.
    b0_centered: f64,
    b1: f64,
    year_center: f64,
    first_year: i32,
    last_year: i32,
    deviance: f64,
    null_deviance: f64,
    log_likelihood: f64,
    iterations: usize,
    n_obs: usize,
}

impl PoissonFit {
    /// Intercept on the raw year scale (`log` expected count in year 0).
    pub fn intercept(&self) -> f64 {
        self.b0_centered - self.b1 * self.year_center
    }

    /// Change in `log` expected count per year.
    pub fn slope(&self) -> f64 {
        self.b1
    }

    /// Multiplicative change in expected count per year, `exp(slope)`.
    pub fn rate_ratio(&self) -> f64 {
        self.b1.exp()
    }

    /// Expected count in `year`. Not rounded.
    pub fn predict(&self, year: f64) -> f64 {
        (self.b0_centered + self.b1 * (year - self.year_center)).exp()
    }

    /// First and last year of the fitted series.
    pub fn year_span(&self) -> (i32, i32) {
        (self.first_year, self.last_year)
    }

    /// Residual deviance.
    pub fn deviance(&self) -> f64 {
        self.deviance
    }

    /// Deviance of the intercept-only model.
    pub fn null_deviance(&self) -> f64 {
        self.null_deviance
    }

    /// Poisson log-likelihood at the fitted values.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Akaike information criterion (two parameters).
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood + 4.0
    }

    /// Number of IRLS iterations until convergence.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of observations fitted.
    pub fn n_obs(&self) -> usize {
        self.n_obs
    }
}

/// Fit a Poisson log-linear trend to `(year, count)` pairs.
///
/// Starting values are `mu = count + 0.1`. Iteration stops once the relative
/// change in deviance, `|dev - dev_old| / (|dev| + 0.1)`, drops below the
/// configured tolerance.
///
/// # Errors
///
/// - [`ModelFitError::EmptySeries`], [`ModelFitError::InsufficientYears`],
///   [`ModelFitError::AllZero`], [`ModelFitError::NegativeCount`],
///   [`ModelFitError::NonFinite`] for degenerate input.
/// - [`ModelFitError::Singular`] if a weighted least-squares step has no
///   unique solution.
/// - [`ModelFitError::NonConvergence`] if the iteration limit is reached.
/// - [`ModelFitError::InvalidConfig`] if `config` fails validation.
pub fn fit_poisson(series: &[(i32, f64)], config: &TrendConfig) -> Result<PoissonFit, ModelFitError> {
    config.validate()?;
    check_series(series)?;

    let n = series.len();
    let year_center = series.iter().map(|&(y, _)| f64::from(y)).sum::<f64>() / n as f64;
    let x: Vec<f64> = series
        .iter()
        .map(|&(y, _)| f64::from(y) - year_center)
        .collect();
    let y: Vec<f64> = series.iter().map(|&(_, c)| c).collect();

    let mut mu: Vec<f64> = y.iter().map(|&yi| yi + 0.1).collect();
    let mut eta: Vec<f64> = mu.iter().map(|m| m.ln()).collect();
    let mut dev_old = deviance(&y, &mu);

    for iteration in 1..=config.max_iterations() {
        let (b0, b1) = weighted_step(&x, &y, &mu, &eta)?;

        for i in 0..n {
            eta[i] = b0 + b1 * x[i];
            mu[i] = eta[i].exp();
        }
        if mu.iter().any(|m| !m.is_finite()) {
            return Err(ModelFitError::NonFinite);
        }

        let dev = deviance(&y, &mu);
        trace!(iteration, deviance = dev, b0, b1, "irls step");

        if (dev - dev_old).abs() / (dev.abs() + 0.1) < config.tolerance() {
            let y_bar = y.iter().sum::<f64>() / n as f64;
            let null_mu = vec![y_bar; n];
            let (first_year, last_year) = year_bounds(series);
            return Ok(PoissonFit {
                b0_centered: b0,
                b1,
                year_center,
                first_year,
                last_year,
                deviance: dev,
                null_deviance: deviance(&y, &null_mu),
                log_likelihood: log_likelihood(&y, &mu),
                iterations: iteration,
                n_obs: n,
            });
        }
        dev_old = dev;
    }

    Err(ModelFitError::NonConvergence {
        iterations: config.max_iterations(),
    })
}

/// Rejects series no trend can be fitted to.
fn check_series(series: &[(i32, f64)]) -> Result<(), ModelFitError> {
    if series.is_empty() {
        return Err(ModelFitError::EmptySeries);
    }
    for &(year, count) in series {
        if !count.is_finite() {
            return Err(ModelFitError::NonFinite);
        }
        if count < 0.0 {
            return Err(ModelFitError::NegativeCount { year, count });
        }
    }
    let distinct: BTreeSet<i32> = series.iter().map(|&(y, _)| y).collect();
    if distinct.len() < 2 {
        return Err(ModelFitError::InsufficientYears {
            distinct: distinct.len(),
        });
    }
    if series.iter().all(|&(_, c)| c == 0.0) {
        return Err(ModelFitError::AllZero);
    }
    Ok(())
}

/// One weighted least-squares solve of the working response on `x`, with
/// weights `mu`. Returns the new `(b0, b1)` on the centered scale.
fn weighted_step(x: &[f64], y: &[f64], mu: &[f64], eta: &[f64]) -> Result<(f64, f64), ModelFitError> {
    let (mut sw, mut swx, mut swxx, mut swz, mut swxz) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for i in 0..x.len() {
        let w = mu[i];
        let z = eta[i] + (y[i] - mu[i]) / mu[i];
        sw += w;
        swx += w * x[i];
        swxx += w * x[i] * x[i];
        swz += w * z;
        swxz += w * x[i] * z;
    }

    let det = sw * swxx - swx * swx;
    if det.is_nan() || det <= f64::EPSILON * sw * swxx {
        return Err(ModelFitError::Singular);
    }
    let b1 = (sw * swxz - swx * swz) / det;
    let b0 = (swz - b1 * swx) / sw;
    if !b0.is_finite() || !b1.is_finite() {
        return Err(ModelFitError::NonFinite);
    }
    Ok((b0, b1))
}

/// Poisson deviance, `2 * sum(y * ln(y / mu) - (y - mu))`.
fn deviance(y: &[f64], mu: &[f64]) -> f64 {
    2.0 * y
        .iter()
        .zip(mu)
        .map(|(&yi, &mi)| {
            let ylog = if yi > 0.0 { yi * (yi / mi).ln() } else { 0.0 };
            ylog - (yi - mi)
        })
        .sum::<f64>()
}

/// Poisson log-likelihood, `sum(y * ln(mu) - mu - ln(y!))`.
fn log_likelihood(y: &[f64], mu: &[f64]) -> f64 {
    y.iter()
        .zip(mu)
        .map(|(&yi, &mi)| yi * mi.ln() - mi - ln_gamma(yi + 1.0))
        .sum()
}

fn year_bounds(series: &[(i32, f64)]) -> (i32, i32) {
    let first = series.iter().map(|&(y, _)| y).min().unwrap_or_default();
    let last = series.iter().map(|&(y, _)| y).max().unwrap_or_default();
    (first, last)
}
