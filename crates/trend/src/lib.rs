//! # boreas-trend
//!
//! Log-linear Poisson trend fits for annual exceedance counts.
//!
//! Each series of `(year, count)` pairs is fitted with
//! `log(E[count]) = b0 + b1 * year` by iteratively reweighted least squares,
//! then evaluated at fixed mid-decade anchor years to give a "typical count"
//! for each era.
//!
//! ## Quick Start
//!
//! ```
//! use boreas_io::ExceedanceType;
//! use boreas_trend::{TrendConfig, fit_series};
//!
//! let points: Vec<(i32, f64)> = (1941..=2019)
//!     .map(|y| (y, 10.0 + f64::from(y - 1941) * 0.4))
//!     .collect();
//! let trend = fit_series(ExceedanceType::Dx90, &points, &TrendConfig::default()).unwrap();
//! assert_eq!(trend.decadal().len(), 8);
//! assert!(trend.fit().slope() > 0.0);
//! ```

mod config;
mod decadal;
mod error;
mod poisson;

pub use config::{DEFAULT_ANCHOR_YEARS, TrendConfig};
pub use decadal::{DecadalPrediction, SeriesTrend, fit_series, predict_decadal};
pub use error::ModelFitError;
pub use poisson::{PoissonFit, fit_poisson};
