//! Heavy-rain day counts derived from daily precipitation.

use std::collections::BTreeMap;

use boreas_io::DailyTable;
use tracing::{debug, info};

/// Absolute tolerance, in inches, applied when comparing a reading to the
/// threshold. The fixed millimeter-to-inch factor maps 50.8 mm to
/// 1.99999999796 in, which must still count as a 2-inch day.
pub const THRESHOLD_TOLERANCE: f64 = 1e-6;

/// Settings for [`count_heavy_rain_days`].
///
/// # Example
///
/// ```
/// use boreas_table::HeavyRainConfig;
///
/// let cfg = HeavyRainConfig::default().with_threshold_in(1.0);
/// assert_eq!(cfg.threshold_in(), 1.0);
/// assert!((cfg.to_inches(508.0) - 2.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct HeavyRainConfig {
    element: String,
    threshold_in: f64,
    first_year: i32,
    mm_to_in: f64,
}

impl Default for HeavyRainConfig {
    /// `PRCP` readings from 1941 on, counted at 2 inches or more. 1940 is a
    /// partial year in the source record and is excluded.
    fn default() -> Self {
        Self {
            element: "PRCP".to_string(),
            threshold_in: 2.0,
            first_year: 1941,
            mm_to_in: 0.0393700787,
        }
    }
}

impl HeavyRainConfig {
    /// Set the element code to aggregate.
    pub fn with_element(mut self, element: impl Into<String>) -> Self {
        self.element = element.into();
        self
    }

    /// Set the daily threshold in inches.
    pub fn with_threshold_in(mut self, threshold: f64) -> Self {
        self.threshold_in = threshold;
        self
    }

    /// Set the first calendar year included in the counts.
    pub fn with_first_year(mut self, year: i32) -> Self {
        self.first_year = year;
        self
    }

    /// Set the millimeter-to-inch factor.
    pub fn with_mm_to_in(mut self, factor: f64) -> Self {
        self.mm_to_in = factor;
        self
    }

    /// Returns the element code.
    pub fn element(&self) -> &str {
        &self.element
    }

    /// Returns the threshold in inches.
    pub fn threshold_in(&self) -> f64 {
        self.threshold_in
    }

    /// Returns the first included year.
    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Returns the millimeter-to-inch factor.
    pub fn mm_to_in(&self) -> f64 {
        self.mm_to_in
    }

    /// Convert a reading in tenths of millimeters to inches.
    pub fn to_inches(&self, tenths_mm: f64) -> f64 {
        tenths_mm * self.mm_to_in / 10.0
    }

    /// Returns `true` if a reading in tenths of millimeters meets the threshold.
    pub fn is_heavy(&self, tenths_mm: f64) -> bool {
        self.to_inches(tenths_mm) >= self.threshold_in - THRESHOLD_TOLERANCE
    }
}

/// Count, per year, the readings at or above the configured threshold.
///
/// Only rows with the configured element, a non-missing value and a year at
/// or after `first_year` take part. Every year with at least one such row is
/// present in the result, with `0` when no reading qualifies.
pub fn count_heavy_rain_days(daily: &DailyTable, config: &HeavyRainConfig) -> BTreeMap<i32, u32> {
    let mut counts: BTreeMap<i32, u32> = BTreeMap::new();
    let mut n_excluded = 0usize;

    for row in daily.element(config.element()) {
        let Some(value) = row.value else {
            continue;
        };
        let year = row.year();
        if year < config.first_year() {
            n_excluded += 1;
            continue;
        }
        let entry = counts.entry(year).or_insert(0);
        if config.is_heavy(value) {
            *entry += 1;
        }
    }

    debug!(n_excluded, first_year = config.first_year(), "dropped early readings");
    info!(
        n_years = counts.len(),
        total_days = counts.values().sum::<u32>(),
        threshold_in = config.threshold_in(),
        "heavy rain days counted"
    );
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use boreas_io::DailyObservation;
    use chrono::NaiveDate;

    fn obs(y: i32, m: u32, d: u32, element: &str, value: Option<f64>) -> DailyObservation {
        DailyObservation::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), element, value)
    }

    #[test]
    fn conversion_of_508_tenths_is_two_inches() {
        let cfg = HeavyRainConfig::default();
        assert_relative_eq!(cfg.to_inches(508.0), 2.0, epsilon = 1e-6);
        assert!(cfg.is_heavy(508.0));
        assert!(!cfg.is_heavy(507.0));
    }

    #[test]
    fn year_without_heavy_days_reports_zero() {
        let daily = DailyTable::new(vec![
            obs(1950, 3, 1, "PRCP", Some(12.0)),
            obs(1950, 3, 2, "PRCP", Some(0.0)),
            obs(1951, 8, 9, "PRCP", Some(600.0)),
        ]);

        let counts = count_heavy_rain_days(&daily, &HeavyRainConfig::default());

        assert_eq!(counts.get(&1950), Some(&0));
        assert_eq!(counts.get(&1951), Some(&1));
    }

    #[test]
    fn readings_from_1940_never_count() {
        let daily = DailyTable::new(vec![
            obs(1940, 9, 1, "PRCP", Some(900.0)),
            obs(1940, 12, 31, "PRCP", Some(700.0)),
            obs(1941, 1, 1, "PRCP", Some(520.0)),
        ]);

        let counts = count_heavy_rain_days(&daily, &HeavyRainConfig::default());

        assert_eq!(counts.get(&1940), None);
        assert_eq!(counts.values().sum::<u32>(), 1);
        assert_eq!(counts.get(&1941), Some(&1));
    }

    #[test]
    fn ignores_other_elements_and_missing_values() {
        let daily = DailyTable::new(vec![
            obs(1960, 5, 1, "SNOW", Some(900.0)),
            obs(1960, 5, 2, "PRCP", None),
            obs(1960, 5, 3, "PRCP", Some(510.0)),
        ]);

        let counts = count_heavy_rain_days(&daily, &HeavyRainConfig::default());

        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get(&1960), Some(&1));
    }

    #[test]
    fn builder_overrides_defaults() {
        let cfg = HeavyRainConfig::default()
            .with_element("PRCP_IN")
            .with_threshold_in(1.0)
            .with_first_year(1900)
            .with_mm_to_in(0.04);
        assert_eq!(cfg.element(), "PRCP_IN");
        assert_eq!(cfg.first_year(), 1900);
        assert_relative_eq!(cfg.to_inches(250.0), 1.0);
    }
}
