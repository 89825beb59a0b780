use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Boreas configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoreasConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Derived heavy-rain metric settings.
    #[serde(default)]
    pub heavy_rain: HeavyRainToml,

    /// Trend model settings.
    #[serde(default)]
    pub trend: TrendToml,

    /// Chart definitions. Empty means the built-in report.
    #[serde(default, rename = "chart")]
    pub charts: Vec<ChartToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    #[serde(default = "default_annual")]
    pub annual: PathBuf,
    #[serde(default = "default_daily")]
    pub daily: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            annual: default_annual(),
            daily: default_daily(),
            output_dir: default_output_dir(),
        }
    }
}

fn default_annual() -> PathBuf {
    PathBuf::from("annual.csv")
}
fn default_daily() -> PathBuf {
    PathBuf::from("daily.csv")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("figures")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeavyRainToml {
    #[serde(default = "default_element")]
    pub element: String,
    #[serde(default = "default_threshold_in")]
    pub threshold_in: f64,
    #[serde(default = "default_first_year")]
    pub first_year: i32,
    #[serde(default = "default_mm_to_in")]
    pub mm_to_in: f64,
}

impl Default for HeavyRainToml {
    fn default() -> Self {
        Self {
            element: default_element(),
            threshold_in: default_threshold_in(),
            first_year: default_first_year(),
            mm_to_in: default_mm_to_in(),
        }
    }
}

fn default_element() -> String {
    "PRCP".to_string()
}
fn default_threshold_in() -> f64 {
    2.0
}
fn default_first_year() -> i32 {
    1941
}
fn default_mm_to_in() -> f64 {
    0.0393700787
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrendToml {
    #[serde(default = "default_anchor_years")]
    pub anchor_years: Vec<i32>,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

impl Default for TrendToml {
    fn default() -> Self {
        Self {
            anchor_years: default_anchor_years(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

fn default_anchor_years() -> Vec<i32> {
    boreas_trend::DEFAULT_ANCHOR_YEARS.to_vec()
}
fn default_max_iterations() -> usize {
    25
}
fn default_tolerance() -> f64 {
    1e-8
}

/// One `[[chart]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartToml {
    pub name: String,
    #[serde(default = "default_layout")]
    pub layout: String,
    pub series: Vec<String>,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_x_limits")]
    pub x_limits: [f64; 2],
    #[serde(default = "default_y_limits")]
    pub y_limits: [f64; 2],
    /// Series code -> `#rrggbb`.
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub placement: Vec<PlacementToml>,
}

fn default_layout() -> String {
    "single".to_string()
}
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    500
}
fn default_x_limits() -> [f64; 2] {
    [1940.0, 2020.0]
}
fn default_y_limits() -> [f64; 2] {
    [0.0, 100.0]
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlacementToml {
    pub series: String,
    pub early: [f64; 2],
    pub late: [f64; 2],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: BoreasConfig = toml::from_str("").unwrap();
        assert_eq!(config.io.output_dir, PathBuf::from("figures"));
        assert_eq!(config.heavy_rain.element, "PRCP");
        assert_eq!(config.heavy_rain.first_year, 1941);
        assert_eq!(config.trend.anchor_years.first(), Some(&1945));
        assert_eq!(config.trend.anchor_years.last(), Some(&2015));
        assert!(config.charts.is_empty());
    }

    #[test]
    fn chart_tables_parse() {
        let config: BoreasConfig = toml::from_str(
            r##"
            [io]
            annual = "data/annual.csv"

            [[chart]]
            name = "days_gt1"
            series = ["DP1X"]
            y_limits = [0.0, 25.0]
            colors = { DP1X = "#0072b2" }

            [[chart.placement]]
            series = "DP1X"
            early = [1942.0, 23.5]
            late = [1995.0, 23.5]
            "##,
        )
        .unwrap();

        assert_eq!(config.io.annual, PathBuf::from("data/annual.csv"));
        assert_eq!(config.io.daily, PathBuf::from("daily.csv"));
        let chart = &config.charts[0];
        assert_eq!(chart.layout, "single");
        assert_eq!(chart.width, 800);
        assert_eq!(chart.y_limits, [0.0, 25.0]);
        assert_eq!(chart.colors["DP1X"], "#0072b2");
        assert_eq!(chart.placement[0].late, [1995.0, 23.5]);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = toml::from_str::<BoreasConfig>("[trend]\nmax_iter = 5\n").unwrap_err();
        assert!(err.to_string().contains("max_iter"));
    }
}
