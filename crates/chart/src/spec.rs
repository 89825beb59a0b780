//! Per-chart configuration.

use std::collections::BTreeMap;

use boreas_io::ExceedanceType;
use boreas_table::Levels;

use crate::error::ChartError;
use crate::palette::Rgb;

/// How a chart arranges its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartLayout {
    /// One panel per series, side by side, titled with the series label.
    Faceted,
    /// All series overlaid in one panel with a legend.
    Single,
}

/// Where the "before" and "after" labels of one series go, in data
/// coordinates.
///
/// Placements are tuned by hand against the chart's axis limits. Changing the
/// limits means re-tuning the placements.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Position of the earliest-decade label.
    pub early: (f64, f64),
    /// Position of the latest-decade label.
    pub late: (f64, f64),
}

impl Placement {
    /// Convenience constructor.
    pub fn new(early: (f64, f64), late: (f64, f64)) -> Self {
        Self { early, late }
    }
}

/// Everything needed to draw one chart apart from the data.
///
/// # Example
///
/// ```
/// use boreas_chart::{ChartLayout, ChartSpec, Placement};
/// use boreas_io::ExceedanceType;
///
/// let spec = ChartSpec::new("days_gt2", ChartLayout::Single, vec![ExceedanceType::Dp2x])
///     .with_y_range(0.0, 8.0)
///     .with_placement(ExceedanceType::Dp2x, Placement::new((1942.0, 7.0), (1995.0, 7.0)));
/// assert!(spec.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ChartSpec {
    name: String,
    layout: ChartLayout,
    series: Vec<ExceedanceType>,
    colors: BTreeMap<ExceedanceType, Rgb>,
    placements: BTreeMap<ExceedanceType, Placement>,
    x_range: (f64, f64),
    y_range: (f64, f64),
    size: (u32, u32),
}

impl ChartSpec {
    /// Creates a spec with default colors, a 1940–2020 year axis, a 0–100
    /// count axis, 800×500 pixels and no placements.
    pub fn new(name: impl Into<String>, layout: ChartLayout, series: Vec<ExceedanceType>) -> Self {
        Self {
            name: name.into(),
            layout,
            series,
            colors: BTreeMap::new(),
            placements: BTreeMap::new(),
            x_range: (1940.0, 2020.0),
            y_range: (0.0, 100.0),
            size: (800, 500),
        }
    }

    /// Overrides the color of one series.
    pub fn with_color(mut self, series: ExceedanceType, color: Rgb) -> Self {
        self.colors.insert(series, color);
        self
    }

    /// Sets the label placement of one series.
    pub fn with_placement(mut self, series: ExceedanceType, placement: Placement) -> Self {
        self.placements.insert(series, placement);
        self
    }

    /// Sets the year axis limits.
    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = (min, max);
        self
    }

    /// Sets the count axis limits.
    pub fn with_y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = (min, max);
        self
    }

    /// Sets the output size in pixels.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }

    // --- Accessors ---

    /// File stem of the output files.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Panel arrangement.
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    /// Series in draw, facet and legend order.
    pub fn series(&self) -> &[ExceedanceType] {
        &self.series
    }

    /// Color of `series`: the override if set, otherwise the palette default.
    pub fn color(&self, series: ExceedanceType) -> Rgb {
        self.colors
            .get(&series)
            .copied()
            .unwrap_or_else(|| Rgb::for_series(series))
    }

    /// Label placement of `series`, if configured.
    pub fn placement(&self, series: ExceedanceType) -> Option<Placement> {
        self.placements.get(&series).copied()
    }

    /// Year axis limits.
    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Count axis limits.
    pub fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Output size in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// The series as an ordered level list.
    pub fn levels(&self) -> Result<Levels, ChartError> {
        Levels::new(self.series.iter().copied()).map_err(|e| self.invalid(e.to_string()))
    }

    /// Validates this spec.
    ///
    /// The name must be a usable file stem, the series list non-empty and
    /// duplicate-free, both axis ranges finite and increasing, the size
    /// non-zero, and every series must have a placement.
    pub fn validate(&self) -> Result<(), ChartError> {
        let file_safe = |c: char| c.is_ascii_alphanumeric() || c == '_' || c == '-';
        if self.name.is_empty() || !self.name.chars().all(file_safe) {
            return Err(self.invalid(format!(
                "name must be non-empty and use only [A-Za-z0-9_-], got '{}'",
                self.name
            )));
        }
        self.levels()?;
        for (axis, (lo, hi)) in [("x", self.x_range), ("y", self.y_range)] {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(self.invalid(format!("{axis} range must be increasing, got {lo}..{hi}")));
            }
        }
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(self.invalid(format!("size must be non-zero, got {:?}", self.size)));
        }
        if let Some(&series) = self.series.iter().find(|s| !self.placements.contains_key(*s)) {
            return Err(ChartError::MissingPlacement {
                chart: self.name.clone(),
                series,
            });
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> ChartError {
        ChartError::InvalidSpec {
            chart: self.name.clone(),
            reason,
        }
    }
}

/// The report's fixed chart set: one faceted temperature figure and three
/// single-panel precipitation figures.
pub fn default_report() -> Vec<ChartSpec> {
    use ExceedanceType::*;

    vec![
        ChartSpec::new("frequencythreehoriz", ChartLayout::Faceted, vec![Dx90, Dt32, Dt00])
            .with_size(1200, 420)
            .with_y_range(0.0, 180.0)
            .with_placement(Dx90, Placement::new((1942.0, 75.0), (1992.0, 75.0)))
            .with_placement(Dt32, Placement::new((1942.0, 172.0), (1992.0, 172.0)))
            .with_placement(Dt00, Placement::new((1942.0, 45.0), (1992.0, 45.0))),
        ChartSpec::new("highrainfalldays", ChartLayout::Single, vec![Dp1x, Dp2x])
            .with_y_range(0.0, 25.0)
            .with_placement(Dp1x, Placement::new((1942.0, 23.5), (1995.0, 23.5)))
            .with_placement(Dp2x, Placement::new((1942.0, 6.0), (1995.0, 6.0))),
        ChartSpec::new("days_gt1", ChartLayout::Single, vec![Dp1x])
            .with_y_range(0.0, 25.0)
            .with_placement(Dp1x, Placement::new((1942.0, 23.5), (1995.0, 23.5))),
        ChartSpec::new("days_gt2", ChartLayout::Single, vec![Dp2x])
            .with_y_range(0.0, 8.0)
            .with_placement(Dp2x, Placement::new((1942.0, 7.5), (1995.0, 7.5))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExceedanceType::*;

    fn spec() -> ChartSpec {
        ChartSpec::new("days_gt1", ChartLayout::Single, vec![Dp1x])
            .with_placement(Dp1x, Placement::new((1942.0, 20.0), (1995.0, 20.0)))
    }

    #[test]
    fn default_report_is_valid() {
        let report = default_report();
        let names: Vec<_> = report.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            vec!["frequencythreehoriz", "highrainfalldays", "days_gt1", "days_gt2"]
        );
        for spec in &report {
            spec.validate().unwrap();
        }
        let faceted = report
            .iter()
            .filter(|s| s.layout() == ChartLayout::Faceted)
            .count();
        assert_eq!(faceted, 1);
    }

    #[test]
    fn color_override_wins_over_palette() {
        let spec = spec().with_color(Dp1x, Rgb(1, 2, 3));
        assert_eq!(spec.color(Dp1x), Rgb(1, 2, 3));
        assert_eq!(spec.color(Dp2x), Rgb::for_series(Dp2x));
    }

    #[test]
    fn missing_placement_is_reported() {
        let spec = ChartSpec::new("x", ChartLayout::Faceted, vec![Dx90, Dt32])
            .with_placement(Dx90, Placement::new((1950.0, 1.0), (2000.0, 1.0)));
        assert!(matches!(
            spec.validate(),
            Err(ChartError::MissingPlacement { series: Dt32, .. })
        ));
    }

    #[test]
    fn bad_name_range_and_duplicates_are_rejected() {
        assert!(spec().with_y_range(10.0, 0.0).validate().is_err());
        assert!(spec().with_size(0, 100).validate().is_err());
        let bad_name = ChartSpec::new("../up", ChartLayout::Single, vec![Dp1x])
            .with_placement(Dp1x, Placement::new((1942.0, 20.0), (1995.0, 20.0)));
        assert!(matches!(
            bad_name.validate(),
            Err(ChartError::InvalidSpec { .. })
        ));
        let dup = ChartSpec::new("dup", ChartLayout::Single, vec![Dp1x, Dp1x]);
        assert!(matches!(dup.validate(), Err(ChartError::InvalidSpec { .. })));
    }
}
