//! Layout model: what each chart draws, independent of the backend.

use std::collections::BTreeMap;

use boreas_io::ExceedanceType;
use boreas_table::LongTable;
use boreas_trend::SeriesTrend;
use tracing::debug;

use crate::annotate::{Annotation, annotate};
use crate::error::ChartError;
use crate::palette::Rgb;
use crate::spec::{ChartLayout, ChartSpec};

/// Year-axis title.
pub const X_LABEL: &str = "Year";

/// Count-axis title.
pub const Y_LABEL: &str = "Days per Year";

/// Everything drawn for one series: observed points, the fitted curve and
/// the two decadal labels. The curve carries point predictions only.
#[derive(Debug, Clone)]
pub struct SeriesLayer {
    pub series: ExceedanceType,
    pub label: &'static str,
    pub color: Rgb,
    /// One (year, count) point per observed year.
    pub points: Vec<(f64, f64)>,
    /// Fitted expected counts at every year of the observed span.
    pub trend_line: Vec<(f64, f64)>,
    pub annotations: [Annotation; 2],
}

/// One plotting area.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Facet title; `None` for single-panel charts, which use a legend.
    pub title: Option<&'static str>,
    pub layers: Vec<SeriesLayer>,
}

/// A complete chart ready to render.
#[derive(Debug, Clone)]
pub struct Figure {
    pub name: String,
    pub layout: ChartLayout,
    pub size: (u32, u32),
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub panels: Vec<Panel>,
}

impl Figure {
    /// Number of trend lines drawn for `series` across all panels.
    pub fn trend_lines(&self, series: ExceedanceType) -> usize {
        self.layers().filter(|l| l.series == series).count()
    }

    /// Iterator over every layer of every panel.
    pub fn layers(&self) -> impl Iterator<Item = &SeriesLayer> {
        self.panels.iter().flat_map(|p| p.layers.iter())
    }
}

/// Assemble the figure for `spec` from observed points and fitted trends.
///
/// Points come from `long`, so they are exactly the observed annual counts.
/// Faceted charts get one titled panel per series in spec order; single
/// charts get one untitled panel holding every series.
///
/// # Errors
///
/// - [`ChartError::InvalidSpec`] / [`ChartError::MissingPlacement`] from
///   [`ChartSpec::validate`].
/// - [`ChartError::MissingSeries`] if a series has no points in `long`.
/// - [`ChartError::MissingTrend`] if a series has no entry in `trends`.
/// - [`ChartError::MissingPrediction`] if a trend has no decadal predictions.
pub fn build_figure(
    spec: &ChartSpec,
    long: &LongTable,
    trends: &BTreeMap<ExceedanceType, SeriesTrend>,
) -> Result<Figure, ChartError> {
    spec.validate()?;

    let mut layers = Vec::with_capacity(spec.series().len());
    for &series in spec.series() {
        layers.push(build_layer(spec, series, long, trends)?);
    }

    let panels = match spec.layout() {
        ChartLayout::Faceted => layers
            .into_iter()
            .map(|layer| Panel {
                title: Some(layer.label),
                layers: vec![layer],
            })
            .collect(),
        ChartLayout::Single => vec![Panel {
            title: None,
            layers,
        }],
    };

    debug!(chart = spec.name(), n_panels = panels.len(), "figure assembled");
    Ok(Figure {
        name: spec.name().to_string(),
        layout: spec.layout(),
        size: spec.size(),
        x_range: spec.x_range(),
        y_range: spec.y_range(),
        panels,
    })
}

fn build_layer(
    spec: &ChartSpec,
    series: ExceedanceType,
    long: &LongTable,
    trends: &BTreeMap<ExceedanceType, SeriesTrend>,
) -> Result<SeriesLayer, ChartError> {
    let points: Vec<(f64, f64)> = long
        .points(series)
        .into_iter()
        .map(|(y, c)| (f64::from(y), f64::from(c)))
        .collect();
    if points.is_empty() {
        return Err(ChartError::MissingSeries {
            chart: spec.name().to_string(),
            series,
        });
    }

    let trend = trends.get(&series).ok_or_else(|| ChartError::MissingTrend {
        chart: spec.name().to_string(),
        series,
    })?;
    let fit = trend.fit();
    let (first, last) = fit.year_span();
    let trend_line = (first..=last)
        .map(|y| {
            let x = f64::from(y);
            (x, fit.predict(x))
        })
        .collect();

    let placement = spec.placement(series).ok_or_else(|| ChartError::MissingPlacement {
        chart: spec.name().to_string(),
        series,
    })?;
    let annotations = annotate(series, trend.decadal(), &placement)?;

    Ok(SeriesLayer {
        series,
        label: series.label(),
        color: spec.color(series),
        points,
        trend_line,
        annotations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use boreas_io::{AnnualObservation, AnnualTable};
    use boreas_table::{Levels, filter_long};
    use boreas_trend::{TrendConfig, fit_series};
    use crate::spec::Placement;
    use ExceedanceType::*;

    fn inputs() -> (LongTable, BTreeMap<ExceedanceType, SeriesTrend>) {
        let mut rows = Vec::new();
        for year in 1941..=1960 {
            rows.push(AnnualObservation::new(year, Dx90, 10 + (year - 1941) as u32));
            rows.push(AnnualObservation::new(year, Dt32, 100));
        }
        let levels = Levels::new([Dx90, Dt32]).unwrap();
        let long = filter_long(&AnnualTable::new(rows), &levels).unwrap();

        let cfg = TrendConfig::default();
        let mut trends = BTreeMap::new();
        for code in [Dx90, Dt32] {
            let points: Vec<(i32, f64)> = long
                .points(code)
                .into_iter()
                .map(|(y, c)| (y, f64::from(c)))
                .collect();
            trends.insert(code, fit_series(code, &points, &cfg).unwrap());
        }
        (long, trends)
    }

    fn placement() -> Placement {
        Placement::new((1942.0, 50.0), (1992.0, 50.0))
    }

    #[test]
    fn faceted_has_one_titled_panel_per_series_in_order() {
        let (long, trends) = inputs();
        let spec = ChartSpec::new("temps", ChartLayout::Faceted, vec![Dt32, Dx90])
            .with_placement(Dx90, placement())
            .with_placement(Dt32, placement());

        let figure = build_figure(&spec, &long, &trends).unwrap();

        let titles: Vec<_> = figure.panels.iter().map(|p| p.title).collect();
        assert_eq!(titles, vec![Some("Below Freezing"), Some("Above 90°F")]);
        assert!(figure.panels.iter().all(|p| p.layers.len() == 1));
    }

    #[test]
    fn layer_has_one_point_per_year_and_full_trend_span() {
        let (long, trends) = inputs();
        let spec = ChartSpec::new("heat", ChartLayout::Single, vec![Dx90])
            .with_placement(Dx90, placement());

        let figure = build_figure(&spec, &long, &trends).unwrap();

        assert_eq!(figure.panels.len(), 1);
        assert_eq!(figure.panels[0].title, None);
        let layer = &figure.panels[0].layers[0];
        assert_eq!(layer.points.len(), 20);
        assert_eq!(layer.points[0], (1941.0, 10.0));
        assert_eq!(layer.trend_line.first().map(|p| p.0), Some(1941.0));
        assert_eq!(layer.trend_line.last().map(|p| p.0), Some(1960.0));
        let fit = trends[&Dx90].fit();
        for &(x, y) in &layer.trend_line {
            assert_relative_eq!(y, fit.predict(x), max_relative = 1e-12);
        }
        assert_eq!(figure.trend_lines(Dx90), 1);
        assert_eq!(layer.annotations[0].series, Dx90);
    }

    #[test]
    fn missing_trend_is_an_error() {
        let (long, mut trends) = inputs();
        trends.remove(&Dt32);
        let spec = ChartSpec::new("cold", ChartLayout::Single, vec![Dt32])
            .with_placement(Dt32, placement());

        let err = build_figure(&spec, &long, &trends).unwrap_err();

        assert!(matches!(err, ChartError::MissingTrend { series: Dt32, .. }));
    }

    #[test]
    fn missing_points_is_an_error() {
        let (long, trends) = inputs();
        let spec = ChartSpec::new("zero", ChartLayout::Single, vec![Dt00])
            .with_placement(Dt00, placement());

        let err = build_figure(&spec, &long, &trends).unwrap_err();

        assert!(matches!(err, ChartError::MissingSeries { series: Dt00, .. }));
    }
}
