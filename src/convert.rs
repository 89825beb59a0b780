//! Pure conversion functions: TOML config structs -> crate API config types.

use std::collections::BTreeSet;

use anyhow::{Context, Result, anyhow, bail};

use crate::config::*;

use boreas_chart::{ChartLayout, ChartSpec, Placement, Rgb, default_report};
use boreas_io::ExceedanceType;
use boreas_table::HeavyRainConfig;
use boreas_trend::TrendConfig;

/// Parses a chart layout name into the corresponding enum variant.
pub fn parse_layout(s: &str) -> Result<ChartLayout> {
    match s.to_lowercase().as_str() {
        "faceted" => Ok(ChartLayout::Faceted),
        "single" => Ok(ChartLayout::Single),
        other => bail!("unknown chart layout: {other:?}"),
    }
}

/// Parses an exceedance type code, case-insensitively.
pub fn parse_series(s: &str) -> Result<ExceedanceType> {
    Ok(s.parse()?)
}

/// Parses a `#rrggbb` color.
pub fn parse_color(s: &str) -> Result<Rgb> {
    Rgb::from_hex(s).ok_or_else(|| anyhow!("invalid hex color: {s:?}"))
}

/// Builds a [`HeavyRainConfig`] from the TOML heavy-rain configuration.
pub fn build_heavy_rain_config(rain: &HeavyRainToml) -> Result<HeavyRainConfig> {
    if rain.element.trim().is_empty() {
        bail!("heavy_rain.element must not be empty");
    }
    if !(rain.threshold_in.is_finite() && rain.threshold_in > 0.0) {
        bail!(
            "heavy_rain.threshold_in must be positive, got {}",
            rain.threshold_in
        );
    }
    if !(rain.mm_to_in.is_finite() && rain.mm_to_in > 0.0) {
        bail!("heavy_rain.mm_to_in must be positive, got {}", rain.mm_to_in);
    }
    Ok(HeavyRainConfig::default()
        .with_element(rain.element.trim())
        .with_threshold_in(rain.threshold_in)
        .with_first_year(rain.first_year)
        .with_mm_to_in(rain.mm_to_in))
}

/// Builds a validated [`TrendConfig`] from the TOML trend configuration.
pub fn build_trend_config(trend: &TrendToml) -> Result<TrendConfig> {
    let cfg = TrendConfig::default()
        .with_anchor_years(trend.anchor_years.clone())
        .with_max_iterations(trend.max_iterations)
        .with_tolerance(trend.tolerance);
    cfg.validate().context("invalid [trend] configuration")?;
    Ok(cfg)
}

/// Builds a validated [`ChartSpec`] from one `[[chart]]` entry.
pub fn build_chart_spec(chart: &ChartToml) -> Result<ChartSpec> {
    let layout = parse_layout(&chart.layout)?;
    let series = chart
        .series
        .iter()
        .map(|s| parse_series(s))
        .collect::<Result<Vec<_>>>()?;

    let [x0, x1] = chart.x_limits;
    let [y0, y1] = chart.y_limits;
    let mut spec = ChartSpec::new(&chart.name, layout, series)
        .with_size(chart.width, chart.height)
        .with_x_range(x0, x1)
        .with_y_range(y0, y1);

    for (code, hex) in &chart.colors {
        spec = spec.with_color(parse_series(code)?, parse_color(hex)?);
    }
    for p in &chart.placement {
        let placement = Placement::new((p.early[0], p.early[1]), (p.late[0], p.late[1]));
        spec = spec.with_placement(parse_series(&p.series)?, placement);
    }

    spec.validate()?;
    Ok(spec)
}

/// Builds every chart spec, falling back to the built-in report when the
/// configuration defines none.
pub fn build_chart_specs(charts: &[ChartToml]) -> Result<Vec<ChartSpec>> {
    if charts.is_empty() {
        return Ok(default_report());
    }

    let mut names = BTreeSet::new();
    let mut specs = Vec::with_capacity(charts.len());
    for chart in charts {
        if !names.insert(chart.name.as_str()) {
            bail!("duplicate chart name: {:?}", chart.name);
        }
        let spec = build_chart_spec(chart)
            .with_context(|| format!("invalid [[chart]] entry {:?}", chart.name))?;
        specs.push(spec);
    }
    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ExceedanceType::*;

    fn chart(toml_str: &str) -> ChartToml {
        toml::from_str(toml_str).unwrap()
    }

    const DAYS_GT2: &str = r##"
        name = "days_gt2"
        series = ["dp2x"]
        y_limits = [0.0, 8.0]
        colors = { DP2X = "#d55e00" }
        placement = [{ series = "DP2X", early = [1942.0, 7.5], late = [1995.0, 7.5] }]
    "##;

    #[test]
    fn layouts_parse_case_insensitively() {
        assert_eq!(parse_layout("Faceted").unwrap(), ChartLayout::Faceted);
        assert_eq!(parse_layout("single").unwrap(), ChartLayout::Single);
        assert!(parse_layout("grid").is_err());
    }

    #[test]
    fn unknown_series_code_fails() {
        let err = parse_series("PRCP").unwrap_err();
        assert!(err.to_string().contains("PRCP"));
    }

    #[test]
    fn chart_entry_converts() {
        let spec = build_chart_spec(&chart(DAYS_GT2)).unwrap();
        assert_eq!(spec.name(), "days_gt2");
        assert_eq!(spec.series(), &[Dp2x]);
        assert_eq!(spec.y_range(), (0.0, 8.0));
        assert_eq!(spec.color(Dp2x), Rgb(0xd5, 0x5e, 0x00));
        assert_eq!(spec.placement(Dp2x).unwrap().early, (1942.0, 7.5));
    }

    #[test]
    fn chart_without_placement_is_rejected() {
        let err = build_chart_spec(&chart("name = \"x\"\nseries = [\"DX90\"]\n")).unwrap_err();
        assert!(format!("{err:#}").contains("DX90"));
    }

    #[test]
    fn bad_color_is_rejected() {
        let bad = DAYS_GT2.replace("#d55e00", "orange");
        let err = build_chart_spec(&chart(&bad)).unwrap_err();
        assert!(err.to_string().contains("orange"));
    }

    #[test]
    fn empty_chart_list_uses_builtin_report() {
        let specs = build_chart_specs(&[]).unwrap();
        assert_eq!(specs.len(), 4);
    }

    #[test]
    fn duplicate_chart_names_are_rejected() {
        let err = build_chart_specs(&[chart(DAYS_GT2), chart(DAYS_GT2)]).unwrap_err();
        assert!(err.to_string().contains("duplicate chart name"));
    }

    #[test]
    fn trend_config_is_validated() {
        let ok = build_trend_config(&TrendToml::default()).unwrap();
        assert_eq!(ok.max_iterations(), 25);

        let bad = TrendToml {
            anchor_years: vec![1955, 1945],
            ..TrendToml::default()
        };
        assert!(build_trend_config(&bad).is_err());
    }

    #[test]
    fn heavy_rain_threshold_must_be_positive() {
        let bad = HeavyRainToml {
            threshold_in: 0.0,
            ..HeavyRainToml::default()
        };
        assert!(build_heavy_rain_config(&bad).is_err());

        let cfg = build_heavy_rain_config(&HeavyRainToml::default()).unwrap();
        assert_eq!(cfg.element(), "PRCP");
        assert_eq!(cfg.first_year(), 1941);
    }
}
