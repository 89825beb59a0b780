//! Report command: load, reshape, derive, fit, then draw every chart.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, info_span};

use boreas_chart::{ChartSpec, Figure, build_figure, render_figure};
use boreas_io::{ExceedanceType, read_annual, read_daily};
use boreas_table::{Levels, count_heavy_rain_days, reshape};
use boreas_trend::{SeriesTrend, fit_series};

use crate::cli::ReportArgs;
use crate::config::BoreasConfig;
use crate::convert;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "boreas.toml";

/// Input and output locations after CLI overrides.
#[derive(Debug, Clone, PartialEq)]
struct ReportPaths {
    annual: PathBuf,
    daily: PathBuf,
    output_dir: PathBuf,
}

impl ReportPaths {
    /// CLI flags win over `[io]`.
    fn resolve(args: &ReportArgs, config: &BoreasConfig) -> Self {
        Self {
            annual: args.annual.clone().unwrap_or_else(|| config.io.annual.clone()),
            daily: args.daily.clone().unwrap_or_else(|| config.io.daily.clone()),
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| config.io.output_dir.clone()),
        }
    }
}

/// Run the report pipeline.
pub fn run(args: ReportArgs) -> Result<()> {
    let _cmd = info_span!("report").entered();

    let config = load_config(args.config.as_deref(), Path::new(DEFAULT_CONFIG))?;
    let paths = ReportPaths::resolve(&args, &config);

    // Nothing is written until every chart has been laid out
    let figures = build_figures(&config, &paths)?;

    let mut written: Vec<PathBuf> = Vec::new();
    for figure in &figures {
        written.extend(render_figure(figure, &paths.output_dir)?);
    }

    info!(
        n_charts = figures.len(),
        n_files = written.len(),
        output_dir = %paths.output_dir.display(),
        "report complete"
    );
    Ok(())
}

/// Everything up to drawing: read, reshape, derive, fit, lay out.
fn build_figures(config: &BoreasConfig, paths: &ReportPaths) -> Result<Vec<Figure>> {
    // 1. Build crate configs
    let rain_cfg = convert::build_heavy_rain_config(&config.heavy_rain)?;
    let trend_cfg = convert::build_trend_config(&config.trend)?;
    let specs = convert::build_chart_specs(&config.charts)?;

    let charted = charted_series(&specs);
    let read_codes = Levels::new(charted.iter().copied().filter(|c| !c.is_derived()))
        .context("charts must include at least one series read from the annual file")?;

    // 2. Read and reshape the annual table
    let annual = read_annual(&paths.annual)
        .with_context(|| format!("failed to read annual CSV: {}", paths.annual.display()))?;
    let (_, mut wide) = reshape(&annual, &read_codes).context("failed to reshape annual table")?;
    info!(
        n_series = wide.levels().len(),
        n_years = wide.n_years(),
        "annual table reshaped"
    );

    // 3. Derive heavy-rain days when a chart shows them
    if charted.contains(&ExceedanceType::Dp2x) {
        let daily = read_daily(&paths.daily)
            .with_context(|| format!("failed to read daily CSV: {}", paths.daily.display()))?;
        let counts = count_heavy_rain_days(&daily, &rain_cfg);
        wide = wide.left_join_fill(ExceedanceType::Dp2x, &counts, 0);
    } else {
        debug!("no chart shows DP2X, skipping daily file");
    }
    let long = wide.to_long();

    // 4. Fit every charted series
    let mut trends: BTreeMap<ExceedanceType, SeriesTrend> = BTreeMap::new();
    for &code in &charted {
        let points = wide
            .series(code)
            .ok_or_else(|| anyhow!("no annual column for {code}"))?;
        let trend = fit_series(code, &points, &trend_cfg)
            .with_context(|| format!("failed to fit trend for {code} ({})", code.label()))?;
        trends.insert(code, trend);
    }

    // 5. Lay out
    specs
        .iter()
        .map(|spec| {
            build_figure(spec, &long, &trends)
                .with_context(|| format!("failed to lay out chart {}", spec.name()))
        })
        .collect()
}

/// Reads the config at `path`, or at `fallback` if that exists, or defaults.
fn load_config(path: Option<&Path>, fallback: &Path) -> Result<BoreasConfig> {
    let path = match path {
        Some(p) => p,
        None if fallback.exists() => fallback,
        None => {
            debug!("no config file, using defaults");
            return Ok(BoreasConfig::default());
        }
    };
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    let config = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Every series any chart shows, first-seen order, no duplicates.
fn charted_series(specs: &[ChartSpec]) -> Vec<ExceedanceType> {
    let mut codes = Vec::new();
    for code in specs.iter().flat_map(|s| s.series().iter().copied()) {
        if !codes.contains(&code) {
            codes.push(code);
        }
    }
    codes
}
