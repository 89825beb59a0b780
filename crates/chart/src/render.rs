//! Draw a [`Figure`] with plotters, once as SVG and once as PNG.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::error::ChartError;
use crate::figure::{Figure, Panel, X_LABEL, Y_LABEL};
use crate::palette::Rgb;
use crate::spec::ChartLayout;

const FONT: &str = "sans-serif";
const POINT_RADIUS: u32 = 3;

/// Write `{out_dir}/{name}.svg` and `{out_dir}/{name}.png` at the figure's
/// fixed size, creating `out_dir` if needed. Returns the written paths,
/// vector file first.
///
/// # Errors
///
/// [`ChartError::OutputDir`] if the directory cannot be created,
/// [`ChartError::Drawing`] for any backend failure (including missing fonts).
pub fn render_figure(figure: &Figure, out_dir: &Path) -> Result<Vec<PathBuf>, ChartError> {
    fs::create_dir_all(out_dir).map_err(|e| ChartError::OutputDir {
        path: out_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let svg_path = out_dir.join(format!("{}.svg", figure.name));
    {
        let root = SVGBackend::new(&svg_path, figure.size).into_drawing_area();
        draw_figure(&root, figure).map_err(|e| drawing_error(&svg_path, e))?;
    }

    let png_path = out_dir.join(format!("{}.png", figure.name));
    {
        let root = BitMapBackend::new(&png_path, figure.size).into_drawing_area();
        draw_figure(&root, figure).map_err(|e| drawing_error(&png_path, e))?;
    }

    info!(
        chart = %figure.name,
        svg = %svg_path.display(),
        png = %png_path.display(),
        "chart written"
    );
    Ok(vec![svg_path, png_path])
}

fn drawing_error(path: &Path, e: impl std::fmt::Display) -> ChartError {
    ChartError::Drawing {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
}

fn color(rgb: Rgb) -> RGBColor {
    RGBColor(rgb.0, rgb.1, rgb.2)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    match figure.layout {
        ChartLayout::Faceted => {
            let areas = root.split_evenly((1, figure.panels.len().max(1)));
            for (area, panel) in areas.iter().zip(&figure.panels) {
                draw_panel(area, figure, panel)?;
            }
        }
        ChartLayout::Single => {
            for panel in &figure.panels {
                draw_panel(root, figure, panel)?;
            }
        }
    }

    root.present()
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    figure: &Figure,
    panel: &Panel,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (x0, x1) = figure.x_range;
    let (y0, y1) = figure.y_range;

    let mut builder = ChartBuilder::on(area);
    builder
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(55);
    if let Some(title) = panel.title {
        builder.caption(title, (FONT, 20));
    }
    let mut chart = builder.build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .x_label_formatter(&|v| format!("{v:.0}"))
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    for layer in &panel.layers {
        let c = color(layer.color);

        chart.draw_series(
            layer
                .points
                .iter()
                .map(|&p| Circle::new(p, POINT_RADIUS, c.mix(0.6).filled())),
        )?;

        chart
            .draw_series(LineSeries::new(
                layer.trend_line.iter().copied(),
                c.stroke_width(2),
            ))?
            .label(layer.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], c.stroke_width(2)));

        chart.draw_series(layer.annotations.iter().map(|a| {
            Text::new(
                a.text.clone(),
                (a.x, a.y),
                (FONT, 15).into_font().color(&c),
            )
        }))?;
    }

    if figure.layout == ChartLayout::Single {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()?;
    }

    Ok(())
}
