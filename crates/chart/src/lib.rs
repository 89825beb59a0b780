//! # boreas-chart
//!
//! Annotated scatter + trend-line charts of annual exceedance counts.
//!
//! A [`ChartSpec`] names everything that is tuned by hand for one output
//! chart: series order, colors, axis limits, size and label placements.
//! [`build_figure`] combines a spec with observed points and fitted trends
//! into a [`Figure`], a plain layout model. [`render_figure`] draws that
//! model to an SVG and a PNG file.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `annotate` | "~N per year" labels from decadal predictions |
//! | `figure` | Layout model: panels, point layers, trend lines |
//! | `palette` | Series colors |
//! | `render` | plotters drawing to SVG and PNG |
//! | `spec` | Per-chart configuration and the default report |
//! | `error` | Error types |

mod annotate;
mod error;
mod figure;
mod palette;
mod render;
mod spec;

pub use annotate::{Annotation, annotate, format_count};
pub use error::ChartError;
pub use figure::{Figure, Panel, SeriesLayer, X_LABEL, Y_LABEL, build_figure};
pub use palette::Rgb;
pub use render::render_figure;
pub use spec::{ChartLayout, ChartSpec, Placement, default_report};
