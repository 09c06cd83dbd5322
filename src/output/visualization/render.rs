//! Chart rendering with `plotters`
//!
//! Draws a [`ChartSpec`] to a PNG file, or to SVG when the output path ends
//! in `.svg`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chemlab_rs::output::visualization::{render_chart, Chartable, PlotConfig, NO_TITLE};
//!
//! let analysis = phenol_water::analyze(&series)?;
//! render_chart(
//!     &analysis.chart_spec(),
//!     Path::new("phenol_water_phase_diagram.png"),
//!     Some(&PlotConfig::phase_diagram(NO_TITLE)),
//! )?;
//! ```

use std::error::Error;
use std::ops::Range;
use std::path::Path;

use log::info;
use plotters::prelude::*;

use super::chart::{Annotation, ChartSpec};
use super::config::PlotConfig;

// =================================================================================================
// Axis ranges
// =================================================================================================

/// Pad a data interval by 10% on each side (±1 for a single value)
fn padded(min: f64, max: f64) -> Range<f64> {
    let span = max - min;
    if span > 0.0 {
        (min - 0.1 * span)..(max + 0.1 * span)
    } else {
        (min - 1.0)..(max + 1.0)
    }
}

/// X and y ranges covering the series and every annotation
fn axis_ranges(spec: &ChartSpec) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;

    let mut include = |x: f64, y: Option<f64>| {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        if let Some(y) = y {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    };

    for &(x, y) in &spec.series {
        include(x, Some(y));
    }
    for annotation in &spec.annotations {
        match annotation {
            Annotation::Marker { x, y, .. } => include(*x, Some(*y)),
            Annotation::VerticalLine { x, .. } => include(*x, None),
        }
    }

    (padded(x_min, x_max), padded(y_min, y_max))
}

// =================================================================================================
// Drawing
// =================================================================================================

/// Draw a chart on any drawing area
fn draw_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    spec: &ChartSpec,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (x_range, y_range) = axis_ranges(spec);
    let (y_low, y_high) = (y_range.start, y_range.end);
    let title = config.title.as_deref().unwrap_or(&spec.title);

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 32.0).into_font())
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(spec.x_label.as_str()).y_desc(spec.y_label.as_str());
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.draw()?;

    // Data curve
    let line_color = config.line_color;
    chart.draw_series(LineSeries::new(
        spec.series.iter().copied(),
        line_color.stroke_width(config.line_width),
    ))?;

    if config.show_markers {
        let marker_size = config.marker_size;
        chart.draw_series(
            spec.series
                .iter()
                .map(|&(x, y)| Circle::new((x, y), marker_size, line_color.filled())),
        )?;
    }

    // Annotations
    for (i, annotation) in spec.annotations.iter().enumerate() {
        let color = config.get_annotation_color(i);
        match annotation {
            Annotation::Marker { x, y, label } => {
                let radius = config.marker_size * 2;
                chart
                    .draw_series(std::iter::once(Circle::new((*x, *y), radius, color.filled())))?
                    .label(label.as_str())
                    .legend(move |(lx, ly)| Circle::new((lx + 10, ly), 5, color.filled()));
            }
            Annotation::VerticalLine { x, label } => {
                let style = color.stroke_width(config.line_width);
                chart
                    .draw_series(std::iter::once(PathElement::new(
                        vec![(*x, y_low), (*x, y_high)],
                        style,
                    )))?
                    .label(label.as_str())
                    .legend(move |(lx, ly)| PathElement::new(vec![(lx, ly), (lx + 20, ly)], style));
            }
        }
    }

    if !spec.annotations.is_empty() {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;
    Ok(())
}

/// Render a chart to `output_path`
///
/// # Arguments
///
/// * `spec` - Series and annotations to draw
/// * `output_path` - Output file (.svg for SVG, anything else gives PNG)
/// * `config` - Optional PlotConfig (defaults if None)
///
/// # Errors
///
/// Returns error if:
/// - the series is empty or contains non-finite values
/// - the file cannot be written
/// - plotting fails
pub fn render_chart(
    spec: &ChartSpec,
    output_path: &Path,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if spec.series.is_empty() {
        return Err("Empty data: chart series must not be empty".into());
    }
    let finite = spec.series.iter().all(|(x, y)| x.is_finite() && y.is_finite())
        && spec.annotations.iter().all(|a| a.x().is_finite());
    if !finite {
        return Err("Invalid data: NaN or Inf detected in chart data".into());
    }

    let default_config = PlotConfig::default();
    let config = config.unwrap_or(&default_config);

    let is_svg = output_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("svg"))
        .unwrap_or(false);

    if is_svg {
        let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_on_area(&root, spec, config)?;
    } else {
        let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
        draw_on_area(&root, spec, config)?;
    }

    info!("chart '{}' written to {}", spec.title, output_path.display());
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
