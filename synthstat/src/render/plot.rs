//! Renders a [`Figure`] to a PNG or SVG file with `plotters`.
//!
//! The canvas is split into two equal panels: the annotated heatmap on the left
//! and the scatter plot with its regression line on the right.

use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::error::Error;
use std::path::{Path, PathBuf};

use synthstat_core::{AnalysisError, Figure, FigureSink, HeatmapPanel, Rgb, ScatterPanel};

const SINK_NAME: &str = "plot-file";
const FONT: &str = "sans-serif";

/// Image formats the file renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Picks the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(OutputFormat::Png),
            Some("svg") => Ok(OutputFormat::Svg),
            _ => Err(AnalysisError::render(
                SINK_NAME,
                format!("unsupported figure extension for {} (expected .png or .svg)", path.display()),
            )),
        }
    }
}

/// A sink that writes every figure it receives to `path`.
#[derive(Debug, Clone)]
pub struct PlotFileSink {
    path: PathBuf,
    format: OutputFormat,
}

impl PlotFileSink {
    /// Creates a sink for `path`; the extension must be `.png` or `.svg`.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, AnalysisError> {
        let path = path.into();
        let format = OutputFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

}

impl FigureSink for PlotFileSink {
    fn name(&self) -> &str {
        SINK_NAME
    }

    fn present(&mut self, figure: &Figure) -> Result<(), AnalysisError> {
        let size = figure.pixel_size;
        let result = match self.format {
            OutputFormat::Png => draw_figure(&BitMapBackend::new(&self.path, size).into_drawing_area(), figure),
            OutputFormat::Svg => draw_figure(&SVGBackend::new(&self.path, size).into_drawing_area(), figure),
        };
        result.map_err(|e| AnalysisError::render(SINK_NAME, e))?;
        info!("Saved figure to {}", self.path.display());
        Ok(())
    }
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Extends `[lo, hi]` by `fraction` of its width on both sides.
///
/// A zero-width range is widened by a fixed half unit so it stays drawable.
pub fn padded_range(lo: f64, hi: f64, fraction: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return (lo - 0.5, hi + 0.5);
    }
    (lo - span * fraction, hi + span * fraction)
}

/// Size of the largest `cols × rows` grid of square cells that fits in `(width, height)`.
pub fn square_grid_size(width: u32, height: u32, rows: usize, cols: usize) -> (u32, u32) {
    if rows == 0 || cols == 0 {
        return (0, 0);
    }
    let cell = (width / cols as u32).min(height / rows as u32);
    (cell * cols as u32, cell * rows as u32)
}

fn draw_figure<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, figure: &Figure) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;
    let (left, right) = root.split_horizontally((figure.pixel_size.0 / 2) as i32);
    draw_heatmap(&left, &figure.heatmap)?;
    draw_scatter(&right, &figure.scatter)?;
    root.present()?;
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &HeatmapPanel) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    // Room for the caption and the axis labels around the grid.
    const CAPTION: u32 = 40;
    const LABELS: u32 = 30;
    const MARGIN: u32 = 10;
    // Gap, bar and tick labels of the colour bar.
    const BAR_GAP: u32 = 15;
    const BAR_WIDTH: u32 = 20;
    const BAR_LABELS: u32 = 45;
    const BAR: u32 = BAR_GAP + BAR_WIDTH + BAR_LABELS;

    let (w, h) = area.dim_in_pixel();
    let avail_w = w.saturating_sub(LABELS + BAR + 2 * MARGIN);
    let avail_h = h.saturating_sub(CAPTION + LABELS + 2 * MARGIN);
    let (grid_w, grid_h) = if panel.square {
        square_grid_size(avail_w, avail_h, panel.rows, panel.cols)
    } else {
        (avail_w, avail_h)
    };
    let left = (w.saturating_sub(grid_w + LABELS + BAR)) / 2;
    let top = (h.saturating_sub(grid_h + LABELS + CAPTION)) / 2;
    let area = area.clone().shrink(
        (left as i32, top as i32),
        ((grid_w + LABELS + BAR) as i32, (grid_h + LABELS + CAPTION) as i32),
    );
    let (area, bar_area) = area.split_horizontally((grid_w + LABELS) as i32);
    draw_color_bar(&bar_area, panel, CAPTION, LABELS, BAR_GAP, BAR_LABELS)?;

    let rows = panel.rows as f64;
    let cols = panel.cols as f64;
    let mut chart = ChartBuilder::on(&area)
        .caption(panel.title, (FONT, 20))
        .x_label_area_size(LABELS)
        .y_label_area_size(LABELS)
        .build_cartesian_2d(0.0..cols, 0.0..rows)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(panel.cols)
        .y_labels(panel.rows)
        .x_label_formatter(&|v| format!("{}", v.floor() as i64))
        .y_label_formatter(&|v| format!("{}", panel.rows as i64 - 1 - v.floor() as i64))
        .draw()?;

    // Row 0 is drawn at the top, as in a matrix listing.
    let top_y = |row: usize| (panel.rows - 1 - row) as f64;

    chart.draw_series(panel.cells.iter().map(|cell| {
        let x = cell.col as f64;
        let y = top_y(cell.row);
        Rectangle::new([(x, y), (x + 1.0, y + 1.0)], rgb(cell.color).filled())
    }))?;

    chart.draw_series(panel.cells.iter().filter_map(|cell| {
        let label = cell.label.clone()?;
        let color = if cell.dark_text { BLACK } else { WHITE };
        let style = (FONT, 12)
            .into_font()
            .color(&color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        Some(Text::new(label, (cell.col as f64 + 0.5, top_y(cell.row) + 0.5), style))
    }))?;

    Ok(())
}

/// Number of colour bands in the heatmap colour bar.
const COLOR_BAR_STEPS: usize = 64;

fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &HeatmapPanel,
    top: u32,
    bottom: u32,
    gap: u32,
    labels: u32,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (lo, hi) = padded_range(panel.vmin, panel.vmax, 0.0);
    let mut chart = ChartBuilder::on(area)
        .margin_top(top)
        .margin_bottom(bottom)
        .margin_left(gap)
        .right_y_label_area_size(labels)
        .build_cartesian_2d(0.0..1.0, lo..hi)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{:.1}", v))
        .draw()?;

    let stops = panel.color_bar(COLOR_BAR_STEPS);
    chart.draw_series(stops.windows(2).map(|pair| {
        Rectangle::new([(0.0, pair[0].value), (1.0, pair[1].value)], rgb(pair[0].color).filled())
    }))?;
    chart.draw_series(std::iter::once(Rectangle::new([(0.0, lo), (1.0, hi)], BLACK.stroke_width(1))))?;

    Ok(())
}

fn draw_scatter<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &ScatterPanel) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let (x0, x1, y0, y1) = panel.bounds();
    let (x_lo, x_hi) = padded_range(x0, x1, 0.05);
    let (y_lo, y_hi) = padded_range(y0, y1, 0.05);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, (FONT, 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label)
        .y_desc(panel.y_label)
        .draw()?;

    chart
        .draw_series(panel.points.iter().map(|p| Circle::new((p.x, p.y), 4, BLUE.filled())))?
        .label(panel.points_label)
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLUE.filled()));

    let line_color = rgb(panel.regression_color);
    chart
        .draw_series(LineSeries::new(panel.line_endpoints(), line_color.stroke_width(2)))?
        .label(panel.regression_label)
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2)));

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
