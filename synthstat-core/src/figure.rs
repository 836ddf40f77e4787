//! Render-independent description of the two-panel analysis figure.
//!
//! [`build_figure`] does all the data work of plotting: colour-mapping and
//! annotating the heatmap, and fitting the regression line to whatever table
//! it is given. Sinks only have to draw what is described here.

use log::debug;
use serde::Serialize;
use synthstat_math::linear_fit;

use crate::colormap::{DivergingScale, Rgb};
use crate::config::FigureConfig;
use crate::dataset::{RandomMatrix, Sample, SampleTable};
use crate::errors::AnalysisError;
use crate::format::format_general;

pub const HEATMAP_TITLE: &str = "Heatmap of Random Data";
pub const SCATTER_TITLE: &str = "Scatter Plot of Random Data";
pub const POINTS_LABEL: &str = "Data Points";
pub const REGRESSION_LABEL: &str = "Regression Line";

/// Significant digits used for heatmap annotations.
const ANNOTATION_DIGITS: usize = 2;

/// Slope and intercept of an ordinary least-squares line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegressionLine {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionLine {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits a degree-1 polynomial to the table's `(x, y)` pairs.
pub fn fit_regression(table: &SampleTable) -> Result<RegressionLine, AnalysisError> {
    if table.is_empty() {
        return Err(AnalysisError::EmptyTable);
    }
    let fit = linear_fit(table.xs(), table.ys()).ok_or(AnalysisError::DegenerateColumn("x"))?;
    Ok(RegressionLine {
        slope: fit.slope,
        intercept: fit.intercept,
    })
}

/// One coloured, optionally labelled heatmap cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapCell {
    pub row: usize,
    pub col: usize,
    pub value: f64,
    pub color: Rgb,
    pub label: Option<String>,
    pub dark_text: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatmapPanel {
    pub title: &'static str,
    pub rows: usize,
    pub cols: usize,
    /// Row-major cells.
    pub cells: Vec<HeatmapCell>,
    pub vmin: f64,
    pub vmax: f64,
    /// Cells are drawn square.
    pub square: bool,
}

impl HeatmapPanel {
    pub fn cell(&self, row: usize, col: usize) -> Option<&HeatmapCell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// The scale shared by the cells and the colour bar.
    pub fn scale(&self) -> DivergingScale {
        DivergingScale::new(self.vmin, self.vmax)
    }

    /// `steps + 1` evenly spaced colour bar stops from `vmin` up to `vmax`.
    pub fn color_bar(&self, steps: usize) -> Vec<ColorBarStop> {
        let scale = self.scale();
        let steps = steps.max(1);
        (0..=steps)
            .map(|i| {
                let value = if i == steps {
                    self.vmax
                } else {
                    self.vmin + (self.vmax - self.vmin) * i as f64 / steps as f64
                };
                ColorBarStop {
                    value,
                    color: scale.color(value),
                }
            })
            .collect()
    }
}

/// One sampled point of the heatmap colour bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorBarStop {
    pub value: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPanel {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub points: Vec<Sample>,
    pub points_label: &'static str,
    pub regression: RegressionLine,
    pub regression_label: &'static str,
    pub regression_color: Rgb,
}

impl ScatterPanel {
    /// Axis-aligned bounds `(x_min, x_max, y_min, y_max)` of points and line.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let mut b = self.points.iter().fold(
            (f64::INFINITY, f64::NEG_INFINITY, f64::INFINITY, f64::NEG_INFINITY),
            |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
        );
        for y in [self.regression.predict(b.0), self.regression.predict(b.1)] {
            b.2 = b.2.min(y);
            b.3 = b.3.max(y);
        }
        b
    }

    /// The regression line evaluated at the smallest and largest `x`.
    pub fn line_endpoints(&self) -> [(f64, f64); 2] {
        let (x0, x1, _, _) = self.bounds();
        [(x0, self.regression.predict(x0)), (x1, self.regression.predict(x1))]
    }
}

/// The complete figure handed to a [`crate::sink::FigureSink`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Figure {
    pub width_units: f64,
    pub height_units: f64,
    pub pixel_size: (u32, u32),
    pub heatmap: HeatmapPanel,
    pub scatter: ScatterPanel,
}

/// Builds the heatmap and scatter panels for one run.
pub fn build_figure(
    matrix: &RandomMatrix,
    table: &SampleTable,
    config: &FigureConfig,
) -> Result<Figure, AnalysisError> {
    let heatmap = build_heatmap(matrix, config.annotate);
    let regression = fit_regression(table)?;
    debug!(
        "Fitted regression line: slope={:.4}, intercept={:.4}",
        regression.slope, regression.intercept
    );

    let scatter = ScatterPanel {
        title: SCATTER_TITLE,
        x_label: "X",
        y_label: "Y",
        points: table.iter().collect(),
        points_label: POINTS_LABEL,
        regression,
        regression_label: REGRESSION_LABEL,
        regression_color: Rgb(255, 0, 0),
    };

    Ok(Figure {
        width_units: config.width_units,
        height_units: config.height_units,
        pixel_size: config.pixel_size(),
        heatmap,
        scatter,
    })
}

fn build_heatmap(matrix: &RandomMatrix, annotate: bool) -> HeatmapPanel {
    let (vmin, vmax) = matrix.value_range();
    let scale = DivergingScale::new(vmin, vmax);

    let mut cells = Vec::with_capacity(matrix.values().len());
    for row in 0..matrix.rows() {
        let Some(values) = matrix.row(row) else { continue };
        for (col, &value) in values.iter().enumerate() {
            let color = scale.color(value);
            cells.push(HeatmapCell {
                row,
                col,
                value,
                color,
                label: annotate.then(|| format_general(value, ANNOTATION_DIGITS)),
                dark_text: color.prefers_dark_text(),
            });
        }
    }

    HeatmapPanel {
        title: HEATMAP_TITLE,
        rows: matrix.rows(),
        cols: matrix.cols(),
        cells,
        vmin,
        vmax,
        square: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::coolwarm;

    fn line_table() -> SampleTable {
        let x = vec![0.0, 0.25, 0.5, 0.75, 1.0];
        let y = x.iter().map(|v| 2.0 * v + 1.0).collect();
        SampleTable::from_columns(x, y).unwrap()
    }

    fn small_matrix() -> RandomMatrix {
        RandomMatrix::from_shape_vec(2, 2, vec![0.1, 0.5, 0.9, 0.3]).unwrap()
    }

    #[test]
    fn regression_recovers_exact_line() {
        let line = fit_regression(&line_table()).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-12);
        assert!((line.intercept - 1.0).abs() < 1e-12);
    }

    #[test]
    fn heatmap_cells_are_coloured_and_labelled() {
        let figure = build_figure(&small_matrix(), &line_table(), &FigureConfig::default()).unwrap();
        let heatmap = &figure.heatmap;

        assert_eq!((heatmap.rows, heatmap.cols), (2, 2));
        assert_eq!((heatmap.vmin, heatmap.vmax), (0.1, 0.9));
        assert_eq!(heatmap.cell(0, 0).unwrap().color, coolwarm(0.0));
        assert_eq!(heatmap.cell(1, 0).unwrap().color, coolwarm(1.0));
        assert_eq!(heatmap.cell(0, 1).unwrap().label.as_deref(), Some("0.5"));
        assert_eq!(heatmap.cell(1, 1).unwrap().label.as_deref(), Some("0.3"));
    }

    #[test]
    fn color_bar_spans_the_full_scale() {
        let figure = build_figure(&small_matrix(), &line_table(), &FigureConfig::default()).unwrap();
        let bar = figure.heatmap.color_bar(8);

        assert_eq!(bar.len(), 9);
        assert_eq!(bar[0].value, 0.1);
        assert_eq!(bar[8].value, 0.9);
        assert_eq!(bar[0].color, coolwarm(0.0));
        assert_eq!(bar[8].color, coolwarm(1.0));
        assert!(bar.windows(2).all(|w| w[0].value < w[1].value));
    }

    #[test]
    fn annotations_can_be_disabled() {
        let config = FigureConfig { annotate: false, ..Default::default() };
        let figure = build_figure(&small_matrix(), &line_table(), &config).unwrap();
        assert!(figure.heatmap.cells.iter().all(|c| c.label.is_none()));
    }

    #[test]
    fn scatter_panel_carries_labels_and_endpoints() {
        let figure = build_figure(&small_matrix(), &line_table(), &FigureConfig::default()).unwrap();
        let scatter = &figure.scatter;

        assert_eq!(scatter.points.len(), 5);
        assert_eq!(scatter.title, SCATTER_TITLE);
        assert_eq!(scatter.regression_label, REGRESSION_LABEL);

        let [(x0, y0), (x1, y1)] = scatter.line_endpoints();
        assert_eq!((x0, x1), (0.0, 1.0));
        assert!((y0 - 1.0).abs() < 1e-12);
        assert!((y1 - 3.0).abs() < 1e-12);
        assert_eq!(figure.pixel_size, (1600, 600));
    }

    #[test]
    fn constant_x_cannot_be_fitted() {
        let table = SampleTable::from_columns(vec![0.5, 0.5], vec![1.0, 2.0]).unwrap();
        let err = build_figure(&small_matrix(), &table, &FigureConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::DegenerateColumn("x")));
    }
}
