//! Viewer rendering: the heatmap grid on the left, the scatter chart on the right.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
    Frame,
};
use synthstat_core::{HeatmapPanel, Rgb};

use crate::tui::app::ViewerApp;

/// Character width of one heatmap cell.
const CELL_WIDTH: usize = 6;

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Largest rectangle inside `area` with the figure's aspect ratio, centred.
///
/// Terminal cells are about twice as tall as they are wide, so the row count
/// is halved relative to the unit ratio.
pub fn canvas_area(area: Rect, width_units: f64, height_units: f64) -> Rect {
    if width_units <= 0.0 || height_units <= 0.0 {
        return area;
    }
    let ratio = height_units / width_units / 2.0;
    let mut width = area.width;
    let mut height = (f64::from(width) * ratio).round() as u16;
    if height > area.height {
        height = area.height;
        width = ((f64::from(height) / ratio).round() as u16).min(area.width);
    }
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Main draw cycle.
pub fn draw(f: &mut Frame, app: &ViewerApp) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(f.area());

    let header_text = Line::from(vec![
        Span::styled(" synthstat ", Style::default().fg(Color::Cyan).bold()),
        Span::raw("| "),
        Span::styled("[Q] Close ", Style::default().fg(Color::Red)),
        Span::styled("[A] Annotations ", Style::default().fg(Color::Yellow)),
    ]);
    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray)));
    f.render_widget(header, vertical_chunks[0]);

    let figure = app.figure;
    let canvas = canvas_area(vertical_chunks[1], figure.width_units, figure.height_units);
    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(canvas);

    render_heatmap(f, &figure.heatmap, app.show_labels, panels[0]);
    render_scatter(f, app, panels[1]);
}

fn heatmap_lines(panel: &HeatmapPanel, show_labels: bool) -> Vec<Line<'static>> {
    (0..panel.rows)
        .map(|row| {
            let spans: Vec<Span> = (0..panel.cols)
                .filter_map(|col| panel.cell(row, col))
                .map(|cell| {
                    let fg = if cell.dark_text { Color::Black } else { Color::White };
                    let text = match (&cell.label, show_labels) {
                        (Some(label), true) => label.clone(),
                        _ => String::new(),
                    };
                    Span::styled(
                        format!("{:^width$}", text, width = CELL_WIDTH),
                        Style::default().bg(color(cell.color)).fg(fg),
                    )
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}

fn render_heatmap(f: &mut Frame, panel: &HeatmapPanel, show_labels: bool, area: Rect) {
    let grid = Paragraph::new(heatmap_lines(panel, show_labels))
        .alignment(Alignment::Center)
        .block(Block::default()
            .title(format!(" {} ", panel.title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow)));
    f.render_widget(grid, area);
}

fn axis_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    vec![
        Span::raw(format!("{:.2}", lo)),
        Span::raw(format!("{:.2}", (lo + hi) / 2.0)),
        Span::raw(format!("{:.2}", hi)),
    ]
}

fn render_scatter(f: &mut Frame, app: &ViewerApp, area: Rect) {
    let scatter = &app.figure.scatter;
    let (x0, x1, y0, y1) = scatter.bounds();

    let datasets = vec![
        Dataset::default()
            .name(scatter.points_label)
            .marker(Marker::Braille)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&app.points),
        Dataset::default()
            .name(scatter.regression_label)
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(color(scatter.regression_color)))
            .data(&app.line),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default()
            .title(format!(" {} ", scatter.title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded))
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(Axis::default()
            .title(scatter.x_label)
            .style(Style::default().fg(Color::Gray))
            .bounds([x0, x1])
            .labels(axis_labels(x0, x1)))
        .y_axis(Axis::default()
            .title(scatter.y_label)
            .style(Style::default().fg(Color::Gray))
            .bounds([y0, y1])
            .labels(axis_labels(y0, y1)));
    f.render_widget(chart, area);
}
