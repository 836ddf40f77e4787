//! State of the interactive figure viewer.

use crossterm::event::KeyCode;
use synthstat_core::Figure;

pub struct ViewerApp<'a> {
    pub figure: &'a Figure,
    /// Scatter points as `(x, y)` pairs, the layout ratatui's chart expects.
    pub points: Vec<(f64, f64)>,
    /// The two endpoints of the regression line.
    pub line: Vec<(f64, f64)>,
    pub show_labels: bool,
    pub should_quit: bool,
}

impl<'a> ViewerApp<'a> {
    pub fn new(figure: &'a Figure) -> Self {
        let points = figure.scatter.points.iter().map(|p| (p.x, p.y)).collect();
        let line = figure.scatter.line_endpoints().to_vec();
        Self {
            figure,
            points,
            line,
            show_labels: true,
            should_quit: false,
        }
    }

    /// Closing keys: `q`, `Esc`, `Enter`. `a` toggles the heatmap annotations.
    pub fn on_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter => self.should_quit = true,
            KeyCode::Char('a') => self.show_labels = !self.show_labels,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthstat_core::{build_figure, generate_random_data, FigureConfig, GeneratorConfig};

    fn figure() -> Figure {
        let (matrix, table) = generate_random_data(&GeneratorConfig::default()).unwrap();
        build_figure(&matrix, &table, &FigureConfig::default()).unwrap()
    }

    #[test]
    fn closing_keys_quit() {
        let figure = figure();
        for code in [KeyCode::Char('q'), KeyCode::Esc, KeyCode::Enter] {
            let mut app = ViewerApp::new(&figure);
            app.on_key(code);
            assert!(app.should_quit, "{:?} should close the viewer", code);
        }
    }

    #[test]
    fn other_keys_keep_the_viewer_open() {
        let figure = figure();
        let mut app = ViewerApp::new(&figure);
        app.on_key(KeyCode::Char('x'));
        app.on_key(KeyCode::Down);
        assert!(!app.should_quit);
    }

    #[test]
    fn annotation_toggle() {
        let figure = figure();
        let mut app = ViewerApp::new(&figure);
        assert!(app.show_labels);
        app.on_key(KeyCode::Char('a'));
        assert!(!app.show_labels);
        app.on_key(KeyCode::Char('a'));
        assert!(app.show_labels);
    }

    #[test]
    fn chart_data_mirrors_the_scatter_panel() {
        let figure = figure();
        let app = ViewerApp::new(&figure);
        assert_eq!(app.points.len(), 50);
        assert_eq!(app.line.len(), 2);
    }
}
