// synthstat/src/tui/mod.rs
//! Blocking terminal viewer for the analysis figure.
//!
//! Takes over the terminal in raw mode on the alternate screen, draws both
//! panels, and waits until the user closes the view.

pub mod app;
pub mod ui;

use anyhow::Result;
use crossterm::{
    cursor::Show,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, warn};
use ratatui::{backend::{Backend, CrosstermBackend}, Terminal};
use std::io::{self, Write};

use synthstat_core::{AnalysisError, Figure, FigureSink};

use crate::tui::app::ViewerApp;

/// Tracks which terminal changes are in effect and undoes them on drop.
#[derive(Debug, Default)]
struct TerminalGuard {
    raw: bool,
    alternate: bool,
}

impl TerminalGuard {
    /// Restores the terminal now and reports the first failure.
    fn restore(&mut self) -> io::Result<()> {
        let result = restore_terminal(&mut io::stdout(), self.raw, self.alternate);
        self.raw = false;
        self.alternate = false;
        result
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.raw || self.alternate {
            if let Err(e) = self.restore() {
                warn!("Failed to restore the terminal: {}", e);
            }
        }
    }
}

/// Leaves raw mode and the alternate screen and shows the cursor.
///
/// Every step is attempted even if an earlier one fails; the first error is returned.
fn restore_terminal<W: Write>(out: &mut W, raw: bool, alternate: bool) -> io::Result<()> {
    let mut first_error = None;
    if raw {
        if let Err(e) = disable_raw_mode() {
            first_error.get_or_insert(e);
        }
    }
    if alternate {
        if let Err(e) = execute!(out, LeaveAlternateScreen) {
            first_error.get_or_insert(e);
        }
    }
    if let Err(e) = execute!(out, Show) {
        first_error.get_or_insert(e);
    }
    first_error.map_or(Ok(()), Err)
}

/// Shows `figure` and blocks until the viewer is closed.
pub fn run_viewer(figure: &Figure) -> Result<()> {
    let mut guard = TerminalGuard::default();
    enable_raw_mode()?;
    guard.raw = true;
    execute!(io::stdout(), EnterAlternateScreen)?;
    guard.alternate = true;

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = ViewerApp::new(figure);
    let result = event_loop(&mut terminal, &mut app);
    drop(terminal);

    let restored = guard.restore();
    result?;
    restored?;
    Ok(())
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut ViewerApp<'_>) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.on_key(key.code);
            }
        }
    }
    debug!("Viewer closed by user.");
    Ok(())
}

/// The interactive display, as a pipeline sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewerSink;

impl FigureSink for ViewerSink {
    fn name(&self) -> &str {
        "viewer"
    }

    fn present(&mut self, figure: &Figure) -> Result<(), AnalysisError> {
        run_viewer(figure).map_err(|e| AnalysisError::render("viewer", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenWriter;

    impl Write for BrokenWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn restore_leaves_the_alternate_screen_and_shows_the_cursor() {
        let mut out = Vec::new();
        restore_terminal(&mut out, false, true).unwrap();
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("\u{1b}[?1049l"));
        assert!(written.ends_with("\u{1b}[?25h"));
    }

    #[test]
    fn restore_without_alternate_screen_only_shows_the_cursor() {
        let mut out = Vec::new();
        restore_terminal(&mut out, false, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\u{1b}[?25h");
    }

    #[test]
    fn restore_reports_the_first_failure() {
        let err = restore_terminal(&mut BrokenWriter, false, true).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
