//! Defines the `FigureSink` trait, the seam between figure construction and drawing.
//!
//! The core library builds a [`Figure`]; a sink decides what to do with it:
//! draw it in an interactive viewer, render it to a file, or ignore it.
//! This keeps the library free of any terminal or graphics backend.
//!
//! License: MIT OR APACHE 2.0

use log::debug;

use crate::errors::AnalysisError;
use crate::figure::Figure;

/// A consumer of built figures.
pub trait FigureSink {
    /// Short name used in log lines and render errors.
    fn name(&self) -> &str;

    /// Presents the figure. Interactive sinks may block until the user closes them.
    fn present(&mut self, figure: &Figure) -> Result<(), AnalysisError>;
}

/// A sink that accepts every figure and draws nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FigureSink for NullSink {
    fn name(&self) -> &str {
        "null"
    }

    fn present(&mut self, figure: &Figure) -> Result<(), AnalysisError> {
        debug!(
            "Discarding {}x{} figure",
            figure.heatmap.rows, figure.heatmap.cols
        );
        Ok(())
    }
}

/// A sink that keeps a copy of every figure it receives.
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    pub figures: Vec<Figure>,
}

impl FigureSink for CollectingSink {
    fn name(&self) -> &str {
        "collect"
    }

    fn present(&mut self, figure: &Figure) -> Result<(), AnalysisError> {
        self.figures.push(figure.clone());
        Ok(())
    }
}
