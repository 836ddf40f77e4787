//! File renderers for built figures.

pub mod plot;

pub use plot::{OutputFormat, PlotFileSink};
