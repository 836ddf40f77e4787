// synthstat/src/lib.rs
//! # synthstat CLI Application
//!
//! Terminal front end for `synthstat-core`: argument parsing, logging, console
//! styling, the interactive figure viewer, and the plotters file renderer.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod render;
pub mod tui;
pub mod ui;

pub use commands::analyze::{run_analyze, AnalyzeOptions};
