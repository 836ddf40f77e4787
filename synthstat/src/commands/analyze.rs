//! The analysis command: resolve configuration, run the pipeline, report.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::io::{self, Write};
use std::path::PathBuf;

use synthstat_core::{run_analysis, AnalysisConfig, AnalysisReport, ConfigOverrides, FigureSink};

use crate::render::PlotFileSink;
use crate::tui::ViewerSink;
use crate::ui::output_format;
use crate::ui::theme::{build_theme_map, ThemeMap};

/// Options for one analysis run, independent of how they were parsed.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub config_path: Option<PathBuf>,
    pub overrides: ConfigOverrides,
    pub save_figure: Option<PathBuf>,
    /// Open the interactive viewer (only when stdout is a terminal).
    pub display: bool,
    pub json: Option<PathBuf>,
    pub table: bool,
    pub theme: Option<PathBuf>,
    pub quiet: bool,
}

/// Helper for printing warnings to stderr.
pub fn warn_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_warn_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

fn info_msg(msg: impl AsRef<str>, theme: &ThemeMap) {
    let stderr_supports_color = io::stderr().is_terminal();
    let _ = output_format::print_info_message(&mut io::stderr(), msg.as_ref(), theme, stderr_supports_color);
}

/// Loads the configuration: file (or user/default), then command-line overrides, then validation.
pub fn resolve_config(opts: &AnalyzeOptions) -> Result<AnalysisConfig> {
    let config = AnalysisConfig::resolve(opts.config_path.as_deref())?.apply_overrides(&opts.overrides);
    config.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

fn build_sinks(opts: &AnalyzeOptions, theme: &ThemeMap) -> Result<Vec<Box<dyn FigureSink>>> {
    let mut sinks: Vec<Box<dyn FigureSink>> = Vec::new();

    if let Some(path) = &opts.save_figure {
        sinks.push(Box::new(PlotFileSink::new(path)?));
    }

    if opts.display {
        if io::stdout().is_terminal() {
            sinks.push(Box::new(ViewerSink));
        } else {
            debug!("stdout is not a terminal; viewer sink not attached.");
            if !opts.quiet {
                warn_msg("stdout is not a terminal; skipping the interactive viewer.", theme);
            }
        }
    }
    Ok(sinks)
}

/// Runs the analysis and writes the five statistics lines to `out`.
///
/// Nothing is written to `out` unless every stage succeeded.
pub fn run_analyze<W: Write>(opts: &AnalyzeOptions, out: &mut W) -> Result<AnalysisReport> {
    info!("Starting synthstat analysis.");
    let theme = build_theme_map(opts.theme.as_ref()).context("Theme error")?;
    let config = resolve_config(opts)?;
    let mut sinks = build_sinks(opts, &theme)?;

    let report = run_analysis(&config, &mut sinks)?;

    if let Some(path) = &opts.json {
        report.write_json(path)?;
    }

    for line in report.report_lines() {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;

    if !opts.quiet {
        if let Some(path) = &opts.save_figure {
            info_msg(format!("Figure saved to {}", path.display()), &theme);
        }
        if let Some(path) = &opts.json {
            info_msg(format!("Report written to {}", path.display()), &theme);
        }
    }

    if opts.table && !opts.quiet {
        let stderr_supports_color = io::stderr().is_terminal();
        output_format::print_summary_table(&mut io::stderr(), &report, &theme, stderr_supports_color)?;
    }

    info!("synthstat analysis completed.");
    Ok(report)
}
