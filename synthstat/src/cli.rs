//! This file defines the command-line interface (CLI) for the synthstat application.
//! Running with no arguments reproduces the reference analysis.
//! License: MIT OR Apache-2.0

use clap::Parser;
use std::path::PathBuf;
use synthstat_core::ConfigOverrides;

/// Top-level CLI definition.
#[derive(Parser, Debug, Default)]
#[command(
    name = "synthstat",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate synthetic data, plot it, and print summary statistics",
    long_about = "synthstat draws a seeded random matrix and a table of (x, y) samples, shows an annotated heatmap next to a scatter plot with its least-squares regression line, and prints the means, population standard deviations, and Pearson correlation of the samples."
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG for synthstat crates)
    #[arg(long, short = 'd', help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a YAML configuration file.
    #[arg(long = "config", value_name = "FILE", env = "SYNTHSTAT_CONFIG", help = "Path to a YAML configuration file.")]
    pub config: Option<PathBuf>,

    /// Seed for the random generator.
    #[arg(long, value_name = "N", help = "Seed for the random generator (default 42).")]
    pub seed: Option<u64>,

    /// Rows of the heatmap matrix.
    #[arg(long, value_name = "N", help = "Rows of the heatmap matrix (default 10).")]
    pub rows: Option<usize>,

    /// Columns of the heatmap matrix.
    #[arg(long, value_name = "N", help = "Columns of the heatmap matrix (default 12).")]
    pub cols: Option<usize>,

    /// Number of (x, y) samples.
    #[arg(long, value_name = "N", help = "Number of (x, y) samples (default 50).")]
    pub samples: Option<usize>,

    /// Render the figure to a PNG or SVG file.
    #[arg(long = "save-figure", value_name = "FILE", help = "Render the figure to a .png or .svg file.")]
    pub save_figure: Option<PathBuf>,

    /// Skip the interactive viewer.
    #[arg(long = "no-display", help = "Do not open the interactive figure viewer.")]
    pub no_display: bool,

    /// Write a JSON report of the run.
    #[arg(long = "json", value_name = "FILE", help = "Write the configuration, statistics, and regression line as JSON.")]
    pub json: Option<PathBuf>,

    /// Print a styled summary table to stderr.
    #[arg(long = "table", help = "Also print a summary table to stderr.")]
    pub table: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// Exit non-zero when the analysis fails.
    #[arg(long = "strict", help = "Exit with status 1 after reporting an error.")]
    pub strict: bool,
}

impl Cli {
    /// The generator values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            seed: self.seed,
            rows: self.rows,
            cols: self.cols,
            samples: self.samples,
        }
    }

    /// The log level implied by `--quiet` and `--debug`; `None` defers to `RUST_LOG`.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        if self.quiet {
            Some(log::LevelFilter::Off)
        } else if self.debug {
            Some(log::LevelFilter::Debug)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_is_the_reference_run() {
        let cli = Cli::try_parse_from(["synthstat"]).unwrap();
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert!(!cli.no_display);
        assert!(!cli.strict);
        assert_eq!(cli.log_level(), None);
    }

    #[test]
    fn overrides_are_collected() {
        let cli = Cli::try_parse_from(["synthstat", "--seed", "7", "--rows", "3", "--samples", "20"]).unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.seed, Some(7));
        assert_eq!(overrides.rows, Some(3));
        assert_eq!(overrides.cols, None);
        assert_eq!(overrides.samples, Some(20));
    }

    #[test]
    fn quiet_wins_over_debug() {
        let cli = Cli::try_parse_from(["synthstat", "-q", "-d"]).unwrap();
        assert_eq!(cli.log_level(), Some(log::LevelFilter::Off));
    }
}
