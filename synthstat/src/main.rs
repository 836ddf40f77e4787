// synthstat/src/main.rs
//! synthstat entry point.
//!
//! Runs the analysis and turns any failure into a single
//! `An error occurred: ...` line on stdout.

use clap::Parser;
use std::io;
use std::process::ExitCode;

use synthstat::cli::Cli;
use synthstat::logger;
use synthstat::{run_analyze, AnalyzeOptions};
use synthstat_core::failure_line;

fn main() -> ExitCode {
    let args = Cli::parse();
    logger::init_logger(args.log_level());

    let opts = AnalyzeOptions {
        config_path: args.config.clone(),
        overrides: args.overrides(),
        save_figure: args.save_figure.clone(),
        display: !args.no_display,
        json: args.json.clone(),
        table: args.table,
        theme: args.theme.clone(),
        quiet: args.quiet,
    };

    let stdout = io::stdout();
    match run_analyze(&opts, &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::debug!("Analysis failed: {:?}", e);
            println!("{}", failure_line(format!("{:#}", e)));
            if args.strict {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
    }
}
