//! Logger setup for the synthstat binary.
//!
//! Logs always go to stderr so stdout carries nothing but the statistics report.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

const CRATES: [&str; 3] = ["synthstat", "synthstat_core", "synthstat_math"];

/// Initializes the global logger.
///
/// `Some(level)` pins the synthstat crates to `level`; `None` leaves filtering to
/// `RUST_LOG` with a default of `warn`. Calling this more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr).format_timestamp(None);

    if let Some(level) = level {
        for name in CRATES {
            builder.filter_module(name, level);
        }
    }

    let _ = builder.try_init();
}
