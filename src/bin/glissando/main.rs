//! glissando - draw pitch contours in the terminal and hear them loop
//!
//! Run with: cargo run --release [-- --verbose]

mod app;
mod ui;

use std::fs::File;

use app::Glissando;
use color_eyre::eyre::{Result as EyreResult, WrapErr};

/// The terminal belongs to the UI, so logs go to a file.
fn init_logging(verbose: bool) -> EyreResult<()> {
    use simplelog::{Config, LevelFilter, WriteLogger};

    let log_level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let log_path = std::env::temp_dir().join("glissando.log");
    let log_file = File::create(&log_path)
        .wrap_err_with(|| format!("cannot create log file {}", log_path.display()))?;

    WriteLogger::init(log_level, Config::default(), log_file)
        .wrap_err("failed to initialize logger")?;

    log::info!("glissando starting (log level: {:?})", log_level);
    Ok(())
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let verbose = std::env::args().any(|a| a == "--verbose" || a == "-v");
    init_logging(verbose)?;

    Glissando::new().run()
}
