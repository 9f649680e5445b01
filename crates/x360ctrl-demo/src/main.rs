mod app;
mod cli;
mod config;
mod error;
mod logging;
mod simulated;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::config::{load_config, FileConfig, Settings};
use crate::error::DemoError;

fn start(cli: &Cli) -> Result<(), DemoError> {
    logging::setup(cli.verbose, cli.no_color)?;
    let file = match &cli.config {
        Some(path) => load_config(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(cli, file)?;
    app::run(settings)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match start(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
