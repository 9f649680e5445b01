use std::path::PathBuf;

use clap::Parser;

use crate::config::Policy;

/// Console monitor for an XInput-style gamepad.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Controller slot to poll (1-4)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=4))]
    pub index: Option<u8>,

    /// Polling interval in milliseconds
    #[arg(long)]
    pub interval: Option<u64>,

    /// What to do when the controller is reported as disconnected
    #[arg(long, value_enum)]
    pub policy: Option<Policy>,

    /// Poll on a background task instead of the main loop
    #[arg(long)]
    pub auto: bool,

    /// Use a synthetic controller instead of real hardware
    #[arg(long)]
    pub simulate: bool,

    /// YAML file with default settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}
