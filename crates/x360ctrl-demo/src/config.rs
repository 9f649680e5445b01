use std::fs;
use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use serde::Deserialize;
use x360ctrl::{PollerConfig, ReadPolicy, UserIndex, DEFAULT_INTERVAL};

use crate::cli::Cli;
use crate::error::DemoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Policy {
    /// Skip the read while the controller is disconnected
    RequireConnection,
    /// Read even when the controller is reported as disconnected
    Always,
}

impl From<Policy> for ReadPolicy {
    fn from(value: Policy) -> Self {
        match value {
            Policy::RequireConnection => ReadPolicy::RequireConnection,
            Policy::Always => ReadPolicy::Always,
        }
    }
}

/// Settings file. Every key is optional; command line flags win.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub index: Option<u8>,
    pub interval_ms: Option<u64>,
    pub policy: Option<Policy>,
    pub auto: Option<bool>,
    pub simulate: Option<bool>,
}

pub(crate) fn parse_config(input: &str) -> Result<FileConfig, DemoError> {
    // An empty document deserializes to unit, not to an empty map.
    if input.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    Ok(serde_yaml::from_str(input)?)
}

pub(crate) fn load_config(path: &Path) -> Result<FileConfig, DemoError> {
    let input = fs::read_to_string(path)?;
    parse_config(&input)
}

/// Effective demo settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Settings {
    pub index: UserIndex,
    pub poller: PollerConfig,
    pub auto: bool,
    pub simulate: bool,
}

impl Settings {
    pub(crate) fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, DemoError> {
        let slot = cli.index.or(file.index).unwrap_or(1);
        let index = slot
            .checked_sub(1)
            .and_then(|n| UserIndex::try_from(n).ok())
            .ok_or(DemoError::InvalidSlot(slot))?;

        let interval = match cli.interval.or(file.interval_ms) {
            Some(0) => return Err(DemoError::InvalidInterval),
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_INTERVAL,
        };
        let policy = cli
            .policy
            .or(file.policy)
            .map(ReadPolicy::from)
            .unwrap_or_default();

        Ok(Self {
            index,
            poller: PollerConfig { interval, policy },
            auto: cli.auto || file.auto.unwrap_or(false),
            simulate: cli.simulate || file.simulate.unwrap_or(false),
        })
    }
}
