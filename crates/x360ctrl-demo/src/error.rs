use thiserror::Error;
use x360ctrl::UserIndex;

/// Error type for the demo program.
#[derive(Debug, Error)]
pub(crate) enum DemoError {
    #[error("yaml deserialize error: {0}")]
    YamlDeserializeError(#[from] serde_yaml::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Controller(#[from] x360ctrl::Error),
    #[error("failed to set Ctrl+C handler: {0}")]
    Signal(#[from] ctrlc::Error),
    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("controller {0} is not connected or the user index is wrong")]
    NotConnected(UserIndex),
    #[error("invalid controller slot {0}, expected 1-4")]
    InvalidSlot(u8),
    #[error("polling interval must be at least 1 ms")]
    InvalidInterval,
    #[error("built without a hardware backend, use --simulate or enable the sdl2-backend feature")]
    NoBackend,
}
