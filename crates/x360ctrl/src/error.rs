use thiserror::Error;

use crate::types::UserIndex;

/// Error type for controller polling operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No controller is plugged into the requested slot.
    #[error("Controller {0} is not connected")]
    NotConnected(UserIndex),
    /// Slot index outside of 0..=3.
    #[error("Invalid user index: {0}")]
    InvalidIndex(u8),
    /// Failed to initialize the backend (SDL2 or subsystems).
    #[error("Backend init failed: {0}")]
    BackendInit(String),
    /// A generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
    /// The auto-update task could not be started.
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

/// Convenient result alias for controller operations.
pub type Result<T> = std::result::Result<T, Error>;
