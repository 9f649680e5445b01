use std::sync::Arc;

use crate::error::Result;
use crate::types::{Gamepad, UserIndex};

/// Source of raw controller snapshots, usually a native input API.
pub trait StateProvider: Send + Sync {
    /// Whether a controller is currently plugged into the slot.
    fn is_connected(&self, index: UserIndex) -> bool;

    /// Reads the current state of the controller in the slot.
    fn state(&self, index: UserIndex) -> Result<Gamepad>;
}

impl<P: StateProvider + ?Sized> StateProvider for Arc<P> {
    fn is_connected(&self, index: UserIndex) -> bool {
        (**self).is_connected(index)
    }

    fn state(&self, index: UserIndex) -> Result<Gamepad> {
        (**self).state(index)
    }
}

impl<P: StateProvider + ?Sized> StateProvider for Box<P> {
    fn is_connected(&self, index: UserIndex) -> bool {
        (**self).is_connected(index)
    }

    fn state(&self, index: UserIndex) -> Result<Gamepad> {
        (**self).state(index)
    }
}
