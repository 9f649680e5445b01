use crossbeam_channel::Sender;

use crate::types::{Gamepad, UserIndex};

/// Requests served by the SDL runtime thread.
pub(crate) enum Command {
    IsConnected { index: UserIndex, reply: Sender<bool> },
    State { index: UserIndex, reply: Sender<Option<Gamepad>> },
    Shutdown,
}
