//! [`StateProvider`] backed by SDL2 game controllers.
//!
//! SDL objects are bound to the thread that created them, so a runtime
//! thread owns the SDL context and answers requests over a channel.
//! Controllers are placed into the first free slot in the order they are
//! attached, and the slot is freed when the device is removed.

mod command;
mod runtime;

use std::time::Duration;

use crossbeam_channel::{bounded, unbounded, Sender};

use crate::error::{Error, Result};
use crate::provider::StateProvider;
use crate::types::{Gamepad, UserIndex};

use self::command::Command;
use self::runtime::start_runtime_thread;

const INIT_TIMEOUT: Duration = Duration::from_secs(1);
const REPLY_TIMEOUT: Duration = Duration::from_millis(500);

pub struct Sdl2Provider {
    cmd_tx: Sender<Command>,
}

impl Sdl2Provider {
    /// Starts the SDL runtime thread and waits for the initial enumeration.
    pub fn new() -> Result<Self> {
        let (cmd_tx, cmd_rx) = unbounded::<Command>();
        let (ready_tx, ready_rx) = bounded(1);
        start_runtime_thread(cmd_rx, ready_tx)?;

        match ready_rx.recv_timeout(INIT_TIMEOUT) {
            Ok(Ok(())) => Ok(Self { cmd_tx }),
            Ok(Err(e)) => Err(Error::BackendInit(e)),
            Err(e) => Err(Error::BackendInit(format!("SDL runtime did not start: {e}"))),
        }
    }

    fn request<T>(&self, make: impl FnOnce(Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = bounded(1);
        self.cmd_tx
            .send(make(reply_tx))
            .map_err(|e| Error::Backend(format!("{e}")))?;
        reply_rx
            .recv_timeout(REPLY_TIMEOUT)
            .map_err(|e| Error::Backend(format!("{e}")))
    }
}

impl StateProvider for Sdl2Provider {
    fn is_connected(&self, index: UserIndex) -> bool {
        self.request(|reply| Command::IsConnected { index, reply })
            .unwrap_or(false)
    }

    fn state(&self, index: UserIndex) -> Result<Gamepad> {
        self.request(|reply| Command::State { index, reply })?
            .ok_or(Error::NotConnected(index))
    }
}

impl Drop for Sdl2Provider {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(Command::Shutdown);
    }
}
