use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use crate::error::{Error, Result};
use crate::provider::StateProvider;
use crate::types::{Gamepad, UserIndex};

/// In-memory provider driven by the tests.
#[derive(Default)]
pub(crate) struct FakeProvider {
    connected: AtomicBool,
    failing: AtomicBool,
    gamepad: Mutex<Gamepad>,
    reads: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeProvider {
    pub(crate) fn connected() -> Self {
        let provider = Self::default();
        provider.set_connected(true);
        provider
    }

    pub(crate) fn disconnected() -> Self {
        Self::default()
    }

    pub(crate) fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    pub(crate) fn fail_reads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn set_buttons(&self, buttons: u16) {
        self.gamepad.lock().unwrap().buttons = buttons;
    }

    pub(crate) fn set_gamepad(&self, gamepad: Gamepad) {
        *self.gamepad.lock().unwrap() = gamepad;
    }

    /// Number of successful `state` calls.
    pub(crate) fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub(crate) fn max_concurrent_reads(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl StateProvider for FakeProvider {
    fn is_connected(&self, _index: UserIndex) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn state(&self, index: UserIndex) -> Result<Gamepad> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::NotConnected(index));
        }
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        thread::yield_now();
        let gamepad = *self.gamepad.lock().unwrap();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(gamepad)
    }
}
