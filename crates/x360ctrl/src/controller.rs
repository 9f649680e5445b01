use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::thread::{self, ThreadId};
use std::time::Duration;

use log::{debug, info, trace};

use crate::error::Result;
use crate::events::{ButtonEvent, ControllerEvent, EventReceiver, Listeners};
use crate::normalize::{thumb, trigger};
use crate::provider::StateProvider;
use crate::report::Report;
use crate::scheduler::RepeatingTask;
use crate::types::{Button, Buttons, Gamepad, UserIndex};

/// Interval of the auto-update task.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

/// What `update` does when the provider reports no controller in the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadPolicy {
    /// Skip the read and report failure.
    #[default]
    RequireConnection,
    /// Read regardless of the reported connectivity.
    Always,
}

/// Poller settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    pub interval: Duration,
    pub policy: ReadPolicy,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            policy: ReadPolicy::default(),
        }
    }
}

/// Button transitions found between two successive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Edges {
    pub(crate) pressed: Buttons,
    pub(crate) released: Buttons,
}

/// Compares two button samples. A bit that was released never shows up in
/// `pressed`, even when other bits were pressed during the same tick.
pub(crate) fn detect_edges(last: Buttons, current: Buttons) -> Edges {
    let changed = current ^ last;
    Edges {
        pressed: current & changed,
        released: last & changed,
    }
}

struct PollerState {
    gamepad: Gamepad,
    last_buttons: Buttons,
}

/// Holds `update_lock` and records the owning thread until dropped.
struct UpdateGuard<'a> {
    owner: &'a Mutex<Option<ThreadId>>,
    _lock: MutexGuard<'a, ()>,
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        // Runs before `_lock` is released.
        *self.owner.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Shared state used by the controller and its auto-update task.
struct Inner<P> {
    index: UserIndex,
    provider: P,
    policy: ReadPolicy,
    state: RwLock<PollerState>,
    // Held for the whole read-diff-notify sequence.
    update_lock: Mutex<()>,
    update_owner: Mutex<Option<ThreadId>>,
    connected: AtomicBool,
    listeners: Listeners,
}

impl<P: StateProvider> Inner<P> {
    fn is_connected(&self) -> bool {
        let connected = self.provider.is_connected(self.index);
        if self.connected.swap(connected, Ordering::Relaxed) != connected {
            if connected {
                info!("Controller {} connected", self.index);
            } else {
                info!("Controller {} disconnected", self.index);
            }
        }
        connected
    }

    fn gamepad(&self) -> Gamepad {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .gamepad
    }

    fn lock_update(&self) -> UpdateGuard<'_> {
        let lock = self
            .update_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *self
            .update_owner
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(thread::current().id());
        UpdateGuard {
            owner: &self.update_owner,
            _lock: lock,
        }
    }

    /// Whether the calling thread is inside `update`, i.e. running a
    /// listener.
    fn is_updating_thread(&self) -> bool {
        *self
            .update_owner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            == Some(thread::current().id())
    }

    fn update(&self) -> bool {
        let _guard = self.lock_update();
        self.update_locked()
    }

    /// Auto-update tick. The task may have been cancelled while it waited
    /// for the lock.
    fn update_unless_cancelled(&self, cancelled: &AtomicBool) -> bool {
        let _guard = self.lock_update();
        if cancelled.load(Ordering::Acquire) {
            return false;
        }
        self.update_locked()
    }

    fn update_locked(&self) -> bool {
        if self.policy == ReadPolicy::RequireConnection && !self.is_connected() {
            trace!("Controller {} is not connected, skipping update", self.index);
            return false;
        }

        let gamepad = match self.provider.state(self.index) {
            Ok(gamepad) => gamepad,
            Err(e) => {
                debug!("Failed to read controller {}: {e}", self.index);
                return false;
            }
        };

        let edges = {
            let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
            state.gamepad = gamepad;
            let current = gamepad.pressed();
            let edges = detect_edges(state.last_buttons, current);
            state.last_buttons = current;
            edges
        };

        if !edges.pressed.is_empty() {
            trace!("Controller {} pressed {:?}", self.index, edges.pressed);
            self.listeners.emit(&ControllerEvent::ButtonPressed(
                ButtonEvent::pressed(edges.pressed),
            ));
        }
        if !edges.released.is_empty() {
            trace!("Controller {} released {:?}", self.index, edges.released);
            self.listeners.emit(&ControllerEvent::ButtonReleased(
                ButtonEvent::released(edges.released),
            ));
        }
        self.listeners.emit(&ControllerEvent::Updated);

        true
    }
}

/// Polls a single controller slot and reports button transitions.
///
/// Derived values are computed from the most recent snapshot on every call.
/// Before the first successful [`update`](Self::update) they reflect an
/// all-zero snapshot.
pub struct XInputController<P: StateProvider + 'static> {
    inner: Arc<Inner<P>>,
    interval: Duration,
    auto_update: Mutex<Option<RepeatingTask>>,
}

impl<P: StateProvider + 'static> XInputController<P> {
    /// Creates a controller for the slot with the default configuration.
    pub fn new(index: UserIndex, provider: P) -> Self {
        Self::with_config(index, provider, PollerConfig::default())
    }

    pub fn with_config(index: UserIndex, provider: P, config: PollerConfig) -> Self {
        let connected = provider.is_connected(index);
        debug!(
            "Controller {index} created, connected: {connected}, policy: {:?}",
            config.policy
        );
        Self {
            inner: Arc::new(Inner {
                index,
                provider,
                policy: config.policy,
                state: RwLock::new(PollerState {
                    gamepad: Gamepad::default(),
                    last_buttons: Buttons::empty(),
                }),
                update_lock: Mutex::new(()),
                update_owner: Mutex::new(None),
                connected: AtomicBool::new(connected),
                listeners: Listeners::default(),
            }),
            interval: config.interval,
            auto_update: Mutex::new(None),
        }
    }

    pub fn index(&self) -> UserIndex {
        self.inner.index
    }

    /// Asks the provider on every call; connectivity may change between
    /// updates.
    pub fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    /// Reads a fresh snapshot, detects button transitions and notifies
    /// listeners.
    ///
    /// Returns `false` without touching the held snapshot when the controller
    /// is disconnected (under [`ReadPolicy::RequireConnection`]) or the read
    /// fails. Listeners run on the calling thread and must not call `update`
    /// themselves; they may call
    /// [`stop_auto_update`](Self::stop_auto_update).
    pub fn update(&self) -> bool {
        self.inner.update()
    }

    /// Copy of the most recent snapshot.
    pub fn gamepad(&self) -> Gamepad {
        self.inner.gamepad()
    }

    pub fn buttons(&self) -> Buttons {
        self.gamepad().pressed()
    }

    pub fn is_pressed(&self, button: Button) -> bool {
        self.buttons().contains(button)
    }

    pub fn left_thumb_x(&self) -> f64 {
        thumb(self.gamepad().left_thumb_x)
    }

    pub fn left_thumb_y(&self) -> f64 {
        thumb(self.gamepad().left_thumb_y)
    }

    pub fn right_thumb_x(&self) -> f64 {
        thumb(self.gamepad().right_thumb_x)
    }

    pub fn right_thumb_y(&self) -> f64 {
        thumb(self.gamepad().right_thumb_y)
    }

    pub fn left_trigger(&self) -> f64 {
        trigger(self.gamepad().left_trigger)
    }

    pub fn right_trigger(&self) -> f64 {
        trigger(self.gamepad().right_trigger)
    }

    /// Registers a listener for newly pressed buttons. The event carries
    /// every button pressed since the previous update as one mask.
    pub fn on_button_pressed<F>(&self, listener: F)
    where
        F: Fn(&ButtonEvent) + Send + Sync + 'static,
    {
        self.inner.listeners.add_pressed(Arc::new(listener));
    }

    /// Registers a listener for newly released buttons.
    pub fn on_button_released<F>(&self, listener: F)
    where
        F: Fn(&ButtonEvent) + Send + Sync + 'static,
    {
        self.inner.listeners.add_released(Arc::new(listener));
    }

    /// Registers a listener called after every successful update.
    pub fn on_updated<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner.listeners.add_updated(Arc::new(listener));
    }

    /// Subscribes to controller events. Dropped subscribers are cleaned
    /// automatically.
    pub fn subscribe(&self) -> EventReceiver {
        self.inner.listeners.subscribe()
    }

    /// Starts calling [`update`](Self::update) every configured interval on
    /// a background thread. Does nothing if auto-update is already running.
    pub fn start_auto_update(&self) -> Result<()> {
        let mut slot = self
            .auto_update
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(RepeatingTask::is_running) {
            return Ok(());
        }

        let inner = self.inner.clone();
        let name = format!("x360ctrl-{}", self.inner.index.slot());
        let task = RepeatingTask::spawn(&name, self.interval, move |cancelled| {
            let _ = inner.update_unless_cancelled(cancelled);
        })?;
        *slot = Some(task);
        debug!(
            "Auto-update started for controller {} every {:?}",
            self.inner.index, self.interval
        );
        Ok(())
    }

    /// Stops the auto-update task. No update starts after this returns.
    ///
    /// Called from a listener, the task is cancelled without waiting for it:
    /// a tick blocked behind the running update sees the cancellation and
    /// skips its read.
    pub fn stop_auto_update(&self) {
        let task = self
            .auto_update
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(mut task) = task {
            if self.inner.is_updating_thread() {
                task.detach();
            } else {
                task.stop();
            }
            debug!("Auto-update stopped for controller {}", self.inner.index);
        }
    }

    pub fn is_auto_updating(&self) -> bool {
        self.auto_update
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(RepeatingTask::is_running)
    }

    /// Snapshot of the connection status and the held state.
    pub fn report(&self) -> Report {
        Report {
            connected: self.is_connected(),
            gamepad: self.gamepad(),
        }
    }
}

impl<P: StateProvider + 'static> fmt::Display for XInputController<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.report().fmt(f)
    }
}

impl<P: StateProvider + 'static> Drop for XInputController<P> {
    fn drop(&mut self) {
        self.stop_auto_update();
    }
}
