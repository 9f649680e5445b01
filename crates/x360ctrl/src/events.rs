use std::sync::{Arc, Mutex};

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::types::Buttons;

/// Payload of a button transition notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEvent {
    /// Every button that made the same transition during one update.
    pub buttons: Buttons,
    pub new_value: bool,
    pub old_value: bool,
}

impl ButtonEvent {
    pub(crate) fn pressed(buttons: Buttons) -> Self {
        Self {
            buttons,
            new_value: true,
            old_value: false,
        }
    }

    pub(crate) fn released(buttons: Buttons) -> Self {
        Self {
            buttons,
            new_value: false,
            old_value: true,
        }
    }
}

/// Events emitted by a controller on every update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// One or more buttons went from released to pressed.
    ButtonPressed(ButtonEvent),
    /// One or more buttons went from pressed to released.
    ButtonReleased(ButtonEvent),
    /// A fresh snapshot was read from the provider.
    Updated,
}

/// Receiving end for controller events subscription.
pub type EventReceiver = Receiver<ControllerEvent>;

pub(crate) type ButtonListener = Arc<dyn Fn(&ButtonEvent) + Send + Sync>;
pub(crate) type UpdateListener = Arc<dyn Fn() + Send + Sync>;

/// Registered observers, notified in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    pressed: Mutex<Vec<ButtonListener>>,
    released: Mutex<Vec<ButtonListener>>,
    updated: Mutex<Vec<UpdateListener>>,
    subscribers: Mutex<Vec<Sender<ControllerEvent>>>,
}

impl Listeners {
    pub(crate) fn add_pressed(&self, listener: ButtonListener) {
        if let Ok(mut list) = self.pressed.lock() {
            list.push(listener);
        }
    }

    pub(crate) fn add_released(&self, listener: ButtonListener) {
        if let Ok(mut list) = self.released.lock() {
            list.push(listener);
        }
    }

    pub(crate) fn add_updated(&self, listener: UpdateListener) {
        if let Ok(mut list) = self.updated.lock() {
            list.push(listener);
        }
    }

    pub(crate) fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = unbounded();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    /// Invokes the listeners for `event`, then forwards it to subscribers.
    ///
    /// Listener lists are cloned before the calls, so a listener may
    /// register further listeners without deadlocking.
    pub(crate) fn emit(&self, event: &ControllerEvent) {
        match event {
            ControllerEvent::ButtonPressed(e) => {
                for listener in snapshot(&self.pressed) {
                    listener(e);
                }
            }
            ControllerEvent::ButtonReleased(e) => {
                for listener in snapshot(&self.released) {
                    listener(e);
                }
            }
            ControllerEvent::Updated => {
                for listener in snapshot(&self.updated) {
                    listener();
                }
            }
        }
        broadcast(&self.subscribers, event);
    }
}

fn snapshot<T: Clone>(list: &Mutex<Vec<T>>) -> Vec<T> {
    list.lock().map(|l| l.clone()).unwrap_or_default()
}

fn broadcast(subscribers: &Mutex<Vec<Sender<ControllerEvent>>>, event: &ControllerEvent) {
    if let Ok(mut subs) = subscribers.lock() {
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
