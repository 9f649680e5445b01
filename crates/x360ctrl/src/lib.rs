//! Polling wrapper around XInput-style gamepads.
//!
//! An [`XInputController`] reads snapshots from a [`StateProvider`], exposes
//! normalized stick and trigger values, and notifies listeners about button
//! transitions.

mod controller;
mod error;
mod events;
mod normalize;
mod provider;
mod report;
mod scheduler;
#[cfg(feature = "sdl2-backend")]
mod sdl_backend;
#[cfg(test)]
mod testing;
mod types;

pub use crate::controller::{PollerConfig, ReadPolicy, XInputController, DEFAULT_INTERVAL};
pub use crate::error::{Error, Result};
pub use crate::events::{ButtonEvent, ControllerEvent, EventReceiver};
pub use crate::normalize::{normalization, thumb, trigger, MAX_ANALOG_VALUE, MAX_TRIGGER_VALUE};
pub use crate::provider::StateProvider;
pub use crate::report::Report;
pub use crate::scheduler::RepeatingTask;
#[cfg(feature = "sdl2-backend")]
pub use crate::sdl_backend::Sdl2Provider;
pub use crate::types::{Button, Buttons, Gamepad, UserIndex};
