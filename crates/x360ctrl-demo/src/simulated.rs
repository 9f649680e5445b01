use std::time::{Duration, Instant};

use x360ctrl::{Button, Gamepad, Result, StateProvider, UserIndex};
use x360ctrl_bit_mask::Bitable;

/// How long each simulated button stays pressed.
const BUTTON_PERIOD: Duration = Duration::from_millis(500);

/// Synthetic controller in slot one: presses every button in turn and moves
/// the sticks in circles.
pub(crate) struct SimulatedProvider {
    started: Instant,
}

impl SimulatedProvider {
    pub(crate) fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    fn at(elapsed: Duration) -> Gamepad {
        let step = (elapsed.as_millis() / BUTTON_PERIOD.as_millis()) as usize;
        let button = Button::ALL[step % Button::ALL.len()];
        let phase = elapsed.as_secs_f64();
        let stick = |v: f64| (v * f64::from(i16::MAX)) as i16;
        let pedal = |v: f64| ((v + 1.0) / 2.0 * f64::from(u8::MAX)) as u8;

        Gamepad {
            buttons: button.bit() as u16,
            left_thumb_x: stick(phase.cos()),
            left_thumb_y: stick(phase.sin()),
            right_thumb_x: stick((phase * 2.0).cos()),
            right_thumb_y: stick((phase * 2.0).sin()),
            left_trigger: pedal(phase.sin()),
            right_trigger: pedal(-phase.sin()),
        }
    }
}

impl StateProvider for SimulatedProvider {
    fn is_connected(&self, index: UserIndex) -> bool {
        index == UserIndex::One
    }

    fn state(&self, index: UserIndex) -> Result<Gamepad> {
        if !self.is_connected(index) {
            return Err(x360ctrl::Error::NotConnected(index));
        }
        Ok(Self::at(self.started.elapsed()))
    }
}
