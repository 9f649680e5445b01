use std::thread;
use std::time::Duration;

use ahash::AHashMap;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use log::{debug, info, warn};
use sdl2::controller::{Axis as SdlAxis, Button as SdlButton, GameController};
use sdl2::event::Event;
use sdl2::{EventPump, GameControllerSubsystem};

use crate::error::{Error, Result};
use crate::sdl_backend::command::Command;
use crate::types::{Button, Gamepad, UserIndex};

/// How long the runtime waits for a command before pumping events again.
const PUMP_INTERVAL: Duration = Duration::from_millis(10);

const SLOT_COUNT: usize = UserIndex::ALL.len();

const BUTTONS: [(SdlButton, Button); 14] = [
    (SdlButton::DPadUp, Button::DPadUp),
    (SdlButton::DPadDown, Button::DPadDown),
    (SdlButton::DPadLeft, Button::DPadLeft),
    (SdlButton::DPadRight, Button::DPadRight),
    (SdlButton::Start, Button::Start),
    (SdlButton::Back, Button::Back),
    (SdlButton::LeftStick, Button::LeftThumb),
    (SdlButton::RightStick, Button::RightThumb),
    (SdlButton::LeftShoulder, Button::LeftShoulder),
    (SdlButton::RightShoulder, Button::RightShoulder),
    (SdlButton::A, Button::A),
    (SdlButton::B, Button::B),
    (SdlButton::X, Button::X),
    (SdlButton::Y, Button::Y),
];

/// Open controllers and the slot each of them occupies.
#[derive(Default)]
struct Slots {
    controllers: AHashMap<u32, GameController>,
    slots: [Option<u32>; SLOT_COUNT],
}

impl Slots {
    fn attach(&mut self, controller: GameController) {
        let id = controller.instance_id();
        if self.controllers.contains_key(&id) {
            return;
        }
        let Some(slot) = self.slots.iter().position(Option::is_none) else {
            warn!("No free slot for controller '{}'", controller.name());
            return;
        };
        info!("Controller '{}' attached to slot {}", controller.name(), slot + 1);
        self.slots[slot] = Some(id);
        self.controllers.insert(id, controller);
    }

    fn detach(&mut self, id: u32) {
        if self.controllers.remove(&id).is_none() {
            return;
        }
        for (n, slot) in self.slots.iter_mut().enumerate() {
            if *slot == Some(id) {
                *slot = None;
                info!("Controller removed from slot {}", n + 1);
            }
        }
    }

    fn get(&self, index: UserIndex) -> Option<&GameController> {
        self.slots[index.slot()]
            .and_then(|id| self.controllers.get(&id))
            .filter(|c| c.attached())
    }
}

/// Starts the SDL2-backed runtime thread that owns every SDL object.
pub(crate) fn start_runtime_thread(
    cmd_rx: Receiver<Command>,
    ready_tx: Sender<std::result::Result<(), String>>,
) -> Result<()> {
    thread::Builder::new()
        .name("x360ctrl-sdl".into())
        .spawn(move || {
            // SDL must live entirely within this thread
            let (subsystem, mut event_pump) = match init() {
                Ok(parts) => parts,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let mut slots = Slots::default();
            if let Ok(count) = subsystem.num_joysticks() {
                for i in 0..count {
                    open(&subsystem, &mut slots, i);
                }
            }
            let _ = ready_tx.send(Ok(()));

            loop {
                let cmd = match cmd_rx.recv_timeout(PUMP_INTERVAL) {
                    Ok(cmd) => Some(cmd),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                };
                pump(&subsystem, &mut event_pump, &mut slots);

                match cmd {
                    Some(Command::IsConnected { index, reply }) => {
                        let _ = reply.send(slots.get(index).is_some());
                    }
                    Some(Command::State { index, reply }) => {
                        let _ = reply.send(slots.get(index).map(read_gamepad));
                    }
                    Some(Command::Shutdown) => break,
                    None => {}
                }
            }
            debug!("SDL runtime stopped");
        })
        .map(|_| ())
        .map_err(|e| Error::BackendInit(e.to_string()))
}

fn init() -> std::result::Result<(GameControllerSubsystem, EventPump), String> {
    let sdl_ctx = sdl2::init()?;
    let subsystem = sdl_ctx.game_controller()?;
    let event_pump = sdl_ctx.event_pump()?;
    Ok((subsystem, event_pump))
}

fn open(subsystem: &GameControllerSubsystem, slots: &mut Slots, device_index: u32) {
    if !subsystem.is_game_controller(device_index) {
        return;
    }
    match subsystem.open(device_index) {
        Ok(controller) => slots.attach(controller),
        Err(e) => warn!("Failed to open controller {device_index}: {e}"),
    }
}

fn pump(subsystem: &GameControllerSubsystem, event_pump: &mut EventPump, slots: &mut Slots) {
    for event in event_pump.poll_iter() {
        match event {
            Event::ControllerDeviceAdded { which, .. } => open(subsystem, slots, which),
            Event::ControllerDeviceRemoved { which, .. } => slots.detach(which),
            _ => {}
        }
    }
}

fn read_gamepad(controller: &GameController) -> Gamepad {
    let buttons = BUTTONS
        .iter()
        .filter(|(sdl, _)| controller.button(*sdl))
        .fold(0u16, |acc, (_, button)| acc | (1 << *button as u16));
    Gamepad {
        buttons,
        left_thumb_x: controller.axis(SdlAxis::LeftX),
        left_thumb_y: flip_axis(controller.axis(SdlAxis::LeftY)),
        right_thumb_x: controller.axis(SdlAxis::RightX),
        right_thumb_y: flip_axis(controller.axis(SdlAxis::RightY)),
        left_trigger: trigger_byte(controller.axis(SdlAxis::TriggerLeft)),
        right_trigger: trigger_byte(controller.axis(SdlAxis::TriggerRight)),
    }
}

/// SDL reports Y axes growing downwards, XInput upwards.
fn flip_axis(value: i16) -> i16 {
    value.saturating_neg()
}

/// SDL triggers span `0..=32767`, XInput triggers `0..=255`.
fn trigger_byte(value: i16) -> u8 {
    (value.max(0) >> 7) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flip_axis_saturates() {
        assert_eq!(flip_axis(0), 0);
        assert_eq!(flip_axis(i16::MIN), i16::MAX);
        assert_eq!(flip_axis(i16::MAX), -i16::MAX);
    }

    #[test]
    fn trigger_byte_covers_full_range() {
        assert_eq!(trigger_byte(0), 0);
        assert_eq!(trigger_byte(-5), 0);
        assert_eq!(trigger_byte(i16::MAX), 255);
        assert_eq!(trigger_byte(16384), 128);
    }

    #[test]
    fn button_table_covers_every_button() {
        use x360ctrl_bit_mask::Bitable;

        for button in Button::ALL {
            assert!(BUTTONS.iter().any(|(_, b)| b == button));
        }
    }
}
