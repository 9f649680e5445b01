use std::fmt;

use crate::normalize::{thumb, trigger};
use crate::types::{Button, Gamepad};

/// Human readable dump of a controller snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub connected: bool,
    pub gamepad: Gamepad,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pressed = self.gamepad.pressed();
        let b = |button: Button| pressed.contains(button);
        let pad = &self.gamepad;

        writeln!(f, "IsConnected: {:>6}", self.connected)?;
        writeln!(
            f,
            "A: {:>6}, B: {:>6}, X: {:>6}, Y: {:>6}",
            b(Button::A),
            b(Button::B),
            b(Button::X),
            b(Button::Y)
        )?;
        writeln!(f, "Back: {:>6}, Start: {:>6}", b(Button::Back), b(Button::Start))?;
        writeln!(
            f,
            "DPadDown: {:>6}, DPadLeft: {:>6}, DPadRight: {:>6}, DPadUp: {:>6}",
            b(Button::DPadDown),
            b(Button::DPadLeft),
            b(Button::DPadRight),
            b(Button::DPadUp)
        )?;
        writeln!(
            f,
            "LeftShoulder: {:>6}, RightShoulder: {:>6}, LeftThumb: {:>6}, RightThumb: {:>6}",
            b(Button::LeftShoulder),
            b(Button::RightShoulder),
            b(Button::LeftThumb),
            b(Button::RightThumb)
        )?;
        writeln!(f, "LeftThumbX: {}", thumb(pad.left_thumb_x))?;
        writeln!(f, "LeftThumbY: {}", thumb(pad.left_thumb_y))?;
        writeln!(f, "LeftTrigger: {}", trigger(pad.left_trigger))?;
        writeln!(f, "RightThumbX: {}", thumb(pad.right_thumb_x))?;
        writeln!(f, "RightThumbY: {}", thumb(pad.right_thumb_y))?;
        writeln!(f, "RightTrigger: {}", trigger(pad.right_trigger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_every_group_on_its_own_line() {
        let report = Report {
            connected: true,
            gamepad: Gamepad {
                // A, Start, DPadLeft, RightShoulder
                buttons: 0x1000 | 0x0010 | 0x0004 | 0x0200,
                left_thumb_x: 0,
                left_thumb_y: 32767,
                right_thumb_x: -32768,
                right_thumb_y: 16384,
                left_trigger: 255,
                right_trigger: 51,
            },
        };

        // Booleans print lowercase, right-aligned to six columns.
        let expected = "\
IsConnected:   true
A:   true, B:  false, X:  false, Y:  false
Back:  false, Start:   true
DPadDown:  false, DPadLeft:   true, DPadRight:  false, DPadUp:  false
LeftShoulder:  false, RightShoulder:   true, LeftThumb:  false, RightThumb:  false
LeftThumbX: 0.5
LeftThumbY: 0.9999847412109375
LeftTrigger: 1
RightThumbX: 0
RightThumbY: 0.75
RightTrigger: 0.2
";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn default_snapshot_reports_centered_sticks() {
        let report = Report {
            connected: false,
            gamepad: Gamepad::default(),
        };
        let text = report.to_string();

        assert_eq!(text.lines().count(), 11);
        assert!(text.starts_with("IsConnected:  false\n"));
        assert!(text.contains("RightThumbY: 0.5\n"));
        assert!(text.contains("LeftTrigger: 0\n"));
    }
}
