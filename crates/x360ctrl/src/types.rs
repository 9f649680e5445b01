use std::fmt;

use x360ctrl_bit_derive::Bit;
use x360ctrl_bit_mask::Bitmask;

use crate::error::Error;

/// Player slot of an XInput-style controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UserIndex {
    One = 0,
    Two = 1,
    Three = 2,
    Four = 3,
}

impl UserIndex {
    pub const ALL: [UserIndex; 4] = [
        UserIndex::One,
        UserIndex::Two,
        UserIndex::Three,
        UserIndex::Four,
    ];

    /// Zero-based slot number.
    #[inline]
    pub const fn slot(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for UserIndex {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Error> {
        UserIndex::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(Error::InvalidIndex(value))
    }
}

impl fmt::Display for UserIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.slot() + 1)
    }
}

/// Gamepad buttons. Discriminants are XInput `wButtons` bit positions.
#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    DPadUp = 0,
    DPadDown = 1,
    DPadLeft = 2,
    DPadRight = 3,
    Start = 4,
    Back = 5,
    LeftThumb = 6,
    RightThumb = 7,
    LeftShoulder = 8,
    RightShoulder = 9,
    A = 12,
    B = 13,
    X = 14,
    Y = 15,
}

/// Set of pressed buttons.
pub type Buttons = Bitmask<Button>;

/// Raw controller snapshot as reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gamepad {
    /// Pressed buttons in XInput `wButtons` layout.
    pub buttons: u16,
    pub left_thumb_x: i16,
    pub left_thumb_y: i16,
    pub right_thumb_x: i16,
    pub right_thumb_y: i16,
    pub left_trigger: u8,
    pub right_trigger: u8,
}

impl Gamepad {
    /// Pressed buttons as a typed mask.
    #[inline]
    pub fn pressed(&self) -> Buttons {
        Bitmask::from_value(u64::from(self.buttons))
    }
}

#[cfg(test)]
mod tests {
    use x360ctrl_bit_mask::Bitable;

    use super::*;

    #[test]
    fn button_bits_match_xinput_flags() {
        assert_eq!(Button::DPadUp.bit(), 0x0001);
        assert_eq!(Button::DPadRight.bit(), 0x0008);
        assert_eq!(Button::Start.bit(), 0x0010);
        assert_eq!(Button::Back.bit(), 0x0020);
        assert_eq!(Button::RightThumb.bit(), 0x0080);
        assert_eq!(Button::LeftShoulder.bit(), 0x0100);
        assert_eq!(Button::RightShoulder.bit(), 0x0200);
        assert_eq!(Button::A.bit(), 0x1000);
        assert_eq!(Button::Y.bit(), 0x8000);
        assert_eq!(Button::ALL.len(), 14);
    }

    #[test]
    fn user_index_from_slot_number() {
        assert_eq!(UserIndex::try_from(0).unwrap(), UserIndex::One);
        assert_eq!(UserIndex::try_from(3).unwrap(), UserIndex::Four);
        assert!(matches!(
            UserIndex::try_from(4),
            Err(Error::InvalidIndex(4))
        ));
        assert_eq!(UserIndex::Two.to_string(), "#2");
    }

    #[test]
    fn gamepad_pressed_maps_raw_bits() {
        let pad = Gamepad {
            buttons: 0x1000 | 0x0004,
            ..Gamepad::default()
        };
        let pressed: Vec<_> = pad.pressed().iter().collect();
        assert_eq!(pressed, vec![Button::DPadLeft, Button::A]);
    }
}
