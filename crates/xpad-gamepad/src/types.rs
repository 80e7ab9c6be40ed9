use xpad_bit_derive::Bit;
use xpad_bit_mask::Bitmask;

/// Driver slot of a controller, `0..MAX_DEVICES`.
pub type DeviceIndex = u32;

/// Number of controller slots the driver exposes.
pub const MAX_DEVICES: DeviceIndex = 4;

/// Number of button ordinals carried by a snapshot. Ordinal 0 is unused.
pub const BUTTON_COUNT: u8 = 16;

/// Left or right side of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

/// Analog axes in scan order: sticks before triggers, left before right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl Axis {
    /// All axes in the order the differ scans them.
    pub const ALL: [Axis; 6] = [
        Axis::LeftX,
        Axis::LeftY,
        Axis::RightX,
        Axis::RightY,
        Axis::LeftTrigger,
        Axis::RightTrigger,
    ];

    /// Position of the axis in [`Axis::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Axis::LeftX => 0,
            Axis::LeftY => 1,
            Axis::RightX => 2,
            Axis::RightY => 3,
            Axis::LeftTrigger => 4,
            Axis::RightTrigger => 5,
        }
    }

    #[inline]
    pub fn is_trigger(self) -> bool {
        matches!(self, Axis::LeftTrigger | Axis::RightTrigger)
    }

    /// Width in bits of the raw driver sample for this axis.
    #[inline]
    pub fn bit_width(self) -> u32 {
        if self.is_trigger() {
            8
        } else {
            16
        }
    }

    /// Short name used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Axis::LeftX => "LX",
            Axis::LeftY => "LY",
            Axis::RightX => "RX",
            Axis::RightY => "RY",
            Axis::LeftTrigger => "LTrigger",
            Axis::RightTrigger => "RTrigger",
        }
    }

    pub fn x(hand: Hand) -> Axis {
        match hand {
            Hand::Left => Axis::LeftX,
            Hand::Right => Axis::RightX,
        }
    }

    pub fn y(hand: Hand) -> Axis {
        match hand {
            Hand::Left => Axis::LeftY,
            Hand::Right => Axis::RightY,
        }
    }

    pub fn trigger(hand: Hand) -> Axis {
        match hand {
            Hand::Left => Axis::LeftTrigger,
            Hand::Right => Axis::RightTrigger,
        }
    }
}

/// Named controller buttons keyed by their ordinal.
///
/// Ordinal `n` is bit `16 - n` of the driver button word, so `Y` is the most
/// significant bit and `DPadUp` the least. Ordinals 5 and 6 carry no button.
#[derive(Bit, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Y = 1,
    X = 2,
    B = 3,
    A = 4,
    BumperR = 7,
    BumperL = 8,
    StickR = 9,
    StickL = 10,
    Back = 11,
    Start = 12,
    DPadRight = 13,
    DPadLeft = 14,
    DPadDown = 15,
    DPadUp = 16,
}

impl Button {
    pub const ALL: [Button; 14] = [
        Button::Y,
        Button::X,
        Button::B,
        Button::A,
        Button::BumperR,
        Button::BumperL,
        Button::StickR,
        Button::StickL,
        Button::Back,
        Button::Start,
        Button::DPadRight,
        Button::DPadLeft,
        Button::DPadDown,
        Button::DPadUp,
    ];

    #[inline]
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Button> {
        Button::ALL.into_iter().find(|b| b.ordinal() == ordinal)
    }

    pub fn bumper(hand: Hand) -> Button {
        match hand {
            Hand::Left => Button::BumperL,
            Hand::Right => Button::BumperR,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Button::Y => "Y",
            Button::X => "X",
            Button::B => "B",
            Button::A => "A",
            Button::BumperR => "RB",
            Button::BumperL => "LB",
            Button::StickR => "RS",
            Button::StickL => "LS",
            Button::Back => "Back",
            Button::Start => "Start",
            Button::DPadRight => "DPadRight",
            Button::DPadLeft => "DPadLeft",
            Button::DPadDown => "DPadDown",
            Button::DPadUp => "DPadUp",
        }
    }
}

/// Pressed buttons, indexed by ordinal.
pub type ButtonState = Bitmask<Button>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryType {
    Disconnected,
    Wired,
    Alkaline,
    NiMH,
    Unknown,
}

impl BatteryType {
    /// Map the driver's battery type byte.
    pub fn from_raw(raw: u8) -> BatteryType {
        match raw {
            0x00 => BatteryType::Disconnected,
            0x01 => BatteryType::Wired,
            0x02 => BatteryType::Alkaline,
            0x03 => BatteryType::NiMH,
            _ => BatteryType::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BatteryLevel {
    Empty,
    Low,
    Medium,
    Full,
}

impl BatteryLevel {
    /// Map the driver's battery level byte. Values past `Full` saturate.
    pub fn from_raw(raw: u8) -> BatteryLevel {
        match raw {
            0x00 => BatteryLevel::Empty,
            0x01 => BatteryLevel::Low,
            0x02 => BatteryLevel::Medium,
            _ => BatteryLevel::Full,
        }
    }
}

/// Battery report of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatteryInfo {
    pub kind: BatteryType,
    pub level: BatteryLevel,
}

#[cfg(test)]
mod tests {
    use super::*;
    use xpad_bit_mask::Bitable;

    #[test]
    fn button_bits_follow_ordinals() {
        for button in Button::ALL {
            assert_eq!(button.index(), u32::from(button.ordinal()));
            assert_eq!(Button::from_ordinal(button.ordinal()), Some(button));
        }
        assert_eq!(Button::from_ordinal(0), None);
        assert_eq!(Button::from_ordinal(5), None);
        assert_eq!(Button::from_ordinal(6), None);
        assert_eq!(Button::from_ordinal(17), None);
    }

    #[test]
    fn axes_are_listed_in_scan_order() {
        for (i, axis) in Axis::ALL.into_iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
        assert!(Axis::ALL[..4].iter().all(|a| !a.is_trigger()));
        assert!(Axis::ALL[4..].iter().all(|a| a.is_trigger()));
    }

    #[test]
    fn battery_bytes_map_to_enums() {
        assert_eq!(BatteryType::from_raw(0x03), BatteryType::NiMH);
        assert_eq!(BatteryType::from_raw(0xFF), BatteryType::Unknown);
        assert_eq!(BatteryLevel::from_raw(0x00), BatteryLevel::Empty);
        assert_eq!(BatteryLevel::from_raw(0x03), BatteryLevel::Full);
    }
}
