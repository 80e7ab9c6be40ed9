use crate::types::Axis;

/// Raw gamepad fields as reported by the driver.
///
/// | field           | width            |
/// |-----------------|------------------|
/// | `buttons`       | 16 bit bitmask   |
/// | `*_trigger`     | 8 bit unsigned   |
/// | `thumb_*`       | 16 bit signed    |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RawGamepad {
    pub buttons: u16,
    pub left_trigger: u8,
    pub right_trigger: u8,
    pub thumb_lx: i16,
    pub thumb_ly: i16,
    pub thumb_rx: i16,
    pub thumb_ry: i16,
}

impl RawGamepad {
    /// Raw sample of `axis`, widened to a common integer type.
    #[inline]
    pub fn axis(&self, axis: Axis) -> i64 {
        match axis {
            Axis::LeftX => i64::from(self.thumb_lx),
            Axis::LeftY => i64::from(self.thumb_ly),
            Axis::RightX => i64::from(self.thumb_rx),
            Axis::RightY => i64::from(self.thumb_ry),
            Axis::LeftTrigger => i64::from(self.left_trigger),
            Axis::RightTrigger => i64::from(self.right_trigger),
        }
    }
}

/// One read of every controller input, tagged with the driver packet number.
///
/// The packet number increases whenever the driver sees an input change and
/// wraps modulo 2^32.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RawSnapshot {
    pub packet_number: u32,
    pub gamepad: RawGamepad,
}

impl RawSnapshot {
    pub fn new(packet_number: u32, gamepad: RawGamepad) -> Self {
        Self {
            packet_number,
            gamepad,
        }
    }

    /// Packets the driver produced between `previous` and `self` that were never read.
    #[inline]
    pub fn missed_since(&self, previous: &RawSnapshot) -> u32 {
        self.packet_number
            .wrapping_sub(previous.packet_number)
            .wrapping_sub(1)
    }
}
