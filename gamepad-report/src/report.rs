//! The 9-byte HID input report.

use crate::buttons::Buttons;
use crate::hat::Hat;

/// Resting value of a stick axis.
pub const AXIS_CENTER: u8 = 128;

/// Resting value of a trigger axis.
pub const TRIGGER_REST: u8 = 0;

/// Error type for decoding a report from bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// Input slice does not hold exactly [`GamepadReport::SIZE`] bytes.
    #[error("report must be {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },
    /// High nibble of the hat byte is padding and must be zero.
    #[error("hat padding bits set: {0:#04x}")]
    HatPadding(u8),
}

/// USB HID gamepad input report.
///
/// Matches [`REPORT_DESCRIPTOR`](crate::REPORT_DESCRIPTOR) byte for byte.
/// Reports are plain values; build a new one for every send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GamepadReport {
    pub buttons: Buttons,
    pub hat: Hat,
    pub left_x: u8,
    pub left_y: u8,
    pub right_x: u8,
    pub right_y: u8,
    pub left_trigger: u8,
    pub right_trigger: u8,
}

impl GamepadReport {
    /// Size of the report in bytes.
    pub const SIZE: usize = 9;

    /// Nothing pressed, sticks centered, triggers released.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            hat: Hat::Neutral,
            left_x: AXIS_CENTER,
            left_y: AXIS_CENTER,
            right_x: AXIS_CENTER,
            right_y: AXIS_CENTER,
            left_trigger: TRIGGER_REST,
            right_trigger: TRIGGER_REST,
        }
    }

    /// Build a report from the six axis values in `LX, LY, RX, RY, LT, RT` order.
    #[must_use]
    pub const fn with_axes(buttons: Buttons, hat: Hat, axes: [u8; 6]) -> Self {
        Self {
            buttons,
            hat,
            left_x: axes[0],
            left_y: axes[1],
            right_x: axes[2],
            right_y: axes[3],
            left_trigger: axes[4],
            right_trigger: axes[5],
        }
    }

    /// Axis values in `LX, LY, RX, RY, LT, RT` order.
    #[must_use]
    pub const fn axes(&self) -> [u8; 6] {
        [
            self.left_x,
            self.left_y,
            self.right_x,
            self.right_y,
            self.left_trigger,
            self.right_trigger,
        ]
    }

    /// Convert the report to wire bytes.
    #[must_use]
    pub fn as_bytes(&self) -> [u8; Self::SIZE] {
        let [lo, hi] = self.buttons.to_le_bytes();
        let [lx, ly, rx, ry, lt, rt] = self.axes();
        [lo, hi, self.hat.as_u8() & 0x0F, lx, ly, rx, ry, lt, rt]
    }

    /// Decode wire bytes back into a report.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ReportError> {
        let bytes: &[u8; Self::SIZE] = bytes.try_into().map_err(|_| ReportError::Length {
            expected: Self::SIZE,
            actual: bytes.len(),
        })?;

        if bytes[2] & 0xF0 != 0 {
            return Err(ReportError::HatPadding(bytes[2]));
        }

        Ok(Self {
            buttons: Buttons(u16::from_le_bytes([bytes[0], bytes[1]])),
            hat: Hat::from_u8(bytes[2]),
            left_x: bytes[3],
            left_y: bytes[4],
            right_x: bytes[5],
            right_y: bytes[6],
            left_trigger: bytes[7],
            right_trigger: bytes[8],
        })
    }
}

impl Default for GamepadReport {
    fn default() -> Self {
        Self::neutral()
    }
}
