//! Control identifiers shared by mapping, calibration, and the registry.

use gamepad_report::{AXIS_CENTER, TRIGGER_REST};

/// Number of analog axes in the report.
pub const AXIS_COUNT: usize = 6;

/// Analog axis, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl Axis {
    /// All axes in report order.
    pub const ALL: [Axis; AXIS_COUNT] = [
        Axis::LeftX,
        Axis::LeftY,
        Axis::RightX,
        Axis::RightY,
        Axis::LeftTrigger,
        Axis::RightTrigger,
    ];

    /// Configuration name (`"LX"`, `"LY"`, `"RX"`, `"RY"`, `"LT"`, `"RT"`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Axis::LeftX => "LX",
            Axis::LeftY => "LY",
            Axis::RightX => "RX",
            Axis::RightY => "RY",
            Axis::LeftTrigger => "LT",
            Axis::RightTrigger => "RT",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Position in the report's axis block.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[inline]
    #[must_use]
    pub const fn is_trigger(self) -> bool {
        matches!(self, Axis::LeftTrigger | Axis::RightTrigger)
    }

    /// Value sent when the axis is not wired: center for sticks, rest for triggers.
    #[inline]
    #[must_use]
    pub const fn neutral(self) -> u8 {
        if self.is_trigger() {
            TRIGGER_REST
        } else {
            AXIS_CENTER
        }
    }
}

/// D-pad direction, in the order the hat encoder takes them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DpadDirection {
    Up,
    Down,
    Left,
    Right,
}

impl DpadDirection {
    pub const ALL: [DpadDirection; 4] = [
        DpadDirection::Up,
        DpadDirection::Down,
        DpadDirection::Left,
        DpadDirection::Right,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            DpadDirection::Up => "Up",
            DpadDirection::Down => "Down",
            DpadDirection::Left => "Left",
            DpadDirection::Right => "Right",
        }
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Pressed state of the four D-pad directions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DpadState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DpadState {
    #[must_use]
    pub fn get(&self, dir: DpadDirection) -> bool {
        match dir {
            DpadDirection::Up => self.up,
            DpadDirection::Down => self.down,
            DpadDirection::Left => self.left,
            DpadDirection::Right => self.right,
        }
    }

    pub fn set(&mut self, dir: DpadDirection, pressed: bool) {
        match dir {
            DpadDirection::Up => self.up = pressed,
            DpadDirection::Down => self.down = pressed,
            DpadDirection::Left => self.left = pressed,
            DpadDirection::Right => self.right = pressed,
        }
    }

    #[must_use]
    pub const fn hat(&self) -> gamepad_report::Hat {
        gamepad_report::Hat::from_dpad(self.up, self.down, self.left, self.right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_names_round_trip() {
        for axis in Axis::ALL {
            assert_eq!(Axis::from_name(axis.name()), Some(axis));
        }
        assert_eq!(Axis::from_name("lx"), None);
    }

    #[test]
    fn test_axis_neutral_values() {
        assert_eq!(Axis::LeftX.neutral(), 128);
        assert_eq!(Axis::RightY.neutral(), 128);
        assert_eq!(Axis::LeftTrigger.neutral(), 0);
        assert_eq!(Axis::RightTrigger.neutral(), 0);
    }

    #[test]
    fn test_axis_index_matches_report_order() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn test_dpad_state_hat() {
        let mut dpad = DpadState::default();
        dpad.set(DpadDirection::Down, true);
        dpad.set(DpadDirection::Left, true);
        assert_eq!(dpad.hat().as_u8(), 5);
        assert!(dpad.get(DpadDirection::Left));
    }
}
