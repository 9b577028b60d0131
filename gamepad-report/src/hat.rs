//! Hat switch encoding for the D-pad.

/// Hat switch value, clockwise from north.
///
/// `Neutral` is sent as 8, which lies outside the descriptor's logical
/// range 0-7 and is therefore read by hosts as the null state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Hat {
    Up = 0,
    UpRight = 1,
    Right = 2,
    DownRight = 3,
    Down = 4,
    DownLeft = 5,
    Left = 6,
    UpLeft = 7,
    #[default]
    Neutral = 8,
}

impl Hat {
    /// Encode four D-pad direction levels into a hat value.
    ///
    /// Only exact single directions and the four adjacent diagonal pairs
    /// are recognized. Anything else (idle, opposing directions such as
    /// up+down, three or four directions at once) is `Neutral`.
    #[must_use]
    pub const fn from_dpad(up: bool, down: bool, left: bool, right: bool) -> Self {
        match (up, down, left, right) {
            (true, false, false, false) => Self::Up,
            (true, false, false, true) => Self::UpRight,
            (false, false, false, true) => Self::Right,
            (false, true, false, true) => Self::DownRight,
            (false, true, false, false) => Self::Down,
            (false, true, true, false) => Self::DownLeft,
            (false, false, true, false) => Self::Left,
            (true, false, true, false) => Self::UpLeft,
            _ => Self::Neutral,
        }
    }

    /// Decode a wire value. Values above 7 are neutral.
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Up,
            1 => Self::UpRight,
            2 => Self::Right,
            3 => Self::DownRight,
            4 => Self::Down,
            5 => Self::DownLeft,
            6 => Self::Left,
            7 => Self::UpLeft,
            _ => Self::Neutral,
        }
    }

    /// Wire value (0-8).
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_directions() {
        assert_eq!(Hat::from_dpad(true, false, false, false).as_u8(), 0);
        assert_eq!(Hat::from_dpad(false, false, false, true).as_u8(), 2);
        assert_eq!(Hat::from_dpad(false, true, false, false).as_u8(), 4);
        assert_eq!(Hat::from_dpad(false, false, true, false).as_u8(), 6);
    }

    #[test]
    fn test_diagonals() {
        assert_eq!(Hat::from_dpad(true, false, false, true).as_u8(), 1);
        assert_eq!(Hat::from_dpad(false, true, false, true).as_u8(), 3);
        assert_eq!(Hat::from_dpad(false, true, true, false).as_u8(), 5);
        assert_eq!(Hat::from_dpad(true, false, true, false).as_u8(), 7);
    }

    #[test]
    fn test_idle_is_neutral() {
        assert_eq!(Hat::from_dpad(false, false, false, false).as_u8(), 8);
    }

    #[test]
    fn test_opposing_directions_are_neutral() {
        assert_eq!(Hat::from_dpad(true, true, false, false), Hat::Neutral);
        assert_eq!(Hat::from_dpad(false, false, true, true), Hat::Neutral);
        assert_eq!(Hat::from_dpad(true, true, true, true), Hat::Neutral);
        // Three directions never collapse to a diagonal.
        assert_eq!(Hat::from_dpad(true, true, false, true), Hat::Neutral);
    }

    #[test]
    fn test_from_u8_round_trips_all_values() {
        for v in 0..=8u8 {
            assert_eq!(Hat::from_u8(v).as_u8(), v);
        }
        assert_eq!(Hat::from_u8(0x0F), Hat::Neutral);
    }
}
