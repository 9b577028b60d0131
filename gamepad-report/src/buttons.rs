//! Button bitfield with the fixed host-facing slot layout.

use core::ops::BitOr;

/// Number of button bits in the report.
pub const MAX_BUTTONS: usize = 16;

/// Button names that own fixed slots, in bit order.
///
/// `A` is bit 0, `R3` is bit 9. Slots 10-15 are handed out to any other
/// configured button names in alphabetical order.
pub const CANONICAL_BUTTONS: [&str; 10] = [
    "A", "B", "X", "Y", "LB", "RB", "Start", "Select", "L3", "R3",
];

/// Button state represented as a bitfield.
///
/// Bit `n` is set while the button in slot `n` is pressed.
///
/// # Example
///
/// ```
/// use gamepad_report::Buttons;
///
/// let buttons = Buttons::A | Buttons::Y;
/// assert!(buttons.is_slot_pressed(0));
/// assert!(!buttons.is_slot_pressed(1));
/// assert_eq!(buttons.to_le_bytes(), [0b0000_1001, 0]);
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Buttons(pub u16);

impl Buttons {
    pub const A: Self = Self(1 << 0);
    pub const B: Self = Self(1 << 1);
    pub const X: Self = Self(1 << 2);
    pub const Y: Self = Self(1 << 3);
    pub const LB: Self = Self(1 << 4); // Left bumper
    pub const RB: Self = Self(1 << 5); // Right bumper
    pub const START: Self = Self(1 << 6);
    pub const SELECT: Self = Self(1 << 7);
    pub const L3: Self = Self(1 << 8); // Left stick press
    pub const R3: Self = Self(1 << 9); // Right stick press

    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Bitfield with only the given slot set.
    ///
    /// Slots outside `0..MAX_BUTTONS` yield [`Buttons::NONE`].
    #[inline]
    #[must_use]
    pub const fn slot(index: usize) -> Self {
        if index < MAX_BUTTONS {
            Self(1 << index)
        } else {
            Self::NONE
        }
    }

    /// Fixed slot of a canonical button name, if it is one.
    #[must_use]
    pub fn canonical_slot(name: &str) -> Option<usize> {
        CANONICAL_BUTTONS.iter().position(|&n| n == name)
    }

    /// Check if the button in `index` is pressed.
    #[inline]
    #[must_use]
    pub const fn is_slot_pressed(self, index: usize) -> bool {
        index < MAX_BUTTONS && self.0 & (1 << index) != 0
    }

    /// Set or clear a single slot. Out-of-range slots are ignored.
    #[inline]
    pub fn set_slot(&mut self, index: usize, pressed: bool) {
        let bit = Self::slot(index).0;
        if pressed {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }

    /// Little-endian wire bytes: `[bits 0-7, bits 8-15]`.
    #[inline]
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 2] {
        self.0.to_le_bytes()
    }
}

impl BitOr for Buttons {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_bitwise_or() {
        let buttons = Buttons::A | Buttons::B;
        assert!(buttons.is_slot_pressed(0));
        assert!(buttons.is_slot_pressed(1));
        assert!(!buttons.is_slot_pressed(2));
    }

    #[test]
    fn test_buttons_set_clear() {
        let mut buttons = Buttons::NONE;
        buttons.set_slot(4, true);
        assert_eq!(buttons, Buttons::LB);
        buttons.set_slot(4, false);
        assert_eq!(buttons, Buttons::NONE);
    }

    #[test]
    fn test_slot_three_packs_into_low_byte() {
        let mut buttons = Buttons::NONE;
        buttons.set_slot(3, true);
        assert_eq!(buttons.to_le_bytes(), [0b0000_1000, 0]);
    }

    #[test]
    fn test_high_slots_pack_into_second_byte() {
        let buttons = Buttons::slot(9) | Buttons::slot(15);
        assert_eq!(buttons.to_le_bytes(), [0, 0b1000_0010]);
    }

    #[test]
    fn test_out_of_range_slot_is_ignored() {
        let mut buttons = Buttons::NONE;
        buttons.set_slot(16, true);
        assert_eq!(buttons, Buttons::NONE);
        assert!(!buttons.is_slot_pressed(16));
    }

    #[test]
    fn test_canonical_slots_match_constants() {
        assert_eq!(Buttons::canonical_slot("A"), Some(0));
        assert_eq!(Buttons::slot(Buttons::canonical_slot("Start").unwrap()), Buttons::START);
        assert_eq!(Buttons::slot(Buttons::canonical_slot("R3").unwrap()), Buttons::R3);
        assert_eq!(Buttons::canonical_slot("start"), None);
        assert_eq!(Buttons::canonical_slot("Home"), None);
    }
}
