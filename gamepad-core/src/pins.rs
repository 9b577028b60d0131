//! Pin label resolution against a board's pin catalog.
//!
//! Labels are free text copied from wiring notes, e.g. `"GP4"` or
//! `"SDA (GP4)"`. A parenthesized alias wins when it names a known pin,
//! otherwise the whole trimmed label must. Names are matched exactly.

use heapless::String;

/// Maximum length of a stored pin label.
pub const LABEL_CAPACITY: usize = 32;

/// Owned pin label as it appears in the configuration.
pub type Label = String<LABEL_CAPACITY>;

/// GPIO number of a resolved pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinId(pub u8);

/// One named pin of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinInfo {
    /// Name as printed on the board / datasheet.
    pub name: &'static str,
    pub id: PinId,
    /// Pin is wired to an ADC input.
    pub analog: bool,
}

impl PinInfo {
    const fn digital(name: &'static str, gpio: u8) -> Self {
        Self {
            name,
            id: PinId(gpio),
            analog: false,
        }
    }

    const fn analog(name: &'static str, gpio: u8) -> Self {
        Self {
            name,
            id: PinId(gpio),
            analog: true,
        }
    }
}

/// Raised when a label names no pin in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("unknown pin label: {label}")]
pub struct UnknownPin {
    /// The offending label, truncated to [`LABEL_CAPACITY`].
    pub label: Label,
}

impl UnknownPin {
    fn new(label: &str) -> Self {
        Self {
            label: truncated(label),
        }
    }
}

/// Copy `s` into a [`Label`], cutting at a char boundary if it is too long.
pub(crate) fn truncated(s: &str) -> Label {
    let mut label = Label::new();
    for c in s.chars() {
        if label.push(c).is_err() {
            break;
        }
    }
    label
}

/// Static table of the pins a board exposes.
#[derive(Clone, Copy, Debug)]
pub struct PinCatalog {
    pins: &'static [PinInfo],
}

impl PinCatalog {
    #[must_use]
    pub const fn new(pins: &'static [PinInfo]) -> Self {
        Self { pins }
    }

    /// Look up an exact pin name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&PinInfo> {
        self.pins.iter().find(|p| p.name == name)
    }

    /// Resolve a free-text label to a pin.
    ///
    /// # Example
    ///
    /// ```
    /// use gamepad_core::pins::{PinId, PICO};
    ///
    /// assert_eq!(PICO.resolve("SDA (GP4)").unwrap().id, PinId(4));
    /// assert_eq!(PICO.resolve("  A0 ").unwrap().id, PinId(26));
    /// assert!(PICO.resolve("gp4").is_err());
    /// ```
    pub fn resolve(&self, label: &str) -> Result<&PinInfo, UnknownPin> {
        let label = label.trim();

        if let Some(alias) = parenthesized(label) {
            if let Some(pin) = self.lookup(alias) {
                return Ok(pin);
            }
        }

        self.lookup(label).ok_or_else(|| UnknownPin::new(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PinInfo> {
        self.pins.iter()
    }
}

/// Text between the first `(` and the next `)` after it.
fn parenthesized(label: &str) -> Option<&str> {
    let open = label.find('(')?;
    let rest = &label[open + 1..];
    let close = rest.find(')')?;
    Some(&rest[..close])
}

/// Raspberry Pi Pico header pins.
///
/// GP23-GP25 and GP29 drive on-board functions and are not listed.
pub const PICO: PinCatalog = PinCatalog::new(&[
    PinInfo::digital("GP0", 0),
    PinInfo::digital("GP1", 1),
    PinInfo::digital("GP2", 2),
    PinInfo::digital("GP3", 3),
    PinInfo::digital("GP4", 4),
    PinInfo::digital("GP5", 5),
    PinInfo::digital("GP6", 6),
    PinInfo::digital("GP7", 7),
    PinInfo::digital("GP8", 8),
    PinInfo::digital("GP9", 9),
    PinInfo::digital("GP10", 10),
    PinInfo::digital("GP11", 11),
    PinInfo::digital("GP12", 12),
    PinInfo::digital("GP13", 13),
    PinInfo::digital("GP14", 14),
    PinInfo::digital("GP15", 15),
    PinInfo::digital("GP16", 16),
    PinInfo::digital("GP17", 17),
    PinInfo::digital("GP18", 18),
    PinInfo::digital("GP19", 19),
    PinInfo::digital("GP20", 20),
    PinInfo::digital("GP21", 21),
    PinInfo::digital("GP22", 22),
    PinInfo::analog("GP26", 26),
    PinInfo::analog("GP27", 27),
    PinInfo::analog("GP28", 28),
    PinInfo::analog("A0", 26),
    PinInfo::analog("A1", 27),
    PinInfo::analog("A2", 28),
    PinInfo::analog("ADC0", 26),
    PinInfo::analog("ADC1", 27),
    PinInfo::analog("ADC2", 28),
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_direct_name() {
        assert_eq!(PICO.resolve("GP9").unwrap().id, PinId(9));
    }

    #[test]
    fn test_resolve_trims_whitespace() {
        assert_eq!(PICO.resolve("\tGP15  ").unwrap().id, PinId(15));
    }

    #[test]
    fn test_resolve_prefers_parenthesized_alias() {
        let pin = PICO.resolve("MOSI (GP19)").unwrap();
        assert_eq!(pin.id, PinId(19));
        assert_eq!(pin.name, "GP19");
    }

    #[test]
    fn test_resolve_falls_back_to_whole_label() {
        // "(x)" is not a pin, but the label itself is not either.
        assert!(PICO.resolve("GP3 (x)").is_err());

        static ODD: PinCatalog = PinCatalog::new(&[PinInfo::digital("P(1)", 1)]);
        assert_eq!(ODD.resolve("P(1)").unwrap().id, PinId(1));
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let err = PICO.resolve("gp4").unwrap_err();
        assert_eq!(err.label.as_str(), "gp4");
    }

    #[test]
    fn test_analog_aliases_share_gpio() {
        let a0 = PICO.resolve("A0").unwrap();
        let adc0 = PICO.resolve("Joystick X (ADC0)").unwrap();
        assert!(a0.analog);
        assert_eq!(a0.id, adc0.id);
        assert!(!PICO.resolve("GP4").unwrap().analog);
    }

    #[test]
    fn test_unknown_pin_truncates_long_label() {
        let long = "this label is much longer than thirty-two characters";
        let err = PICO.resolve(long).unwrap_err();
        assert_eq!(err.label.len(), LABEL_CAPACITY);
        assert!(long.starts_with(err.label.as_str()));
    }

    #[test]
    fn test_unclosed_parenthesis_uses_whole_label() {
        assert!(PICO.resolve("GP4 (GP5").is_err());
    }
}
