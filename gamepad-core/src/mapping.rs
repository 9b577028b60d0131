//! Control mapping: which pin label drives which button, D-pad direction, and axis.
//!
//! A [`ControlMapping`] is built once at startup, either with the fluent
//! [`MappingBuilder`], from the pin-mapping JSON document, or from a wiring
//! CSV. It is immutable afterwards.
//!
//! # Button Slots
//!
//! Button order is part of the wire contract with the host. The canonical
//! names in [`CANONICAL_BUTTONS`] own fixed bits 0-9 whether or not they are
//! wired, so `Start` is always bit 6. Any other names fill bits 10-15 in
//! alphabetical order.
//!
//! # JSON Document
//!
//! ```text
//! {
//!   // comment lines are allowed
//!   "buttons": { "A": "GP2", "B": "GP3", "Start": "GP8" },
//!   "dpad":    { "Up": "GP10", "Down": "GP11", "Left": "GP12", "Right": "GP13" },
//!   "axes":    { "LX": "A0", "LY": "A1", "LT": "A2" }
//! }
//! ```
//!
//! `buttons` is required (it may be empty), `dpad` and `axes` and every
//! entry inside them are optional.

use gamepad_report::{Buttons, CANONICAL_BUTTONS, MAX_BUTTONS};
use core::fmt;

use heapless::{String, Vec};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::config::{blank_comment_lines, ConfigError};
use crate::pins::{Label, LABEL_CAPACITY};
use crate::types::{Axis, DpadDirection, AXIS_COUNT};

/// Maximum length of a button name.
pub const NAME_CAPACITY: usize = 16;

/// Owned button name.
pub type ButtonName = String<NAME_CAPACITY>;

/// A named button wired to a pin, with its bit in the report.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonBinding {
    pub name: ButtonName,
    pub label: Label,
    /// Bit index in the report's button field.
    pub slot: u8,
}

/// Immutable mapping of logical controls to pin labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlMapping {
    /// Sorted by slot.
    buttons: Vec<ButtonBinding, MAX_BUTTONS>,
    dpad: [Option<Label>; 4],
    axes: [Option<Label>; AXIS_COUNT],
}

impl ControlMapping {
    /// Start building a mapping.
    #[must_use]
    pub fn builder() -> MappingBuilder {
        MappingBuilder::default()
    }

    /// Button bindings in slot order.
    #[must_use]
    pub fn buttons(&self) -> &[ButtonBinding] {
        &self.buttons
    }

    #[must_use]
    pub fn dpad(&self, dir: DpadDirection) -> Option<&str> {
        self.dpad[dir.index()].as_deref()
    }

    #[must_use]
    pub fn axis(&self, axis: Axis) -> Option<&str> {
        self.axes[axis.index()].as_deref()
    }

    /// Slot of a button by name.
    #[must_use]
    pub fn slot_of(&self, name: &str) -> Option<u8> {
        self.buttons
            .iter()
            .find(|b| b.name.as_str() == name)
            .map(|b| b.slot)
    }

    /// Parse the pin-mapping JSON document.
    ///
    /// Whole-line `//` comments are blanked in `doc` before parsing.
    pub fn from_json(doc: &mut [u8]) -> Result<Self, ConfigError> {
        blank_comment_lines(doc);
        let (parsed, _) = serde_json_core::from_slice::<PinoutDocument>(doc)?;

        let ButtonSection(mut builder) = parsed.buttons.ok_or(ConfigError::MissingSection("buttons"))?;
        for dir in DpadDirection::ALL {
            if let Some(label) = parsed.dpad.get(dir) {
                builder = builder.dpad(dir, label);
            }
        }
        for axis in Axis::ALL {
            if let Some(label) = parsed.axes.get(axis) {
                builder = builder.axis(axis, label);
            }
        }
        builder.build()
    }

    /// Parse a wiring CSV.
    ///
    /// The header must contain `Control` and `Pad Role` columns and a pin
    /// column whose name ends in `Pin` (e.g. `Pico Pin`). Role `signal`
    /// wires a button (`BT-` prefix stripped) or a `D-Pad ...` direction;
    /// role `wiper` wires `Joystick-Left X`, `Joystick-Right Y`,
    /// `Trigger-Left`, and so on. Rows with an empty control, role, or pin
    /// are skipped.
    ///
    /// ```
    /// use gamepad_core::{Axis, ControlMapping};
    ///
    /// let csv = "Control,Pad Role,Pico Pin\n\
    ///            BT-A,Signal,GP2\n\
    ///            Joystick-Left X,Wiper,A0\n";
    /// let mapping = ControlMapping::from_wiring_csv(csv).unwrap();
    /// assert_eq!(mapping.slot_of("A"), Some(0));
    /// assert_eq!(mapping.axis(Axis::LeftX), Some("A0"));
    /// ```
    pub fn from_wiring_csv(doc: &str) -> Result<Self, ConfigError> {
        let mut lines = doc.lines().filter(|l| !l.trim().is_empty());
        let header = lines.next().ok_or(ConfigError::Empty)?;

        let control_col = csv_fields(header)
            .position(|h| h == "Control")
            .ok_or(ConfigError::MissingSection("Control"))?;
        let role_col = csv_fields(header)
            .position(|h| h == "Pad Role")
            .ok_or(ConfigError::MissingSection("Pad Role"))?;
        let pin_col = csv_fields(header)
            .position(|h| h.ends_with("Pin"))
            .ok_or(ConfigError::MissingSection("Pin"))?;

        let mut builder = Self::builder();
        for line in lines {
            let field = |i| csv_fields(line).nth(i).unwrap_or("");
            let control = field(control_col);
            let role = field(role_col);
            let pin = field(pin_col);
            if control.is_empty() || role.is_empty() || pin.is_empty() {
                continue;
            }

            if role.eq_ignore_ascii_case("signal") {
                if control.starts_with("D-Pad") {
                    for dir in DpadDirection::ALL {
                        if control.contains(dir.name()) {
                            builder = builder.dpad(dir, pin);
                        }
                    }
                } else {
                    let name = control.strip_prefix("BT-").unwrap_or(control);
                    builder = builder.button(name, pin);
                }
            } else if role.eq_ignore_ascii_case("wiper") {
                if let Some(axis) = wiper_axis(control) {
                    builder = builder.axis(axis, pin);
                }
            }
        }
        builder.build()
    }
}

fn csv_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(|f| f.trim().trim_matches('"').trim())
}

fn wiper_axis(control: &str) -> Option<Axis> {
    if control.contains("Joystick-Left") {
        if control.contains('X') {
            return Some(Axis::LeftX);
        }
        if control.contains('Y') {
            return Some(Axis::LeftY);
        }
    }
    if control.contains("Joystick-Right") {
        if control.contains('X') {
            return Some(Axis::RightX);
        }
        if control.contains('Y') {
            return Some(Axis::RightY);
        }
    }
    if control.contains("Trigger-Left") {
        return Some(Axis::LeftTrigger);
    }
    if control.contains("Trigger-Right") {
        return Some(Axis::RightTrigger);
    }
    None
}

/// Fluent builder for [`ControlMapping`].
///
/// Errors (names too long, too many buttons) are held until [`build`](Self::build).
///
/// ```
/// use gamepad_core::{Axis, ControlMapping, DpadDirection};
///
/// let mapping = ControlMapping::builder()
///     .button("B", "GP3")
///     .button("Home", "GP9")
///     .dpad(DpadDirection::Up, "GP10")
///     .axis(Axis::LeftX, "A0")
///     .build()
///     .unwrap();
///
/// assert_eq!(mapping.slot_of("B"), Some(1));
/// assert_eq!(mapping.slot_of("Home"), Some(10));
/// ```
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct MappingBuilder {
    buttons: Vec<(ButtonName, Label), MAX_BUTTONS>,
    dpad: [Option<Label>; 4],
    axes: [Option<Label>; AXIS_COUNT],
    error: Option<ConfigError>,
}

impl MappingBuilder {
    /// Wire a named button. A repeated name replaces the earlier label.
    pub fn button(mut self, name: &str, label: &str) -> Self {
        let (Some(name), Some(label)) = (self.text::<NAME_CAPACITY>(name), self.label(label)) else {
            return self;
        };
        if label.is_empty() {
            return self;
        }

        if let Some(existing) = self.buttons.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = label;
        } else if self.buttons.push((name, label)).is_err() {
            self.fail(ConfigError::TooManyButtons);
        }
        self
    }

    pub fn dpad(mut self, dir: DpadDirection, label: &str) -> Self {
        self.dpad[dir.index()] = self.label(label).filter(|l| !l.is_empty());
        self
    }

    pub fn axis(mut self, axis: Axis, label: &str) -> Self {
        self.axes[axis.index()] = self.label(label).filter(|l| !l.is_empty());
        self
    }

    /// Assign slots and produce the mapping.
    pub fn build(self) -> Result<ControlMapping, ConfigError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let empty = self.buttons.is_empty()
            && self.dpad.iter().all(Option::is_none)
            && self.axes.iter().all(Option::is_none);
        if empty {
            return Err(ConfigError::Empty);
        }

        let mut canonical: Vec<ButtonBinding, MAX_BUTTONS> = Vec::new();
        let mut extra: Vec<(ButtonName, Label), MAX_BUTTONS> = Vec::new();

        for (name, label) in self.buttons {
            match Buttons::canonical_slot(&name) {
                Some(slot) => {
                    let binding = ButtonBinding {
                        name,
                        label,
                        slot: slot as u8,
                    };
                    canonical.push(binding).map_err(|_| ConfigError::TooManyButtons)?;
                }
                None => extra.push((name, label)).map_err(|_| ConfigError::TooManyButtons)?,
            }
        }

        if extra.len() > MAX_BUTTONS - CANONICAL_BUTTONS.len() {
            return Err(ConfigError::TooManyButtons);
        }

        extra.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        let mut buttons = canonical;
        for (i, (name, label)) in extra.into_iter().enumerate() {
            let slot = (CANONICAL_BUTTONS.len() + i) as u8;
            buttons
                .push(ButtonBinding { name, label, slot })
                .map_err(|_| ConfigError::TooManyButtons)?;
        }
        buttons.sort_unstable_by_key(|b| b.slot);

        Ok(ControlMapping {
            buttons,
            dpad: self.dpad,
            axes: self.axes,
        })
    }

    fn label(&mut self, label: &str) -> Option<Label> {
        self.text::<LABEL_CAPACITY>(label.trim())
    }

    fn text<const N: usize>(&mut self, s: &str) -> Option<String<N>> {
        match String::try_from(s) {
            Ok(s) => Some(s),
            Err(_) => {
                self.fail(ConfigError::TooLong);
                None
            }
        }
    }

    fn fail(&mut self, err: ConfigError) {
        self.error.get_or_insert(err);
    }
}

#[derive(Deserialize)]
struct PinoutDocument<'a> {
    buttons: Option<ButtonSection>,
    #[serde(default, borrow)]
    dpad: DpadLabels<'a>,
    #[serde(default, borrow)]
    axes: AxisLabels<'a>,
}

/// The `buttons` object, fed entry by entry into a builder so that a
/// long name or a seventeenth button is reported as such.
struct ButtonSection(MappingBuilder);

impl<'de> Deserialize<'de> for ButtonSection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SectionVisitor;

        impl<'de> Visitor<'de> for SectionVisitor {
            type Value = ButtonSection;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of button names to pin labels")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<ButtonSection, M::Error> {
                let mut builder = MappingBuilder::default();
                while let Some((name, label)) = map.next_entry::<&'de str, &'de str>()? {
                    builder = builder.button(name, label);
                }
                Ok(ButtonSection(builder))
            }
        }

        deserializer.deserialize_map(SectionVisitor)
    }
}

#[derive(Deserialize, Default)]
struct DpadLabels<'a> {
    #[serde(rename = "Up", borrow)]
    up: Option<&'a str>,
    #[serde(rename = "Down", borrow)]
    down: Option<&'a str>,
    #[serde(rename = "Left", borrow)]
    left: Option<&'a str>,
    #[serde(rename = "Right", borrow)]
    right: Option<&'a str>,
}

impl DpadLabels<'_> {
    fn get(&self, dir: DpadDirection) -> Option<&str> {
        match dir {
            DpadDirection::Up => self.up,
            DpadDirection::Down => self.down,
            DpadDirection::Left => self.left,
            DpadDirection::Right => self.right,
        }
    }
}

#[derive(Deserialize, Default)]
struct AxisLabels<'a> {
    #[serde(rename = "LX", borrow)]
    lx: Option<&'a str>,
    #[serde(rename = "LY", borrow)]
    ly: Option<&'a str>,
    #[serde(rename = "RX", borrow)]
    rx: Option<&'a str>,
    #[serde(rename = "RY", borrow)]
    ry: Option<&'a str>,
    #[serde(rename = "LT", borrow)]
    lt: Option<&'a str>,
    #[serde(rename = "RT", borrow)]
    rt: Option<&'a str>,
}

impl AxisLabels<'_> {
    fn get(&self, axis: Axis) -> Option<&str> {
        match axis {
            Axis::LeftX => self.lx,
            Axis::LeftY => self.ly,
            Axis::RightX => self.rx,
            Axis::RightY => self.ry,
            Axis::LeftTrigger => self.lt,
            Axis::RightTrigger => self.rt,
        }
    }
}
