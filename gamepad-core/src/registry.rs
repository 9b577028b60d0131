//! Input registry: every opened pin handle, built once from the control mapping.
//!
//! The registry owns all handles for the life of the program. Dropping it
//! (or failing halfway through [`InputRegistry::build`]) drops the handles
//! already opened, which releases their pins.
//!
//! Reads never fail. A pin that errors keeps its last good value for that
//! cycle and bumps [`InputRegistry::read_faults`].

use gamepad_report::{Buttons, MAX_BUTTONS};
use heapless::Vec;

use crate::calibration::AxisCalibrator;
use crate::config::ConfigError;
use crate::input::{AnalogInput, DigitalInput, InputBackend, InputError};
use crate::mapping::ControlMapping;
use crate::pins::{truncated, Label, PinCatalog, PinId, PinInfo, UnknownPin};
use crate::types::{Axis, DpadDirection, DpadState, AXIS_COUNT};

/// Upper bound on opened pins: buttons, D-pad, and axes.
const MAX_PINS: usize = MAX_BUTTONS + 4 + AXIS_COUNT;

/// Error building the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    #[error(transparent)]
    UnknownPin(#[from] UnknownPin),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An axis label resolved to a pin without an ADC.
    #[error("pin {label} cannot be read as an analog axis")]
    NotAnalogCapable { label: Label },
    /// Two controls resolved to the same pin.
    #[error("pin {label} is assigned to more than one control")]
    PinConflict { label: Label },
    /// The backend refused to open the pin.
    #[error("cannot open pin {label}: {source}")]
    Unavailable { label: Label, source: InputError },
}

struct ButtonInput<D> {
    slot: u8,
    handle: D,
}

/// Owned input handles plus the last good value read from each.
pub struct InputRegistry<D, A> {
    buttons: Vec<ButtonInput<D>, MAX_BUTTONS>,
    dpad: [Option<D>; 4],
    axes: [Option<A>; AXIS_COUNT],
    last_buttons: Buttons,
    last_dpad: DpadState,
    last_axes: [u8; AXIS_COUNT],
    read_faults: u32,
}

impl<D: DigitalInput, A: AnalogInput> InputRegistry<D, A> {
    /// Resolve every label in `mapping` and open its input.
    ///
    /// Buttons and D-pad directions are opened as pulled-up digital inputs,
    /// axes as analog inputs. Controls absent from the mapping are left
    /// unopened and read as neutral.
    pub fn build<B>(
        mapping: &ControlMapping,
        catalog: &PinCatalog,
        backend: &mut B,
    ) -> Result<Self, RegistryError>
    where
        B: InputBackend<Digital = D, Analog = A>,
    {
        let mut claimed = Claimed::default();
        let mut buttons = Vec::new();
        for binding in mapping.buttons() {
            let pin = claimed.resolve(catalog, &binding.label)?;
            let handle = open(&binding.label, backend.open_digital(pin))?;
            buttons
                .push(ButtonInput {
                    slot: binding.slot,
                    handle,
                })
                .map_err(|_| ConfigError::TooManyButtons)?;
        }

        let mut dpad: [Option<D>; 4] = [None, None, None, None];
        for dir in DpadDirection::ALL {
            if let Some(label) = mapping.dpad(dir) {
                let pin = claimed.resolve(catalog, label)?;
                dpad[dir.index()] = Some(open(label, backend.open_digital(pin))?);
            }
        }

        let mut axes: [Option<A>; AXIS_COUNT] = [None, None, None, None, None, None];
        for axis in Axis::ALL {
            if let Some(label) = mapping.axis(axis) {
                let pin = claimed.resolve(catalog, label)?;
                if !pin.analog {
                    return Err(RegistryError::NotAnalogCapable {
                        label: truncated(label),
                    });
                }
                axes[axis.index()] = Some(open(label, backend.open_analog(pin))?);
            }
        }

        Ok(Self {
            buttons,
            dpad,
            axes,
            last_buttons: Buttons::NONE,
            last_dpad: DpadState::default(),
            last_axes: Axis::ALL.map(Axis::neutral),
            read_faults: 0,
        })
    }

    #[must_use]
    pub fn has_axis(&self, axis: Axis) -> bool {
        self.axes[axis.index()].is_some()
    }

    /// Current level of every wired button, keyed by slot.
    pub fn read_buttons(&mut self) -> Buttons {
        let mut levels = self.last_buttons;
        for button in &mut self.buttons {
            let slot = usize::from(button.slot);
            match button.handle.is_pressed() {
                Ok(pressed) => levels.set_slot(slot, pressed),
                Err(_err) => {
                    self.read_faults = self.read_faults.wrapping_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::warn!("button slot {} read failed: {}", slot, _err);
                }
            }
        }
        self.last_buttons = levels;
        levels
    }

    /// Current D-pad directions; unwired directions read as released.
    pub fn read_dpad(&mut self) -> DpadState {
        let mut state = self.last_dpad;
        for dir in DpadDirection::ALL {
            let Some(handle) = self.dpad[dir.index()].as_mut() else {
                continue;
            };
            match handle.is_pressed() {
                Ok(pressed) => state.set(dir, pressed),
                Err(_err) => {
                    self.read_faults = self.read_faults.wrapping_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::warn!("dpad {} read failed: {}", dir, _err);
                }
            }
        }
        self.last_dpad = state;
        state
    }

    /// Sample and calibrate one axis. Unwired axes return their neutral value.
    pub fn read_axis(&mut self, axis: Axis, calibrator: &mut AxisCalibrator) -> u8 {
        let i = axis.index();
        let Some(handle) = self.axes[i].as_mut() else {
            return axis.neutral();
        };
        match handle.read_raw() {
            Ok(raw) => {
                let bits = handle.resolution_bits();
                self.last_axes[i] = calibrator.calibrate(axis, raw, bits);
            }
            Err(_err) => {
                self.read_faults = self.read_faults.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("axis {} read failed: {}", axis, _err);
            }
        }
        self.last_axes[i]
    }

    /// All six axes in report order.
    pub fn read_axes(&mut self, calibrator: &mut AxisCalibrator) -> [u8; AXIS_COUNT] {
        Axis::ALL.map(|axis| self.read_axis(axis, calibrator))
    }

    /// Reads that failed since the registry was built.
    #[must_use]
    pub fn read_faults(&self) -> u32 {
        self.read_faults
    }
}

fn open<H>(label: &str, result: Result<H, InputError>) -> Result<H, RegistryError> {
    result.map_err(|source| RegistryError::Unavailable {
        label: truncated(label),
        source,
    })
}

/// Pins handed out so far, to catch two controls sharing one pin.
#[derive(Default)]
struct Claimed {
    pins: Vec<PinId, MAX_PINS>,
}

impl Claimed {
    fn resolve<'c>(&mut self, catalog: &'c PinCatalog, label: &str) -> Result<&'c PinInfo, RegistryError> {
        let pin = catalog.resolve(label)?;
        if self.pins.contains(&pin.id) || self.pins.push(pin.id).is_err() {
            return Err(RegistryError::PinConflict {
                label: truncated(label),
            });
        }
        Ok(pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{AxisCalibration, CalibrationProfile};
    use crate::pins::PICO;
    use crate::sim::{SimAnalog, SimBoard, SimDigital};

    type SimRegistry<'a> = InputRegistry<SimDigital<'a>, SimAnalog<'a>>;

    fn build<'a>(board: &'a SimBoard, mapping: &ControlMapping) -> Result<SimRegistry<'a>, RegistryError> {
        InputRegistry::build(mapping, &PICO, &mut board.backend())
    }

    fn full_mapping() -> ControlMapping {
        ControlMapping::builder()
            .button("A", "GP2")
            .button("Start", "GP8")
            .dpad(DpadDirection::Up, "GP10")
            .dpad(DpadDirection::Right, "GP13")
            .axis(Axis::LeftX, "A0")
            .axis(Axis::RightTrigger, "ADC2")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_opens_mapped_pins_only() {
        let board = SimBoard::new(12);
        let registry = build(&board, &full_mapping()).unwrap();

        assert!(board.is_claimed(PinId(10)));
        assert!(!board.is_claimed(PinId(11)));
        assert!(registry.has_axis(Axis::LeftX));
        assert!(!registry.has_axis(Axis::LeftY));
        assert!(board.is_claimed(PinId(2)));
        assert!(board.is_claimed(PinId(28)));
        assert!(!board.is_claimed(PinId(3)));
    }

    #[test]
    fn test_read_buttons_by_slot() {
        let board = SimBoard::new(12);
        let mut registry = build(&board, &full_mapping()).unwrap();

        assert_eq!(registry.read_buttons(), Buttons::NONE);
        board.press(PinId(8), true);
        assert_eq!(registry.read_buttons(), Buttons::START);
    }

    #[test]
    fn test_read_dpad_missing_directions_released() {
        let board = SimBoard::new(12);
        let mut registry = build(&board, &full_mapping()).unwrap();

        board.press(PinId(10), true);
        board.press(PinId(13), true);
        let dpad = registry.read_dpad();
        assert!(dpad.up && dpad.right && !dpad.down && !dpad.left);
        assert_eq!(dpad.hat().as_u8(), 1);
    }

    #[test]
    fn test_unmapped_axes_are_neutral() {
        let board = SimBoard::new(12);
        let mut registry = build(&board, &full_mapping()).unwrap();
        let mut calibrator = AxisCalibrator::new(CalibrationProfile::default());

        board.set_sample(PinId(26), 4095);
        board.set_sample(PinId(28), 2048);
        assert_eq!(registry.read_axes(&mut calibrator), [255, 128, 128, 128, 0, 128]);
    }

    #[test]
    fn test_read_fault_retains_previous_value() {
        let board = SimBoard::new(8);
        let mapping = ControlMapping::builder()
            .button("B", "GP3")
            .axis(Axis::LeftY, "A1")
            .build()
            .unwrap();
        let mut registry = build(&board, &mapping).unwrap();
        let profile = CalibrationProfile::default()
            .with_axis(Axis::LeftY, AxisCalibration::default().with_invert(true));
        let mut calibrator = AxisCalibrator::new(profile);

        board.press(PinId(3), true);
        board.set_sample(PinId(27), 55);
        assert_eq!(registry.read_buttons(), Buttons::B);
        assert_eq!(registry.read_axis(Axis::LeftY, &mut calibrator), 200);

        board.set_fault(PinId(3), true);
        board.set_fault(PinId(27), true);
        board.press(PinId(3), false);
        board.set_sample(PinId(27), 0);
        assert_eq!(registry.read_buttons(), Buttons::B);
        assert_eq!(registry.read_axis(Axis::LeftY, &mut calibrator), 200);
        assert_eq!(registry.read_faults(), 2);

        board.set_fault(PinId(3), false);
        assert_eq!(registry.read_buttons(), Buttons::NONE);
    }

    #[test]
    fn test_axis_fault_before_first_read_is_neutral() {
        let board = SimBoard::new(12);
        let mapping = ControlMapping::builder().axis(Axis::LeftX, "A0").build().unwrap();
        let mut registry = build(&board, &mapping).unwrap();
        let mut calibrator = AxisCalibrator::new(CalibrationProfile::default());

        board.set_fault(PinId(26), true);
        assert_eq!(registry.read_axis(Axis::LeftX, &mut calibrator), 128);
    }

    #[test]
    fn test_unknown_pin() {
        let board = SimBoard::new(12);
        let mapping = ControlMapping::builder().button("A", "D4").build().unwrap();
        let err = build(&board, &mapping).err().unwrap();
        assert!(matches!(err, RegistryError::UnknownPin(ref e) if e.label.as_str() == "D4"));
    }

    #[test]
    fn test_axis_on_digital_pin_is_rejected() {
        let board = SimBoard::new(12);
        let mapping = ControlMapping::builder()
            .button("A", "GP2")
            .axis(Axis::LeftX, "GP4")
            .build()
            .unwrap();
        let err = build(&board, &mapping).err().unwrap();
        assert!(matches!(err, RegistryError::NotAnalogCapable { .. }));
        // The button opened before the failure was released.
        assert!(!board.is_claimed(PinId(2)));
    }

    #[test]
    fn test_shared_pin_is_rejected() {
        let board = SimBoard::new(12);
        let mapping = ControlMapping::builder()
            .button("A", "GP26")
            .axis(Axis::LeftX, "A0")
            .build()
            .unwrap();
        let err = build(&board, &mapping).err().unwrap();
        assert!(matches!(err, RegistryError::PinConflict { ref label } if label.as_str() == "A0"));
        assert!(!board.is_claimed(PinId(26)));
    }

    #[test]
    fn test_drop_releases_pins() {
        let board = SimBoard::new(12);
        let registry = build(&board, &full_mapping()).unwrap();
        drop(registry);
        for pin in [2, 8, 10, 13, 26, 28] {
            assert!(!board.is_claimed(PinId(pin)));
        }
    }

    #[test]
    fn test_sixteen_buttons_fill_every_slot() {
        let names = [
            "A", "B", "X", "Y", "LB", "RB", "Start", "Select", "L3", "R3", "Home", "M1", "M2", "M3",
            "M4", "M5",
        ];
        let labels = [
            "GP0", "GP1", "GP2", "GP3", "GP4", "GP5", "GP6", "GP7", "GP8", "GP9", "GP10", "GP11",
            "GP12", "GP13", "GP14", "GP15",
        ];
        let mapping = names
            .iter()
            .zip(labels)
            .fold(ControlMapping::builder(), |b, (name, label)| b.button(name, label))
            .build()
            .unwrap();

        let board = SimBoard::new(12);
        let mut registry = build(&board, &mapping).unwrap();
        for pin in 0..16 {
            board.press(PinId(pin), true);
        }
        assert_eq!(registry.read_buttons(), Buttons(0xFFFF));

        board.press(PinId(10), false);
        assert!(!registry.read_buttons().is_slot_pressed(10));
    }
}
