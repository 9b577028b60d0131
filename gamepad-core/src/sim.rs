//! Simulated input backend for host tests and bench runs.
//!
//! A [`SimBoard`] holds the state of every pin in interior-mutable cells, so
//! a test can keep flipping levels and ADC samples while the registry built
//! from [`SimBoard::backend`] owns the handles.
//!
//! ```
//! use gamepad_core::pins::{PinId, PICO};
//! use gamepad_core::sim::SimBoard;
//! use gamepad_core::{Buttons, ControlMapping, InputRegistry};
//!
//! let board = SimBoard::new(12);
//! let mapping = ControlMapping::builder().button("A", "GP2").build().unwrap();
//! let mut registry = InputRegistry::build(&mapping, &PICO, &mut board.backend()).unwrap();
//!
//! board.press(PinId(2), true);
//! assert_eq!(registry.read_buttons(), Buttons::A);
//! ```

use core::cell::Cell;

use crate::input::{AnalogInput, DigitalInput, InputBackend, InputError};
use crate::pins::{PinId, PinInfo};

/// Number of GPIOs the simulator models.
pub const SIM_PINS: usize = 30;

/// Simulated GPIO/ADC state.
#[derive(Debug)]
pub struct SimBoard {
    pressed: [Cell<bool>; SIM_PINS],
    samples: [Cell<u16>; SIM_PINS],
    faults: [Cell<bool>; SIM_PINS],
    claimed: [Cell<bool>; SIM_PINS],
    resolution_bits: u8,
}

impl SimBoard {
    /// Board whose ADC reports samples of `resolution_bits` bits.
    #[must_use]
    pub fn new(resolution_bits: u8) -> Self {
        Self {
            pressed: core::array::from_fn(|_| Cell::new(false)),
            samples: core::array::from_fn(|_| Cell::new(0)),
            faults: core::array::from_fn(|_| Cell::new(false)),
            claimed: core::array::from_fn(|_| Cell::new(false)),
            resolution_bits,
        }
    }

    #[must_use]
    pub fn backend(&self) -> SimBackend<'_> {
        SimBackend { board: self }
    }

    /// Set the logical (already active-low decoded) state of a button pin.
    pub fn press(&self, pin: PinId, pressed: bool) {
        if let Some(cell) = self.pressed.get(usize::from(pin.0)) {
            cell.set(pressed);
        }
    }

    /// Set the raw ADC sample of an analog pin.
    pub fn set_sample(&self, pin: PinId, raw: u16) {
        if let Some(cell) = self.samples.get(usize::from(pin.0)) {
            cell.set(raw);
        }
    }

    /// Make every read of `pin` fail until cleared.
    pub fn set_fault(&self, pin: PinId, fault: bool) {
        if let Some(cell) = self.faults.get(usize::from(pin.0)) {
            cell.set(fault);
        }
    }

    /// Pin currently has an open handle.
    #[must_use]
    pub fn is_claimed(&self, pin: PinId) -> bool {
        self.claimed
            .get(usize::from(pin.0))
            .is_some_and(Cell::get)
    }

    fn claim(&self, pin: PinId) -> Result<usize, InputError> {
        let index = usize::from(pin.0);
        let cell = self.claimed.get(index).ok_or(InputError::Unavailable)?;
        if cell.replace(true) {
            return Err(InputError::Unavailable);
        }
        Ok(index)
    }

    fn read<T: Copy>(&self, cells: &[Cell<T>; SIM_PINS], index: usize) -> Result<T, InputError> {
        if self.faults[index].get() {
            return Err(InputError::Io);
        }
        Ok(cells[index].get())
    }
}

/// Backend handing out handles onto a [`SimBoard`].
#[derive(Debug, Clone, Copy)]
pub struct SimBackend<'a> {
    board: &'a SimBoard,
}

impl<'a> InputBackend for SimBackend<'a> {
    type Digital = SimDigital<'a>;
    type Analog = SimAnalog<'a>;

    fn open_digital(&mut self, pin: &PinInfo) -> Result<SimDigital<'a>, InputError> {
        let index = self.board.claim(pin.id)?;
        Ok(SimDigital {
            board: self.board,
            index,
        })
    }

    fn open_analog(&mut self, pin: &PinInfo) -> Result<SimAnalog<'a>, InputError> {
        if !pin.analog {
            return Err(InputError::Unavailable);
        }
        let index = self.board.claim(pin.id)?;
        Ok(SimAnalog {
            board: self.board,
            index,
        })
    }
}

#[derive(Debug)]
pub struct SimDigital<'a> {
    board: &'a SimBoard,
    index: usize,
}

impl DigitalInput for SimDigital<'_> {
    fn is_pressed(&mut self) -> Result<bool, InputError> {
        self.board.read(&self.board.pressed, self.index)
    }
}

impl Drop for SimDigital<'_> {
    fn drop(&mut self) {
        self.board.claimed[self.index].set(false);
    }
}

#[derive(Debug)]
pub struct SimAnalog<'a> {
    board: &'a SimBoard,
    index: usize,
}

impl AnalogInput for SimAnalog<'_> {
    fn read_raw(&mut self) -> Result<u16, InputError> {
        self.board.read(&self.board.samples, self.index)
    }

    fn resolution_bits(&self) -> u8 {
        self.board.resolution_bits
    }
}

impl Drop for SimAnalog<'_> {
    fn drop(&mut self) {
        self.board.claimed[self.index].set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::PICO;

    #[test]
    fn test_handles_claim_and_release() {
        let board = SimBoard::new(12);
        let mut backend = board.backend();
        let gp2 = PICO.resolve("GP2").unwrap();

        let handle = backend.open_digital(gp2).unwrap();
        assert!(board.is_claimed(PinId(2)));
        assert_eq!(backend.open_digital(gp2).err(), Some(InputError::Unavailable));

        drop(handle);
        assert!(!board.is_claimed(PinId(2)));
        assert!(backend.open_digital(gp2).is_ok());
    }

    #[test]
    fn test_analog_requires_adc_pin() {
        let board = SimBoard::new(12);
        let gp4 = PICO.resolve("GP4").unwrap();
        assert_eq!(board.backend().open_analog(gp4).err(), Some(InputError::Unavailable));
    }

    #[test]
    fn test_reads_follow_board_state() {
        let board = SimBoard::new(12);
        let mut backend = board.backend();
        let mut button = backend.open_digital(PICO.resolve("GP5").unwrap()).unwrap();
        let mut stick = backend.open_analog(PICO.resolve("A1").unwrap()).unwrap();

        board.press(PinId(5), true);
        board.set_sample(PinId(27), 3000);
        assert_eq!(button.is_pressed(), Ok(true));
        assert_eq!(stick.read_raw(), Ok(3000));
        assert_eq!(stick.resolution_bits(), 12);

        board.set_fault(PinId(27), true);
        assert_eq!(stick.read_raw(), Err(InputError::Io));
    }
}
