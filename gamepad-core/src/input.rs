//! Input traits: digital levels, analog samples, and the backend that opens them.

use crate::pins::PinInfo;

/// Error type for input operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputError {
    /// Transient GPIO/ADC read error.
    #[error("input read failed")]
    Io,
    /// The backend cannot hand out this pin (already taken, or no such hardware).
    #[error("pin unavailable")]
    Unavailable,
}

/// A digital input read as pressed/released.
///
/// Implementations apply the electrical convention; callers only see
/// logical state.
pub trait DigitalInput {
    fn is_pressed(&mut self) -> Result<bool, InputError>;
}

/// An analog input returning raw samples.
pub trait AnalogInput {
    /// Read one raw sample in `0..2^resolution_bits()`.
    fn read_raw(&mut self) -> Result<u16, InputError>;

    /// Resolution of [`read_raw`](Self::read_raw) in bits.
    fn resolution_bits(&self) -> u8;
}

/// Active-low button on an `embedded-hal` input pin.
///
/// Buttons short the pin to ground against the internal pull-up, so a low
/// level means pressed.
///
/// ```
/// use core::convert::Infallible;
/// use embedded_hal::digital::{ErrorType, InputPin};
/// use gamepad_core::{ActiveLow, DigitalInput};
///
/// struct Grounded;
/// impl ErrorType for Grounded {
///     type Error = Infallible;
/// }
/// impl InputPin for Grounded {
///     fn is_high(&mut self) -> Result<bool, Infallible> { Ok(false) }
///     fn is_low(&mut self) -> Result<bool, Infallible> { Ok(true) }
/// }
///
/// assert_eq!(ActiveLow::new(Grounded).is_pressed(), Ok(true));
/// ```
#[derive(Debug)]
pub struct ActiveLow<P> {
    pin: P,
}

impl<P> ActiveLow<P> {
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::InputPin> DigitalInput for ActiveLow<P> {
    fn is_pressed(&mut self) -> Result<bool, InputError> {
        self.pin.is_low().map_err(|_| InputError::Io)
    }
}

/// Opens input handles for resolved pins.
///
/// Digital inputs are configured with the internal pull-up enabled.
/// Dropping a handle releases the pin's hardware configuration.
pub trait InputBackend {
    type Digital: DigitalInput;
    type Analog: AnalogInput;

    fn open_digital(&mut self, pin: &PinInfo) -> Result<Self::Digital, InputError>;

    fn open_analog(&mut self, pin: &PinInfo) -> Result<Self::Analog, InputError>;
}
