//! RP2040 input backend: hands out GPIO and ADC pins by number.

use core::cell::RefCell;

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{AnyPin, Input, Pull};
use embassy_rp::peripherals::{PIN_26, PIN_27, PIN_28};
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use gamepad_core::pins::PinInfo;
use gamepad_core::{ActiveLow, AnalogInput, InputBackend, InputError, InputRegistry};

/// GP0-GP22: the plain digital header pins.
pub const DIGITAL_PINS: usize = 23;

/// RP2040 ADC sample width.
pub const ADC_BITS: u8 = 12;

/// ADC shared by every analog input.
pub type SharedAdc = Mutex<NoopRawMutex, RefCell<Adc<'static, Blocking>>>;

/// Button handle: pulled-up input, pressed when low.
pub type ButtonPin = ActiveLow<Input<'static>>;

/// Registry over the pin bank's handles.
pub type BankRegistry = InputRegistry<ButtonPin, AdcInput>;

/// One analog input on the shared ADC.
pub struct AdcInput {
    adc: &'static SharedAdc,
    channel: Channel<'static>,
}

impl AnalogInput for AdcInput {
    fn read_raw(&mut self) -> Result<u16, InputError> {
        let channel = &mut self.channel;
        self.adc.lock(|adc| {
            let mut adc = adc.try_borrow_mut().map_err(|_| InputError::Io)?;
            adc.blocking_read(channel).map_err(|_| InputError::Io)
        })
    }

    fn resolution_bits(&self) -> u8 {
        ADC_BITS
    }
}

/// Unclaimed pins. Each pin can be opened once.
pub struct PinBank {
    digital: [Option<Peri<'static, AnyPin>>; DIGITAL_PINS],
    gp26: Option<Peri<'static, PIN_26>>,
    gp27: Option<Peri<'static, PIN_27>>,
    gp28: Option<Peri<'static, PIN_28>>,
    adc: &'static SharedAdc,
}

impl PinBank {
    pub fn new(
        digital: [Peri<'static, AnyPin>; DIGITAL_PINS],
        gp26: Peri<'static, PIN_26>,
        gp27: Peri<'static, PIN_27>,
        gp28: Peri<'static, PIN_28>,
        adc: &'static SharedAdc,
    ) -> Self {
        Self {
            digital: digital.map(Some),
            gp26: Some(gp26),
            gp27: Some(gp27),
            gp28: Some(gp28),
            adc,
        }
    }

    fn take_any(&mut self, gpio: u8) -> Option<Peri<'static, AnyPin>> {
        match gpio {
            26 => self.gp26.take().map(|p| p.into()),
            27 => self.gp27.take().map(|p| p.into()),
            28 => self.gp28.take().map(|p| p.into()),
            n => self.digital.get_mut(usize::from(n))?.take(),
        }
    }

    fn take_adc(&mut self, gpio: u8) -> Option<Channel<'static>> {
        match gpio {
            26 => self.gp26.take().map(|p| Channel::new_pin(p, Pull::None)),
            27 => self.gp27.take().map(|p| Channel::new_pin(p, Pull::None)),
            28 => self.gp28.take().map(|p| Channel::new_pin(p, Pull::None)),
            _ => None,
        }
    }
}

impl InputBackend for PinBank {
    type Digital = ButtonPin;
    type Analog = AdcInput;

    fn open_digital(&mut self, pin: &PinInfo) -> Result<ButtonPin, InputError> {
        let gpio = self.take_any(pin.id.0).ok_or(InputError::Unavailable)?;
        Ok(ActiveLow::new(Input::new(gpio, Pull::Up)))
    }

    fn open_analog(&mut self, pin: &PinInfo) -> Result<AdcInput, InputError> {
        let channel = self.take_adc(pin.id.0).ok_or(InputError::Unavailable)?;
        Ok(AdcInput {
            adc: self.adc,
            channel,
        })
    }
}
