#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Config as AdcConfig};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_rp::Peri;
use embassy_sync::blocking_mutex::Mutex;
use embassy_time::{Duration, Timer};
use gamepad_core::pins::PICO;
use gamepad_core::{AxisCalibrator, ControlMapping, InputRegistry, SetupError};
use gpio_to_gamepad::config::{load_calibration, load_mapping};
use gpio_to_gamepad::{BankRegistry, PinBank, SharedAdc};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// ADC shared by the analog inputs.
static ADC: StaticCell<SharedAdc> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("GPIO-to-Gamepad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // On-board LED on Pico, blinks on fatal setup errors
    let led = Output::new(p.PIN_25, Level::Low);

    // --- Input Setup ---
    let adc = ADC.init(Mutex::new(RefCell::new(Adc::new_blocking(
        p.ADC,
        AdcConfig::default(),
    ))));

    let mut bank = PinBank::new(
        [
            p.PIN_0.into(),
            p.PIN_1.into(),
            p.PIN_2.into(),
            p.PIN_3.into(),
            p.PIN_4.into(),
            p.PIN_5.into(),
            p.PIN_6.into(),
            p.PIN_7.into(),
            p.PIN_8.into(),
            p.PIN_9.into(),
            p.PIN_10.into(),
            p.PIN_11.into(),
            p.PIN_12.into(),
            p.PIN_13.into(),
            p.PIN_14.into(),
            p.PIN_15.into(),
            p.PIN_16.into(),
            p.PIN_17.into(),
            p.PIN_18.into(),
            p.PIN_19.into(),
            p.PIN_20.into(),
            p.PIN_21.into(),
            p.PIN_22.into(),
        ],
        p.PIN_26,
        p.PIN_27,
        p.PIN_28,
        adc,
    );

    let started = setup(&mut bank).and_then(|(mapping, registry, calibrator)| {
        start(spawner, p.USB, mapping, registry, calibrator)
    });

    if let Err(e) = started {
        error!("Setup failed: {}", e);
        blink_forever(led).await;
    }

    info!("GPIO-to-Gamepad initialized");
}

/// Load configuration and open every mapped input.
fn setup(bank: &mut PinBank) -> Result<(ControlMapping, BankRegistry, AxisCalibrator), SetupError> {
    let mapping = load_mapping()?;
    let calibrator = AxisCalibrator::new(load_calibration());
    let registry = InputRegistry::build(&mapping, &PICO, bank)?;
    Ok((mapping, registry, calibrator))
}

async fn blink_forever(mut led: Output<'static>) -> ! {
    loop {
        led.toggle();
        Timer::after(Duration::from_millis(250)).await;
    }
}

#[cfg(not(feature = "diagnostic-mode"))]
use report_mode::start;

#[cfg(feature = "diagnostic-mode")]
use diagnostic_mode::start;

#[cfg(not(feature = "diagnostic-mode"))]
mod report_mode {
    use super::*;
    use embassy_usb::class::hid::State;
    use embassy_usb::{Builder, Config as UsbConfig};
    use gamepad_core::GamepadEmitter;
    use gpio_to_gamepad::{
        configure_usb_hid, AdcInput, ButtonPin, GamepadRequestHandler, TickerPacer, UsbHidOutput,
        REPORT_PERIOD_MS,
    };

    #[cfg(feature = "event-buttons")]
    type Strategy = gamepad_core::EventButtons;
    #[cfg(not(feature = "event-buttons"))]
    type Strategy = gamepad_core::PolledButtons;

    type Emitter = GamepadEmitter<ButtonPin, AdcInput, Strategy, UsbHidOutput<'static>>;

    /// USB device configuration buffer.
    static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

    /// HID state.
    static HID_STATE: StaticCell<State> = StaticCell::new();
    static HID_HANDLER: StaticCell<GamepadRequestHandler> = StaticCell::new();

    pub(super) fn start(
        spawner: Spawner,
        usb: Peri<'static, USB>,
        _mapping: ControlMapping,
        registry: BankRegistry,
        calibrator: AxisCalibrator,
    ) -> Result<(), SetupError> {
        // --- USB Setup ---
        let usb_driver = Driver::new(usb, Irqs);

        let mut usb_config = UsbConfig::new(0x1209, 0x0001); // pid.codes test VID/PID
        usb_config.manufacturer = Some("Rust Gamepad");
        usb_config.product = Some("GPIO Gamepad");
        usb_config.serial_number = Some("001");
        usb_config.max_power = 100;
        usb_config.max_packet_size_0 = 64;

        let mut builder = Builder::new(
            usb_driver,
            usb_config,
            CONFIG_DESCRIPTOR.init([0; 256]),
            BOS_DESCRIPTOR.init([0; 256]),
            MSOS_DESCRIPTOR.init([0; 256]),
            CONTROL_BUF.init([0; 64]),
        );

        // Configure HID class
        let hid_writer = configure_usb_hid(
            &mut builder,
            HID_STATE.init(State::new()),
            HID_HANDLER.init(GamepadRequestHandler),
        );

        // Build the USB device
        let usb_device = builder.build();

        let output = UsbHidOutput::new(hid_writer);
        let emitter = GamepadEmitter::new(registry, calibrator, Strategy::default(), output);

        let usb = usb_task(usb_device).map_err(|_| SetupError::TransportUnavailable)?;
        spawner.spawn(usb);
        spawner.spawn(pad_task(emitter).unwrap());
        Ok(())
    }

    /// USB device task - runs the USB stack.
    #[embassy_executor::task]
    async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
        device.run().await;
    }

    /// Report task - samples inputs and sends a report every period.
    #[embassy_executor::task]
    async fn pad_task(mut emitter: Emitter) {
        // Wait for USB to be ready
        emitter.sink_mut().wait_ready().await;
        info!("USB HID ready, sending reports every {} ms", REPORT_PERIOD_MS);

        let mut pacer = TickerPacer::every(Duration::from_millis(REPORT_PERIOD_MS));
        emitter.run(&mut pacer).await;
    }
}

#[cfg(feature = "diagnostic-mode")]
mod diagnostic_mode {
    use super::*;
    use embassy_time::Ticker;
    use gamepad_core::diagnostics::{axis_bar, dpad_glyphs, Frame, UPDATE_HZ};
    use gamepad_core::Axis;
    use heapless::String;

    static MAPPING: StaticCell<ControlMapping> = StaticCell::new();

    pub(super) fn start(
        spawner: Spawner,
        _usb: Peri<'static, USB>,
        mapping: ControlMapping,
        registry: BankRegistry,
        calibrator: AxisCalibrator,
    ) -> Result<(), SetupError> {
        let mapping = MAPPING.init(mapping);
        spawner.spawn(diagnostics_task(registry, calibrator, mapping).unwrap());
        Ok(())
    }

    /// Logs every control instead of sending reports.
    #[embassy_executor::task]
    async fn diagnostics_task(
        mut registry: BankRegistry,
        mut calibrator: AxisCalibrator,
        mapping: &'static ControlMapping,
    ) {
        info!("Diagnostic mode, logging at {} Hz", UPDATE_HZ);
        let mut ticker = Ticker::every(Duration::from_hz(UPDATE_HZ));

        loop {
            let frame = Frame::sample(&mut registry, &mut calibrator);

            let mut pressed: String<288> = String::new();
            for button in mapping.buttons() {
                if frame.buttons.is_slot_pressed(usize::from(button.slot)) {
                    let _ = pressed.push_str(&button.name);
                    let _ = pressed.push(' ');
                }
            }
            info!("Buttons [{}]", pressed.trim_end());

            for axis in Axis::ALL {
                if let Some(value) = frame.axes[axis.index()] {
                    info!("{} {} [{}]", axis.name(), value, axis_bar(axis, Some(value)).as_str());
                }
            }
            info!("DPad [{}]", dpad_glyphs(&frame.dpad).as_str());

            ticker.next().await;
        }
    }
}
