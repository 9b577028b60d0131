//! GPIO to USB Gamepad for RP2040.
//!
//! This crate provides the embedded side of the gamepad: the pin bank that
//! opens GPIO and ADC inputs, the USB HID sink, and the compiled-in
//! configuration documents. Everything else lives in `gamepad-core`.

#![no_std]

// Re-export core types for convenience
pub use gamepad_core::{
    AxisCalibrator, ButtonStrategy, CalibrationProfile, ControlMapping, EventButtons,
    GamepadEmitter, GamepadReport, InputError, OutputError, Pacer, PolledButtons, ReportSink,
    SetupError,
};

pub mod config;
pub mod pacer;
pub mod pin_bank;
pub mod usb_output;

pub use pacer::TickerPacer;
pub use pin_bank::{AdcInput, BankRegistry, ButtonPin, PinBank, SharedAdc};
pub use usb_output::{configure_usb_hid, GamepadRequestHandler, GamepadWriter, UsbHidOutput};

/// Report period in polled and event-driven mode (100 Hz).
pub const REPORT_PERIOD_MS: u64 = 10;
