//! Platform-agnostic GPIO-to-HID gamepad pipeline.
//!
//! This crate provides everything between the pins and the USB report
//! without any platform-specific dependencies. It can be used both in
//! embedded `no_std` environments and on host for testing.
//!
//! # Overview
//!
//! The crate is organized into several modules:
//!
//! - [`pins`]: Pin label resolution ([`PinCatalog`], [`pins::PICO`])
//! - [`mapping`]: Which pin drives which control ([`ControlMapping`])
//! - [`calibration`]: Raw sample to 0-255 axis value ([`AxisCalibrator`])
//! - [`input`]: Input traits ([`DigitalInput`], [`AnalogInput`], [`InputBackend`])
//! - [`registry`]: Opened input handles ([`InputRegistry`])
//! - [`buttons`]: Polled or event-driven button sourcing ([`ButtonStrategy`])
//! - [`output`]: Report sink trait ([`ReportSink`])
//! - [`emitter`]: The report loop ([`GamepadEmitter`])
//! - [`diagnostics`]: Text rendering for diagnostic mode
//! - [`sim`]: Simulated backend for tests without hardware
//!
//! # Data Flow
//!
//! ```text
//! ControlMapping ──► InputRegistry ──┬─► ButtonStrategy ──┐
//!                                    ├─► DpadState::hat ──┼─► GamepadReport ──► ReportSink
//!                                    └─► AxisCalibrator ──┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use gamepad_core::pins::{PinId, PICO};
//! use gamepad_core::sim::SimBoard;
//! use gamepad_core::{
//!     Axis, AxisCalibration, AxisCalibrator, CalibrationProfile, ControlMapping, InputRegistry,
//! };
//!
//! let mapping = ControlMapping::builder().axis(Axis::LeftX, "A0").build().unwrap();
//! let board = SimBoard::new(8);
//! let mut registry = InputRegistry::build(&mapping, &PICO, &mut board.backend()).unwrap();
//!
//! let profile = CalibrationProfile::default()
//!     .with_axis(Axis::LeftX, AxisCalibration::default().with_deadzone(12));
//! let mut calibrator = AxisCalibrator::new(profile);
//!
//! board.set_sample(PinId(26), 130);
//! assert_eq!(registry.read_axes(&mut calibrator), [128, 128, 128, 128, 0, 0]);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting and read/send fault logging
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` by default and uses no heap allocations,
//! making it suitable for embedded systems with limited resources.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod buttons;
pub mod calibration;
pub mod config;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod input;
pub mod mapping;
pub mod output;
pub mod pins;
pub mod registry;
pub mod sim;
pub mod types;

// Re-export main types at crate root
pub use buttons::{ButtonEvent, ButtonStrategy, ButtonUpdate, EventButtons, PolledButtons};
pub use calibration::{AxisCalibration, AxisCalibrator, CalibrationProfile, DeadzonePolicy};
pub use config::ConfigError;
pub use emitter::{EmitterStats, GamepadEmitter, Pacer, TickStats};
pub use error::SetupError;
pub use gamepad_report::{Buttons, GamepadReport, Hat, REPORT_DESCRIPTOR};
pub use input::{ActiveLow, AnalogInput, DigitalInput, InputBackend, InputError};
pub use mapping::{ControlMapping, MappingBuilder};
pub use output::{OutputError, ReportSink};
pub use pins::{PinCatalog, PinId, UnknownPin};
pub use registry::{InputRegistry, RegistryError};
pub use types::{Axis, DpadDirection, DpadState};
